//! Per-language style registry
//!
//! Numbers the categories a lexer can emit and records their font
//! weight. Hosts that store integer style ids use this table to map
//! them back to categories and names.

use super::style::StyleCategory;

/// One registered style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleEntry {
    /// Style id as stored by the host
    pub id: u8,
    pub category: StyleCategory,
    /// Whether this category is drawn in a bold font
    pub bold: bool,
}

/// Immutable id <-> category table for one lexer
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    language: &'static str,
    entries: Vec<StyleEntry>,
}

impl StyleRegistry {
    /// Build a registry; ids are assigned in order starting at 0
    pub fn new(language: &'static str, styles: &[(StyleCategory, bool)]) -> Self {
        let entries = styles
            .iter()
            .zip(0u8..)
            .map(|(&(category, bold), id)| StyleEntry { id, category, bold })
            .collect();
        Self { language, entries }
    }

    /// Language name the registry belongs to
    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    /// Look up a category by style id
    pub fn category(&self, id: u8) -> Option<StyleCategory> {
        self.entries.get(id as usize).map(|entry| entry.category)
    }

    /// Look up the style id of a category
    pub fn id_of(&self, category: StyleCategory) -> Option<u8> {
        self.entry(category).map(|entry| entry.id)
    }

    pub fn entry(&self, category: StyleCategory) -> Option<&StyleEntry> {
        self.entries.iter().find(|entry| entry.category == category)
    }

    /// Name of a style id, or an empty string if the id is unknown
    pub fn description(&self, id: u8) -> &'static str {
        self.category(id).map_or("", |category| category.name())
    }

    pub fn is_bold(&self, category: StyleCategory) -> bool {
        self.entry(category).is_some_and(|entry| entry.bold)
    }
}
