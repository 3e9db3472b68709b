//! Configuration file support
//!
//! Loads settings from ~/.epiccoder.conf (or %USERPROFILE%\.epiccoder.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # epiccoder configuration
//! theme = Monokai
//! dark-mode = true
//! theme-file = /home/me/themes.toml
//! search-ignore-case = true
//! max-search-results = 500
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::error::{EditorError, Result};
use crate::lexer::{Theme, ThemeSet, Variant};
use crate::search::{SearchOptions, DEFAULT_MAX_RESULTS};

/// Largest accepted `max-search-results`
const MAX_SEARCH_RESULTS: usize = 100_000;

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Theme name
    pub theme: String,
    /// Use the dark variant of the theme
    pub dark_mode: bool,
    /// Extra TOML theme file
    pub theme_file: Option<PathBuf>,
    /// Default search settings
    pub search_ignore_case: bool,
    pub search_hidden: bool,
    pub search_regex: bool,
    pub max_search_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeSet::DEFAULT_THEME.to_string(),
            dark_mode: true,
            theme_file: None,
            search_ignore_case: false,
            search_hidden: false,
            search_regex: false,
            max_search_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".epiccoder.conf"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".epiccoder.conf"))
        }
    }

    /// Load configuration from file
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if let Ok(contents) = fs::read_to_string(&path) {
                let settings = Self::parse(&contents);
                config.apply(&settings);
            }
        }

        config
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            } else {
                warn!(line, "ignoring config line without '='");
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("theme") {
            if !value.is_empty() {
                self.theme = value.clone();
            }
        }

        if let Some(value) = settings.get("dark-mode") {
            self.dark_mode = parse_bool(value);
        }

        if let Some(value) = settings.get("theme-file") {
            self.theme_file = (!value.is_empty()).then(|| PathBuf::from(value));
        }

        if let Some(value) = settings.get("search-ignore-case") {
            self.search_ignore_case = parse_bool(value);
        }

        if let Some(value) = settings.get("search-hidden") {
            self.search_hidden = parse_bool(value);
        }

        if let Some(value) = settings.get("search-regex") {
            self.search_regex = parse_bool(value);
        }

        if let Some(value) = settings.get("max-search-results") {
            if let Ok(n) = value.parse::<usize>() {
                self.max_search_results = n.clamp(1, MAX_SEARCH_RESULTS);
            }
        }
    }

    /// Resolve the configured theme
    pub fn theme(&self) -> Result<Theme> {
        let mut themes = ThemeSet::builtin();
        if let Some(path) = &self.theme_file {
            themes.merge(ThemeSet::load(path)?);
        }
        themes
            .get(&self.theme, Variant::from_dark(self.dark_mode))
            .cloned()
            .ok_or_else(|| EditorError::UnknownTheme(self.theme.clone()))
    }

    /// Search settings used when a search does not override them
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            ignore_case: self.search_ignore_case,
            regex: self.search_regex,
            include_hidden: self.search_hidden,
            max_results: self.max_search_results,
        }
    }

    /// Render the configuration in file format
    pub fn to_file_contents(&self) -> String {
        format!(
            "# epiccoder configuration\n\
             # Generated automatically\n\n\
             theme = {}\n\
             dark-mode = {}\n\
             theme-file = {}\n\
             search-ignore-case = {}\n\
             search-hidden = {}\n\
             search-regex = {}\n\
             max-search-results = {}\n",
            self.theme,
            self.dark_mode,
            self.theme_file.as_ref().map(|p| p.display().to_string()).unwrap_or_default(),
            self.search_ignore_case,
            self.search_hidden,
            self.search_regex,
            self.max_search_results
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            fs::write(path, self.to_file_contents())?;
        }
        Ok(())
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
theme = Solar
dark-mode = false
max-search-results = 60
not a setting
        "#;

        let settings = Config::parse(contents);
        assert_eq!(settings.get("theme"), Some(&"Solar".to_string()));
        assert_eq!(settings.get("dark-mode"), Some(&"false".to_string()));
        assert_eq!(settings.get("max-search-results"), Some(&"60".to_string()));
        assert_eq!(settings.len(), 3);
    }

    #[test]
    fn test_apply_settings() {
        let mut config = Config::default();
        let mut settings = HashMap::new();
        settings.insert("theme".to_string(), "Solar".to_string());
        settings.insert("dark-mode".to_string(), "off".to_string());
        settings.insert("theme-file".to_string(), "/tmp/themes.toml".to_string());
        settings.insert("search-ignore-case".to_string(), "yes".to_string());
        settings.insert("max-search-results".to_string(), "0".to_string());

        config.apply(&settings);

        assert_eq!(config.theme, "Solar");
        assert!(!config.dark_mode);
        assert_eq!(config.theme_file, Some(PathBuf::from("/tmp/themes.toml")));
        assert!(config.search_ignore_case);
        assert_eq!(config.max_search_results, 1);

        let options = config.search_options();
        assert!(options.ignore_case);
        assert!(!options.regex);
        assert_eq!(options.max_results, 1);
    }

    #[test]
    fn test_file_contents_roundtrip() {
        let config = Config {
            theme_file: Some(PathBuf::from("/tmp/t.toml")),
            search_regex: true,
            ..Default::default()
        };

        let mut parsed = Config::default();
        parsed.apply(&Config::parse(&config.to_file_contents()));
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_theme_resolution() {
        let config = Config::default();
        let theme = config.theme().unwrap();
        assert_eq!(theme.name, "Monokai");
        assert_eq!(theme.variant, Variant::Dark);

        let unknown = Config {
            theme: "Nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(unknown.theme(), Err(EditorError::UnknownTheme(_))));
    }

    #[test]
    fn test_theme_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("themes.toml");
        fs::write(&path, "[Solar.light]\nforeground = \"#111111\"\n").unwrap();

        let config = Config {
            theme: "Solar".to_string(),
            dark_mode: false,
            theme_file: Some(path),
            ..Default::default()
        };
        let theme = config.theme().unwrap();
        assert_eq!(theme.variant, Variant::Light);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("True"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(parse_bool("1"));

        assert!(!parse_bool("false"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }
}
