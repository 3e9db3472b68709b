//! Color themes
//!
//! A theme maps style categories to colors for one light or dark
//! variant. The built-in Monokai pair is always available; more can be
//! loaded from a TOML file shaped like:
//!
//! ```toml
//! [Solar.dark]
//! foreground = "#f8f8f2"
//! background = "#272822"
//!
//! [Solar.dark.styles]
//! COMMENT = "#736643"
//! RULE_NAME = "#e7db74"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use toml::{Table, Value};
use tracing::debug;

use super::style::{Color, Style, StyleCategory};
use crate::error::{EditorError, Result};

/// Light or dark half of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Light,
    Dark,
}

impl Variant {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Variant::Dark
        } else {
            Variant::Light
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "light" => Some(Variant::Light),
            "dark" => Some(Variant::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub variant: Variant,
    pub foreground: Color,
    pub background: Color,
    colors: HashMap<StyleCategory, Color>,
}

impl Theme {
    /// Color assigned to a category, if the theme has one
    pub fn color(&self, category: StyleCategory) -> Option<Color> {
        self.colors.get(&category).copied()
    }

    /// Display style for a category
    ///
    /// Categories the theme leaves out fall back to the default text
    /// color when they have no color of their own.
    pub fn style_for(&self, category: StyleCategory, bold: bool) -> Style {
        let category = category.palette_key();
        let fg = self.color(category).unwrap_or_else(|| match category.default_style().fg {
            Color::Default => self.foreground,
            color => color,
        });
        Style::fg(fg).with_bg(self.background).with_bold(bold)
    }
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const MONOKAI_DARK: &[(StyleCategory, u32)] = &[
    (StyleCategory::RuleSection, 0xe7db74),
    (StyleCategory::Comparison, 0xa6e22b),
    (StyleCategory::Directive, 0xf9245e),
    (StyleCategory::Architecture, 0xc678dd),
    (StyleCategory::Comment, 0x736643),
    (StyleCategory::Number, 0xac7db8),
    (StyleCategory::RuleName, 0xe7db74),
    (StyleCategory::Variable, 0xff00cc),
    (StyleCategory::Keyword, 0x6495ed),
    (StyleCategory::Builtin, 0x56b6c2),
    (StyleCategory::Operator, 0x56b6c2),
    (StyleCategory::Bracket, 0xc678dd),
    (StyleCategory::Constant, 0xd19a5e),
    (StyleCategory::ClassName, 0xc68f55),
    (StyleCategory::FunctionName, 0x61afd1),
    (StyleCategory::String, 0x98c379),
];

const MONOKAI_LIGHT: &[(StyleCategory, u32)] = &[
    (StyleCategory::RuleSection, 0x755f00),
    (StyleCategory::Comparison, 0x22863a),
    (StyleCategory::Directive, 0xd70040),
    (StyleCategory::Architecture, 0xb847e1),
    (StyleCategory::Comment, 0x8b7765),
    (StyleCategory::Number, 0x9842a0),
    (StyleCategory::RuleName, 0x755f00),
    (StyleCategory::Variable, 0xcc0077),
    (StyleCategory::Keyword, 0x005ab5),
    (StyleCategory::Builtin, 0x0086b3),
    (StyleCategory::Operator, 0x0086b3),
    (StyleCategory::Bracket, 0x6f42c1),
    (StyleCategory::Constant, 0xb35900),
    (StyleCategory::ClassName, 0x8a5a00),
    (StyleCategory::FunctionName, 0x005cc5),
    (StyleCategory::String, 0x50a14f),
];

/// Named themes, each with up to two variants
#[derive(Debug, Clone, Default)]
pub struct ThemeSet {
    themes: HashMap<(String, Variant), Theme>,
}

impl ThemeSet {
    pub const DEFAULT_THEME: &'static str = "Monokai";

    /// The themes that ship with the editor
    pub fn builtin() -> Self {
        let mut set = Self::default();
        for (variant, foreground, background, palette) in [
            (Variant::Light, 0x49483e, 0xf8f8f2, MONOKAI_LIGHT),
            (Variant::Dark, 0xf8f8f2, 0x272822, MONOKAI_DARK),
        ] {
            set.insert(Theme {
                name: Self::DEFAULT_THEME.to_string(),
                variant,
                foreground: rgb(foreground),
                background: rgb(background),
                colors: palette.iter().map(|&(category, hex)| (category, rgb(hex))).collect(),
            });
        }
        set
    }

    /// Parse themes from TOML source
    pub fn parse(source: &str) -> Result<Self> {
        let table: Table = source.parse()?;
        let mut set = Self::default();

        for (name, value) in &table {
            let Value::Table(variants) = value else {
                return Err(EditorError::Message(format!("theme '{name}' must be a table")));
            };
            for (key, body) in variants {
                let variant = Variant::from_key(key).ok_or_else(|| {
                    EditorError::Message(format!("theme '{name}' has unknown variant '{key}'"))
                })?;
                let Value::Table(body) = body else {
                    return Err(EditorError::Message(format!("theme '{name}.{key}' must be a table")));
                };
                set.insert(parse_theme(name, variant, body)?);
            }
        }

        Ok(set)
    }

    /// Load themes from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EditorError::FileNotFound(path.display().to_string()));
        }
        let set = Self::parse(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), themes = set.themes.len(), "loaded theme file");
        Ok(set)
    }

    /// Add every theme of `other`, replacing same-named variants
    pub fn merge(&mut self, other: ThemeSet) {
        self.themes.extend(other.themes);
    }

    pub fn insert(&mut self, theme: Theme) {
        self.themes.insert((theme.name.clone(), theme.variant), theme);
    }

    pub fn get(&self, name: &str, variant: Variant) -> Option<&Theme> {
        self.themes.get(&(name.to_string(), variant))
    }

    /// Theme names, sorted and deduplicated
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|(name, _)| name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

fn parse_theme(name: &str, variant: Variant, body: &Table) -> Result<Theme> {
    let color = |key: &str, value: &Value| -> Result<Color> {
        value
            .as_str()
            .and_then(Color::from_hex)
            .ok_or_else(|| EditorError::InvalidColor(format!("{name}.{key}"), value.to_string()))
    };

    let foreground = match body.get("foreground") {
        Some(value) => color("foreground", value)?,
        None => Color::Default,
    };
    let background = match body.get("background") {
        Some(value) => color("background", value)?,
        None => Color::Default,
    };

    let mut colors = HashMap::new();
    if let Some(styles) = body.get("styles") {
        let Value::Table(styles) = styles else {
            return Err(EditorError::Message(format!("theme '{name}' styles must be a table")));
        };
        for (key, value) in styles {
            let category = StyleCategory::from_name(key)
                .ok_or_else(|| EditorError::Message(format!("theme '{name}' has unknown style '{key}'")))?;
            colors.insert(category, color(key, value)?);
        }
    }

    Ok(Theme {
        name: name.to_string(),
        variant,
        foreground,
        background,
        colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOLAR: &str = r##"
[Solar.dark]
foreground = "#eeeeee"
background = "#101010"

[Solar.dark.styles]
comment = "#736643"
RULE_NAME = "#e7db74"

[Solar.light]
foreground = "#111111"
"##;

    #[test]
    fn test_builtin_monokai() {
        let set = ThemeSet::builtin();
        assert_eq!(set.names(), vec!["Monokai"]);

        let dark = set.get("Monokai", Variant::Dark).unwrap();
        assert_eq!(dark.background, Color::Rgb(0x27, 0x28, 0x22));
        assert_eq!(dark.color(StyleCategory::RuleSection), Some(Color::Rgb(0xe7, 0xdb, 0x74)));

        let light = set.get("Monokai", Variant::Light).unwrap();
        assert_eq!(light.foreground, Color::Rgb(0x49, 0x48, 0x3e));
        assert_eq!(light.color(StyleCategory::Keyword), Some(Color::Rgb(0x00, 0x5a, 0xb5)));
    }

    #[test]
    fn test_style_for_falls_back_to_foreground() {
        let set = ThemeSet::builtin();
        let dark = set.get("Monokai", Variant::Dark).unwrap();

        let parens = dark.style_for(StyleCategory::Parenthesis, false);
        assert_eq!(parens.fg, dark.foreground);
        assert_eq!(parens.bg, dark.background);
        assert!(!parens.bold);

        let rule = dark.style_for(StyleCategory::RuleName, true);
        assert_eq!(rule.fg, Color::Rgb(0xe7, 0xdb, 0x74));
        assert!(rule.bold);

        // closing quotes are drawn like the rest of the string
        let closing = dark.style_for(StyleCategory::StringEnd, false);
        assert_eq!(closing.fg, Color::Rgb(0x98, 0xc3, 0x79));
        assert_eq!(closing, dark.style_for(StyleCategory::String, false));
    }

    #[test]
    fn test_parse_theme_file() {
        let set = ThemeSet::parse(SOLAR).unwrap();
        let dark = set.get("Solar", Variant::Dark).unwrap();
        assert_eq!(dark.foreground, Color::Rgb(0xee, 0xee, 0xee));
        assert_eq!(dark.color(StyleCategory::Comment), Some(Color::Rgb(0x73, 0x66, 0x43)));
        assert_eq!(dark.color(StyleCategory::Variable), None);
        // no palette entry and no color of its own
        assert_eq!(dark.style_for(StyleCategory::Default, false).fg, dark.foreground);

        let light = set.get("Solar", Variant::Light).unwrap();
        assert_eq!(light.background, Color::Default);
    }

    #[test]
    fn test_merge_keeps_builtin() {
        let mut set = ThemeSet::builtin();
        set.merge(ThemeSet::parse(SOLAR).unwrap());
        assert_eq!(set.names(), vec!["Monokai", "Solar"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(ThemeSet::parse("x = ["), Err(EditorError::ThemeFormat(_))));
        assert!(matches!(
            ThemeSet::parse("[A.dark]\nforeground = \"red\""),
            Err(EditorError::InvalidColor(_, _))
        ));
        assert!(matches!(ThemeSet::parse("[A.dim]\n"), Err(EditorError::Message(_))));
        assert!(matches!(
            ThemeSet::parse("[A.dark.styles]\nSPARKLE = \"#000000\""),
            Err(EditorError::Message(_))
        ));
        assert!(matches!(ThemeSet::parse("A = 1"), Err(EditorError::Message(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ThemeSet::load(Path::new("/nonexistent/themes.toml"));
        assert!(matches!(result, Err(EditorError::FileNotFound(_))));
    }
}
