//! Style categories and display attributes
//!
//! Lexers only ever produce [`StyleCategory`] values. Colors and font
//! weight are attached later from a theme and the lexer's registry.

/// Display colors: the ANSI palette plus 24-bit theme colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightBlue,
    BrightMagenta,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a `#rrggbb` color
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Visual category assigned to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleCategory {
    /// Plain text
    #[default]
    Default,
    /// `if` / `then` rule sections
    RuleSection,
    /// Comparison words (`equal`, `greater`, ...)
    Comparison,
    /// Rule binding directives (`unique`, `use-only-one`, ...)
    Directive,
    /// Architecture names (`goal`, `visual`, `motor`, ...)
    Architecture,
    /// Line comments
    Comment,
    /// Integer literals
    Number,
    /// Production-rule names
    RuleName,
    /// `?name` variables
    Variable,
    /// Language keywords and rule actions
    Keyword,
    /// `(` and `)` in rule files
    Parenthesis,
    /// Builtin function names
    Builtin,
    /// Operator characters
    Operator,
    /// Brackets in source code
    Bracket,
    /// Named constants (`self`, `NULL`, ...)
    Constant,
    /// Name introduced by a class-like declaration
    ClassName,
    /// Name introduced by a function declaration
    FunctionName,
    /// String literal up to its closing quote
    String,
    /// Closing quote of a string literal
    StringEnd,
}

impl StyleCategory {
    pub const ALL: [StyleCategory; 19] = [
        StyleCategory::Default,
        StyleCategory::RuleSection,
        StyleCategory::Comparison,
        StyleCategory::Directive,
        StyleCategory::Architecture,
        StyleCategory::Comment,
        StyleCategory::Number,
        StyleCategory::RuleName,
        StyleCategory::Variable,
        StyleCategory::Keyword,
        StyleCategory::Parenthesis,
        StyleCategory::Builtin,
        StyleCategory::Operator,
        StyleCategory::Bracket,
        StyleCategory::Constant,
        StyleCategory::ClassName,
        StyleCategory::FunctionName,
        StyleCategory::String,
        StyleCategory::StringEnd,
    ];

    /// Fallback style used when a theme has no color for this category
    pub fn default_style(&self) -> Style {
        match self {
            StyleCategory::Default | StyleCategory::Parenthesis => Style::default(),
            StyleCategory::RuleSection | StyleCategory::RuleName => Style::fg(Color::Yellow),
            StyleCategory::Comparison => Style::fg(Color::Green),
            StyleCategory::Directive => Style::fg(Color::Red),
            StyleCategory::Architecture => Style::fg(Color::Magenta),
            StyleCategory::Comment => Style::fg(Color::BrightBlack),
            StyleCategory::Number | StyleCategory::Constant => Style::fg(Color::Cyan),
            StyleCategory::Variable => Style::fg(Color::BrightMagenta),
            StyleCategory::Keyword => Style::fg(Color::Blue),
            StyleCategory::Builtin | StyleCategory::FunctionName => Style::fg(Color::BrightBlue),
            StyleCategory::Operator | StyleCategory::Bracket => Style::fg(Color::White),
            StyleCategory::ClassName => Style::fg(Color::Yellow),
            StyleCategory::String | StyleCategory::StringEnd => Style::fg(Color::Green),
        }
    }

    /// Category whose theme color this one is drawn with
    pub fn palette_key(&self) -> StyleCategory {
        match self {
            StyleCategory::StringEnd => StyleCategory::String,
            other => *other,
        }
    }

    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            StyleCategory::Default => "DEFAULT",
            StyleCategory::RuleSection => "RULE_SECTION",
            StyleCategory::Comparison => "COMPARISON",
            StyleCategory::Directive => "DIRECTIVE",
            StyleCategory::Architecture => "ARCHITECTURE",
            StyleCategory::Comment => "COMMENT",
            StyleCategory::Number => "NUMBER",
            StyleCategory::RuleName => "RULE_NAME",
            StyleCategory::Variable => "VARIABLE",
            StyleCategory::Keyword => "KEYWORD",
            StyleCategory::Parenthesis => "PARENS",
            StyleCategory::Builtin => "BUILTIN",
            StyleCategory::Operator => "OPERATOR",
            StyleCategory::Bracket => "BRACKETS",
            StyleCategory::Constant => "CONSTANT",
            StyleCategory::ClassName => "CLASS_NAME",
            StyleCategory::FunctionName => "FUNCTION_NAME",
            StyleCategory::String => "STRING",
            StyleCategory::StringEnd => "STRING_END",
        }
    }

    /// Parse a category from its name (for theme files)
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|category| category.name() == upper)
    }
}
