//! Plain text lexer: integers are the only thing highlighted

use super::host::{RangeContext, StyleRun};
use super::registry::StyleRegistry;
use super::scanner::{Scanner, Token};
use super::style::StyleCategory;
use super::{is_number, Styler};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct PlainTextLexer {
    scanner: Scanner,
    registry: StyleRegistry,
}

impl PlainTextLexer {
    pub const LANGUAGE: &'static str = "Text_Lexer";

    pub fn new() -> Result<Self> {
        Ok(Self {
            scanner: Scanner::standard()?,
            registry: StyleRegistry::new(
                Self::LANGUAGE,
                &[(StyleCategory::Default, false), (StyleCategory::Number, false)],
            ),
        })
    }
}

impl Styler for PlainTextLexer {
    fn language(&self) -> &'static str {
        Self::LANGUAGE
    }

    fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    fn style_tokens(&self, tokens: Vec<Token<'_>>, _context: &RangeContext<'_>) -> Vec<StyleRun> {
        tokens
            .iter()
            .map(|token| {
                let style = if is_number(token.text) {
                    StyleCategory::Number
                } else {
                    StyleCategory::Default
                };
                StyleRun::new(token.byte_len(), style)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numbers_only() {
        let lexer = PlainTextLexer::new().unwrap();
        let runs = lexer.style_str("a 12 b3 // 7");
        let styles: Vec<_> = runs.iter().map(|r| r.style).collect();
        assert_eq!(
            styles,
            vec![
                StyleCategory::Default,
                StyleCategory::Default,
                StyleCategory::Number,
                StyleCategory::Default,
                StyleCategory::Default,
                StyleCategory::Default,
                StyleCategory::Default,
                StyleCategory::Default,
                StyleCategory::Number,
            ]
        );
    }

    #[test]
    fn test_registry() {
        let lexer = PlainTextLexer::new().unwrap();
        assert_eq!(lexer.language(), "Text_Lexer");
        assert_eq!(lexer.description(0), "DEFAULT");
        assert_eq!(lexer.description(1), "NUMBER");
        assert_eq!(lexer.description(2), "");
    }
}
