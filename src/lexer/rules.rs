//! Production-rule language lexer (`.prs` files)
//!
//! Rule files are parenthesized s-expressions: a rule name on its own
//! line after `(`, `if`/`then` sections, `?name` variables, and `;` or
//! `//` line comments. Words are matched case-insensitively.

use std::collections::HashSet;

use super::cursor::TokenCursor;
use super::host::{RangeContext, StyleRun};
use super::registry::StyleRegistry;
use super::scanner::{CommentLead, Scanner, Token};
use super::style::StyleCategory;
use super::{is_number, Styler};
use crate::error::Result;

/// File extension of rule files
pub(crate) const EXTENSION: &str = "prs";

const RULE_SECTIONS: &[&str] = &["if", "then"];

const COMPARISONS: &[&str] = &[
    "not",
    "equal",
    "greater",
    "least",
    "different",
    "less-than",
    "less_than",
    "greater-than",
    "greater_than",
    "equal-to",
    "equal_to",
];

const DIRECTIVES: &[&str] = &[
    "if-only-one",
    "if_only_one",
    "use-only-one",
    "use_only_one",
    "randomly-choose-one",
    "randomly_choose_one",
    "unique",
];

const ARCHITECTURES: &[&str] = &[
    "goal",
    "step",
    "tag",
    "visual",
    "auditory",
    "tactile",
    "more",
    "initial-memory-contents",
    "initial_memory_contents",
    "parameters",
    "named-location",
    "named_location",
    "motor",
    "ocular",
    "manual",
    "vocal",
];

const KEYWORDS: &[&str] = &[
    "add",
    "adddb",
    "del",
    "delete",
    "log",
    "define",
    "set-mode",
    "set_mode",
    "send-to-motor",
    "send_to_motor",
    "delay-countdown",
    "delay_countdown",
    "increment",
    "send-to-temporal",
    "send_to_temporal",
];

/// Keyword classes of the rule language
///
/// Built once per lexer and only read afterwards.
#[derive(Debug, Clone)]
pub struct RuleTables {
    rule_sections: HashSet<&'static str>,
    comparisons: HashSet<&'static str>,
    directives: HashSet<&'static str>,
    architectures: HashSet<&'static str>,
    keywords: HashSet<&'static str>,
}

impl RuleTables {
    pub fn new() -> Self {
        Self {
            rule_sections: RULE_SECTIONS.iter().copied().collect(),
            comparisons: COMPARISONS.iter().copied().collect(),
            directives: DIRECTIVES.iter().copied().collect(),
            architectures: ARCHITECTURES.iter().copied().collect(),
            keywords: KEYWORDS.iter().copied().collect(),
        }
    }

    /// Keyword class of a lowercased word, if it has one
    pub fn classify(&self, word: &str) -> Option<StyleCategory> {
        if self.rule_sections.contains(word) {
            Some(StyleCategory::RuleSection)
        } else if self.comparisons.contains(word) {
            Some(StyleCategory::Comparison)
        } else if self.directives.contains(word) {
            Some(StyleCategory::Directive)
        } else if self.architectures.contains(word) {
            Some(StyleCategory::Architecture)
        } else if self.keywords.contains(word) {
            Some(StyleCategory::Keyword)
        } else {
            None
        }
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct RuleLexer {
    scanner: Scanner,
    tables: RuleTables,
    registry: StyleRegistry,
}

impl RuleLexer {
    pub const LANGUAGE: &'static str = "PPS_Rule_Lexer";

    pub fn new() -> Result<Self> {
        Ok(Self {
            scanner: Scanner::new(&[CommentLead::SLASHES, CommentLead::SEMICOLON])?,
            tables: RuleTables::new(),
            registry: StyleRegistry::new(
                Self::LANGUAGE,
                &[
                    (StyleCategory::Default, false),
                    (StyleCategory::RuleSection, true),
                    (StyleCategory::Comparison, true),
                    (StyleCategory::Directive, true),
                    (StyleCategory::Architecture, true),
                    (StyleCategory::Comment, false),
                    (StyleCategory::Number, false),
                    (StyleCategory::RuleName, true),
                    (StyleCategory::Variable, false),
                    (StyleCategory::Keyword, true),
                    (StyleCategory::Parenthesis, false),
                ],
            ),
        })
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    /// Fallback for words with no fixed class
    fn contextual(word: &str, previous: Option<&str>, next_breaks_line: bool) -> StyleCategory {
        match previous {
            // a bare name right after `(` that ends its line
            Some("(") if word.chars().count() > 2 && next_breaks_line => StyleCategory::RuleName,
            Some("?" | " " | "(") if word == "?" => StyleCategory::Variable,
            Some("?") if !word.contains('?') => StyleCategory::Variable,
            _ => StyleCategory::Default,
        }
    }
}

impl Styler for RuleLexer {
    fn language(&self) -> &'static str {
        Self::LANGUAGE
    }

    fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    fn style_tokens(&self, tokens: Vec<Token<'_>>, context: &RangeContext<'_>) -> Vec<StyleRun> {
        let mut runs = Vec::with_capacity(tokens.len());
        let mut cursor = TokenCursor::new(tokens, context.previous);
        let mut in_comment = context.in_comment;

        while let Some(token) = cursor.next() {
            if in_comment {
                runs.push(StyleRun::new(token.byte_len(), StyleCategory::Comment));
                if token.has_line_break() {
                    in_comment = false;
                }
                continue;
            }

            let word = token.text.to_lowercase();
            let style = if let Some(class) = self.tables.classify(&word) {
                class
            } else if is_number(&word) {
                StyleCategory::Number
            } else if word == "(" || word == ")" {
                StyleCategory::Parenthesis
            } else if self.scanner.is_comment_lead(&word) {
                in_comment = true;
                StyleCategory::Comment
            } else {
                let next_breaks_line = match cursor.peek(0) {
                    Some(next) => next.starts_with_line_break(),
                    None => context.next_breaks_line(),
                };
                Self::contextual(&word, cursor.previous(), next_breaks_line)
            };
            runs.push(StyleRun::new(token.byte_len(), style));
        }

        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::host::{StyleBuffer, StyleHost};
    use pretty_assertions::assert_eq;

    fn styled(text: &str) -> StyleBuffer {
        let lexer = RuleLexer::new().unwrap();
        let mut buffer = StyleBuffer::new(text);
        lexer.style_text(&mut buffer, 0, text.len());
        buffer
    }

    /// Style of the first occurrence of `needle`
    fn style_of(buffer: &StyleBuffer, needle: &str) -> StyleCategory {
        let offset = buffer.as_str().find(needle).unwrap();
        buffer.style_at(offset).unwrap()
    }

    #[test]
    fn test_classify_priority() {
        let tables = RuleTables::new();
        assert_eq!(tables.classify("if"), Some(StyleCategory::RuleSection));
        assert_eq!(tables.classify("greater"), Some(StyleCategory::Comparison));
        assert_eq!(tables.classify("unique"), Some(StyleCategory::Directive));
        assert_eq!(tables.classify("visual"), Some(StyleCategory::Architecture));
        assert_eq!(tables.classify("send_to_motor"), Some(StyleCategory::Keyword));
        assert_eq!(tables.classify("ifx"), None);
        assert_eq!(tables.classify("IF"), None);
    }

    #[test]
    fn test_rule_scenario() {
        let buffer = styled("(rule1\n  if (?x is Foo)\n  then (add (?x ready))\n)");

        assert_eq!(style_of(&buffer, "("), StyleCategory::Parenthesis);
        assert_eq!(style_of(&buffer, "rule1"), StyleCategory::RuleName);
        assert_eq!(style_of(&buffer, "if"), StyleCategory::RuleSection);
        assert_eq!(style_of(&buffer, "?"), StyleCategory::Variable);
        assert_eq!(style_of(&buffer, "x"), StyleCategory::Variable);
        assert_eq!(style_of(&buffer, "is"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "Foo"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "then"), StyleCategory::RuleSection);
        assert_eq!(style_of(&buffer, "add"), StyleCategory::Keyword);
        assert_eq!(style_of(&buffer, "ready"), StyleCategory::Default);
    }

    #[test]
    fn test_words_are_case_insensitive() {
        let buffer = styled("IF Goal UNIQUE Delete");
        assert_eq!(style_of(&buffer, "IF"), StyleCategory::RuleSection);
        assert_eq!(style_of(&buffer, "Goal"), StyleCategory::Architecture);
        assert_eq!(style_of(&buffer, "UNIQUE"), StyleCategory::Directive);
        assert_eq!(style_of(&buffer, "Delete"), StyleCategory::Keyword);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let text = "// this is a comment\nkeyword_token add";
        let buffer = styled(text);
        let newline = text.find('\n').unwrap();

        assert!(buffer.styles()[..=newline].iter().all(|&s| s == StyleCategory::Comment));
        assert_eq!(style_of(&buffer, "keyword_token"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "add"), StyleCategory::Keyword);
    }

    #[test]
    fn test_semicolon_comment_with_trailing_space() {
        let text = "; note (if)  \nthen";
        let buffer = styled(text);
        let then = text.find("then").unwrap();
        assert!(buffer.styles()[..then].iter().all(|&s| s == StyleCategory::Comment));
        assert_eq!(buffer.style_at(then), Some(StyleCategory::RuleSection));
    }

    #[test]
    fn test_numbers() {
        let buffer = styled("12345 12a45");
        assert_eq!(style_of(&buffer, "12345"), StyleCategory::Number);
        assert_eq!(style_of(&buffer, "12a45"), StyleCategory::Default);
    }

    #[test]
    fn test_rule_name_needs_line_break_and_length() {
        let buffer = styled("(ab\n(abc def\n(abc)");
        assert_eq!(style_of(&buffer, "ab\n"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "abc def"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "abc)"), StyleCategory::Default);

        let buffer = styled("(Top_Rule\r\n");
        assert_eq!(style_of(&buffer, "Top_Rule"), StyleCategory::RuleName);
    }

    #[test]
    fn test_variable_after_space_sigil() {
        let buffer = styled("?? ?y x?");
        // `?` after `?`, then `?` after a single space
        assert_eq!(buffer.style_at(1), Some(StyleCategory::Variable));
        assert_eq!(buffer.style_at(3), Some(StyleCategory::Variable));
        assert_eq!(buffer.style_at(4), Some(StyleCategory::Variable));
        assert_eq!(buffer.style_at(6), Some(StyleCategory::Default));
    }

    #[test]
    fn test_restyle_inside_comment() {
        let lexer = RuleLexer::new().unwrap();
        let text = "; a comment here\n(rule1\n";
        let mut buffer = styled(text);
        let inside = text.find("comment").unwrap();

        buffer.start_styling(inside);
        buffer.set_styling(7, StyleCategory::Default);
        lexer.style_text(&mut buffer, inside, inside + 7);
        assert_eq!(buffer.styles(), styled(text).styles());
    }

    #[test]
    fn test_rule_name_at_range_end() {
        let lexer = RuleLexer::new().unwrap();
        let text = "(rule1\n";
        let mut buffer = StyleBuffer::new(text);
        lexer.style_text(&mut buffer, 0, 6);
        assert_eq!(buffer.style_at(1), Some(StyleCategory::RuleName));
    }

    #[test]
    fn test_registry_ids() {
        let lexer = RuleLexer::new().unwrap();
        let registry = lexer.registry();
        assert_eq!(registry.id_of(StyleCategory::Default), Some(0));
        assert_eq!(registry.id_of(StyleCategory::Comment), Some(5));
        assert_eq!(registry.id_of(StyleCategory::Parenthesis), Some(10));
        assert!(registry.is_bold(StyleCategory::RuleName));
        assert!(!registry.is_bold(StyleCategory::Variable));
        assert_eq!(lexer.description(10), "PARENS");
    }

    #[test]
    fn test_comment_ends_inside_whitespace_run() {
        // the break sits in the middle of one whitespace token
        let text = "; c  \n  x";
        let lexer = RuleLexer::new().unwrap();
        assert_eq!(
            lexer.scanner().tokens(text).iter().map(|t| t.text).collect::<Vec<_>>(),
            vec![";", " ", "c", "  \n  ", "x"]
        );

        let buffer = styled(text);
        let x = text.find('x').unwrap();
        assert!(buffer.styles()[..x].iter().all(|&s| s == StyleCategory::Comment));
        assert_eq!(buffer.style_at(x), Some(StyleCategory::Default));

        for token in lexer.scanner().tokens(text) {
            let mut split = StyleBuffer::new(text);
            lexer.style_text(&mut split, 0, token.offset);
            lexer.style_text(&mut split, token.offset, text.len());
            assert_eq!(split.styles(), buffer.styles(), "split at {}", token.offset);
        }
    }
}
