//! Token scanner shared by every lexer
//!
//! Splits text into a lossless sequence of tokens using one fixed
//! partition rule. The only thing that varies between languages is
//! the set of comment-lead markers, which are matched as runs of a
//! single character (`//+` for C-style comments, `;+` or `#+` for
//! languages that lead with one character).

use regex::Regex;

use crate::error::Result;

/// A comment-lead marker: `ch` repeated at least `min_run` times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentLead {
    pub ch: char,
    pub min_run: usize,
}

impl CommentLead {
    /// `//`, `///`, ...
    pub const SLASHES: Self = Self::new('/', 2);
    /// `;`, `;;`, ...
    pub const SEMICOLON: Self = Self::new(';', 1);
    /// `#`, `##`, ...
    pub const HASH: Self = Self::new('#', 1);

    pub const fn new(ch: char, min_run: usize) -> Self {
        Self { ch, min_run }
    }

    /// Check whether a token begins with this marker
    pub fn leads(&self, token: &str) -> bool {
        token.chars().take_while(|&c| c == self.ch).count() >= self.min_run.max(1)
    }
}

/// A lexical token: a slice of the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text, borrowed from the scanned slice
    pub text: &'a str,
    /// Byte offset of the token within the scanned slice
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// UTF-8 length of the token; style runs are counted in bytes
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }

    pub fn starts_with_line_break(&self) -> bool {
        self.text.starts_with(is_line_break)
    }

    /// Whether this token ends a line comment
    pub fn has_line_break(&self) -> bool {
        has_line_break(self.text)
    }
}

pub fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Check if text contains a line terminator
pub fn has_line_break(text: &str) -> bool {
    text.contains(is_line_break)
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Character classes that can form multi-character tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Word,
    Lead(char),
    Single,
}

/// The shared tokenizer
#[derive(Debug, Clone)]
pub struct Scanner {
    pattern: Regex,
    leads: Vec<CommentLead>,
}

impl Scanner {
    /// Build a scanner for the given comment-lead markers
    pub fn new(leads: &[CommentLead]) -> Result<Self> {
        let mut pattern = String::from(r"\*");
        for lead in leads {
            let ch = regex::escape(&lead.ch.to_string());
            pattern.push_str(&format!("|{}{{{},}}", ch, lead.min_run.max(1)));
        }
        pattern.push_str(r"|\s+|[A-Za-z0-9_]+|[^A-Za-z0-9_\s]|\s");

        Ok(Self {
            pattern: Regex::new(&pattern)?,
            leads: leads.to_vec(),
        })
    }

    /// Scanner with the default `//` comment lead
    pub fn standard() -> Result<Self> {
        Self::new(&[CommentLead::SLASHES])
    }

    pub fn leads(&self) -> &[CommentLead] {
        &self.leads
    }

    /// Check whether a token starts with any of this scanner's comment leads
    pub fn is_comment_lead(&self, token: &str) -> bool {
        self.leads.iter().any(|lead| lead.leads(token))
    }

    /// Split text into tokens
    pub fn tokens<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        self.pattern
            .find_iter(text)
            .map(|m| Token {
                text: m.as_str(),
                offset: m.start(),
            })
            .collect()
    }

    fn class_of(&self, c: char) -> CharClass {
        if c.is_whitespace() {
            CharClass::Space
        } else if is_word(c) {
            CharClass::Word
        } else if c != '*' && self.leads.iter().any(|lead| lead.ch == c) {
            CharClass::Lead(c)
        } else {
            CharClass::Single
        }
    }

    fn min_run(&self, ch: char) -> usize {
        self.leads
            .iter()
            .filter(|lead| lead.ch == ch)
            .map(|lead| lead.min_run.max(1))
            .min()
            .unwrap_or(1)
    }

    /// Start of the same-class run that ends at `pos`
    fn run_start(&self, text: &str, pos: usize, class: CharClass) -> usize {
        text[..pos]
            .char_indices()
            .rev()
            .take_while(|&(_, c)| self.class_of(c) == class)
            .last()
            .map_or(pos, |(i, _)| i)
    }

    /// End of the same-class run that starts at `pos`
    fn run_end(&self, text: &str, pos: usize, class: CharClass) -> usize {
        text[pos..]
            .char_indices()
            .find(|&(_, c)| self.class_of(c) != class)
            .map_or(text.len(), |(i, _)| pos + i)
    }

    /// The token that ends exactly at `pos`
    ///
    /// Tokenization is context free, so the token is found by walking
    /// back over a single character class instead of rescanning from
    /// the start of the text. `pos` must be a token boundary.
    pub fn token_before<'a>(&self, text: &'a str, pos: usize) -> Option<&'a str> {
        let last = text[..pos].chars().next_back()?;
        let single = pos - last.len_utf8();
        let start = match self.class_of(last) {
            CharClass::Single => single,
            CharClass::Lead(ch) => {
                let start = self.run_start(text, pos, CharClass::Lead(ch));
                if text[start..pos].chars().count() >= self.min_run(ch) {
                    start
                } else {
                    single
                }
            }
            class => self.run_start(text, pos, class),
        };
        Some(&text[start..pos])
    }

    /// The multi-character token strictly containing `pos`, if any
    fn token_around(&self, text: &str, pos: usize) -> Option<(usize, usize)> {
        let before = text[..pos].chars().next_back()?;
        let after = text[pos..].chars().next()?;
        let class = self.class_of(before);
        if class != self.class_of(after) || class == CharClass::Single {
            return None;
        }

        let start = self.run_start(text, pos, class);
        let end = self.run_end(text, pos, class);
        if let CharClass::Lead(ch) = class {
            if text[start..end].chars().count() < self.min_run(ch) {
                return None;
            }
        }
        Some((start, end))
    }

    /// Snap `pos` back to the start of the token containing it
    pub fn align_start(&self, text: &str, pos: usize) -> usize {
        self.token_around(text, pos).map_or(pos, |(start, _)| start)
    }

    /// Snap `pos` forward to the end of the token containing it
    pub fn align_end(&self, text: &str, pos: usize) -> usize {
        self.token_around(text, pos).map_or(pos, |(_, end)| end)
    }
}
