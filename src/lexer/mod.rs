//! Incremental syntax highlighting
//!
//! Every lexer shares one [`Scanner`] partition and one restyle
//! protocol ([`Styler::style_text`]). A restyle call sees only its
//! own byte range plus a [`RangeContext`] captured from the host, so
//! ranges can be restyled in any order and any chunking.

mod builtin;
mod cursor;
mod host;
mod plain;
mod registry;
mod rules;
mod scanner;
mod source;
mod style;
mod theme;

use std::path::Path;

use tracing::{debug, trace};

use crate::error::Result;

pub use host::{RangeContext, StyleBuffer, StyleHost, StyleRun};
pub use plain::PlainTextLexer;
pub use registry::{StyleEntry, StyleRegistry};
pub use rules::{RuleLexer, RuleTables};
pub use scanner::{is_line_break, CommentLead, Scanner, Token};
pub use source::{Declaration, SourceLexer, SourceSyntax};
pub use style::{Color, Style, StyleCategory};
pub use theme::{Theme, ThemeSet, Variant};

/// Integer literal check: non-empty, ASCII digits only
pub(crate) fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// The restyling interface every lexer implements
pub trait Styler {
    /// Language name used for host registration
    fn language(&self) -> &'static str;

    fn registry(&self) -> &StyleRegistry;

    fn scanner(&self) -> &Scanner;

    /// Style one range's tokens
    ///
    /// Emits exactly one run per token, so the run lengths always add
    /// up to the length of the scanned text.
    fn style_tokens(&self, tokens: Vec<Token<'_>>, context: &RangeContext<'_>) -> Vec<StyleRun>;

    /// Name of a style id, empty for ids this lexer does not use
    fn description(&self, style: u8) -> &'static str {
        self.registry().description(style)
    }

    /// Restyle `[start, end)` of a host buffer
    fn style_text<H: StyleHost + ?Sized>(&self, host: &mut H, start: usize, end: usize) {
        let end = end.min(host.len());
        if start >= end {
            return;
        }

        let runs = {
            let host: &H = host;
            let context = RangeContext::capture(host, self.scanner(), start, end);
            let tokens = self.scanner().tokens(host.text(start..end));
            self.style_tokens(tokens, &context)
        };
        trace!(language = self.language(), start, end, runs = runs.len(), "restyled range");

        host.start_styling(start);
        for run in runs {
            host.set_styling(run.len, run.style);
        }
    }

    /// Style a standalone string with no surrounding context
    fn style_str(&self, text: &str) -> Vec<StyleRun> {
        self.style_tokens(self.scanner().tokens(text), &RangeContext::default())
    }
}

/// Languages a document can be highlighted as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageKind {
    PlainText,
    Python,
    C,
    /// EPIC production-rule files
    ProductionRules,
}

impl LanguageKind {
    /// Detect language from a file extension (with or without the dot)
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_lowercase();
        if extension == rules::EXTENSION {
            return LanguageKind::ProductionRules;
        }
        builtin::all_syntaxes()
            .into_iter()
            .find(|syntax| syntax.extensions.contains(&extension.as_str()))
            .map_or(LanguageKind::PlainText, |syntax| syntax.kind)
    }

    /// Detect language from a filename
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(LanguageKind::PlainText, Self::from_extension)
    }

    pub fn name(&self) -> &'static str {
        match self {
            LanguageKind::PlainText => "Text",
            LanguageKind::Python => "Python",
            LanguageKind::C => "C",
            LanguageKind::ProductionRules => "Production Rules",
        }
    }
}

/// A document's lexer, chosen once when the document is opened
#[derive(Debug, Clone)]
pub enum Lexer {
    PlainText(PlainTextLexer),
    Source(SourceLexer),
    Rules(RuleLexer),
}

impl Lexer {
    /// Build the lexer for a language
    pub fn new(kind: LanguageKind) -> Result<Self> {
        let lexer = match kind {
            LanguageKind::PlainText => Lexer::PlainText(PlainTextLexer::new()?),
            LanguageKind::ProductionRules => Lexer::Rules(RuleLexer::new()?),
            LanguageKind::Python => Lexer::Source(SourceLexer::new(builtin::python::python_syntax())?),
            LanguageKind::C => Lexer::Source(SourceLexer::new(builtin::c::c_syntax())?),
        };
        debug!(language = lexer.language(), "created lexer");
        Ok(lexer)
    }

    /// Build the lexer for a file based on its extension
    pub fn for_path(path: &Path) -> Result<Self> {
        Self::new(LanguageKind::from_path(path))
    }

    pub fn kind(&self) -> LanguageKind {
        match self {
            Lexer::PlainText(_) => LanguageKind::PlainText,
            Lexer::Source(lexer) => lexer.syntax().kind,
            Lexer::Rules(_) => LanguageKind::ProductionRules,
        }
    }
}

impl Styler for Lexer {
    fn language(&self) -> &'static str {
        match self {
            Lexer::PlainText(lexer) => lexer.language(),
            Lexer::Source(lexer) => lexer.language(),
            Lexer::Rules(lexer) => lexer.language(),
        }
    }

    fn registry(&self) -> &StyleRegistry {
        match self {
            Lexer::PlainText(lexer) => lexer.registry(),
            Lexer::Source(lexer) => lexer.registry(),
            Lexer::Rules(lexer) => lexer.registry(),
        }
    }

    fn scanner(&self) -> &Scanner {
        match self {
            Lexer::PlainText(lexer) => lexer.scanner(),
            Lexer::Source(lexer) => lexer.scanner(),
            Lexer::Rules(lexer) => lexer.scanner(),
        }
    }

    fn style_tokens(&self, tokens: Vec<Token<'_>>, context: &RangeContext<'_>) -> Vec<StyleRun> {
        match self {
            Lexer::PlainText(lexer) => lexer.style_tokens(tokens, context),
            Lexer::Source(lexer) => lexer.style_tokens(tokens, context),
            Lexer::Rules(lexer) => lexer.style_tokens(tokens, context),
        }
    }
}
