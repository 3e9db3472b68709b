//! Open documents
//!
//! A document owns its text, its per-byte styles and the lexer chosen
//! for its file type. Edits restyle only the damaged lines, then carry
//! the restyle forward line by line until the old and new styles agree.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use crate::error::{EditorError, Result};
use crate::lexer::{is_line_break, Lexer, StyleBuffer, StyleCategory, StyleHost, Styler};
use crate::line_ending::LineEnding;

#[derive(Debug, Clone)]
pub struct Document {
    path: Option<PathBuf>,
    buffer: StyleBuffer,
    lexer: Lexer,
    line_ending: LineEnding,
    modified: bool,
}

impl Document {
    /// Create a document from text and style all of it
    pub fn from_text(text: impl Into<String>, lexer: Lexer) -> Self {
        let text = text.into();
        let mut document = Self {
            path: None,
            line_ending: LineEnding::detect(&text),
            buffer: StyleBuffer::new(text),
            lexer,
            modified: false,
        };
        document.restyle_all();
        document
    }

    /// Open a file from disk
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EditorError::FileNotFound(path.display().to_string()));
        }

        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|_| EditorError::NotText(path.display().to_string()))?;
        let lexer = Lexer::for_path(path)?;
        info!(path = %path.display(), language = lexer.language(), bytes = text.len(), "opened document");

        let mut document = Self::from_text(text, lexer);
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// An empty document that will be saved to `path`
    pub fn untitled(path: PathBuf) -> Result<Self> {
        let mut document = Self::from_text(String::new(), Lexer::for_path(&path)?);
        document.path = Some(path);
        Ok(document)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name for display
    pub fn name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "untitled".to_string(), |name| name.to_string_lossy().into_owned())
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn styles(&self) -> &[StyleCategory] {
        self.buffer.styles()
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Styled runs covering the whole text
    pub fn runs(&self) -> Vec<(Range<usize>, StyleCategory)> {
        self.buffer.runs()
    }

    /// Style the whole text from scratch
    pub fn restyle_all(&mut self) {
        let len = self.buffer.len();
        self.lexer.style_text(&mut self.buffer, 0, len);
    }

    /// Replace a byte range and restyle what changed
    ///
    /// Returns the range that was restyled.
    pub fn replace(&mut self, range: Range<usize>, with: &str) -> Range<usize> {
        let edit_start = range.start;
        self.buffer.replace(range, with);
        self.modified = true;

        let (start, mut end) = {
            let scanner = self.lexer.scanner();
            let text = self.buffer.as_str();
            let start = scanner.align_start(text, line_start(text, edit_start));
            let end = scanner.align_end(text, line_end(text, edit_start + with.len()));
            (start, end)
        };
        self.lexer.style_text(&mut self.buffer, start, end);

        // a comment, string or declaration can reach into the lines below
        while end < self.buffer.len() {
            let next = {
                let text = self.buffer.as_str();
                self.lexer.scanner().align_end(text, line_end(text, end))
            };
            let before = self.buffer.styles()[end..next].to_vec();
            self.lexer.style_text(&mut self.buffer, end, next);
            // a string carried over a line break still depends on its opening quote
            let settled = self.buffer.styles()[end..next] == before[..]
                && self.buffer.style_at(next - 1) != Some(StyleCategory::String);
            end = next;
            if settled {
                break;
            }
        }

        trace!(start, end, "restyled after edit");
        start..end
    }

    /// Insert text at a byte offset
    pub fn insert(&mut self, at: usize, text: &str) -> Range<usize> {
        self.replace(at..at, text)
    }

    /// Delete a byte range
    pub fn delete(&mut self, range: Range<usize>) -> Range<usize> {
        self.replace(range, "")
    }

    /// Write the text back to its path
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| EditorError::Message("document has no file name".to_string()))?;
        fs::write(&path, self.text())?;
        self.modified = false;
        debug!(path = %path.display(), "saved document");
        Ok(())
    }

    /// Save under a new path, switching lexer if the file type changed
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        let lexer = Lexer::for_path(&path)?;
        if lexer.kind() != self.lexer.kind() {
            self.lexer = lexer;
            self.restyle_all();
        }
        self.path = Some(path);
        self.save()
    }

    /// Rewrite every line break to one convention
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        let normalized = line_ending.normalize(self.text());
        if normalized != self.text() {
            let len = self.buffer.len();
            self.buffer.replace(0..len, &normalized);
            self.restyle_all();
            self.modified = true;
        }
        self.line_ending = line_ending;
    }
}

/// Offset of the start of the line containing `pos`
fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind(is_line_break).map_or(0, |i| i + 1)
}

/// Offset just past the first line break at or after `pos`
fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find(is_line_break).map_or(text.len(), |i| pos + i + 1)
}
