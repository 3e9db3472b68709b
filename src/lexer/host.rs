//! Host interface for restyling
//!
//! A host owns the text and the committed per-byte styles. Lexers read
//! both through [`StyleHost`] and write their results back as runs.
//! [`StyleBuffer`] is the in-memory host used by documents and tests.

use std::ops::Range;

use super::scanner::{has_line_break, is_line_break, Scanner};
use super::style::StyleCategory;

/// A styled run of bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRun {
    /// Length in bytes
    pub len: usize,
    pub style: StyleCategory,
}

impl StyleRun {
    pub fn new(len: usize, style: StyleCategory) -> Self {
        Self { len, style }
    }
}

/// Buffer a lexer restyles
///
/// Offsets are byte offsets and must fall on character boundaries.
pub trait StyleHost {
    /// Length of the buffer in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of a byte range
    fn text(&self, range: Range<usize>) -> &str;

    /// Committed style of a previously styled byte
    fn style_at(&self, offset: usize) -> Option<StyleCategory>;

    /// Begin writing runs at `start`
    fn start_styling(&mut self, start: usize);

    /// Style the next `length` bytes and advance
    fn set_styling(&mut self, length: usize, style: StyleCategory);
}

/// What a restyle call can see outside its own range
///
/// Captured from the host at the start of every call. This is the only
/// state carried between calls; it is recovered from committed styles
/// and surrounding text rather than kept in the lexer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeContext<'a> {
    /// The range starts inside a line comment
    pub in_comment: bool,
    /// Token ending at the range start
    pub previous: Option<&'a str>,
    /// Nearest non-whitespace token before the range start
    pub previous_significant: Option<&'a str>,
    /// Committed style of `previous_significant`
    pub significant_style: Option<StyleCategory>,
    /// Quote of the string literal the range starts inside
    pub open_quote: Option<char>,
    /// The range starts right after an escaping backslash in a string
    pub escaped: bool,
    /// First character after the range end
    pub next_char: Option<char>,
    /// First non-blank character after the range end on the same line
    pub next_inline: Option<char>,
}

impl<'a> RangeContext<'a> {
    /// Capture the context of `[start, end)` from a host
    pub fn capture<H: StyleHost + ?Sized>(
        host: &'a H,
        scanner: &Scanner,
        start: usize,
        end: usize,
    ) -> Self {
        let before = host.text(0..start);
        let previous = scanner.token_before(before, start);
        let (previous_significant, significant_start) = match previous {
            Some(token) if token.chars().all(char::is_whitespace) => {
                let end = start - token.len();
                let token = scanner.token_before(before, end);
                (token, token.map(|t| end - t.len()))
            }
            Some(token) => (Some(token), Some(start - token.len())),
            None => (None, None),
        };

        // a comment is closed by a line-break token that is itself styled
        // as comment, so the previous style alone is not enough
        let in_comment = start > 0
            && host.style_at(start - 1) == Some(StyleCategory::Comment)
            && !previous.is_some_and(has_line_break);

        let open_quote = open_quote(host, start);
        let escaped = open_quote.is_some() && before.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1;

        let after = host.text(end..host.len());
        Self {
            in_comment,
            previous,
            previous_significant,
            significant_style: significant_start.and_then(|offset| host.style_at(offset)),
            open_quote,
            escaped,
            next_char: after.chars().next(),
            next_inline: after
                .chars()
                .find(|&c| is_line_break(c) || !c.is_whitespace())
                .filter(|&c| !is_line_break(c)),
        }
    }

    /// Whether the text after the range begins with a line terminator
    pub fn next_breaks_line(&self) -> bool {
        matches!(self.next_char, Some('\n' | '\r'))
    }
}

/// Opening quote of the string literal that `offset` lies inside
///
/// Everything from an opening quote up to (not including) the closing
/// quote is styled [`StyleCategory::String`], and the byte before an
/// opening quote never is, so the quote starts the string run.
fn open_quote<H: StyleHost + ?Sized>(host: &H, offset: usize) -> Option<char> {
    let mut run_start = offset;
    while run_start > 0 && host.style_at(run_start - 1) == Some(StyleCategory::String) {
        run_start -= 1;
    }
    if run_start == offset {
        return None;
    }
    host.text(run_start..offset).chars().next()
}

/// In-memory text with one committed style per byte
#[derive(Debug, Clone, Default)]
pub struct StyleBuffer {
    text: String,
    styles: Vec<StyleCategory>,
    position: usize,
}

impl StyleBuffer {
    /// Create an unstyled buffer
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = vec![StyleCategory::Default; text.len()];
        Self {
            text,
            styles,
            position: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn styles(&self) -> &[StyleCategory] {
        &self.styles
    }

    /// Replace a byte range; inserted bytes start out unstyled
    pub fn replace(&mut self, range: Range<usize>, with: &str) {
        self.text.replace_range(range.clone(), with);
        self.styles.splice(range, std::iter::repeat(StyleCategory::Default).take(with.len()));
    }

    /// Adjacent bytes with equal styles merged into ranges
    pub fn runs(&self) -> Vec<(Range<usize>, StyleCategory)> {
        let mut runs: Vec<(Range<usize>, StyleCategory)> = Vec::new();
        for (offset, &style) in self.styles.iter().enumerate() {
            match runs.last_mut() {
                Some((range, last)) if *last == style => range.end = offset + 1,
                _ => runs.push((offset..offset + 1, style)),
            }
        }
        runs
    }
}

impl StyleHost for StyleBuffer {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn text(&self, range: Range<usize>) -> &str {
        &self.text[range]
    }

    fn style_at(&self, offset: usize) -> Option<StyleCategory> {
        self.styles.get(offset).copied()
    }

    fn start_styling(&mut self, start: usize) {
        self.position = start;
    }

    fn set_styling(&mut self, length: usize, style: StyleCategory) {
        let start = self.position.min(self.styles.len());
        let end = (self.position + length).min(self.styles.len());
        self.styles[start..end].fill(style);
        self.position += length;
    }
}
