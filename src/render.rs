//! Paint highlighted documents to a terminal

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::document::Document;
use crate::error::Result;
use crate::lexer::{Color, Style, Styler, Theme};

impl From<Color> for TermColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Default => TermColor::Reset,
            Color::Black => TermColor::Black,
            Color::Red => TermColor::DarkRed,
            Color::Green => TermColor::DarkGreen,
            Color::Yellow => TermColor::DarkYellow,
            Color::Blue => TermColor::DarkBlue,
            Color::Magenta => TermColor::DarkMagenta,
            Color::Cyan => TermColor::DarkCyan,
            Color::White => TermColor::Grey,
            Color::BrightBlack => TermColor::DarkGrey,
            Color::BrightBlue => TermColor::Blue,
            Color::BrightMagenta => TermColor::Magenta,
            Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        }
    }
}

/// Writes styled runs as terminal escape sequences
pub struct Painter<W: Write> {
    out: W,
    /// Also paint the theme background behind the text
    background: bool,
}

impl<W: Write> Painter<W> {
    pub fn new(out: W) -> Self {
        Self { out, background: false }
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// Paint a whole document
    pub fn paint(&mut self, document: &Document, theme: &Theme) -> Result<()> {
        let registry = document.lexer().registry();
        let text = document.text();
        for (range, category) in document.runs() {
            let style = theme.style_for(category, registry.is_bold(category));
            self.paint_run(&text[range], style)?;
        }

        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn paint_run(&mut self, text: &str, style: Style) -> Result<()> {
        queue!(self.out, SetForegroundColor(style.fg.into()))?;
        if self.background {
            queue!(self.out, SetBackgroundColor(style.bg.into()))?;
        }
        let weight = if style.bold { Attribute::Bold } else { Attribute::NormalIntensity };
        queue!(self.out, SetAttribute(weight), Print(text))?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
