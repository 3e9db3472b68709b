//! Line ending detection and normalization

use std::fmt;

use clap::ValueEnum;

/// Line terminator convention of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LineEnding {
    #[default]
    Lf,
    #[value(name = "crlf")]
    CrLf,
    Cr,
}

impl LineEnding {
    /// Convention of the first line break in `text`, `Lf` if it has none
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        match bytes.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) if bytes[i] == b'\n' => LineEnding::Lf,
            Some(i) if bytes.get(i + 1) == Some(&b'\n') => LineEnding::CrLf,
            Some(_) => LineEnding::Cr,
            None => LineEnding::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Rewrite every line break in `text` to this convention
    pub fn normalize(&self, text: &str) -> String {
        let unix = text.replace("\r\n", "\n").replace('\r', "\n");
        match self {
            LineEnding::Lf => unix,
            other => unix.replace('\n', other.as_str()),
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineEnding::Lf => "LF",
            LineEnding::CrLf => "CRLF",
            LineEnding::Cr => "CR",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb\n"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a\rb"), LineEnding::Cr);
        assert_eq!(LineEnding::detect("a\r"), LineEnding::Cr);
        assert_eq!(LineEnding::detect("abc"), LineEnding::Lf);
    }

    #[test]
    fn test_normalize_mixed() {
        let text = "a\r\nb\rc\nd";
        assert_eq!(LineEnding::Lf.normalize(text), "a\nb\nc\nd");
        assert_eq!(LineEnding::CrLf.normalize(text), "a\r\nb\r\nc\r\nd");
        assert_eq!(LineEnding::Cr.normalize(text), "a\rb\rc\rd");
    }

    #[test]
    fn test_display() {
        assert_eq!(LineEnding::CrLf.to_string(), "CRLF");
    }
}
