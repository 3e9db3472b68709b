//! Error types for epiccoder

use thiserror::Error;

/// Result type alias for epiccoder operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid theme file: {0}")]
    ThemeFormat(#[from] toml::de::Error),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Invalid color for {0}: {1}")]
    InvalidColor(String, String),

    #[error("Not a text file: {0}")]
    NotText(String),

    #[error("A search is already running")]
    SearchInProgress,

    #[error("No such document: {0}")]
    NoSuchDocument(usize),

    #[error("{0}")]
    Message(String),
}
