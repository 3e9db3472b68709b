//! epiccoder - editor core for EPIC production-rule models
//!
//! Incremental syntax highlighting for `.prs` rule files, Python, C and
//! plain text, with the documents, sessions and folder search an editor
//! builds on top of it.

pub mod config;
pub mod document;
pub mod error;
pub mod lexer;
pub mod line_ending;
pub mod render;
pub mod search;
pub mod session;

pub use document::Document;
pub use error::{EditorError, Result};
pub use lexer::{LanguageKind, Lexer, Styler};
pub use session::Session;
