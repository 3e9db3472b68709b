//! Built-in source language tables
//!
//! Production-rule and plain text files have dedicated lexers; every
//! other language is a [`SourceSyntax`] table driving the shared
//! source lexer.

pub mod c;
pub mod python;

use super::source::SourceSyntax;

/// Get all built-in source languages
pub fn all_syntaxes() -> Vec<SourceSyntax> {
    vec![python::python_syntax(), c::c_syntax()]
}
