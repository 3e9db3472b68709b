//! Python language table

use crate::lexer::scanner::CommentLead;
use crate::lexer::source::{Declaration, SourceSyntax};
use crate::lexer::LanguageKind;

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "continue", "del", "elif", "else", "except",
    "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal", "not",
    "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

const CONSTANTS: &[&str] = &["self", "cls", "None", "True", "False"];

const BUILTINS: &[&str] = &[
    "abs", "all", "any", "ascii", "bin", "bool", "bytearray", "bytes", "callable", "chr",
    "classmethod", "compile", "complex", "delattr", "dict", "dir", "divmod", "enumerate", "eval",
    "exec", "filter", "float", "format", "frozenset", "getattr", "globals", "hasattr", "hash",
    "help", "hex", "id", "input", "int", "isinstance", "issubclass", "iter", "len", "list",
    "locals", "map", "max", "memoryview", "min", "next", "object", "oct", "open", "ord", "pow",
    "print", "property", "range", "repr", "reversed", "round", "set", "setattr", "slice",
    "sorted", "staticmethod", "str", "sum", "super", "tuple", "type", "vars", "zip",
];

/// Create the Python table
pub fn python_syntax() -> SourceSyntax {
    SourceSyntax {
        kind: LanguageKind::Python,
        language: "Python_Lexer",
        extensions: &["py", "pyw", "pyi"],
        comment_leads: &[CommentLead::HASH],
        keywords: KEYWORDS,
        constants: CONSTANTS,
        builtins: BUILTINS,
        declarations: &[("class", Declaration::Class), ("def", Declaration::Function)],
        class_followers: &[':', '('],
        quotes: &['"', '\''],
        brackets: &['(', ')', '[', ']', '{', '}'],
        operators: &['+', '-', '*', '/', '%', '=', '<', '>'],
    }
}
