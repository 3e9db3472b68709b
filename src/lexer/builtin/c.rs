//! C and C++ language table

use crate::lexer::scanner::CommentLead;
use crate::lexer::source::{Declaration, SourceSyntax};
use crate::lexer::LanguageKind;

const KEYWORDS: &[&str] = &[
    // C
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "extern", "float", "for", "goto", "if", "inline", "int", "long", "register", "restrict",
    "return", "short", "signed", "sizeof", "static", "switch", "typedef", "unsigned", "void",
    "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool", "_Complex", "_Generic",
    "_Imaginary", "_Noreturn", "_Static_assert", "_Thread_local",
    // C++
    "alignas", "alignof", "and", "asm", "bool", "catch", "concept", "consteval", "constexpr",
    "constinit", "const_cast", "co_await", "co_return", "co_yield", "decltype", "delete",
    "dynamic_cast", "explicit", "export", "friend", "mutable", "namespace", "new", "noexcept",
    "not", "operator", "or", "private", "protected", "public", "reinterpret_cast", "requires",
    "static_assert", "static_cast", "template", "thread_local", "throw", "try", "typeid",
    "typename", "using", "virtual", "xor",
];

const CONSTANTS: &[&str] = &["NULL", "nullptr", "true", "false", "this"];

const BUILTINS: &[&str] = &[
    "printf", "fprintf", "sprintf", "snprintf", "scanf", "malloc", "calloc", "realloc", "free",
    "memcpy", "memmove", "memset", "memcmp", "strlen", "strcpy", "strncpy", "strcmp", "strncmp",
    "strcat", "fopen", "fclose", "fread", "fwrite", "exit", "abort", "assert",
];

/// Create the C/C++ table
pub fn c_syntax() -> SourceSyntax {
    SourceSyntax {
        kind: LanguageKind::C,
        language: "C_Lexer",
        extensions: &["c", "h", "cpp", "hpp", "cc", "cxx", "hh"],
        comment_leads: &[CommentLead::SLASHES],
        keywords: KEYWORDS,
        constants: CONSTANTS,
        builtins: BUILTINS,
        declarations: &[
            ("class", Declaration::Class),
            ("struct", Declaration::Class),
            ("union", Declaration::Class),
            ("enum", Declaration::Class),
        ],
        class_followers: &['{', ':', ';'],
        quotes: &['"', '\''],
        brackets: &['(', ')', '[', ']', '{', '}'],
        operators: &['+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|', '^', '~', '?', ':'],
    }
}
