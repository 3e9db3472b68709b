//! General-purpose source code lexer
//!
//! One state machine driven by a per-language [`SourceSyntax`] table.
//! Words are matched case-sensitively. A declaration keyword such as
//! `class` or `def` also styles the identifier that follows it, even
//! across whitespace and line breaks. A class name must be followed on
//! its own line by one of the language's class followers.
//!
//! String literals run from a quote to the next unescaped copy of the
//! same quote, or to the end of the line. The closing quote is styled
//! [`StyleCategory::StringEnd`] so a later range can tell an open
//! string from a closed one by the style of the byte before it.

use std::collections::HashSet;

use super::cursor::TokenCursor;
use super::host::{RangeContext, StyleRun};
use super::registry::StyleRegistry;
use super::scanner::{CommentLead, Scanner, Token};
use super::style::StyleCategory;
use super::{is_number, LanguageKind, Styler};
use crate::error::Result;

/// What a declaration keyword introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    Class,
    Function,
}

impl Declaration {
    pub fn category(self) -> StyleCategory {
        match self {
            Declaration::Class => StyleCategory::ClassName,
            Declaration::Function => StyleCategory::FunctionName,
        }
    }
}

/// Static description of one source language
#[derive(Debug, Clone, Copy)]
pub struct SourceSyntax {
    pub kind: LanguageKind,
    /// Name the lexer registers under
    pub language: &'static str,
    /// File extensions, lowercase and without the dot
    pub extensions: &'static [&'static str],
    pub comment_leads: &'static [CommentLead],
    pub keywords: &'static [&'static str],
    pub constants: &'static [&'static str],
    pub builtins: &'static [&'static str],
    pub declarations: &'static [(&'static str, Declaration)],
    /// Characters that may follow a class name, e.g. `:` or `{`
    pub class_followers: &'static [char],
    /// String delimiters
    pub quotes: &'static [char],
    pub brackets: &'static [char],
    pub operators: &'static [char],
}

#[derive(Debug, Clone)]
pub struct SourceLexer {
    syntax: SourceSyntax,
    scanner: Scanner,
    keywords: HashSet<&'static str>,
    constants: HashSet<&'static str>,
    builtins: HashSet<&'static str>,
    registry: StyleRegistry,
}

impl SourceLexer {
    pub fn new(syntax: SourceSyntax) -> Result<Self> {
        Ok(Self {
            scanner: Scanner::new(syntax.comment_leads)?,
            keywords: syntax
                .keywords
                .iter()
                .chain(syntax.declarations.iter().map(|(word, _)| word))
                .copied()
                .collect(),
            constants: syntax.constants.iter().copied().collect(),
            builtins: syntax.builtins.iter().copied().collect(),
            registry: StyleRegistry::new(
                syntax.language,
                &[
                    (StyleCategory::Default, false),
                    (StyleCategory::Keyword, true),
                    (StyleCategory::Builtin, false),
                    (StyleCategory::Operator, false),
                    (StyleCategory::Bracket, false),
                    (StyleCategory::Comment, false),
                    (StyleCategory::Number, false),
                    (StyleCategory::Constant, false),
                    (StyleCategory::ClassName, true),
                    (StyleCategory::FunctionName, true),
                    (StyleCategory::String, false),
                    (StyleCategory::StringEnd, false),
                ],
            ),
            syntax,
        })
    }

    pub fn syntax(&self) -> &SourceSyntax {
        &self.syntax
    }

    fn declaration(&self, word: &str) -> Option<Declaration> {
        self.syntax
            .declarations
            .iter()
            .find(|(keyword, _)| *keyword == word)
            .map(|&(_, kind)| kind)
    }

    fn quote(&self, text: &str) -> Option<char> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if self.syntax.quotes.contains(&ch) => Some(ch),
            _ => None,
        }
    }

    fn classify(&self, text: &str) -> StyleCategory {
        let single = {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(ch),
                _ => None,
            }
        };

        if self.keywords.contains(text) {
            StyleCategory::Keyword
        } else if self.constants.contains(text) {
            StyleCategory::Constant
        } else if is_number(text) {
            StyleCategory::Number
        } else if single.is_some_and(|ch| self.syntax.brackets.contains(&ch)) {
            StyleCategory::Bracket
        } else if self.builtins.contains(text) {
            StyleCategory::Builtin
        } else if single.is_some_and(|ch| self.syntax.operators.contains(&ch)) {
            StyleCategory::Operator
        } else {
            StyleCategory::Default
        }
    }

    /// Style the name following a declaration keyword
    ///
    /// Whitespace up to the name stays default. Nothing is consumed when
    /// the next significant token is not an identifier, or when a class
    /// name is not followed by a class follower.
    fn name_declaration(
        &self,
        cursor: &mut TokenCursor<'_>,
        runs: &mut Vec<StyleRun>,
        kind: Declaration,
        context: &RangeContext<'_>,
    ) {
        let Some((skipped, name)) = cursor.skip_space_peek() else {
            return;
        };
        if !is_identifier(name.text) {
            return;
        }
        if kind == Declaration::Class && !self.follows_class_name(cursor, skipped + 1, context) {
            return;
        }

        for space in cursor.advance(skipped) {
            runs.push(StyleRun::new(space.byte_len(), StyleCategory::Default));
        }
        cursor.advance(1);
        runs.push(StyleRun::new(name.byte_len(), kind.category()));
    }

    /// Whether the first non-blank text from peek offset `from` on the
    /// same line starts with a class follower
    fn follows_class_name(&self, cursor: &TokenCursor<'_>, from: usize, context: &RangeContext<'_>) -> bool {
        let followers = self.syntax.class_followers;
        let mut n = from;
        loop {
            match cursor.peek(n) {
                Some(token) if token.has_line_break() => return false,
                Some(token) if token.is_whitespace() => n += 1,
                Some(token) => return token.text.starts_with(|c: char| followers.contains(&c)),
                None => return context.next_inline.is_some_and(|c| followers.contains(&c)),
            }
        }
    }
}

fn is_identifier(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Styler for SourceLexer {
    fn language(&self) -> &'static str {
        self.syntax.language
    }

    fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    fn style_tokens(&self, tokens: Vec<Token<'_>>, context: &RangeContext<'_>) -> Vec<StyleRun> {
        let mut runs = Vec::with_capacity(tokens.len());
        let mut cursor = TokenCursor::new(tokens, context.previous);
        let mut in_comment = context.in_comment;
        let mut quote = context.open_quote;
        let mut escaped = context.escaped;

        // the range may open between a declaration keyword and its name
        if !in_comment && quote.is_none() && context.significant_style == Some(StyleCategory::Keyword) {
            if let Some(kind) = context.previous_significant.and_then(|word| self.declaration(word)) {
                self.name_declaration(&mut cursor, &mut runs, kind, context);
            }
        }

        while let Some(token) = cursor.next() {
            if let Some(open) = quote {
                let style = if escaped {
                    escaped = false;
                    StyleCategory::String
                } else if token.text == "\\" {
                    escaped = true;
                    StyleCategory::String
                } else if token.has_line_break() {
                    // unterminated
                    quote = None;
                    StyleCategory::Default
                } else if self.quote(token.text) == Some(open) {
                    quote = None;
                    StyleCategory::StringEnd
                } else {
                    StyleCategory::String
                };
                runs.push(StyleRun::new(token.byte_len(), style));
                continue;
            }

            if in_comment {
                runs.push(StyleRun::new(token.byte_len(), StyleCategory::Comment));
                if token.has_line_break() {
                    in_comment = false;
                }
                continue;
            }

            if let Some(kind) = self.declaration(token.text) {
                runs.push(StyleRun::new(token.byte_len(), StyleCategory::Keyword));
                self.name_declaration(&mut cursor, &mut runs, kind, context);
                continue;
            }

            let style = if self.scanner.is_comment_lead(token.text) {
                in_comment = true;
                StyleCategory::Comment
            } else if let Some(open) = self.quote(token.text) {
                quote = Some(open);
                StyleCategory::String
            } else {
                self.classify(token.text)
            };
            runs.push(StyleRun::new(token.byte_len(), style));
        }

        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::builtin::{c::c_syntax, python::python_syntax};
    use crate::lexer::host::{StyleBuffer, StyleHost};
    use pretty_assertions::assert_eq;

    fn styled(syntax: SourceSyntax, text: &str) -> StyleBuffer {
        let lexer = SourceLexer::new(syntax).unwrap();
        let mut buffer = StyleBuffer::new(text);
        lexer.style_text(&mut buffer, 0, text.len());
        buffer
    }

    fn style_of(buffer: &StyleBuffer, needle: &str) -> StyleCategory {
        let offset = buffer.as_str().find(needle).unwrap();
        buffer.style_at(offset).unwrap()
    }

    fn assert_split_independent(syntax: SourceSyntax, text: &str) {
        let lexer = SourceLexer::new(syntax).unwrap();
        let whole = styled(syntax, text);
        for token in lexer.scanner().tokens(text) {
            let mut buffer = StyleBuffer::new(text);
            lexer.style_text(&mut buffer, 0, token.offset);
            lexer.style_text(&mut buffer, token.offset, text.len());
            assert_eq!(buffer.styles(), whole.styles(), "{:?} split at {}", text, token.offset);
        }
    }

    #[test]
    fn test_python_declarations() {
        let buffer = styled(python_syntax(), "class Foo(Bar):\n    def run(self):\n        pass");
        assert_eq!(style_of(&buffer, "class"), StyleCategory::Keyword);
        assert_eq!(style_of(&buffer, "Foo"), StyleCategory::ClassName);
        assert_eq!(style_of(&buffer, "("), StyleCategory::Bracket);
        assert_eq!(style_of(&buffer, "Bar"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "def"), StyleCategory::Keyword);
        assert_eq!(style_of(&buffer, "run"), StyleCategory::FunctionName);
        assert_eq!(style_of(&buffer, "self"), StyleCategory::Constant);
        assert_eq!(style_of(&buffer, "pass"), StyleCategory::Keyword);
    }

    #[test]
    fn test_declaration_name_across_line_break() {
        let buffer = styled(python_syntax(), "def  \n  compute():");
        assert_eq!(style_of(&buffer, "compute"), StyleCategory::FunctionName);
        assert_eq!(style_of(&buffer, "  \n"), StyleCategory::Default);
    }

    #[test]
    fn test_declaration_without_name() {
        let buffer = styled(python_syntax(), "def (x) class");
        assert_eq!(style_of(&buffer, "("), StyleCategory::Bracket);
        assert_eq!(style_of(&buffer, "x"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "class"), StyleCategory::Keyword);

        let buffer = styled(python_syntax(), "class 9lives");
        assert_eq!(style_of(&buffer, "9lives"), StyleCategory::Default);
    }

    #[test]
    fn test_python_words() {
        let buffer = styled(python_syntax(), "x = len(items) * 42 # count\nNone");
        assert_eq!(style_of(&buffer, "="), StyleCategory::Operator);
        assert_eq!(style_of(&buffer, "len"), StyleCategory::Builtin);
        assert_eq!(style_of(&buffer, "*"), StyleCategory::Operator);
        assert_eq!(style_of(&buffer, "42"), StyleCategory::Number);
        assert_eq!(style_of(&buffer, "# count"), StyleCategory::Comment);
        assert_eq!(style_of(&buffer, "count"), StyleCategory::Comment);
        assert_eq!(style_of(&buffer, "None"), StyleCategory::Constant);
    }

    #[test]
    fn test_case_sensitive() {
        let buffer = styled(python_syntax(), "Class Def RETURN");
        assert_eq!(style_of(&buffer, "Class"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "Def"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "RETURN"), StyleCategory::Default);
    }

    #[test]
    fn test_c_declarations_and_comments() {
        let buffer = styled(c_syntax(), "struct Point { int x; }; // done\nreturn NULL;");
        assert_eq!(style_of(&buffer, "struct"), StyleCategory::Keyword);
        assert_eq!(style_of(&buffer, "Point"), StyleCategory::ClassName);
        assert_eq!(style_of(&buffer, "{"), StyleCategory::Bracket);
        // the first "int" is inside "Point"
        let int = buffer.as_str().find("{ int").unwrap() + 2;
        assert_eq!(buffer.style_at(int), Some(StyleCategory::Keyword));
        assert_eq!(style_of(&buffer, "// done"), StyleCategory::Comment);
        assert_eq!(style_of(&buffer, "return"), StyleCategory::Keyword);
        assert_eq!(style_of(&buffer, "NULL"), StyleCategory::Constant);
    }

    #[test]
    fn test_numbers() {
        let buffer = styled(c_syntax(), "12345 12a45");
        assert_eq!(style_of(&buffer, "12345"), StyleCategory::Number);
        assert_eq!(style_of(&buffer, "12a45"), StyleCategory::Default);
    }

    #[test]
    fn test_name_in_next_range() {
        let lexer = SourceLexer::new(python_syntax()).unwrap();
        let text = "class   Foo:";
        let mut buffer = StyleBuffer::new(text);
        lexer.style_text(&mut buffer, 0, 5);
        lexer.style_text(&mut buffer, 5, text.len());
        assert_eq!(style_of(&buffer, "Foo"), StyleCategory::ClassName);
        assert_eq!(buffer.styles(), styled(python_syntax(), text).styles());
    }

    #[test]
    fn test_keyword_in_comment_does_not_name() {
        let lexer = SourceLexer::new(python_syntax()).unwrap();
        let text = "# class\nFoo";
        let mut buffer = StyleBuffer::new(text);
        lexer.style_text(&mut buffer, 0, 8);
        lexer.style_text(&mut buffer, 8, text.len());
        assert_eq!(style_of(&buffer, "Foo"), StyleCategory::Default);
    }

    #[test]
    fn test_registry() {
        let lexer = SourceLexer::new(python_syntax()).unwrap();
        assert_eq!(lexer.language(), "Python_Lexer");
        assert_eq!(lexer.registry().id_of(StyleCategory::FunctionName), Some(9));
        assert!(lexer.registry().is_bold(StyleCategory::ClassName));
        assert_eq!(lexer.description(5), "COMMENT");
    }

    #[test]
    fn test_comment_lead_inside_string() {
        let buffer = styled(python_syntax(), "x = \"a#b\" + 1\ny");
        assert_eq!(style_of(&buffer, "\"a"), StyleCategory::String);
        assert_eq!(style_of(&buffer, "#"), StyleCategory::String);
        assert_eq!(style_of(&buffer, "b"), StyleCategory::String);
        assert_eq!(style_of(&buffer, "\" "), StyleCategory::StringEnd);
        assert_eq!(style_of(&buffer, "+"), StyleCategory::Operator);
        assert_eq!(style_of(&buffer, "1"), StyleCategory::Number);
        assert_eq!(style_of(&buffer, "y"), StyleCategory::Default);

        let buffer = styled(c_syntax(), "puts(\"http://x\"); return 0;");
        assert_eq!(style_of(&buffer, "//"), StyleCategory::String);
        assert_eq!(style_of(&buffer, "\")"), StyleCategory::StringEnd);
        assert_eq!(style_of(&buffer, "return"), StyleCategory::Keyword);
        assert_eq!(style_of(&buffer, "0"), StyleCategory::Number);
    }

    #[test]
    fn test_string_escapes_and_quotes() {
        let buffer = styled(python_syntax(), r#"s = "a\"b" + 'it"s' + "c\\" + 2"#);
        assert_eq!(style_of(&buffer, "b"), StyleCategory::String);
        assert_eq!(style_of(&buffer, "\"s"), StyleCategory::String);
        assert_eq!(style_of(&buffer, "' "), StyleCategory::StringEnd);
        assert_eq!(style_of(&buffer, "\" + 2"), StyleCategory::StringEnd);
        assert_eq!(style_of(&buffer, "2"), StyleCategory::Number);
    }

    #[test]
    fn test_unterminated_string_ends_at_line_break() {
        let buffer = styled(c_syntax(), "char *s = \"open  \nreturn 1;");
        assert_eq!(style_of(&buffer, "open"), StyleCategory::String);
        assert_eq!(style_of(&buffer, "  \n"), StyleCategory::Default);
        assert_eq!(style_of(&buffer, "return"), StyleCategory::Keyword);

        // an escaped line break continues the string
        let buffer = styled(c_syntax(), "s = \"a\\\nreturn\";");
        assert_eq!(style_of(&buffer, "return"), StyleCategory::String);
        assert_eq!(style_of(&buffer, "\";"), StyleCategory::StringEnd);
    }

    #[test]
    fn test_strings_split_independent() {
        for text in [
            "x = \"a#b\" + 1\ny = 'q\\'r' # c 'd'\nz",
            "s = \"c\\\\\" + \"e\\\nf\" + \"open\n\"\"\"doc\"\"\"",
            "class Foo  :\n    pass\nclass Bar\n(x)",
        ] {
            assert_split_independent(python_syntax(), text);
        }
        assert_split_independent(c_syntax(), "puts(\"http://x\"); // 'q\nstruct P { char c = '\\''; };");
    }

    #[test]
    fn test_class_name_needs_follower() {
        let buffer = styled(python_syntax(), "class Foo Bar");
        assert_eq!(style_of(&buffer, "Foo"), StyleCategory::Default);

        let buffer = styled(python_syntax(), "class Foo  :");
        assert_eq!(style_of(&buffer, "Foo"), StyleCategory::ClassName);

        // the follower must be on the name's line
        let buffer = styled(python_syntax(), "class Foo\n:");
        assert_eq!(style_of(&buffer, "Foo"), StyleCategory::Default);

        // functions need no follower
        let buffer = styled(python_syntax(), "def run");
        assert_eq!(style_of(&buffer, "run"), StyleCategory::FunctionName);

        let buffer = styled(c_syntax(), "struct Point p;");
        assert_eq!(style_of(&buffer, "Point"), StyleCategory::Default);
    }

    #[test]
    fn test_class_follower_after_range() {
        let lexer = SourceLexer::new(python_syntax()).unwrap();
        let text = "class Foo  (Base):";
        let mut buffer = StyleBuffer::new(text);
        lexer.style_text(&mut buffer, 0, 9);
        assert_eq!(style_of(&buffer, "Foo"), StyleCategory::ClassName);
    }
}
