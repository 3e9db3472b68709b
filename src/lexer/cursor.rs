//! Token cursor with one token of lookback and lookahead

use super::scanner::Token;

/// Walks a restyle range's tokens left to right
pub struct TokenCursor<'a> {
    tokens: Vec<Token<'a>>,
    /// Index of the next token to hand out
    pos: usize,
    /// Token just before the range, if the host has one
    before: Option<&'a str>,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: Vec<Token<'a>>, before: Option<&'a str>) -> Self {
        Self {
            tokens,
            pos: 0,
            before,
        }
    }

    /// Take the next token
    pub fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    /// Look `n` tokens past the current one without consuming
    pub fn peek(&self, n: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + n).copied()
    }

    /// The token before the one last returned by [`next`](Self::next)
    pub fn previous(&self) -> Option<&'a str> {
        match self.pos {
            0 | 1 => self.before,
            pos => Some(self.tokens[pos - 2].text),
        }
    }

    /// Peek past whitespace
    ///
    /// Returns how many tokens lie before the first non-whitespace
    /// token, together with that token.
    pub fn skip_space_peek(&self) -> Option<(usize, Token<'a>)> {
        self.tokens[self.pos..]
            .iter()
            .enumerate()
            .find(|(_, token)| !token.is_whitespace())
            .map(|(skipped, token)| (skipped, *token))
    }

    /// Consume `n` tokens, returning them
    pub fn advance(&mut self, n: usize) -> &[Token<'a>] {
        let start = self.pos;
        self.pos = (self.pos + n).min(self.tokens.len());
        &self.tokens[start..self.pos]
    }
}
