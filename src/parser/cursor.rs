//! Token cursor shared by all grammar rules
//!
//! The parser pulls tokens from any iterator of lexer results and buffers at
//! most two of them. Every failed `at`/`eat` check records the kind it was
//! looking for; the record is cleared whenever a token is consumed. When a
//! rule gives up, the recorded kinds become the diagnostic's expected set, so
//! skipped optional clauses show up as alternatives.

use crate::ast::Position;
use crate::diagnostics::Diagnostic;
use crate::lexer::{Token, TokenKind};
use std::collections::VecDeque;

pub type ParseResult<T> = Result<T, Diagnostic>;

/// How many groups and function calls may be open at once
pub const MAX_NESTING: usize = 64;

/// Recursive-descent parser over a pull-based token stream
pub struct Parser<'a, I> {
    tokens: I,
    lookahead: VecDeque<Token<'a>>,
    /// Where a synthesized `Eof` goes if the stream ends without one
    end: Position,
    expected: Vec<TokenKind>,
    depth: usize,
}

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = ParseResult<Token<'a>>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            lookahead: VecDeque::with_capacity(2),
            end: Position::start(),
            expected: Vec::new(),
            depth: 0,
        }
    }

    fn fill(&mut self, count: usize) -> ParseResult<()> {
        while self.lookahead.len() < count {
            let token = match self.tokens.next() {
                Some(token) => token?,
                None => Token::new(TokenKind::Eof, "", self.end),
            };
            self.end = token.position.advance(token.lexeme);
            self.lookahead.push_back(token);
        }
        Ok(())
    }

    pub(super) fn peek(&mut self) -> ParseResult<Token<'a>> {
        self.peek_nth(0)
    }

    /// Look `n` tokens ahead without consuming anything. `n` is at most 1.
    pub(super) fn peek_nth(&mut self, n: usize) -> ParseResult<Token<'a>> {
        self.fill(n + 1)?;
        Ok(self.lookahead[n])
    }

    pub(super) fn peek_kind(&mut self) -> ParseResult<TokenKind> {
        Ok(self.peek()?.kind)
    }

    /// Consume the current token.
    pub(super) fn bump(&mut self) -> ParseResult<Token<'a>> {
        self.fill(1)?;
        self.expected.clear();
        let end = self.end;
        Ok(self
            .lookahead
            .pop_front()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, "", end)))
    }

    /// Is the current token `kind`? A miss is remembered for diagnostics.
    pub(super) fn at(&mut self, kind: TokenKind) -> ParseResult<bool> {
        let found = self.peek_kind()? == kind;
        if !found && !self.expected.contains(&kind) {
            self.expected.push(kind);
        }
        Ok(found)
    }

    /// The first of `kinds` the current token matches, recording misses.
    pub(super) fn at_any(&mut self, kinds: &[TokenKind]) -> ParseResult<Option<TokenKind>> {
        for &kind in kinds {
            if self.at(kind)? {
                return Ok(Some(kind));
            }
        }
        Ok(None)
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> ParseResult<Option<Token<'a>>> {
        if self.at(kind)? {
            Ok(Some(self.bump()?))
        } else {
            Ok(None)
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token<'a>> {
        match self.eat(kind)? {
            Some(token) => Ok(token),
            None => Err(self.error(&[])),
        }
    }

    /// Run `rule` one nesting level deeper. `open` is the `(` that started
    /// the level and is reported if the limit is exceeded.
    pub(super) fn nested<T>(
        &mut self,
        open: Token<'a>,
        rule: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(Diagnostic::nesting_too_deep(&open, MAX_NESTING));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Build a diagnostic for the current token. `also` is appended to the
    /// kinds already recorded at this position.
    pub(super) fn error(&mut self, also: &[TokenKind]) -> Diagnostic {
        let mut expected = std::mem::take(&mut self.expected);
        expected.extend_from_slice(also);
        match self.peek() {
            Ok(token) => Diagnostic::unexpected(&token, &expected),
            Err(diagnostic) => diagnostic,
        }
    }

    /// Require end of input after a complete statement.
    pub(super) fn expect_end(&mut self) -> ParseResult<()> {
        if self.at(TokenKind::Eof)? {
            Ok(())
        } else {
            Err(self.error(&[]))
        }
    }
}
