//! Position-tracking lexer built on the logos token definitions
//!
//! [`next_token`] is the primitive: it reads exactly one token from the
//! remaining input and reports where the following token starts. It holds no
//! state, so [`Lexer`] and [`tokenize`] are thin loops around it.

use super::tokens::{Token, TokenKind};
use crate::ast::Position;
use crate::diagnostics::Diagnostic;
use logos::Logos;

/// Read the next token starting at `at`.
///
/// Leading whitespace is skipped. At end of input an `Eof` token is returned
/// positioned after any trailing whitespace; calling again from that position
/// keeps yielding `Eof`.
pub fn next_token(source: &str, at: Position) -> Result<(Token<'_>, Position), Diagnostic> {
    let Some(rest) = source.get(at.offset..) else {
        return Ok((Token::new(TokenKind::Eof, "", at), at));
    };

    let mut lexer = TokenKind::lexer(rest);
    let Some(result) = lexer.next() else {
        let end = at.advance(rest);
        return Ok((Token::new(TokenKind::Eof, "", end), end));
    };

    let span = lexer.span();
    let start = at.advance(&rest[..span.start]);
    match result {
        Ok(kind) => {
            let lexeme = &rest[span];
            Ok((Token::new(kind, lexeme, start), start.advance(lexeme)))
        }
        Err(()) => {
            let remaining = &rest[span.start..];
            match shorter_match(remaining) {
                Some((kind, len)) => {
                    let lexeme = &remaining[..len];
                    Ok((Token::new(kind, lexeme, start), start.advance(lexeme)))
                }
                None => Err(lexical_error(remaining, start)),
            }
        }
    }
}

/// Logos does not fall back to a shorter match once a longer pattern has
/// consumed input, so `7d` (a prefix of an IPv6 or MAC shape) or `1.2.3` can
/// fail as a whole. Retry on the longest plain number or word at that point.
fn shorter_match(remaining: &str) -> Option<(TokenKind, usize)> {
    let len = plain_prefix_len(remaining)?;
    let mut lexer = TokenKind::lexer(&remaining[..len]);
    match lexer.next() {
        Some(Ok(kind)) if lexer.span() == (0..len) => Some((kind, len)),
        _ => None,
    }
}

/// Length of the leading `[A-Za-z_][A-Za-z0-9_]*` or `-?[0-9]+(\.[0-9]+)?`.
fn plain_prefix_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let first = *bytes.first()?;
    if first.is_ascii_alphabetic() || first == b'_' {
        let len = bytes
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        return Some(len);
    }

    let sign = usize::from(first == b'-');
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    let mut len = sign + digits;
    if bytes.get(len) == Some(&b'.') {
        let fraction = count_digits(&bytes[len + 1..]);
        if fraction > 0 {
            len += 1 + fraction;
        }
    }
    Some(len)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Classify a logos failure. A quote that never closes is the only way a
/// string pattern can fail, everything else is a stray character.
fn lexical_error(remaining: &str, position: Position) -> Diagnostic {
    match remaining.chars().next() {
        Some(quote @ ('\'' | '"')) => Diagnostic::unterminated_string(quote, position),
        Some(ch) => Diagnostic::invalid_character(ch, position),
        None => Diagnostic::invalid_character('\0', position),
    }
}

/// Iterator over the tokens of a query, ending with `Eof`.
///
/// Iteration stops after `Eof` or after the first lexical error.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    position: Position,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: Position::start(),
            finished: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match next_token(self.source, self.position) {
            Ok((token, next)) => {
                self.finished = token.is_eof();
                self.position = next;
                Some(Ok(token))
            }
            Err(diagnostic) => {
                self.finished = true;
                Some(Err(diagnostic))
            }
        }
    }
}

/// Lex a whole query. The returned vector always ends with an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, Diagnostic> {
    Lexer::new(source).collect()
}
