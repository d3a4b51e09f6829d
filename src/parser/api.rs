//! Public API for the parser.

use super::cursor::Parser;
use crate::ast::Query;
use crate::diagnostics::Diagnostic;
use crate::lexer::{Lexer, Token};

/// Parse a query, lexing on demand.
pub fn parse(source: &str) -> Result<Query, Diagnostic> {
    Parser::new(Lexer::new(source)).parse_query()
}

/// Parse an already lexed token stream. A missing trailing `Eof` is implied.
pub fn parse_tokens(tokens: Vec<Token<'_>>) -> Result<Query, Diagnostic> {
    Parser::new(tokens.into_iter().map(Ok)).parse_query()
}
