//! Lexer module for SRQL
//!
//! Tokenization is a single logos pass: keywords, literals and punctuation are
//! all declared in [`tokens`], and [`lexer_impl`] adds line/column tracking
//! and the trailing `Eof` token on top of it.
//!
//! The parser pulls tokens on demand through [`Lexer`]; [`tokenize`] is for
//! callers that want the whole stream up front.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{next_token, tokenize, Lexer};
pub use tokens::{
    Token, TokenKind, CALLABLE_KEYWORDS, COMPARISON_KINDS, DURATION_UNIT_KINDS, ENTITY_KINDS,
    KEYWORDS, STATEMENT_KINDS, TIME_UNIT_KINDS, VALUE_KINDS,
};
