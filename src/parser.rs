//! Parser module for SRQL
//!
//! A hand-written recursive-descent parser. Each grammar rule is a method on
//! [`Parser`], and no decision needs more than two tokens of lookahead: one
//! token selects a statement, a clause or an expression alternative, and the
//! second only separates `name(` calls from plain fields.
//!
//! Parsing is fail-fast. The first violation becomes a single
//! [`Diagnostic`](crate::diagnostics::Diagnostic) and no partial tree is
//! returned.
//!
//! ## Testing
//!
//! Parser tests use the fluent assertions in [`crate::testing`].

pub mod api;
mod cursor;
mod expressions;
mod statements;
mod stream;
#[cfg(test)]
mod tests;

pub use api::{parse, parse_tokens};
pub use cursor::{Parser, MAX_NESTING};
