//! # srql
//!
//! Lexer, parser and AST for SRQL, the query language of the network
//! observability platform.
//!
//! A query is one statement: `SHOW`, `FIND`, `COUNT` or `STREAM`.
//!
//! ```rust
//! use srql::ast::{Entity, Query};
//!
//! let query = srql::parse("FIND devices WHERE ip = '10.0.0.1' LIMIT 10").unwrap();
//! assert_eq!(query.entity(), Some(Entity::Devices));
//! assert!(matches!(query, Query::Find(_)));
//! ```
//!
//! Failures come back as a single [`Diagnostic`] with a position and the set of
//! tokens that would have been accepted there.
//!
//! ## Testing
//!
//! Parser tests use the fluent assertions in the [testing module](testing).

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod testing;

pub use ast::Query;
pub use diagnostics::Diagnostic;
pub use lexer::tokenize;
pub use parser::{parse, parse_tokens};
