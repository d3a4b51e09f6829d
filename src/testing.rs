//! Testing utilities for SRQL queries
//!
//! Parser tests assert on the shape of the tree through a fluent API instead
//! of building expected `Query` values by hand:
//!
//! ```rust,ignore
//! use srql::testing::{assert_query, parse_ok};
//!
//! let query = parse_ok("SHOW devices WHERE ip = '10.0.0.1' LIMIT 10");
//! assert_query(&query)
//!     .show()
//!     .entity(Entity::Devices)
//!     .where_clause(|c| {
//!         c.len(1)
//!             .expression(0, |e| {
//!                 e.comparison("ip", ComparisonOperator::Eq, Value::string("10.0.0.1"));
//!             });
//!     })
//!     .limit(10);
//! ```
//!
//! Use `parse_ok`/`parse_err` so failures print the rendered diagnostic.

mod assertions;

pub use assertions::{
    assert_query, ConditionAssertion, CountAssertion, ExpressionAssertion, FindAssertion,
    JoinAssertion, QueryAssertion, ShowAssertion, SourceAssertion, StreamAssertion,
};

use crate::ast::Query;
use crate::diagnostics::{Diagnostic, RenderOptions};

/// Parse `source`, panicking with the rendered diagnostic on failure.
pub fn parse_ok(source: &str) -> Query {
    match crate::parse(source) {
        Ok(query) => query,
        Err(diagnostic) => panic!(
            "expected `{}` to parse:\n{}",
            source,
            diagnostic.render(source, &RenderOptions::default())
        ),
    }
}

/// Parse `source`, panicking if it succeeds.
pub fn parse_err(source: &str) -> Diagnostic {
    match crate::parse(source) {
        Ok(query) => panic!("expected `{}` to fail, parsed as: {:?}", source, query),
        Err(diagnostic) => diagnostic,
    }
}
