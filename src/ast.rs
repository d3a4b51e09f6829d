//! AST for SRQL queries
//!
//! The parser builds these nodes directly; there is no intermediate tree or
//! visitor protocol. Consumers pattern-match on [`Query`] and its statements.
//! All nodes own their data, derive serde for the processor's dumps, and print
//! back to canonical SRQL.

pub mod condition;
pub mod entity;
pub mod field;
pub mod position;
pub mod query;
pub mod stream;
pub mod value;

pub use condition::{ComparisonOperator, Condition, ConditionLink, Expression, LogicalOperator};
pub use entity::Entity;
pub use field::{Evaluable, Field, FunctionArgs, FunctionCall, SelectItem};
pub use position::Position;
pub use query::{
    CountStatement, FindStatement, OrderByItem, Query, ShowStatement, ShowTarget, SortDirection,
    StatementKind, StreamStatement, TimeSpec, TimeUnit,
};
pub use stream::{
    DataSource, Duration, DurationOrField, DurationUnit, EmitPolicy, JoinPart, JoinType,
    SelectElement, SelectList, SourceName, StreamSourcePrimary, WindowKind, WindowSpec,
};
pub use value::Value;
