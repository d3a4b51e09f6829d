//! WHERE/HAVING/ON conditions
//!
//! A condition is a flat chain: the first expression followed by
//! `(operator, expression)` links, applied strictly left to right. AND and OR
//! have the same precedence, so `a AND b OR c` is `[a, AND b, OR c]` and no
//! tree is built from it. Parentheses are the only grouping.

use super::field::write_list;
use super::{Evaluable, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    And,
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => f.write_str("AND"),
            LogicalOperator::Or => f.write_str("OR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
}

impl ComparisonOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Neq => "!=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Gte => ">=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Lte => "<=",
            ComparisonOperator::Like => "LIKE",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub first: Expression,
    pub rest: Vec<ConditionLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionLink {
    pub operator: LogicalOperator,
    pub expression: Expression,
}

impl Condition {
    pub fn single(expression: Expression) -> Self {
        Self {
            first: expression,
            rest: Vec::new(),
        }
    }

    /// Append another link to the chain.
    pub fn then(mut self, operator: LogicalOperator, expression: Expression) -> Self {
        self.rest.push(ConditionLink {
            operator,
            expression,
        });
        self
    }

    /// Number of expressions in the chain. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|link| &link.expression))
    }

    pub fn operators(&self) -> Vec<LogicalOperator> {
        self.rest.iter().map(|link| link.operator).collect()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.first.fmt(f)?;
        for link in &self.rest {
            write!(f, " {} {}", link.operator, link.expression)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Comparison {
        left: Evaluable,
        operator: ComparisonOperator,
        value: Value,
    },
    In {
        left: Evaluable,
        values: Vec<Value>,
    },
    Contains {
        left: Evaluable,
        pattern: String,
    },
    Group(Box<Condition>),
    Between {
        left: Evaluable,
        low: Value,
        high: Value,
    },
    IsNull {
        left: Evaluable,
        negated: bool,
    },
}

impl Expression {
    pub fn comparison(left: impl Into<Evaluable>, operator: ComparisonOperator, value: Value) -> Self {
        Expression::Comparison {
            left: left.into(),
            operator,
            value,
        }
    }

    /// The evaluable on the left, `None` for a parenthesized group
    pub fn left(&self) -> Option<&Evaluable> {
        match self {
            Expression::Comparison { left, .. }
            | Expression::In { left, .. }
            | Expression::Contains { left, .. }
            | Expression::Between { left, .. }
            | Expression::IsNull { left, .. } => Some(left),
            Expression::Group(_) => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison {
                left,
                operator,
                value,
            } => write!(f, "{} {} {}", left, operator, value),
            Expression::In { left, values } => {
                write!(f, "{} IN (", left)?;
                write_list(f, values)?;
                f.write_str(")")
            }
            Expression::Contains { left, pattern } => {
                write!(f, "{} CONTAINS {}", left, super::value::quote(pattern))
            }
            Expression::Group(inner) => write!(f, "({})", inner),
            Expression::Between { left, low, high } => {
                write!(f, "{} BETWEEN {} AND {}", left, low, high)
            }
            Expression::IsNull { left, negated } => {
                if *negated {
                    write!(f, "{} IS NOT NULL", left)
                } else {
                    write!(f, "{} IS NULL", left)
                }
            }
        }
    }
}
