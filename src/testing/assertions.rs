//! Fluent assertion API for parsed queries

use crate::ast::{
    ComparisonOperator, Condition, CountStatement, DataSource, EmitPolicy, Entity, Expression,
    FindStatement, JoinPart, JoinType, LogicalOperator, OrderByItem, Query, SelectList,
    ShowStatement, ShowTarget, SortDirection, SourceName, StatementKind, StreamSourcePrimary,
    StreamStatement, TimeSpec, Value, WindowKind, WindowSpec,
};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a query
pub fn assert_query(query: &Query) -> QueryAssertion<'_> {
    QueryAssertion { query }
}

// ============================================================================
// Query Assertions
// ============================================================================

pub struct QueryAssertion<'a> {
    query: &'a Query,
}

impl<'a> QueryAssertion<'a> {
    pub fn kind(self, expected: StatementKind) -> Self {
        assert_eq!(
            self.query.kind(),
            expected,
            "Expected a {} statement, found: {}",
            expected,
            self.query
        );
        self
    }

    /// Assert the query prints back to exactly `expected`
    pub fn canonical(self, expected: &str) -> Self {
        assert_eq!(self.query.to_string(), expected);
        self
    }

    pub fn show(self) -> ShowAssertion<'a> {
        match self.query {
            Query::Show(show) => ShowAssertion { show },
            other => panic!("Expected SHOW, found {} statement: {}", other.kind(), other),
        }
    }

    pub fn find(self) -> FindAssertion<'a> {
        match self.query {
            Query::Find(find) => FindAssertion { find },
            other => panic!("Expected FIND, found {} statement: {}", other.kind(), other),
        }
    }

    pub fn count(self) -> CountAssertion<'a> {
        match self.query {
            Query::Count(count) => CountAssertion { count },
            other => panic!("Expected COUNT, found {} statement: {}", other.kind(), other),
        }
    }

    pub fn stream(self) -> StreamAssertion<'a> {
        match self.query {
            Query::Stream(stream) => StreamAssertion { stream },
            other => panic!("Expected STREAM, found {} statement: {}", other.kind(), other),
        }
    }
}

// ============================================================================
// Statement Assertions
// ============================================================================

pub struct ShowAssertion<'a> {
    show: &'a ShowStatement,
}

impl<'a> ShowAssertion<'a> {
    pub fn entity(self, expected: Entity) -> Self {
        assert_eq!(
            self.show.target,
            ShowTarget::Entity(expected),
            "SHOW target mismatch"
        );
        self
    }

    /// Assert an aggregate target, comparing the call by its printed form
    pub fn aggregate(self, call: &str, entity: Entity) -> Self {
        match &self.show.target {
            ShowTarget::Aggregate {
                call: actual,
                entity: actual_entity,
            } => {
                assert_eq!(actual.to_string(), call, "SHOW aggregate call mismatch");
                assert_eq!(*actual_entity, entity, "SHOW aggregate entity mismatch");
            }
            ShowTarget::Entity(actual) => {
                panic!("Expected aggregate target, found entity {}", actual)
            }
        }
        self
    }

    pub fn time_spec(self, expected: TimeSpec) -> Self {
        assert_eq!(self.show.time_spec.as_ref(), Some(&expected));
        self
    }

    pub fn no_time_spec(self) -> Self {
        assert_eq!(self.show.time_spec, None);
        self
    }

    pub fn where_clause<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ConditionAssertion<'a>),
    {
        assertion(condition_of(self.show.where_clause.as_ref(), "WHERE"));
        self
    }

    pub fn no_where(self) -> Self {
        assert!(
            self.show.where_clause.is_none(),
            "Expected no WHERE clause, found {:?}",
            self.show.where_clause
        );
        self
    }

    pub fn order_by(self, expected: &[(&str, SortDirection)]) -> Self {
        assert_order_by(&self.show.order_by, expected);
        self
    }

    pub fn limit(self, expected: u64) -> Self {
        assert_eq!(self.show.limit, Some(expected), "LIMIT mismatch");
        self
    }

    pub fn no_limit(self) -> Self {
        assert_eq!(self.show.limit, None, "Expected no LIMIT");
        self
    }

    pub fn latest(self, expected: bool) -> Self {
        assert_eq!(self.show.latest, expected, "LATEST flag mismatch");
        self
    }
}

pub struct FindAssertion<'a> {
    find: &'a FindStatement,
}

impl<'a> FindAssertion<'a> {
    pub fn entity(self, expected: Entity) -> Self {
        assert_eq!(self.find.entity, expected, "FIND entity mismatch");
        self
    }

    pub fn time_spec(self, expected: TimeSpec) -> Self {
        assert_eq!(self.find.time_spec.as_ref(), Some(&expected));
        self
    }

    pub fn where_clause<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ConditionAssertion<'a>),
    {
        assertion(condition_of(self.find.where_clause.as_ref(), "WHERE"));
        self
    }

    pub fn no_where(self) -> Self {
        assert!(self.find.where_clause.is_none(), "Expected no WHERE clause");
        self
    }

    pub fn order_by(self, expected: &[(&str, SortDirection)]) -> Self {
        assert_order_by(&self.find.order_by, expected);
        self
    }

    pub fn limit(self, expected: u64) -> Self {
        assert_eq!(self.find.limit, Some(expected), "LIMIT mismatch");
        self
    }

    pub fn latest(self, expected: bool) -> Self {
        assert_eq!(self.find.latest, expected, "LATEST flag mismatch");
        self
    }
}

pub struct CountAssertion<'a> {
    count: &'a CountStatement,
}

impl<'a> CountAssertion<'a> {
    pub fn entity(self, expected: Entity) -> Self {
        assert_eq!(self.count.entity, expected, "COUNT entity mismatch");
        self
    }

    pub fn time_spec(self, expected: TimeSpec) -> Self {
        assert_eq!(self.count.time_spec.as_ref(), Some(&expected));
        self
    }

    pub fn where_clause<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ConditionAssertion<'a>),
    {
        assertion(condition_of(self.count.where_clause.as_ref(), "WHERE"));
        self
    }
}

pub struct StreamAssertion<'a> {
    stream: &'a StreamStatement,
}

impl<'a> StreamAssertion<'a> {
    pub fn select_all(self) -> Self {
        assert_eq!(self.stream.select, Some(SelectList::All), "Expected `*`");
        self
    }

    pub fn no_select(self) -> Self {
        assert_eq!(self.stream.select, None, "Expected no select list");
        self
    }

    /// Assert the select list element by element, as printed (`expr [AS alias]`)
    pub fn select(self, expected: &[&str]) -> Self {
        match &self.stream.select {
            Some(SelectList::Items(items)) => {
                let actual: Vec<String> = items.iter().map(ToString::to_string).collect();
                assert_eq!(actual, expected, "select list mismatch");
            }
            other => panic!("Expected select items {:?}, found {:?}", expected, other),
        }
        self
    }

    pub fn source<F>(self, assertion: F) -> Self
    where
        F: FnOnce(SourceAssertion<'a>),
    {
        assertion(SourceAssertion {
            source: &self.stream.source,
            context: "FROM".to_string(),
        });
        self
    }

    pub fn join_count(self, expected: usize) -> Self {
        assert_eq!(self.stream.joins.len(), expected, "join count mismatch");
        self
    }

    pub fn join<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(JoinAssertion<'a>),
    {
        assert!(
            index < self.stream.joins.len(),
            "Join index {} out of bounds (statement has {} joins)",
            index,
            self.stream.joins.len()
        );
        assertion(JoinAssertion {
            join: &self.stream.joins[index],
            context: format!("joins[{}]", index),
        });
        self
    }

    pub fn where_clause<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ConditionAssertion<'a>),
    {
        assertion(condition_of(self.stream.where_clause.as_ref(), "WHERE"));
        self
    }

    pub fn group_by(self, expected: &[&str]) -> Self {
        let actual: Vec<String> = self.stream.group_by.iter().map(ToString::to_string).collect();
        assert_eq!(actual, expected, "GROUP BY mismatch");
        self
    }

    pub fn having<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ConditionAssertion<'a>),
    {
        assertion(condition_of(self.stream.having.as_ref(), "HAVING"));
        self
    }

    pub fn order_by(self, expected: &[(&str, SortDirection)]) -> Self {
        assert_order_by(&self.stream.order_by, expected);
        self
    }

    pub fn limit(self, expected: u64) -> Self {
        assert_eq!(self.stream.limit, Some(expected), "LIMIT mismatch");
        self
    }

    pub fn emit(self, expected: EmitPolicy) -> Self {
        assert_eq!(self.stream.emit, Some(expected), "EMIT mismatch");
        self
    }

    pub fn no_emit(self) -> Self {
        assert_eq!(self.stream.emit, None, "Expected no EMIT clause");
        self
    }
}

// ============================================================================
// Stream Part Assertions
// ============================================================================

pub struct SourceAssertion<'a> {
    source: &'a DataSource,
    context: String,
}

impl<'a> SourceAssertion<'a> {
    pub fn entity(self, expected: Entity) -> Self {
        assert_eq!(
            self.source.primary,
            StreamSourcePrimary::Source(SourceName::Entity(expected)),
            "{}: source mismatch",
            self.context
        );
        self
    }

    pub fn named(self, expected: &str) -> Self {
        assert_eq!(
            self.source.primary,
            StreamSourcePrimary::Source(SourceName::Named(expected.to_string())),
            "{}: source mismatch",
            self.context
        );
        self
    }

    pub fn table(self, expected: SourceName) -> Self {
        assert_eq!(
            self.source.primary,
            StreamSourcePrimary::Table(expected),
            "{}: source mismatch",
            self.context
        );
        self
    }

    pub fn window<F>(self, kind: WindowKind, assertion: F) -> Self
    where
        F: FnOnce(&'a WindowSpec),
    {
        match &self.source.primary {
            StreamSourcePrimary::Window(window) => {
                assert_eq!(window.kind, kind, "{}: window kind mismatch", self.context);
                assertion(window);
            }
            other => panic!("{}: Expected a window, found {}", self.context, other),
        }
        self
    }

    pub fn alias(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.source.alias.as_deref(),
            expected,
            "{}: alias mismatch",
            self.context
        );
        self
    }

    /// Assert the printed form of the whole data source
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.source.to_string(), expected, "{}", self.context);
        self
    }
}

pub struct JoinAssertion<'a> {
    join: &'a JoinPart,
    context: String,
}

impl<'a> JoinAssertion<'a> {
    pub fn join_type(self, expected: Option<JoinType>) -> Self {
        assert_eq!(
            self.join.join_type, expected,
            "{}: join type mismatch",
            self.context
        );
        self
    }

    pub fn source<F>(self, assertion: F) -> Self
    where
        F: FnOnce(SourceAssertion<'a>),
    {
        assertion(SourceAssertion {
            source: &self.join.source,
            context: format!("{}.source", self.context),
        });
        self
    }

    pub fn on<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ConditionAssertion<'a>),
    {
        assertion(ConditionAssertion {
            condition: &self.join.on,
            context: format!("{}.on", self.context),
        });
        self
    }
}

// ============================================================================
// Condition Assertions
// ============================================================================

fn condition_of<'a>(condition: Option<&'a Condition>, clause: &str) -> ConditionAssertion<'a> {
    match condition {
        Some(condition) => ConditionAssertion {
            condition,
            context: clause.to_string(),
        },
        None => panic!("Expected a {} clause, found none", clause),
    }
}

fn assert_order_by(actual: &[OrderByItem], expected: &[(&str, SortDirection)]) {
    let actual: Vec<(String, SortDirection)> = actual
        .iter()
        .map(|item| (item.field.to_string(), item.direction))
        .collect();
    let expected: Vec<(String, SortDirection)> = expected
        .iter()
        .map(|(field, direction)| (field.to_string(), *direction))
        .collect();
    assert_eq!(actual, expected, "ORDER BY mismatch");
}

pub struct ConditionAssertion<'a> {
    condition: &'a Condition,
    context: String,
}

impl<'a> ConditionAssertion<'a> {
    /// Assert the number of expressions in the chain
    pub fn len(self, expected: usize) -> Self {
        assert_eq!(
            self.condition.len(),
            expected,
            "{}: expected {} expressions in `{}`",
            self.context,
            expected,
            self.condition
        );
        self
    }

    pub fn operators(self, expected: &[LogicalOperator]) -> Self {
        assert_eq!(
            self.condition.operators(),
            expected,
            "{}: operator chain mismatch in `{}`",
            self.context,
            self.condition
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.condition.to_string(), expected, "{}", self.context);
        self
    }

    pub fn expression<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let expression = self.condition.expressions().nth(index).unwrap_or_else(|| {
            panic!(
                "{}: expression index {} out of bounds in `{}`",
                self.context, index, self.condition
            )
        });
        assertion(ExpressionAssertion {
            expression,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }
}

pub struct ExpressionAssertion<'a> {
    expression: &'a Expression,
    context: String,
}

impl<'a> ExpressionAssertion<'a> {
    fn left_text(&self) -> String {
        match self.expression.left() {
            Some(left) => left.to_string(),
            None => panic!(
                "{}: expected an evaluable, found group `{}`",
                self.context, self.expression
            ),
        }
    }

    /// `left` is compared by its printed form, e.g. `devices.ip` or `date(timestamp)`
    pub fn comparison(self, left: &str, operator: ComparisonOperator, value: Value) -> Self {
        assert_eq!(self.left_text(), left, "{}: left side mismatch", self.context);
        match self.expression {
            Expression::Comparison {
                operator: actual_operator,
                value: actual_value,
                ..
            } => {
                assert_eq!(*actual_operator, operator, "{}: operator mismatch", self.context);
                assert_eq!(*actual_value, value, "{}: value mismatch", self.context);
            }
            other => panic!("{}: Expected comparison, found `{}`", self.context, other),
        }
        self
    }

    pub fn between(self, left: &str, low: Value, high: Value) -> Self {
        assert_eq!(self.left_text(), left, "{}: left side mismatch", self.context);
        match self.expression {
            Expression::Between {
                low: actual_low,
                high: actual_high,
                ..
            } => {
                assert_eq!(*actual_low, low, "{}: low bound mismatch", self.context);
                assert_eq!(*actual_high, high, "{}: high bound mismatch", self.context);
            }
            other => panic!("{}: Expected BETWEEN, found `{}`", self.context, other),
        }
        self
    }

    pub fn in_values(self, left: &str, values: &[Value]) -> Self {
        assert_eq!(self.left_text(), left, "{}: left side mismatch", self.context);
        match self.expression {
            Expression::In {
                values: actual, ..
            } => assert_eq!(actual.as_slice(), values, "{}: IN list mismatch", self.context),
            other => panic!("{}: Expected IN, found `{}`", self.context, other),
        }
        self
    }

    pub fn contains(self, left: &str, pattern: &str) -> Self {
        assert_eq!(self.left_text(), left, "{}: left side mismatch", self.context);
        match self.expression {
            Expression::Contains {
                pattern: actual, ..
            } => assert_eq!(actual, pattern, "{}: pattern mismatch", self.context),
            other => panic!("{}: Expected CONTAINS, found `{}`", self.context, other),
        }
        self
    }

    pub fn is_null(self, left: &str, negated: bool) -> Self {
        assert_eq!(self.left_text(), left, "{}: left side mismatch", self.context);
        match self.expression {
            Expression::IsNull {
                negated: actual, ..
            } => assert_eq!(*actual, negated, "{}: NOT mismatch", self.context),
            other => panic!("{}: Expected IS NULL, found `{}`", self.context, other),
        }
        self
    }

    pub fn group<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ConditionAssertion<'a>),
    {
        match self.expression {
            Expression::Group(inner) => assertion(ConditionAssertion {
                condition: inner,
                context: format!("{}()", self.context),
            }),
            other => panic!("{}: Expected a group, found `{}`", self.context, other),
        }
        self
    }
}
