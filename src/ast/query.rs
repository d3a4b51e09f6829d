//! Statement roots
//!
//! [`Query`] is the tagged union handed to consumers. Every statement prints
//! back to canonical SRQL through `Display`, and re-parsing that text yields
//! an equal tree.

use super::field::write_list;
use super::{
    Condition, DataSource, EmitPolicy, Entity, Field, FunctionCall, JoinPart, SelectList, Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Show,
    Find,
    Count,
    Stream,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Show => "SHOW",
            StatementKind::Find => "FIND",
            StatementKind::Count => "COUNT",
            StatementKind::Stream => "STREAM",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    Show(ShowStatement),
    Find(FindStatement),
    Count(CountStatement),
    Stream(StreamStatement),
}

impl Query {
    pub fn kind(&self) -> StatementKind {
        match self {
            Query::Show(_) => StatementKind::Show,
            Query::Find(_) => StatementKind::Find,
            Query::Count(_) => StatementKind::Count,
            Query::Stream(_) => StatementKind::Stream,
        }
    }

    /// The entity the statement is about, when the source is an entity
    pub fn entity(&self) -> Option<Entity> {
        match self {
            Query::Show(show) => Some(show.target.entity()),
            Query::Find(find) => Some(find.entity),
            Query::Count(count) => Some(count.entity),
            Query::Stream(stream) => stream.source_entity(),
        }
    }

    pub fn where_clause(&self) -> Option<&Condition> {
        match self {
            Query::Show(show) => show.where_clause.as_ref(),
            Query::Find(find) => find.where_clause.as_ref(),
            Query::Count(count) => count.where_clause.as_ref(),
            Query::Stream(stream) => stream.where_clause.as_ref(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Show(show) => show.fmt(f),
            Query::Find(find) => find.fmt(f),
            Query::Count(count) => count.fmt(f),
            Query::Stream(stream) => stream.fmt(f),
        }
    }
}

/// Coarse units accepted by `LAST n <unit>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Minutes => "MINUTES",
            TimeUnit::Hours => "HOURS",
            TimeUnit::Days => "DAYS",
            TimeUnit::Weeks => "WEEKS",
            TimeUnit::Months => "MONTHS",
        };
        f.write_str(name)
    }
}

/// The time range of a `FROM <timeSpec>` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSpec {
    Today,
    Yesterday,
    Last { amount: u64, unit: TimeUnit },
    Between(Value, Value),
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSpec::Today => f.write_str("TODAY"),
            TimeSpec::Yesterday => f.write_str("YESTERDAY"),
            TimeSpec::Last { amount, unit } => write!(f, "LAST {} {}", amount, unit),
            TimeSpec::Between(start, end) => write!(f, "BETWEEN {} AND {}", start, end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderByItem {
    pub field: Field,
    pub direction: SortDirection,
}

impl fmt::Display for OrderByItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{} ASC", self.field),
            SortDirection::Desc => write!(f, "{} DESC", self.field),
        }
    }
}

/// What a SHOW statement lists: an entity, or an aggregate over one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowTarget {
    Entity(Entity),
    Aggregate { call: FunctionCall, entity: Entity },
}

impl ShowTarget {
    pub fn entity(&self) -> Entity {
        match self {
            ShowTarget::Entity(entity) => *entity,
            ShowTarget::Aggregate { entity, .. } => *entity,
        }
    }
}

impl fmt::Display for ShowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowTarget::Entity(entity) => entity.fmt(f),
            ShowTarget::Aggregate { call, entity } => write!(f, "{} FROM {}", call, entity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowStatement {
    pub target: ShowTarget,
    pub time_spec: Option<TimeSpec>,
    pub where_clause: Option<Condition>,
    /// Empty when there is no ORDER BY clause
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<u64>,
    pub latest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindStatement {
    pub entity: Entity,
    pub time_spec: Option<TimeSpec>,
    pub where_clause: Option<Condition>,
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<u64>,
    pub latest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountStatement {
    pub entity: Entity,
    pub time_spec: Option<TimeSpec>,
    pub where_clause: Option<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamStatement {
    pub select: Option<SelectList>,
    pub source: DataSource,
    pub joins: Vec<JoinPart>,
    pub where_clause: Option<Condition>,
    /// Empty when there is no GROUP BY clause
    pub group_by: Vec<Field>,
    pub having: Option<Condition>,
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<u64>,
    pub emit: Option<EmitPolicy>,
}

impl StreamStatement {
    fn source_entity(&self) -> Option<Entity> {
        use super::{SourceName, StreamSourcePrimary};
        let name = match &self.source.primary {
            StreamSourcePrimary::Source(name) | StreamSourcePrimary::Table(name) => name,
            StreamSourcePrimary::Window(window) => &window.source,
        };
        match name {
            SourceName::Entity(entity) => Some(*entity),
            SourceName::Named(_) => None,
        }
    }
}

/// Clauses shared by SHOW, FIND and COUNT, written in grammar order.
fn write_filters(
    f: &mut fmt::Formatter<'_>,
    time_spec: &Option<TimeSpec>,
    where_clause: &Option<Condition>,
) -> fmt::Result {
    if let Some(time_spec) = time_spec {
        write!(f, " FROM {}", time_spec)?;
    }
    if let Some(condition) = where_clause {
        write!(f, " WHERE {}", condition)?;
    }
    Ok(())
}

fn write_order_and_limit(
    f: &mut fmt::Formatter<'_>,
    order_by: &[OrderByItem],
    limit: Option<u64>,
) -> fmt::Result {
    if !order_by.is_empty() {
        f.write_str(" ORDER BY ")?;
        write_list(f, order_by)?;
    }
    if let Some(limit) = limit {
        write!(f, " LIMIT {}", limit)?;
    }
    Ok(())
}

impl fmt::Display for ShowStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHOW {}", self.target)?;
        write_filters(f, &self.time_spec, &self.where_clause)?;
        write_order_and_limit(f, &self.order_by, self.limit)?;
        if self.latest {
            f.write_str(" LATEST")?;
        }
        Ok(())
    }
}

impl fmt::Display for FindStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FIND {}", self.entity)?;
        write_filters(f, &self.time_spec, &self.where_clause)?;
        write_order_and_limit(f, &self.order_by, self.limit)?;
        if self.latest {
            f.write_str(" LATEST")?;
        }
        Ok(())
    }
}

impl fmt::Display for CountStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COUNT {}", self.entity)?;
        write_filters(f, &self.time_spec, &self.where_clause)
    }
}

impl fmt::Display for StreamStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("STREAM")?;
        if let Some(select) = &self.select {
            write!(f, " {}", select)?;
        }
        write!(f, " FROM {}", self.source)?;
        for join in &self.joins {
            write!(f, " {}", join)?;
        }
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {}", condition)?;
        }
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            write_list(f, &self.group_by)?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {}", having)?;
        }
        write_order_and_limit(f, &self.order_by, self.limit)?;
        if let Some(emit) = &self.emit {
            write!(f, " {}", emit)?;
        }
        Ok(())
    }
}
