//! Nodes specific to STREAM statements: select lists, data sources, windows,
//! joins, durations and emit policies.

use super::field::write_list;
use super::{Condition, Entity, Field, SelectItem};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectList {
    /// `*`
    All,
    Items(Vec<SelectElement>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectElement {
    pub item: SelectItem,
    pub alias: Option<String>,
}

impl SelectElement {
    pub fn new(item: SelectItem) -> Self {
        Self { item, alias: None }
    }

    pub fn aliased(item: SelectItem, alias: impl Into<String>) -> Self {
        Self {
            item,
            alias: Some(alias.into()),
        }
    }
}

impl fmt::Display for SelectElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.item.fmt(f)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectList::All => f.write_str("*"),
            SelectList::Items(items) => write_list(f, items),
        }
    }
}

/// What a stream reads from: a known entity or any other named stream
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceName {
    Entity(Entity),
    Named(String),
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceName::Entity(entity) => entity.fmt(f),
            SourceName::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamSourcePrimary {
    Source(SourceName),
    /// `TABLE(source)`: read the source as a bounded table
    Table(SourceName),
    Window(WindowSpec),
}

impl fmt::Display for StreamSourcePrimary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSourcePrimary::Source(name) => name.fmt(f),
            StreamSourcePrimary::Table(name) => write!(f, "TABLE({})", name),
            StreamSourcePrimary::Window(window) => window.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Tumble,
    Hop,
}

/// `TUMBLE|HOP(source, time_field, size[, advance])`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub kind: WindowKind,
    pub source: SourceName,
    pub time_field: Field,
    pub size: DurationOrField,
    pub advance: Option<DurationOrField>,
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.kind {
            WindowKind::Tumble => "TUMBLE",
            WindowKind::Hop => "HOP",
        };
        write!(
            f,
            "{}({}, {}, {}",
            keyword, self.source, self.time_field, self.size
        )?;
        if let Some(advance) = &self.advance {
            write!(f, ", {}", advance)?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub primary: StreamSourcePrimary,
    pub alias: Option<String>,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.primary.fmt(f)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    Left,
    Right,
    Inner,
}

/// `[LEFT|RIGHT|INNER] JOIN source ON condition`. A bare `JOIN` has no type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinPart {
    pub join_type: Option<JoinType>,
    pub source: DataSource,
    pub on: Condition,
}

impl fmt::Display for JoinPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.join_type {
            Some(JoinType::Left) => f.write_str("LEFT ")?,
            Some(JoinType::Right) => f.write_str("RIGHT ")?,
            Some(JoinType::Inner) => f.write_str("INNER ")?,
            None => {}
        }
        write!(f, "JOIN {} ON {}", self.source, self.on)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            DurationUnit::Seconds => "s",
            DurationUnit::Minutes => "m",
            DurationUnit::Hours => "h",
            DurationUnit::Days => "d",
        }
    }

    pub fn seconds(self) -> u64 {
        match self {
            DurationUnit::Seconds => 1,
            DurationUnit::Minutes => 60,
            DurationUnit::Hours => 60 * 60,
            DurationUnit::Days => 24 * 60 * 60,
        }
    }
}

/// `INTEGER unit`, e.g. `30s`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Duration {
    pub amount: u64,
    pub unit: DurationUnit,
}

impl Duration {
    pub fn new(amount: u64, unit: DurationUnit) -> Self {
        Self { amount, unit }
    }

    pub fn seconds(amount: u64) -> Self {
        Self::new(amount, DurationUnit::Seconds)
    }

    pub fn minutes(amount: u64) -> Self {
        Self::new(amount, DurationUnit::Minutes)
    }

    /// Saturates at `u64::MAX` seconds.
    pub fn to_std(self) -> std::time::Duration {
        std::time::Duration::from_secs(self.amount.saturating_mul(self.unit.seconds()))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Window sizes may be a literal duration or a field holding one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationOrField {
    Duration(Duration),
    Field(Field),
}

impl fmt::Display for DurationOrField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationOrField::Duration(duration) => duration.fmt(f),
            DurationOrField::Field(field) => field.fmt(f),
        }
    }
}

/// When a streaming aggregation releases its results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitPolicy {
    AfterWindowClose { delay: Option<Duration> },
    Periodic { interval: Duration },
}

impl fmt::Display for EmitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitPolicy::AfterWindowClose { delay: None } => f.write_str("EMIT AFTER WINDOW CLOSE"),
            EmitPolicy::AfterWindowClose { delay: Some(delay) } => {
                write!(f, "EMIT AFTER WINDOW CLOSE WITH DELAY {}", delay)
            }
            EmitPolicy::Periodic { interval } => write!(f, "EMIT PERIODIC {}", interval),
        }
    }
}
