//! Field references, function calls and select items

use super::{Entity, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dotted field reference: `name`, `entity.name` or `entity.name.attribute`.
///
/// `attribute` is only ever set together with `entity`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub entity: Option<Entity>,
    pub name: String,
    pub attribute: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entity: None,
            name: name.into(),
            attribute: None,
        }
    }

    pub fn qualified(entity: Entity, name: impl Into<String>) -> Self {
        Self {
            entity: Some(entity),
            name: name.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(entity) = self.entity {
            write!(f, "{}.", entity)?;
        }
        f.write_str(&self.name)?;
        if let Some(attribute) = &self.attribute {
            write!(f, ".{}", attribute)?;
        }
        Ok(())
    }
}

/// `name(args)`. The name is kept exactly as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: FunctionArgs,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: FunctionArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionArgs {
    Empty,
    Star,
    List(Vec<SelectItem>),
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        match &self.args {
            FunctionArgs::Empty => {}
            FunctionArgs::Star => f.write_str("*")?,
            FunctionArgs::List(items) => write_list(f, items)?,
        }
        f.write_str(")")
    }
}

/// Anything that may appear in a select list or as a function argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectItem {
    Field(Field),
    Function(FunctionCall),
    Value(Value),
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectItem::Field(field) => field.fmt(f),
            SelectItem::Function(call) => call.fmt(f),
            SelectItem::Value(value) => value.fmt(f),
        }
    }
}

/// The left-hand side of an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluable {
    Field(Field),
    Function(FunctionCall),
}

impl From<Field> for Evaluable {
    fn from(field: Field) -> Self {
        Evaluable::Field(field)
    }
}

impl From<FunctionCall> for Evaluable {
    fn from(call: FunctionCall) -> Self {
        Evaluable::Function(call)
    }
}

impl fmt::Display for Evaluable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluable::Field(field) => field.fmt(f),
            Evaluable::Function(call) => call.fmt(f),
        }
    }
}

/// Write `items` separated by `, `.
pub(crate) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.fmt(f)?;
    }
    Ok(())
}
