//! Value - Cell Values and Declared Types
//!
//! The grid has no runtime reflection to lean on, so every cell carries a
//! `Value` and every property declares a `ValueType`. Conversion between the
//! two is the canonical conversion used by all write paths.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::helpers::format_datetime;

/// Declared type of a property or scalar element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Bool,
    Integer,
    Float,
    Text,
    DateTime,
    /// Loosely typed; accepts any value unchanged
    #[default]
    Any,
}

impl ValueType {
    /// The value a freshly constructed element holds for this type
    pub fn default_value(self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::Integer => Value::Integer(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::Text => Value::Text(String::new()),
            ValueType::DateTime => Value::DateTime(DateTime::<Utc>::UNIX_EPOCH),
            ValueType::Any => Value::Null,
        }
    }

    /// Smallest type both `self` and `other` widen to
    pub fn common(self, other: ValueType) -> ValueType {
        match (self, other) {
            (a, b) if a == b => a,
            (ValueType::Integer, ValueType::Float) | (ValueType::Float, ValueType::Integer) => {
                ValueType::Float
            }
            _ => ValueType::Any,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Bool => "bool",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Text => "text",
            ValueType::DateTime => "datetime",
            ValueType::Any => "any",
        };
        f.write_str(name)
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    DateTime(DateTime<Utc>),
}

impl Value {
    /// The runtime type of this value (`Null` reports `Any`)
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Any,
            Value::Bool(_) => ValueType::Bool,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
            Value::DateTime(_) => ValueType::DateTime,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Convert to `target` using the canonical conversion rules
    pub fn convert_to(&self, target: ValueType) -> Result<Value> {
        if target == ValueType::Any || (self.value_type() == target && !self.is_null()) {
            return Ok(self.clone());
        }

        let converted = match (self, target) {
            (Value::Null, _) => None,
            (_, ValueType::Text) => Some(Value::Text(self.to_string())),
            (Value::Integer(i), ValueType::Float) => Some(Value::Float(*i as f64)),
            (Value::Float(f), ValueType::Integer) => float_to_integer(*f).map(Value::Integer),
            (Value::Bool(b), ValueType::Integer) => Some(Value::Integer(i64::from(*b))),
            (Value::Integer(i), ValueType::Bool) => match i {
                0 => Some(Value::Bool(false)),
                1 => Some(Value::Bool(true)),
                _ => None,
            },
            (Value::Integer(secs), ValueType::DateTime) => {
                DateTime::from_timestamp(*secs, 0).map(Value::DateTime)
            }
            (Value::Text(s), _) => parse_text(s.trim(), target),
            _ => None,
        };

        converted.ok_or_else(|| Error::Conversion {
            value: self.to_string(),
            target,
        })
    }

    /// Total order over all values, used for sorting
    ///
    /// `Null` sorts first. Values of the same kind compare naturally, integers
    /// and floats compare numerically, everything else falls back to the
    /// textual representation with the kind rank as tie-break.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.total_cmp(&(*b as f64)),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            _ => self
                .to_string()
                .cmp(&other.to_string())
                .then_with(|| self.rank().cmp(&other.rank())),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Integer(_) => 2,
            Value::Float(_) => 3,
            Value::Text(_) => 4,
            Value::DateTime(_) => 5,
        }
    }
}

fn float_to_integer(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_text(s: &str, target: ValueType) -> Option<Value> {
    match target {
        ValueType::Bool => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        ValueType::Integer => s.parse::<i64>().ok().map(Value::Integer),
        ValueType::Float => s.parse::<f64>().ok().map(Value::Float),
        ValueType::DateTime => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Value::DateTime(dt.with_timezone(&Utc))),
        ValueType::Text => Some(Value::Text(s.to_string())),
        ValueType::Any => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::DateTime(dt) => f.write_str(&format_datetime(dt)),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}
