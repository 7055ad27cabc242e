//! Shared primitive types used across the record core.

use rusqlite::types::{ToSql, ToSqlOutput};
use serde::Serialize;
use std::fmt;

/// Surrogate key assigned by the store. Never supplied by callers.
pub type RecordId = i64;

/// One validated field value. Numeric fields are `Real`, everything else `Text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Real(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Real(_) => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            FieldValue::Real(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            // Whole numbers keep one decimal place: 4.0 renders "4.0", not "4".
            FieldValue::Real(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.1}"),
            FieldValue::Real(v) => write!(f, "{v}"),
        }
    }
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            FieldValue::Text(s) => s.to_sql(),
            FieldValue::Real(v) => v.to_sql(),
        }
    }
}

/// Result of an update or delete. Matching zero rows is a normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "rows", rename_all = "snake_case")]
pub enum WriteOutcome {
    Affected(usize),
    NotFound,
}

impl WriteOutcome {
    pub fn from_count(rows: usize) -> Self {
        if rows == 0 {
            WriteOutcome::NotFound
        } else {
            WriteOutcome::Affected(rows)
        }
    }

    pub fn is_affected(&self) -> bool {
        matches!(self, WriteOutcome::Affected(_))
    }

    pub fn rows(&self) -> usize {
        match self {
            WriteOutcome::Affected(n) => *n,
            WriteOutcome::NotFound => 0,
        }
    }
}
