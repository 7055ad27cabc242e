use crate::schema::{Field, RecordKind};
use rusqlite::ErrorCode;
use std::fmt;
use thiserror::Error;

/// Why a raw input value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    EmptyName,
    InvalidState,
    InvalidRating,
    InvalidElevation,
    InvalidAscension,
    InvalidTime,
    EmptyDescription,
    InvalidDate,
    InvalidUrl,
    InvalidCoordinate,
    EmptyValue,
    InvalidNumber,
}

impl ValidationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationReason::EmptyName         => "EmptyName",
            ValidationReason::InvalidState      => "InvalidState",
            ValidationReason::InvalidRating     => "InvalidRating",
            ValidationReason::InvalidElevation  => "InvalidElevation",
            ValidationReason::InvalidAscension  => "InvalidAscension",
            ValidationReason::InvalidTime       => "InvalidTime",
            ValidationReason::EmptyDescription  => "EmptyDescription",
            ValidationReason::InvalidDate       => "InvalidDate",
            ValidationReason::InvalidUrl        => "InvalidUrl",
            ValidationReason::InvalidCoordinate => "InvalidCoordinate",
            ValidationReason::EmptyValue        => "EmptyValue",
            ValidationReason::InvalidNumber     => "InvalidNumber",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("field '{field}' rejected: {reason}")]
pub struct ValidationError {
    pub field:  Field,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: Field, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

#[derive(Error, Debug)]
pub enum TrailError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid record kind: '{0}'")]
    InvalidKind(String),

    #[error("Column '{column}' is not a {kind} field")]
    InvalidColumn { kind: RecordKind, column: String },

    #[error("Invalid sort order '{0}': expected Ascending or Descending")]
    InvalidOrder(String),

    #[error("Expected {expected} values for a {kind}, got {actual}")]
    FieldCount { kind: RecordKind, expected: usize, actual: usize },

    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrailError {
    /// Classify a failed write: constraint violations become `Integrity`,
    /// everything else stays a store fault.
    pub(crate) fn from_write(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
                TrailError::Integrity(msg.unwrap_or_else(|| e.to_string()))
            }
            other => TrailError::Store(other),
        }
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            TrailError::Validation(v) => Some(v),
            _ => None,
        }
    }

    /// Backend faults, as opposed to caller mistakes or rejected input.
    pub fn is_store_fault(&self) -> bool {
        matches!(self, TrailError::Store(_) | TrailError::Other(_))
    }
}

pub type TrailResult<T> = Result<T, TrailError>;
