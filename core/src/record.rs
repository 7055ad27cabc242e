//! Typed records, before and after persistence.

use crate::{
    schema::{Field, RecordKind},
    types::{FieldValue, RecordId},
};
use serde::Serialize;

/// A validated record: one value per field of `kind`, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    kind:   RecordKind,
    values: Vec<FieldValue>,
}

impl Record {
    /// Only the validator and the store build records, so arity always
    /// matches `kind.fields()`.
    pub(crate) fn new(kind: RecordKind, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(values.len(), kind.fields().len());
        Self { kind, values }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.kind.position(field).and_then(|i| self.values.get(i))
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn real(&self, field: Field) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_real)
    }

    pub fn name(&self) -> &str {
        self.text(Field::Name).unwrap_or_default()
    }
}

/// A record as read back from the store, with its surrogate key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRecord {
    pub id:     RecordId,
    pub record: Record,
}

impl StoredRecord {
    pub fn kind(&self) -> RecordKind {
        self.record.kind()
    }
}
