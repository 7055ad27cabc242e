//! Marker data handed to the map-rendering collaborator.
//!
//! The core only supplies what a marker and its tooltip need; the page,
//! tiles and HTML belong to the renderer.

use crate::{
    record::StoredRecord,
    schema::{Field, RecordKind},
    types::RecordId,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub kind:        RecordKind,
    pub id:          RecordId,
    pub name:        String,
    pub rating:      f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation:   Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascension:   Option<f64>,
    pub longitude:   f64,
    pub latitude:    f64,
}

impl From<&StoredRecord> for MapMarker {
    fn from(stored: &StoredRecord) -> Self {
        let record = &stored.record;
        Self {
            kind:        record.kind(),
            id:          stored.id,
            name:        record.name().to_string(),
            rating:      record.real(Field::Rating).unwrap_or_default(),
            description: record.text(Field::Description).map(str::to_string),
            elevation:   record.real(Field::Elevation),
            ascension:   record.real(Field::Ascension),
            longitude:   record.real(Field::Longitude).unwrap_or_default(),
            latitude:    record.real(Field::Latitude).unwrap_or_default(),
        }
    }
}
