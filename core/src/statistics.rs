//! Statistics aggregator: per-kind totals, per-state counts and averages.
//!
//! The return shape is the same for both kinds. Kinds without elevation or
//! ascension report 0.0 for those averages, as does an empty table.

use crate::{
    error::TrailResult,
    schema::{Field, RecordKind},
    store::RecordStore,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateCount {
    pub state: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub kind:          RecordKind,
    /// Number of distinct states with at least one record.
    pub state_count:   usize,
    pub total:         u64,
    pub per_state:     Vec<StateCount>,
    pub avg_ascension: f64,
    pub avg_elevation: f64,
}

impl Statistics {
    /// "State: count" lines, ordered by state.
    pub fn per_state_lines(&self) -> Vec<String> {
        self.per_state
            .iter()
            .map(|s| format!("{}: {}", s.state, s.count))
            .collect()
    }

    pub fn count_for(&self, state: &str) -> u64 {
        self.per_state
            .iter()
            .find(|s| s.state.eq_ignore_ascii_case(state))
            .map_or(0, |s| s.count)
    }
}

pub fn aggregate(store: &RecordStore, kind: RecordKind) -> TrailResult<Statistics> {
    let total = store.count(kind)?;
    let per_state = store.count_and_group_by_state(kind)?;
    let avg_ascension = average_or_zero(store, kind, Field::Ascension)?;
    let avg_elevation = average_or_zero(store, kind, Field::Elevation)?;

    log::info!("Total {kind}s found: {total}, total states: {}", per_state.len());

    Ok(Statistics {
        kind,
        state_count: per_state.len(),
        total,
        per_state,
        avg_ascension,
        avg_elevation,
    })
}

fn average_or_zero(store: &RecordStore, kind: RecordKind, field: Field) -> TrailResult<f64> {
    if !kind.has_field(field) {
        return Ok(0.0);
    }
    Ok(store.average(kind, field)?.unwrap_or(0.0))
}
