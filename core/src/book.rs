//! The record book: the inbound interface for the GUI/CLI shell.
//!
//! FLOW (fixed for every operation):
//!   caller strings → schema registry (kind, column, order)
//!                  → validator (writes only)
//!                  → store (backup, then one atomic statement)
//!                  → formatter / aggregator → caller
//!
//! RULES:
//!   - Every operation returns a structured result; presentation is the
//!     caller's job.
//!   - Name lookups are case-insensitive and may match several rows.
//!     Update and remove apply to all of them and report the count.
//!   - Zero matched rows is `WriteOutcome::NotFound`, not an error.

use crate::{
    config::BookConfig,
    error::{TrailError, TrailResult, ValidationError, ValidationReason},
    format,
    map::MapMarker,
    query::FilterSort,
    schema::{Field, RecordKind},
    statistics::{self, Statistics},
    store::RecordStore,
    types::{RecordId, WriteOutcome},
    validator,
};

pub struct RecordBook {
    store:  RecordStore,
    config: BookConfig,
}

impl RecordBook {
    /// Open the store named by `config`, create tables if needed.
    pub fn open(config: BookConfig) -> TrailResult<Self> {
        let store = RecordStore::open(&config.database_path)?
            .with_backup_path(config.resolved_backup_path());
        Self::with_store(store, config)
    }

    /// In-memory book with default config (used in tests).
    pub fn in_memory() -> TrailResult<Self> {
        Self::with_store(RecordStore::in_memory()?, BookConfig::default())
    }

    pub fn with_store(store: RecordStore, config: BookConfig) -> TrailResult<Self> {
        store.migrate()?;
        Ok(Self { store, config })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Validate `values` (one per field of `kind`, in order) and persist them.
    pub fn create<S: AsRef<str>>(&self, kind: RecordKind, values: &[S]) -> TrailResult<RecordId> {
        let record = validator::validate(kind, values, self.config.rating).map_err(|e| {
            log::warn!("{kind} rejected: {e}");
            e
        })?;
        let id = logged("create", self.store.insert(&record))?;
        log::info!("{}: {} is saved (id {id})", capitalized(kind), record.name());
        Ok(id)
    }

    /// Formatted display strings for every record named `name`.
    pub fn search(&self, kind: RecordKind, name: &str) -> TrailResult<Vec<String>> {
        let name = required_name(name)?;
        let rows = logged("search", self.store.select_by_name(kind, name))?;
        if rows.is_empty() {
            log::info!("No {kind} has been found with name '{name}'");
        }
        rows.iter().map(format::render_stored).collect()
    }

    /// Sort by `column`, optionally keeping only rows whose `column` equals
    /// `value`. `order` is "Ascending"/"Descending" (or "ASC"/"DESC").
    pub fn sort_and_filter(
        &self,
        kind:   RecordKind,
        column: &str,
        value:  Option<&str>,
        order:  &str,
    ) -> TrailResult<Vec<String>> {
        let request = FilterSort::parse(kind, value.map(|v| (column, v)), column, order)?;
        let rows = logged("sort_and_filter", self.store.select_filtered(&request))?;
        rows.iter().map(format::render_stored).collect()
    }

    /// Replace `column` on every record named `name` with `new_value`,
    /// validated by the same rule `create` applies to that field.
    pub fn modify(
        &self,
        kind:      RecordKind,
        name:      &str,
        column:    &str,
        new_value: &str,
    ) -> TrailResult<WriteOutcome> {
        let field = kind.resolve(column)?;
        let name = required_name(name)?;
        let value = validator::validate_new_value(field, new_value, self.config.rating)?;
        let outcome = logged("modify", self.store.update(kind, name, field, &value))?;
        match outcome {
            WriteOutcome::Affected(rows) => log::info!(
                "{} {name}: {} has been updated to {value} ({rows} row(s))",
                capitalized(kind),
                field.label()
            ),
            WriteOutcome::NotFound => log::warn!("No {kind} found with name: {name}"),
        }
        Ok(outcome)
    }

    /// Delete every record named `name`.
    pub fn remove(&self, kind: RecordKind, name: &str) -> TrailResult<WriteOutcome> {
        let name = required_name(name)?;
        let outcome = logged("remove", self.store.delete(kind, name))?;
        match outcome {
            WriteOutcome::Affected(rows) => {
                log::info!("{}: {name} has been removed ({rows} row(s))", capitalized(kind))
            }
            WriteOutcome::NotFound => log::warn!("No {kind} has been found with name '{name}'"),
        }
        Ok(outcome)
    }

    pub fn statistics(&self, kind: RecordKind) -> TrailResult<Statistics> {
        logged("statistics", statistics::aggregate(&self.store, kind))
    }

    /// Marker data for every record of `kind`.
    pub fn all_records(&self, kind: RecordKind) -> TrailResult<Vec<MapMarker>> {
        let rows = logged("all_records", self.store.select_all(kind))?;
        if rows.is_empty() {
            log::info!("No {kind}s found in database.");
        }
        Ok(rows.iter().map(MapMarker::from).collect())
    }

    /// Markers for both kinds, campsites first.
    pub fn map_markers(&self) -> TrailResult<Vec<MapMarker>> {
        let mut markers = Vec::new();
        for kind in RecordKind::ALL {
            markers.extend(self.all_records(kind)?);
        }
        Ok(markers)
    }
}

fn required_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::new(Field::Name, ValidationReason::EmptyName));
    }
    Ok(name)
}

/// Store faults are logged here; caller mistakes are left to the caller.
fn logged<T>(operation: &str, result: TrailResult<T>) -> TrailResult<T> {
    if let Err(e) = &result {
        match e {
            TrailError::Integrity(_) => log::error!("{operation}: {e}"),
            e if e.is_store_fault() => log::error!("{operation}: {e}"),
            _ => {}
        }
    }
    result
}

fn capitalized(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Campsite => "Campsite",
        RecordKind::Mountain => "Mountain",
    }
}
