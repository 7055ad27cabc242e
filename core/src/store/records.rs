use super::RecordStore;
use crate::{
    error::{TrailError, TrailResult},
    query::{select_columns, FilterSort},
    record::{Record, StoredRecord},
    schema::{Field, RecordKind},
    types::{FieldValue, RecordId, WriteOutcome},
};
use rusqlite::{params, params_from_iter, Params, Row};

impl RecordStore {
    // ── Writes ──────────────────────────────────────────────────────
    //
    // Each write is one statement inside its own transaction. A failed
    // statement or commit drops the transaction, which rolls it back.

    /// Insert a validated record. Returns the surrogate key the store assigned.
    pub fn insert(&self, record: &Record) -> TrailResult<RecordId> {
        let kind = record.kind();
        let columns: Vec<&str> = kind.fields().iter().map(|f| f.column()).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            kind.table(),
            columns.join(", "),
            placeholders.join(", "),
        );
        log::debug!("{sql}");

        self.backup();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(&sql, params_from_iter(record.values()))
            .map_err(TrailError::from_write)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(TrailError::from_write)?;
        Ok(id)
    }

    /// Set `field` to `value` on every row named `name` (case-insensitive).
    pub fn update(
        &self,
        kind:  RecordKind,
        name:  &str,
        field: Field,
        value: &FieldValue,
    ) -> TrailResult<WriteOutcome> {
        if !kind.has_field(field) {
            return Err(TrailError::InvalidColumn {
                kind,
                column: field.column().to_string(),
            });
        }
        let sql = format!("UPDATE {} SET {} = ?1 WHERE name = ?2", kind.table(), field.column());
        log::debug!("{sql}");

        self.backup();
        let tx = self.conn.unchecked_transaction()?;
        let rows = tx
            .execute(&sql, params![value, name.trim()])
            .map_err(TrailError::from_write)?;
        tx.commit().map_err(TrailError::from_write)?;
        Ok(WriteOutcome::from_count(rows))
    }

    /// Delete every row named `name` (case-insensitive).
    pub fn delete(&self, kind: RecordKind, name: &str) -> TrailResult<WriteOutcome> {
        let sql = format!("DELETE FROM {} WHERE name = ?1", kind.table());
        log::debug!("{sql}");

        self.backup();
        let tx = self.conn.unchecked_transaction()?;
        let rows = tx
            .execute(&sql, params![name.trim()])
            .map_err(TrailError::from_write)?;
        tx.commit().map_err(TrailError::from_write)?;
        Ok(WriteOutcome::from_count(rows))
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn select_by_name(&self, kind: RecordKind, name: &str) -> TrailResult<Vec<StoredRecord>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE name = ?1 ORDER BY id ASC",
            select_columns(kind),
            kind.table()
        );
        self.query_records(kind, &sql, params![name.trim()])
    }

    pub fn select_filtered(&self, request: &FilterSort) -> TrailResult<Vec<StoredRecord>> {
        let query = request.to_query();
        self.query_records(request.kind, &query.sql, params_from_iter(query.param.iter()))
    }

    pub fn select_all(&self, kind: RecordKind) -> TrailResult<Vec<StoredRecord>> {
        let sql = format!("SELECT {} FROM {} ORDER BY id ASC", select_columns(kind), kind.table());
        self.query_records(kind, &sql, params![])
    }

    fn query_records<P: Params>(
        &self,
        kind:   RecordKind,
        sql:    &str,
        params: P,
    ) -> TrailResult<Vec<StoredRecord>> {
        log::debug!("{sql}");
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| read_record(kind, row))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

/// Map a row laid out as `select_columns(kind)` back to a typed record.
fn read_record(kind: RecordKind, row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
    let id: RecordId = row.get(0)?;
    let values = kind
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            if field.is_numeric() {
                row.get::<_, f64>(i + 1).map(FieldValue::Real)
            } else {
                row.get::<_, String>(i + 1).map(FieldValue::Text)
            }
        })
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(StoredRecord { id, record: Record::new(kind, values) })
}
