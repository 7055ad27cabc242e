//! Store methods backing the statistics aggregator.

use super::RecordStore;
use crate::{
    error::{TrailError, TrailResult},
    schema::{Field, RecordKind},
    statistics::StateCount,
};

impl RecordStore {
    pub fn count(&self, kind: RecordKind) -> TrailResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", kind.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Row count per state, ordered by state name.
    pub fn count_and_group_by_state(&self, kind: RecordKind) -> TrailResult<Vec<StateCount>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT state, COUNT(*) FROM {} GROUP BY state ORDER BY state ASC",
            kind.table()
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StateCount {
                    state: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Mean of a numeric field, `None` when the table is empty.
    pub fn average(&self, kind: RecordKind, field: Field) -> TrailResult<Option<f64>> {
        if !kind.is_numeric(field) {
            return Err(TrailError::InvalidColumn {
                kind,
                column: field.column().to_string(),
            });
        }
        let avg: Option<f64> = self.conn.query_row(
            &format!("SELECT AVG({}) FROM {}", field.column(), kind.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(avg)
    }
}
