//! Formatter: renders a record through its kind's display template.

use crate::{
    error::{TrailError, TrailResult},
    record::StoredRecord,
    schema::RecordKind,
    types::FieldValue,
};
use std::fmt::Write;

/// Substitute `{label}` placeholders in `kind.template()` with `values`,
/// which must be in registry field order. Unknown placeholders are left as-is.
pub fn render(kind: RecordKind, values: &[FieldValue]) -> TrailResult<String> {
    let fields = kind.fields();
    if values.len() != fields.len() {
        return Err(TrailError::FieldCount {
            kind,
            expected: fields.len(),
            actual:   values.len(),
        });
    }

    let template = kind.template();
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let label = &after[..close];
        match fields.iter().position(|f| f.label() == label) {
            Some(i) => {
                let _ = write!(out, "{}", values[i]);
            }
            None => {
                let _ = write!(out, "{{{label}}}");
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

pub fn render_stored(stored: &StoredRecord) -> TrailResult<String> {
    render(stored.kind(), stored.record.values())
}
