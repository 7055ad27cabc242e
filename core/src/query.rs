//! Query builder: filter + sort SELECTs over a single record table.
//!
//! Identifiers (table, columns) come only from the schema registry; the
//! filter value is always a bound parameter.

use crate::{
    config::RatingBounds,
    error::{TrailError, TrailResult, ValidationError, ValidationReason},
    schema::{Field, RecordKind},
    types::FieldValue,
    validator,
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Ascending  => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = TrailError;

    /// Accepts "Ascending"/"Descending" or the pre-normalized "ASC"/"DESC".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("ascending") || s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Ascending)
        } else if s.eq_ignore_ascii_case("descending") || s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Descending)
        } else {
            Err(TrailError::InvalidOrder(s.to_string()))
        }
    }
}

/// A fully resolved filter-and-sort request.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSort {
    pub kind:   RecordKind,
    pub filter: Option<(Field, FieldValue)>,
    pub sort:   Field,
    pub order:  SortOrder,
}

/// SQL text plus its single optional parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub sql:   String,
    pub param: Option<FieldValue>,
}

impl FilterSort {
    /// Resolve caller strings against the registry. A blank filter value
    /// means "sort only".
    pub fn parse(
        kind:   RecordKind,
        filter: Option<(&str, &str)>,
        sort:   &str,
        order:  &str,
    ) -> TrailResult<Self> {
        let sort = kind.resolve(sort)?;
        let order: SortOrder = order.parse()?;
        let filter = match filter {
            Some((column, value)) if !value.trim().is_empty() => {
                let field = kind.resolve(column)?;
                Some((field, filter_value(kind, field, value)?))
            }
            _ => None,
        };
        Ok(Self { kind, filter, sort, order })
    }

    pub fn to_query(&self) -> SelectQuery {
        let mut sql = format!("SELECT {} FROM {}", select_columns(self.kind), self.kind.table());
        if let Some((field, value)) = &self.filter {
            match value {
                FieldValue::Text(_) => {
                    sql.push_str(&format!(" WHERE {} = ?1 COLLATE NOCASE", field.column()))
                }
                FieldValue::Real(_) => sql.push_str(&format!(" WHERE {} = ?1", field.column())),
            }
        }
        sql.push_str(&format!(" ORDER BY {} {}, id ASC", self.sort.column(), self.order.sql()));
        SelectQuery {
            sql,
            param: self.filter.as_ref().map(|(_, v)| v.clone()),
        }
    }
}

/// Numeric filters must parse. Time and date filters take the stored
/// `HH:MM` / `YYYY-MM-DD` shape when they parse; other text is trimmed only,
/// case is folded by the column collation.
fn filter_value(kind: RecordKind, field: Field, raw: &str) -> TrailResult<FieldValue> {
    let raw = raw.trim();
    if kind.is_numeric(field) {
        return raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FieldValue::Real)
            .ok_or_else(|| ValidationError::new(field, ValidationReason::InvalidNumber).into());
    }
    let value = match field {
        Field::Time | Field::Date => validator::validate_field(field, raw, RatingBounds::default())
            .unwrap_or_else(|_| FieldValue::Text(raw.to_string())),
        _ => FieldValue::Text(raw.to_string()),
    };
    Ok(value)
}

/// `id` followed by every stored column of `kind`, in registry order.
pub fn select_columns(kind: RecordKind) -> String {
    std::iter::once("id")
        .chain(kind.fields().iter().map(|f| f.column()))
        .collect::<Vec<_>>()
        .join(", ")
}
