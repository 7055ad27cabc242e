//! Validator: turns raw positional input into a typed `Record`.
//!
//! Rules run in field order and the first failure wins; there is no
//! multi-error aggregation. Values are normalized on the way through:
//! trimmed text, title-cased state, zero-padded `HH:MM`, `YYYY-MM-DD` dates.
//!
//! Longitude and latitude are only checked for parseability, not range.

use crate::{
    config::RatingBounds,
    error::{TrailError, TrailResult, ValidationError, ValidationReason},
    record::Record,
    schema::{self, Field, RecordKind},
    types::FieldValue,
};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a full positional input for `kind`. `raw` must hold exactly one
/// value per field of `kind.fields()`.
pub fn validate<S: AsRef<str>>(
    kind:   RecordKind,
    raw:    &[S],
    rating: RatingBounds,
) -> TrailResult<Record> {
    let fields = kind.fields();
    if raw.len() != fields.len() {
        return Err(TrailError::FieldCount {
            kind,
            expected: fields.len(),
            actual:   raw.len(),
        });
    }
    let values = fields
        .iter()
        .zip(raw)
        .map(|(field, value)| validate_field(*field, value.as_ref(), rating))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Record::new(kind, values))
}

/// Validate a replacement value for a single column. Unlike `validate_field`,
/// a blank value is reported as `EmptyValue` whatever the field.
pub fn validate_new_value(
    field:  Field,
    raw:    &str,
    rating: RatingBounds,
) -> Result<FieldValue, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::new(field, ValidationReason::EmptyValue));
    }
    validate_field(field, raw, rating)
}

/// Apply one field's rule to a raw value.
pub fn validate_field(
    field:  Field,
    raw:    &str,
    rating: RatingBounds,
) -> Result<FieldValue, ValidationError> {
    use ValidationReason::*;

    let raw = raw.trim();
    let reject = |reason| ValidationError::new(field, reason);

    match field {
        Field::Name => non_empty(raw).ok_or(reject(EmptyName)),
        Field::Description => non_empty(raw).ok_or(reject(EmptyDescription)),
        Field::State => {
            let state = title_case(raw);
            if schema::is_us_state(&state) {
                Ok(FieldValue::Text(state))
            } else {
                Err(reject(InvalidState))
            }
        }
        Field::Rating => parse_real(raw)
            .filter(|r| rating.contains(*r))
            .map(FieldValue::Real)
            .ok_or(reject(InvalidRating)),
        Field::Elevation => non_negative(raw).ok_or(reject(InvalidElevation)),
        Field::Ascension => non_negative(raw).ok_or(reject(InvalidAscension)),
        Field::Time => parse_time(raw).map(FieldValue::Text).ok_or(reject(InvalidTime)),
        Field::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(|d| FieldValue::Text(d.format(DATE_FORMAT).to_string()))
            .map_err(|_| reject(InvalidDate)),
        Field::Url => {
            if raw.starts_with("http://") || raw.starts_with("https://") {
                Ok(FieldValue::Text(raw.to_string()))
            } else {
                Err(reject(InvalidUrl))
            }
        }
        Field::Longitude | Field::Latitude => {
            parse_real(raw).map(FieldValue::Real).ok_or(reject(InvalidCoordinate))
        }
    }
}

/// Python-style title case: upper-case the first letter of every run of
/// letters, lower-case the rest. "new york" → "New York".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn non_empty(raw: &str) -> Option<FieldValue> {
    (!raw.is_empty()).then(|| FieldValue::Text(raw.to_string()))
}

// NaN and infinities cannot be stored in a REAL column.
fn parse_real(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn non_negative(raw: &str) -> Option<FieldValue> {
    parse_real(raw).filter(|v| *v >= 0.0).map(FieldValue::Real)
}

fn parse_time(raw: &str) -> Option<String> {
    let (hours, minutes) = raw.split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    (hours < 24 && minutes <= 59).then(|| format!("{hours:02}:{minutes:02}"))
}
