//! Schema registry: the static description of both record kinds.
//!
//! RULE: every table and column name that reaches SQL text comes from here.
//! Callers hand in strings; the registry hands back `RecordKind` / `Field`
//! values drawn from a closed set, or an error.

use crate::error::{TrailError, TrailResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Campsite,
    Mountain,
}

/// Every logical field across both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    State,
    Rating,
    Elevation,
    Ascension,
    Time,
    Description,
    Date,
    Url,
    Longitude,
    Latitude,
}

const CAMPSITE_FIELDS: &[Field] = &[
    Field::Name,
    Field::State,
    Field::Rating,
    Field::Description,
    Field::Url,
    Field::Longitude,
    Field::Latitude,
];

const MOUNTAIN_FIELDS: &[Field] = &[
    Field::Name,
    Field::State,
    Field::Rating,
    Field::Elevation,
    Field::Ascension,
    Field::Time,
    Field::Description,
    Field::Date,
    Field::Url,
    Field::Longitude,
    Field::Latitude,
];

const CAMPSITE_TEMPLATE: &str = "Name: {name}\nState: {state}\nRating: {rating}\n\
Description: {description}\nURL: {url}\nCoordinates: {latitude},{longitude}\n";

const MOUNTAIN_TEMPLATE: &str = "Name: {name}\nState: {state}\nRating: {rating}\n\
Elevation: {elevation}\nTotal Feet Ascended: {ascension}\nTime to Complete: {time}\n\
Description: {description}\nDate Completed: {date}\nURL: {url}\n\
Coordinates: {latitude},{longitude}\n";

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Campsite, RecordKind::Mountain];

    /// Table holding this kind's rows.
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::Campsite => "campsite",
            RecordKind::Mountain => "mountain",
        }
    }

    /// Ordered field list, excluding the surrogate id.
    pub fn fields(self) -> &'static [Field] {
        match self {
            RecordKind::Campsite => CAMPSITE_FIELDS,
            RecordKind::Mountain => MOUNTAIN_FIELDS,
        }
    }

    pub fn has_field(self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    pub fn is_numeric(self, field: Field) -> bool {
        self.has_field(field) && field.is_numeric()
    }

    /// Display template; placeholders are field labels in braces.
    pub fn template(self) -> &'static str {
        match self {
            RecordKind::Campsite => CAMPSITE_TEMPLATE,
            RecordKind::Mountain => MOUNTAIN_TEMPLATE,
        }
    }

    /// Position of `field` in `fields()`.
    pub fn position(self, field: Field) -> Option<usize> {
        self.fields().iter().position(|f| *f == field)
    }

    /// Resolve a caller-supplied column label (or stored column name) to a
    /// field of this kind. "time" and "time_completed" both resolve to
    /// `Field::Time` for mountains.
    pub fn resolve(self, column: &str) -> TrailResult<Field> {
        Field::from_name(column)
            .filter(|f| self.has_field(*f))
            .ok_or_else(|| TrailError::InvalidColumn {
                kind:   self,
                column: column.trim().to_string(),
            })
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for RecordKind {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RecordKind::ALL
            .into_iter()
            .find(|k| k.table().eq_ignore_ascii_case(s))
            .ok_or_else(|| TrailError::InvalidKind(s.to_string()))
    }
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Name,
        Field::State,
        Field::Rating,
        Field::Elevation,
        Field::Ascension,
        Field::Time,
        Field::Description,
        Field::Date,
        Field::Url,
        Field::Longitude,
        Field::Latitude,
    ];

    /// User-facing label, as used in templates and error reports.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name        => "name",
            Field::State       => "state",
            Field::Rating      => "rating",
            Field::Elevation   => "elevation",
            Field::Ascension   => "ascension",
            Field::Time        => "time",
            Field::Description => "description",
            Field::Date        => "date",
            Field::Url         => "url",
            Field::Longitude   => "longitude",
            Field::Latitude    => "latitude",
        }
    }

    /// Stored column name. Differs from the label only for `Time`.
    pub fn column(self) -> &'static str {
        match self {
            Field::Time => "time_completed",
            other => other.label(),
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Field::Rating | Field::Elevation | Field::Ascension | Field::Longitude | Field::Latitude
        )
    }

    fn from_name(name: &str) -> Option<Field> {
        let name = name.trim();
        Field::ALL.into_iter().find(|f| {
            f.label().eq_ignore_ascii_case(name) || f.column().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const US_STATES: [&str; 50] = [
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
    "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
    "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio",
    "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota",
    "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington", "West Virginia",
    "Wisconsin", "Wyoming",
];

/// Exact (already title-cased) membership test.
pub fn is_us_state(state: &str) -> bool {
    US_STATES.contains(&state)
}
