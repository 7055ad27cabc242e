//! Record-management core for campsite and mountain logs.
//!
//! One generic path serves both record kinds: the schema registry describes
//! each kind, and validation, query construction, formatting and statistics
//! are all driven from it.

pub mod book;
pub mod config;
pub mod error;
pub mod format;
pub mod map;
pub mod query;
pub mod record;
pub mod schema;
pub mod statistics;
pub mod store;
pub mod types;
pub mod validator;

pub use book::RecordBook;
pub use error::{TrailError, TrailResult, ValidationError, ValidationReason};
pub use schema::{Field, RecordKind};
pub use types::{FieldValue, RecordId, WriteOutcome};
