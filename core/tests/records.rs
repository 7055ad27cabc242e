//! Create / search / remove tests.

use trailbook_core::{
    config::{BookConfig, RatingBounds},
    store::RecordStore,
    Field, RecordBook, RecordKind, TrailError, ValidationReason, WriteOutcome,
};

fn book() -> RecordBook {
    let _ = env_logger::builder().is_test(true).try_init();
    RecordBook::in_memory().expect("in-memory book")
}

fn campsite<'a>(name: &'a str, state: &'a str, rating: &'a str) -> [&'a str; 7] {
    [name, state, rating, "shaded sites by the water", "https://camp.example/site", "-111.5", "40.25"]
}

fn denali() -> [&'static str; 11] {
    [
        "Denali", "Alaska", "4.5", "20310", "18000", "10:30", "cold",
        "2024-07-01", "https://example.com", "-151.0", "63.07",
    ]
}

/// A created campsite is found by name and its display string carries
/// every submitted field.
#[test]
fn created_campsite_is_found_by_name() {
    let book = book();
    book.create(RecordKind::Campsite, &campsite("Blue Lake", "utah", "4.5")).unwrap();

    let found = book.search(RecordKind::Campsite, "Blue Lake").unwrap();
    assert_eq!(found.len(), 1, "expected exactly one match, got {found:?}");
    let text = &found[0];
    assert!(text.contains("Name: Blue Lake"));
    assert!(text.contains("State: Utah"), "state should be title-cased: {text}");
    assert!(text.contains("Rating: 4.5"));
    assert!(text.contains("Description: shaded sites by the water"));
    assert!(text.contains("URL: https://camp.example/site"));
}

/// The rating printed by search parses back to the submitted value.
#[test]
fn rating_round_trips_through_display_string() {
    let book = book();
    for (name, rating) in [("A", 1.0), ("B", 3.25), ("C", 5.0)] {
        book.create(RecordKind::Campsite, &campsite(name, "Ohio", &rating.to_string()))
            .unwrap();

        let text = book.search(RecordKind::Campsite, name).unwrap().remove(0);
        let shown: f64 = text
            .lines()
            .find_map(|l| l.strip_prefix("Rating: "))
            .expect("rating line")
            .parse()
            .unwrap();
        assert!((shown - rating).abs() < 1e-9, "rating {rating} came back as {shown}");
    }
}

/// Lookups ignore case, as the name column is NOCASE.
#[test]
fn search_is_case_insensitive() {
    let book = book();
    book.create(RecordKind::Campsite, &campsite("Blue Lake", "Utah", "4")).unwrap();

    assert_eq!(book.search(RecordKind::Campsite, "  blue LAKE ").unwrap().len(), 1);
}

/// Unknown names give an empty sequence, not an error.
#[test]
fn search_for_unknown_name_is_empty() {
    let book = book();
    assert!(book.search(RecordKind::Mountain, "Nowhere").unwrap().is_empty());
}

#[test]
fn blank_search_name_is_rejected() {
    let book = book();
    let err = book.search(RecordKind::Campsite, "   ").unwrap_err();
    assert_eq!(
        err.validation().map(|v| (v.field, v.reason)),
        Some((Field::Name, ValidationReason::EmptyName))
    );
}

/// Out-of-bounds ratings are rejected for field `rating` and nothing is written.
#[test]
fn out_of_bounds_rating_inserts_nothing() {
    let book = book();
    for bad in ["6.0", "-1.0"] {
        let err = book
            .create(RecordKind::Campsite, &campsite("Bad", "Utah", bad))
            .unwrap_err();
        let v = err.validation().expect("validation error");
        assert_eq!(v.field, Field::Rating);
        assert_eq!(v.reason, ValidationReason::InvalidRating);
    }
    assert_eq!(book.store().count(RecordKind::Campsite).unwrap(), 0);
}

/// "25:00" is rejected as an invalid time and no mountain row is inserted.
#[test]
fn invalid_time_inserts_no_mountain() {
    let book = book();
    let mut raw = denali();
    raw[5] = "25:00";

    let err = book.create(RecordKind::Mountain, &raw).unwrap_err();
    let v = err.validation().expect("validation error");
    assert_eq!(v.field.label(), "time");
    assert_eq!(v.reason.as_str(), "InvalidTime");
    assert_eq!(book.store().count(RecordKind::Mountain).unwrap(), 0);
}

/// Each create gets its own surrogate key, even when names repeat.
#[test]
fn duplicate_names_get_distinct_ids() {
    let book = book();
    let a = book.create(RecordKind::Campsite, &campsite("Twin Peaks", "Utah", "3")).unwrap();
    let b = book.create(RecordKind::Campsite, &campsite("Twin Peaks", "Idaho", "4")).unwrap();
    assert_ne!(a, b);
    assert_eq!(book.search(RecordKind::Campsite, "Twin Peaks").unwrap().len(), 2);
}

/// Removing a record makes it invisible to later searches.
#[test]
fn removed_record_is_no_longer_found() {
    let book = book();
    book.create(RecordKind::Mountain, &denali()).unwrap();

    let outcome = book.remove(RecordKind::Mountain, "denali").unwrap();
    assert_eq!(outcome, WriteOutcome::Affected(1));
    assert!(book.search(RecordKind::Mountain, "Denali").unwrap().is_empty());
}

/// Remove applies to every row sharing the name.
#[test]
fn remove_deletes_all_rows_sharing_a_name() {
    let book = book();
    book.create(RecordKind::Campsite, &campsite("Twin Peaks", "Utah", "3")).unwrap();
    book.create(RecordKind::Campsite, &campsite("Twin Peaks", "Idaho", "4")).unwrap();
    book.create(RecordKind::Campsite, &campsite("Other", "Idaho", "4")).unwrap();

    assert_eq!(book.remove(RecordKind::Campsite, "Twin Peaks").unwrap(), WriteOutcome::Affected(2));
    assert_eq!(book.store().count(RecordKind::Campsite).unwrap(), 1);
}

#[test]
fn removing_unknown_name_is_not_found() {
    let book = book();
    book.create(RecordKind::Campsite, &campsite("Keep", "Utah", "3")).unwrap();

    let outcome = book.remove(RecordKind::Campsite, "Missing").unwrap();
    assert_eq!(outcome, WriteOutcome::NotFound);
    assert!(!outcome.is_affected());
    assert_eq!(book.store().count(RecordKind::Campsite).unwrap(), 1);
}

/// If the validator is configured wider than the table constraint, the
/// store rejects the row with an integrity error and leaves no partial state.
#[test]
fn table_constraint_surfaces_as_integrity_error() {
    let config = BookConfig {
        rating: RatingBounds { min: 0.0, max: 5.0 },
        ..BookConfig::default()
    };
    let book = RecordBook::with_store(RecordStore::in_memory().unwrap(), config).unwrap();

    let err = book
        .create(RecordKind::Campsite, &campsite("Low", "Utah", "0.5"))
        .unwrap_err();
    assert!(matches!(err, TrailError::Integrity(_)), "got {err:?}");
    assert_eq!(book.store().count(RecordKind::Campsite).unwrap(), 0);
}

#[test]
fn wrong_number_of_values_is_rejected() {
    let book = book();
    let err = book.create(RecordKind::Mountain, &campsite("Short", "Utah", "3")).unwrap_err();
    assert!(matches!(err, TrailError::FieldCount { expected: 11, actual: 7, .. }));
}

/// A backend fault (here a table dropped behind the book's back) surfaces as
/// a store error and leaves the other table untouched.
#[test]
fn backend_fault_surfaces_as_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trailbook.db");
    let config = BookConfig { database_path: path.clone(), ..BookConfig::default() };
    let book = RecordBook::open(config).unwrap();
    book.create(RecordKind::Campsite, &campsite("Blue Lake", "Utah", "4")).unwrap();

    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("DROP TABLE mountain;")
        .unwrap();

    let err = book.create(RecordKind::Mountain, &denali()).unwrap_err();
    assert!(matches!(err, TrailError::Store(_)), "got {err:?}");
    assert!(err.is_store_fault());
    assert_eq!(book.store().count(RecordKind::Campsite).unwrap(), 1);
    assert_eq!(book.search(RecordKind::Campsite, "Blue Lake").unwrap().len(), 1);
}
