//! Statistics and map-marker tests.

use trailbook_core::{RecordBook, RecordKind};

fn mountain(name: &str, state: &str, elevation: &str, ascension: &str) -> Vec<String> {
    [
        name, state, "4.5", elevation, ascension, "10:30", "cold",
        "2024-07-01", "https://example.com", "-151.0", "63.07",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// An empty table gives zero totals and no per-state lines.
#[test]
fn empty_tables_report_zeroes() {
    let book = RecordBook::in_memory().unwrap();
    for kind in RecordKind::ALL {
        let stats = book.statistics(kind).unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.state_count, 0);
        assert!(stats.per_state_lines().is_empty());
        assert_eq!(stats.avg_ascension, 0.0);
        assert_eq!(stats.avg_elevation, 0.0);
    }
}

/// Adding Denali bumps the total and Alaska's count, and moves the averages.
#[test]
fn adding_denali_updates_mountain_statistics() {
    let book = RecordBook::in_memory().unwrap();
    book.create(RecordKind::Mountain, &mountain("Rainier", "Washington", "14411", "9000")).unwrap();
    book.create(RecordKind::Mountain, &mountain("Foraker", "Alaska", "17400", "15000")).unwrap();

    let before = book.statistics(RecordKind::Mountain).unwrap();
    book.create(RecordKind::Mountain, &mountain("Denali", "Alaska", "20310", "18000")).unwrap();
    let after = book.statistics(RecordKind::Mountain).unwrap();

    assert_eq!(after.total, before.total + 1);
    assert_eq!(after.count_for("Alaska"), before.count_for("Alaska") + 1);
    assert_eq!(after.state_count, 2);

    let expected_elevation = (14411.0 + 17400.0 + 20310.0) / 3.0;
    let expected_ascension = (9000.0 + 15000.0 + 18000.0) / 3.0;
    assert!((after.avg_elevation - expected_elevation).abs() < 1e-6);
    assert!((after.avg_ascension - expected_ascension).abs() < 1e-6);
    assert_eq!(after.per_state_lines(), vec!["Alaska: 2", "Washington: 1"]);
}

/// Campsites keep the same shape with fixed zero averages.
#[test]
fn campsite_averages_are_zero() {
    let book = RecordBook::in_memory().unwrap();
    for (name, state) in [("A", "Utah"), ("B", "Utah"), ("C", "Idaho")] {
        book.create(
            RecordKind::Campsite,
            &[name, state, "4", "nice", "https://camp.example", "-112", "41"],
        )
        .unwrap();
    }

    let stats = book.statistics(RecordKind::Campsite).unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.state_count, 2);
    assert_eq!(stats.per_state_lines(), vec!["Idaho: 1", "Utah: 2"]);
    assert_eq!((stats.avg_ascension, stats.avg_elevation), (0.0, 0.0));
}

/// Markers carry what a tooltip needs; mountain-only fields stay empty
/// for campsites.
#[test]
fn map_markers_cover_both_kinds() {
    let book = RecordBook::in_memory().unwrap();
    book.create(
        RecordKind::Campsite,
        &["Blue Lake", "Utah", "4", "quiet", "https://camp.example", "-111.5", "40.25"],
    )
    .unwrap();
    book.create(RecordKind::Mountain, &mountain("Denali", "Alaska", "20310", "18000")).unwrap();

    let markers = book.map_markers().unwrap();
    assert_eq!(markers.len(), 2);

    let camp = &markers[0];
    assert_eq!(camp.kind, RecordKind::Campsite);
    assert_eq!(camp.name, "Blue Lake");
    assert_eq!(camp.description.as_deref(), Some("quiet"));
    assert_eq!(camp.elevation, None);
    assert_eq!((camp.longitude, camp.latitude), (-111.5, 40.25));

    let peak = &markers[1];
    assert_eq!(peak.kind, RecordKind::Mountain);
    assert_eq!(peak.elevation, Some(20310.0));
    assert_eq!(peak.ascension, Some(18000.0));
    assert_eq!(peak.rating, 4.5);

    let json = serde_json::to_value(camp).unwrap();
    assert!(json.get("elevation").is_none());
    assert_eq!(json["kind"], "campsite");
}
