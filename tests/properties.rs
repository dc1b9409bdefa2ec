use forage::projection;
use forage::{Category, CatalogEntry, GeoPoint, PoiIndex, RawPoiRecord};
use std::collections::{BTreeSet, HashSet};

const AMENITIES: [&str; 12] = [
    "restaurant",
    "pub",
    "fast_food",
    "cafe",
    "bar",
    "ice_cream",
    "cinema",
    "events_venue",
    "theatre",
    "hospital",
    "bank",
    "Cafe",
];

/// Deterministic scatter of records around Harrow with duplicated ids,
/// unsupported categories and missing names mixed in.
fn scattered_records(n: usize) -> Vec<RawPoiRecord> {
    (0..n)
        .map(|i| {
            let lon = -0.40 + ((i * 7919) % 1000) as f64 * 0.0001;
            let lat = 51.52 + ((i * 104_729) % 1000) as f64 * 0.0001;
            let id = (i % (n * 3 / 4).max(1)).to_string();
            let amenity = AMENITIES[(i * 31) % AMENITIES.len()];
            let mut record = RawPoiRecord::new(lon, lat)
                .with_id(id)
                .with_tag("amenity", amenity);
            if i % 17 != 0 {
                record = record.with_name(format!("Place {i}"));
            }
            record
        })
        .collect()
}

fn query_centers() -> Vec<(f64, f64)> {
    let mut centers = Vec::new();
    for a in 0..6 {
        for b in 0..6 {
            centers.push((-0.41 + a as f64 * 0.022, 51.51 + b as f64 * 0.022));
        }
    }
    centers
}

fn brute_force<'a>(index: &'a PoiIndex, lon: f64, lat: f64, radius: f64) -> BTreeSet<&'a str> {
    let center = projection::to_metric(GeoPoint::new(lon, lat));
    index
        .catalog()
        .iter()
        .filter(|entry| entry.metric_position().distance(&center) <= radius)
        .map(CatalogEntry::id)
        .collect()
}

#[test]
fn test_identifiers_are_unique() {
    let index = PoiIndex::build(scattered_records(2_000)).unwrap();
    let mut seen = HashSet::new();
    for entry in index.catalog() {
        assert!(seen.insert(entry.id()), "duplicate id {}", entry.id());
    }
    assert!(index.stats().duplicate_id > 0);
}

#[test]
fn test_categories_are_closed() {
    let index = PoiIndex::build(scattered_records(2_000)).unwrap();
    assert!(!index.is_empty());
    for entry in index.catalog() {
        assert!(Category::ALL.contains(&entry.category()));
        assert_eq!(entry.tag("amenity"), Some(entry.category().as_str()));
    }
    assert!(index.stats().unsupported_category > 0);
}

#[test]
fn test_metric_position_tracks_projection() {
    let index = PoiIndex::build(scattered_records(500)).unwrap();
    for entry in index.catalog() {
        assert_eq!(entry.metric_position(), projection::to_metric(entry.position()));
    }
}

#[test]
fn test_query_is_sound_and_complete() {
    let index = PoiIndex::build(scattered_records(3_000)).unwrap();

    for (lon, lat) in query_centers() {
        let center = projection::to_metric(GeoPoint::new(lon, lat));
        for radius in [0.0, 25.0, 150.0, 800.0, 2_000.0, 12_000.0] {
            let hits = index.find_nearby(lon, lat, radius).unwrap();

            for hit in &hits {
                assert!(
                    hit.metric_position().distance(&center) <= radius,
                    "{} returned outside radius {radius} of ({lon}, {lat})",
                    hit.id()
                );
            }

            let returned: BTreeSet<&str> = hits.iter().map(|hit| hit.id()).collect();
            assert_eq!(returned.len(), hits.len(), "result contains duplicates");
            assert_eq!(
                returned,
                brute_force(&index, lon, lat, radius),
                "mismatch at ({lon}, {lat}) radius {radius}"
            );
        }
    }
}

#[test]
fn test_query_at_entry_positions_with_zero_radius() {
    let index = PoiIndex::build(scattered_records(300)).unwrap();
    for entry in index.catalog() {
        let p = entry.position();
        let hits = index.find_nearby(p.lon(), p.lat(), 0.0).unwrap();
        assert!(hits.iter().any(|hit| hit.id() == entry.id()));
    }
}

#[test]
fn test_rebuild_is_idempotent() {
    let first = PoiIndex::build(scattered_records(1_500)).unwrap();
    let second = PoiIndex::build(scattered_records(1_500)).unwrap();

    let as_set = |index: &PoiIndex| -> BTreeSet<(String, String, Category)> {
        index
            .catalog()
            .iter()
            .map(|e| (e.id().to_string(), e.name().to_string(), e.category()))
            .collect()
    };
    assert_eq!(as_set(&first), as_set(&second));
    assert_eq!(first.stats(), second.stats());
}

#[test]
fn test_high_latitude_queries_use_projected_meters() {
    // At 60N one projected meter is half a ground meter.
    let index = PoiIndex::build(vec![
        RawPoiRecord::new(10.0, 60.0)
            .with_id("north")
            .with_name("Nordic Bar")
            .with_tag("amenity", "bar"),
    ])
    .unwrap();

    let ground = GeoPoint::new(10.0, 60.0).haversine_distance(&GeoPoint::new(10.01, 60.0));
    let projected = projection::to_metric(GeoPoint::new(10.0, 60.0))
        .distance(&projection::to_metric(GeoPoint::new(10.01, 60.0)));
    assert!((projected / ground - projection::scale_factor(60.0)).abs() < 0.01);

    assert!(index.find_nearby(10.01, 60.0, ground * 1.1).unwrap().is_empty());
    assert_eq!(index.find_nearby(10.01, 60.0, projected * 1.01).unwrap().len(), 1);
}
