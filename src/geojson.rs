//! GeoJSON rendering of catalog entries.
//!
//! Each entry becomes a `Point` feature at its original lon/lat, with the
//! identifier as the feature id and `fsa_id`, `name`, `amenity` and the raw
//! `tags` as properties.

use crate::catalog::CatalogEntry;
use crate::error::{ForageError, Result};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

/// Converts one entry to a GeoJSON feature.
pub fn entry_to_feature(entry: &CatalogEntry) -> Feature {
    let position = entry.position();
    let geometry = Geometry::new(Value::Point(vec![position.lon(), position.lat()]));

    let mut properties = Map::new();
    properties.insert("fsa_id".to_string(), JsonValue::from(entry.id()));
    properties.insert("name".to_string(), JsonValue::from(entry.name()));
    properties.insert(
        "amenity".to_string(),
        JsonValue::from(entry.category().as_str()),
    );
    let tags: Map<String, JsonValue> = entry
        .tags()
        .iter()
        .map(|(k, v)| (k.clone(), JsonValue::from(v.as_str())))
        .collect();
    properties.insert("tags".to_string(), JsonValue::Object(tags));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: Some(Id::String(entry.id().to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Collects entries, e.g. the hits of a radius query, into a feature collection.
pub fn entries_to_feature_collection<'a, I>(entries: I) -> FeatureCollection
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    FeatureCollection {
        bbox: None,
        features: entries.into_iter().map(entry_to_feature).collect(),
        foreign_members: None,
    }
}

/// Renders entries as a GeoJSON `FeatureCollection` string.
pub fn entries_to_geojson<'a, I>(entries: I) -> Result<String>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let collection = entries_to_feature_collection(entries);
    serde_json::to_string(&collection).map_err(|e| {
        ForageError::Serialization(format!("Failed to serialize feature collection: {}", e))
    })
}
