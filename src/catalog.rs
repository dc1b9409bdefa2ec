//! The immutable POI catalog.
//!
//! A [`Catalog`] is a deduplicated sequence of [`CatalogEntry`] values plus an
//! identifier lookup table. Entries are addressed internally by their slot
//! (position in the sequence); the spatial index stores slots, not
//! identifiers. There is no API to add, remove or change an entry once the
//! catalog exists.

use crate::projection;
use crate::record::Tags;
use forage_types::category::Category;
use forage_types::point::{GeoPoint, MetricPoint};
use rustc_hash::FxHashMap;
use serde::Serialize;

const CUISINE_TAG: &str = "cuisine";
const OPENING_HOURS_TAG: &str = "opening_hours";
const DESCRIPTION_TAG: &str = "description";
const VEGETARIAN_TAG: &str = "diet:vegetarian";
const VEGAN_TAG: &str = "diet:vegan";

/// One accepted point of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    id: String,
    name: String,
    category: Category,
    position: GeoPoint,
    metric: MetricPoint,
    tags: Tags,
}

impl CatalogEntry {
    /// The metric position is always derived from `position` here, so the two
    /// can never disagree.
    pub(crate) fn new(
        id: String,
        name: String,
        category: Category,
        position: GeoPoint,
        tags: Tags,
    ) -> Self {
        Self {
            id,
            name,
            category,
            position,
            metric: projection::to_metric(position),
            tags,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Geographic position exactly as supplied by the raw record.
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Projected position used for all distance arithmetic.
    pub fn metric_position(&self) -> MetricPoint {
        self.metric
    }

    /// The raw tag mapping of the surviving record, unmodified.
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Detail attributes read out of the tag mapping.
    pub fn attributes(&self) -> PoiAttributes {
        PoiAttributes {
            cuisine: self.tag(CUISINE_TAG).map(str::to_string),
            opening_hours: self.tag(OPENING_HOURS_TAG).map(str::to_string),
            description: self.tag(DESCRIPTION_TAG).map(str::to_string),
            vegetarian: self.tag(VEGETARIAN_TAG) == Some("yes"),
            vegan: self.tag(VEGAN_TAG) == Some("yes"),
        }
    }

    pub fn summary(&self) -> PoiSummary {
        PoiSummary {
            fsa_id: self.id.clone(),
            name: self.name.clone(),
            amenity: self.category,
            lat: self.position.lat(),
            lon: self.position.lon(),
        }
    }
}

/// Typed view over the tags a place-detail page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoiAttributes {
    pub cuisine: Option<String>,
    pub opening_hours: Option<String>,
    pub description: Option<String>,
    /// Only an explicit `diet:vegetarian=yes` counts.
    pub vegetarian: bool,
    /// Only an explicit `diet:vegan=yes` counts.
    pub vegan: bool,
}

/// Flat listing record for "places near me" style responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiSummary {
    /// The catalog identifier, i.e. the FHRS id whenever the record had one.
    pub fsa_id: String,
    pub name: String,
    pub amenity: Category,
    pub lat: f64,
    pub lon: f64,
}

/// Deduplicated, filtered, immutable set of POI entries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    slots: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build from entries whose identifiers are already unique.
    pub(crate) fn from_unique(entries: Vec<CatalogEntry>) -> Self {
        let slots: FxHashMap<String, usize> = entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| (entry.id.clone(), slot))
            .collect();
        debug_assert_eq!(slots.len(), entries.len(), "duplicate catalog identifier");
        Self { entries, slots }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by identifier.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.slots.get(id).map(|&slot| &self.entries[slot])
    }

    /// Entries in build order: the order their first surviving record appeared
    /// in the input.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub(crate) fn slot(&self, slot: usize) -> Option<&CatalogEntry> {
        self.entries.get(slot)
    }

    pub(crate) fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, tags: &[(&str, &str)]) -> CatalogEntry {
        CatalogEntry::new(
            id.to_string(),
            format!("Place {id}"),
            Category::Cafe,
            GeoPoint::new(-0.35, 51.56),
            tags.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_metric_position_matches_projection() {
        let e = entry("1", &[]);
        assert_eq!(e.metric_position(), projection::to_metric(e.position()));
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::from_unique(vec![entry("a", &[]), entry("b", &[])]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("b").unwrap().name(), "Place b");
        assert!(catalog.get("c").is_none());
        assert_eq!(catalog.iter().map(CatalogEntry::id).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.get("anything").is_none());
        assert_eq!(catalog.iter().count(), 0);
    }

    #[test]
    fn test_attributes_from_tags() {
        let e = entry(
            "1",
            &[
                ("cuisine", "italian;pizza"),
                ("opening_hours", "Mo-Su 12:00-23:00"),
                ("diet:vegetarian", "yes"),
                ("diet:vegan", "limited"),
            ],
        );
        let attrs = e.attributes();
        assert_eq!(attrs.cuisine.as_deref(), Some("italian;pizza"));
        assert_eq!(attrs.opening_hours.as_deref(), Some("Mo-Su 12:00-23:00"));
        assert_eq!(attrs.description, None);
        assert!(attrs.vegetarian);
        assert!(!attrs.vegan);
    }

    #[test]
    fn test_attributes_without_tags() {
        assert_eq!(entry("1", &[]).attributes(), PoiAttributes::default());
    }

    #[test]
    fn test_summary_shape() {
        let summary = entry("42", &[]).summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["fsa_id"], "42");
        assert_eq!(json["amenity"], "cafe");
        assert_eq!(json["lat"], 51.56);
        assert_eq!(json["lon"], -0.35);
    }
}
