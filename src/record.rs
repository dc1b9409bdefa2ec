//! Raw POI records as handed over by an extract reader, and tag decoding.

use forage_types::point::GeoPoint;
use serde_json::Value;
use std::collections::BTreeMap;

/// Free-form `key -> value` attribute tags of a POI.
pub type Tags = BTreeMap<String, String>;

/// Tag key holding the amenity category.
pub const AMENITY_TAG: &str = "amenity";

/// Tag key holding the Food Hygiene Rating Scheme id. When present it is the
/// catalog identifier, taking precedence over the record's own id.
pub const FHRS_ID_TAG: &str = "fhrs:id";

/// The tag mapping of a raw record, in whichever form the reader produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawTags {
    #[default]
    Absent,
    /// A JSON object serialized as text.
    Encoded(String),
    /// An already decoded mapping.
    Decoded(Tags),
}

impl RawTags {
    /// Decode into a tag map. `None` when there are no tags or the encoded
    /// form cannot be decoded.
    pub fn into_tags(self) -> Option<Tags> {
        match self {
            RawTags::Absent => None,
            RawTags::Encoded(json) => parse_tags(&json),
            RawTags::Decoded(tags) => Some(tags),
        }
    }
}

/// Decode a JSON object of tags.
///
/// String values are kept verbatim, numbers and booleans keep their JSON
/// text, and `null`, arrays and nested objects are dropped. Anything that is
/// not a JSON object yields `None`.
///
/// ```
/// use forage::record::parse_tags;
///
/// let tags = parse_tags(r#"{"amenity": "cafe", "fhrs:id": 501234, "wifi": null}"#).unwrap();
/// assert_eq!(tags.get("amenity").map(String::as_str), Some("cafe"));
/// assert_eq!(tags.get("fhrs:id").map(String::as_str), Some("501234"));
/// assert!(!tags.contains_key("wifi"));
///
/// assert!(parse_tags("not json").is_none());
/// assert!(parse_tags("[1, 2]").is_none());
/// ```
pub fn parse_tags(json: &str) -> Option<Tags> {
    let object = match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            log::trace!("Ignoring tag mapping that is not a JSON object: {}", other);
            return None;
        }
        Err(e) => {
            log::trace!("Ignoring undecodable tag mapping: {}", e);
            return None;
        }
    };

    let tags = object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            Value::Bool(b) => Some((key, b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect();

    Some(tags)
}

/// A point record as supplied by the extract reader, before any filtering.
///
/// ```
/// use forage::record::RawPoiRecord;
///
/// let record = RawPoiRecord::new(-0.35, 51.56)
///     .with_id("1")
///     .with_name("Pizza Palace")
///     .with_tag("amenity", "restaurant");
/// assert_eq!(record.id.as_deref(), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoiRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub tags: RawTags,
    pub position: GeoPoint,
}

impl RawPoiRecord {
    /// A record at `(lon, lat)` with no identifier, name or tags.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            id: None,
            name: None,
            tags: RawTags::Absent,
            position: GeoPoint::new(lon, lat),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach an encoded JSON tag mapping, replacing any existing tags.
    pub fn with_tags_json(mut self, json: impl Into<String>) -> Self {
        self.tags = RawTags::Encoded(json.into());
        self
    }

    /// Attach a decoded tag mapping, replacing any existing tags.
    pub fn with_tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = RawTags::Decoded(
            tags.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Add one tag. An encoded mapping is decoded first; if it cannot be
    /// decoded it is discarded.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut tags = std::mem::take(&mut self.tags).into_tags().unwrap_or_default();
        tags.insert(key.into(), value.into());
        self.tags = RawTags::Decoded(tags);
        self
    }
}
