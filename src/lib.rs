//! Immutable geospatial index of food and leisure points of interest.
//!
//! Raw point records from an extract reader are filtered, deduplicated and
//! projected into a frozen catalog with an R*-tree over their Web Mercator
//! positions. Radius queries prune with the tree and refine by exact metric
//! distance. A [`SharedIndex`] serves one index to many threads and swaps in a
//! rebuilt one atomically on reload.
//!
//! ```rust
//! use forage::{PoiIndex, RawPoiRecord};
//!
//! let index = PoiIndex::build(vec![
//!     RawPoiRecord::new(-0.35, 51.56)
//!         .with_id("1")
//!         .with_name("Pizza Palace")
//!         .with_tags_json(r#"{"amenity": "restaurant", "cuisine": "pizza"}"#),
//!     RawPoiRecord::new(-0.35, 51.56)
//!         .with_id("2")
//!         .with_name("St Mary's")
//!         .with_tag("amenity", "hospital"),
//! ])?;
//!
//! assert_eq!(index.len(), 1);
//! let nearby = index.find_nearby(-0.351, 51.561, 500.0)?;
//! assert_eq!(nearby[0].name(), "Pizza Palace");
//! assert_eq!(nearby[0].attributes().cuisine.as_deref(), Some("pizza"));
//! # Ok::<(), forage::ForageError>(())
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
#[cfg(feature = "geojson")]
pub mod geojson;
pub mod index;
pub mod projection;
pub mod query;
pub mod record;
pub mod shared;
pub mod source;
pub mod spatial_index;
pub mod validation;

pub use builder::{BuildStats, CatalogBuilder};
pub use catalog::{Catalog, CatalogEntry, PoiAttributes, PoiSummary};
pub use config::Config;
pub use error::{ForageError, Result, SourceError};
pub use index::PoiIndex;
pub use query::NearbyPoi;
pub use record::{RawPoiRecord, RawTags, Tags};
pub use shared::SharedIndex;
pub use source::RecordSource;
pub use spatial_index::SpatialIndex;

pub use forage_types::{Category, GeoPoint, MetricBBox, MetricPoint};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{CatalogBuilder, ForageError, PoiIndex, RawPoiRecord, Result, SharedIndex};

    pub use crate::{Category, GeoPoint, MetricPoint};

    pub use crate::{CatalogEntry, Config, RecordSource};
}
