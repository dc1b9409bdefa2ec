//! # forage-types
//!
//! Core coordinate and classification types for the forage POI index.
//!
//! - **Point types**: `GeoPoint` (longitude/latitude in degrees) and
//!   `MetricPoint` (planar meters). The two are deliberately distinct so a
//!   geographic coordinate can never be fed into metric distance math.
//! - **Bounding box**: `MetricBBox`, an axis-aligned rectangle in meters.
//! - **Category**: the closed set of amenity kinds the catalog accepts.
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use forage_types::bbox::MetricBBox;
//! use forage_types::category::Category;
//! use forage_types::point::MetricPoint;
//!
//! let center = MetricPoint::new(-38_961.0, 6_721_000.0);
//! let bbox = MetricBBox::around(center, 500.0);
//! assert!(bbox.contains(&center));
//!
//! let category: Category = "fast_food".parse().unwrap();
//! assert_eq!(category, Category::FastFood);
//! ```

pub mod bbox;
pub mod category;
pub mod point;

pub use bbox::MetricBBox;
pub use category::{Category, ParseCategoryError};
pub use point::{GeoPoint, MetricPoint};
