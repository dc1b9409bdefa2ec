//! Radius queries over a [`PoiIndex`].
//!
//! A query runs in three steps:
//!
//! 1. **Project** the geographic center into metric space.
//! 2. **Prune** with the spatial index, using the square that circumscribes
//!    the search circle. This over-includes the corners of the square.
//! 3. **Refine** by exact Euclidean distance to the projected center,
//!    dropping the corner hits.
//!
//! Results are not ordered. Callers that want nearest-first output use
//! [`PoiIndex::find_nearby_with_distance`] and sort on the distance.
//!
//! Distances are projected Web Mercator meters; see [`crate::projection`]
//! for how they relate to ground distance.

use crate::catalog::CatalogEntry;
use crate::error::Result;
use crate::index::PoiIndex;
use crate::projection;
use crate::validation::{validate_query_point, validate_radius};
use forage_types::bbox::MetricBBox;
use forage_types::point::GeoPoint;

/// A radius query hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyPoi<'a> {
    pub entry: &'a CatalogEntry,
    /// Projected distance from the query center, in meters.
    pub distance_m: f64,
}

impl PoiIndex {
    /// Every entry within `radius_m` projected meters of `(lon, lat)`.
    ///
    /// Fails with `InvalidInput` for a non-finite coordinate, a longitude too
    /// large to project, a latitude outside (-90, 90), or a negative or
    /// non-finite radius. A radius of zero matches only entries exactly at
    /// the center.
    ///
    /// ```
    /// use forage::{PoiIndex, RawPoiRecord};
    ///
    /// let index = PoiIndex::build(vec![
    ///     RawPoiRecord::new(-0.35, 51.56)
    ///         .with_id("1")
    ///         .with_name("Pizza Palace")
    ///         .with_tag("amenity", "restaurant"),
    /// ])?;
    ///
    /// assert_eq!(index.find_nearby(-0.35, 51.56, 10.0)?.len(), 1);
    /// assert!(index.find_nearby(0.35, 51.56, 1000.0)?.is_empty());
    /// # Ok::<(), forage::ForageError>(())
    /// ```
    pub fn find_nearby(&self, lon: f64, lat: f64, radius_m: f64) -> Result<Vec<&CatalogEntry>> {
        Ok(self
            .find_nearby_with_distance(lon, lat, radius_m)?
            .into_iter()
            .map(|hit| hit.entry)
            .collect())
    }

    /// [`find_nearby`](Self::find_nearby) with the configured default radius.
    pub fn find_nearby_default(&self, lon: f64, lat: f64) -> Result<Vec<&CatalogEntry>> {
        self.find_nearby(lon, lat, self.config().default_radius_m)
    }

    /// Like [`find_nearby`](Self::find_nearby), reporting each hit's distance.
    pub fn find_nearby_with_distance(
        &self,
        lon: f64,
        lat: f64,
        radius_m: f64,
    ) -> Result<Vec<NearbyPoi<'_>>> {
        let center = GeoPoint::new(lon, lat);
        validate_query_point(&center)?;
        validate_radius(radius_m)?;

        if self.is_empty() {
            return Ok(Vec::new());
        }

        let center = projection::to_metric(center);
        let bbox = MetricBBox::around(center, radius_m);

        let hits: Vec<NearbyPoi<'_>> = self
            .spatial_index()
            .locate(&bbox)
            .filter_map(|candidate| {
                let entry = self.catalog().slot(candidate.slot)?;
                let distance_m = entry.metric_position().distance(&center);
                (distance_m <= radius_m).then_some(NearbyPoi { entry, distance_m })
            })
            .collect();

        log::trace!(
            "find_nearby({}, {}, {}): {} hits",
            lon,
            lat,
            radius_m,
            hits.len()
        );
        Ok(hits)
    }
}
