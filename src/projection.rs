//! Spherical Web Mercator (EPSG:3857) projection.
//!
//! Every catalog entry and every query is projected with the same fixed
//! projection, so distances and bounding boxes are computed in one planar
//! metric space.
//!
//! ## Distortion
//!
//! Web Mercator stretches both axes by `1 / cos(latitude)`. A radius of
//! `R` projected meters therefore covers `R * cos(latitude)` meters on the
//! ground: roughly 62% of `R` at 51.5°N. Radius queries are measured in
//! projected meters and are not corrected for this; use [`scale_factor`] when
//! a ground-distance interpretation is needed.

use forage_types::point::{GeoPoint, MetricPoint};
use std::f64::consts::FRAC_PI_4;

/// Sphere radius of the projection, in meters (WGS84 semi-major axis).
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Latitude at which the projected square world has equal width and height.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// True when `lat` lies in the open interval (-90, 90) the projection is
/// defined on.
#[inline]
pub fn in_domain(lat: f64) -> bool {
    lat.is_finite() && lat > -90.0 && lat < 90.0
}

/// True when `point` projects to finite planar coordinates. Latitude must be
/// in domain and longitude small enough that `x` does not overflow.
pub fn is_projectable(point: GeoPoint) -> bool {
    point.is_finite() && in_domain(point.lat()) && to_metric(point).is_finite()
}

/// Project a geographic point to planar meters.
///
/// ```
/// use forage::projection::to_metric;
/// use forage_types::point::GeoPoint;
///
/// let origin = to_metric(GeoPoint::new(0.0, 0.0));
/// assert_eq!(origin.x(), 0.0);
/// assert!(origin.y().abs() < 1e-9);
/// ```
pub fn to_metric(point: GeoPoint) -> MetricPoint {
    let x = EARTH_RADIUS_METERS * point.lon().to_radians();
    let y = EARTH_RADIUS_METERS * (FRAC_PI_4 + point.lat().to_radians() / 2.0).tan().ln();
    MetricPoint::new(x, y)
}

/// Inverse of [`to_metric`].
pub fn to_geographic(point: MetricPoint) -> GeoPoint {
    let lon = (point.x() / EARTH_RADIUS_METERS).to_degrees();
    let lat = (2.0 * (point.y() / EARTH_RADIUS_METERS).exp().atan() - 2.0 * FRAC_PI_4).to_degrees();
    GeoPoint::new(lon, lat)
}

/// Linear scale of the projection at `lat`: projected meters per ground meter.
pub fn scale_factor(lat: f64) -> f64 {
    1.0 / lat.to_radians().cos()
}
