use geo::Distance;
use serde::{Deserialize, Serialize};

/// A geographic position in degrees on the WGS84 datum.
///
/// This is the coordinate shown to callers. It is never used for distance
/// arithmetic directly; project it to a [`MetricPoint`] first.
///
/// # Examples
///
/// ```
/// use forage_types::point::GeoPoint;
///
/// let harrow = GeoPoint::new(-0.35, 51.56);
/// assert_eq!(harrow.lon(), -0.35);
/// assert_eq!(harrow.lat(), 51.56);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

impl GeoPoint {
    /// Create a new point from longitude and latitude in degrees.
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// True when both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Great-circle distance to another point in meters.
    ///
    /// The index itself measures in projected meters; this is provided for
    /// callers that want to compare the two.
    ///
    /// ```
    /// use forage_types::point::GeoPoint;
    ///
    /// let a = GeoPoint::new(-0.35, 51.56);
    /// let b = GeoPoint::new(-0.34, 51.56);
    /// let d = a.haversine_distance(&b);
    /// assert!(d > 690.0 && d < 700.0);
    /// ```
    #[inline]
    pub fn haversine_distance(&self, other: &GeoPoint) -> f64 {
        geo::Haversine.distance(geo::Point::from(*self), geo::Point::from(*other))
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.lon, point.lat)
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.x(), point.y())
    }
}

/// A position on the planar metric projection, in meters.
///
/// # Examples
///
/// ```
/// use forage_types::point::MetricPoint;
///
/// let a = MetricPoint::new(0.0, 0.0);
/// let b = MetricPoint::new(3.0, 4.0);
/// assert_eq!(a.distance(&b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    x: f64,
    y: f64,
}

impl MetricPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Easting in meters.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Northing in meters.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another metric point.
    #[inline]
    pub fn distance(&self, other: &MetricPoint) -> f64 {
        geo::Euclidean.distance(geo::Point::from(*self), geo::Point::from(*other))
    }
}

impl From<MetricPoint> for geo::Point<f64> {
    fn from(point: MetricPoint) -> Self {
        geo::Point::new(point.x, point.y)
    }
}

impl From<MetricPoint> for [f64; 2] {
    fn from(point: MetricPoint) -> Self {
        [point.x, point.y]
    }
}
