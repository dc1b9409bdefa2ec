//! Argument validation for queries.

use crate::error::{ForageError, Result};
use crate::projection;
use forage_types::point::GeoPoint;

/// Validates a query center.
///
/// Longitude may be any finite value whose projection stays finite; latitude
/// must lie strictly between -90 and 90.
///
/// # Examples
///
/// ```
/// use forage::validation::validate_query_point;
/// use forage_types::point::GeoPoint;
///
/// assert!(validate_query_point(&GeoPoint::new(-0.35, 51.56)).is_ok());
/// assert!(validate_query_point(&GeoPoint::new(-0.35, 90.0)).is_err());
/// assert!(validate_query_point(&GeoPoint::new(f64::NAN, 51.56)).is_err());
/// ```
pub fn validate_query_point(point: &GeoPoint) -> Result<()> {
    if !point.lon().is_finite() {
        return Err(ForageError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            point.lon()
        )));
    }

    if !point.lat().is_finite() {
        return Err(ForageError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            point.lat()
        )));
    }

    if !projection::in_domain(point.lat()) {
        return Err(ForageError::InvalidInput(format!(
            "Latitude out of range (-90.0, 90.0): {}",
            point.lat()
        )));
    }

    if !projection::to_metric(*point).is_finite() {
        return Err(ForageError::InvalidInput(format!(
            "Longitude too large to project: {}",
            point.lon()
        )));
    }

    Ok(())
}

/// Validates a search radius in meters. Zero is allowed.
pub fn validate_radius(radius_m: f64) -> Result<()> {
    if !radius_m.is_finite() {
        return Err(ForageError::InvalidInput(format!(
            "Radius must be finite, got: {}",
            radius_m
        )));
    }

    if radius_m < 0.0 {
        return Err(ForageError::InvalidInput(format!(
            "Radius must not be negative, got: {}",
            radius_m
        )));
    }

    Ok(())
}
