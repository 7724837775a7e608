//! Validation for geographic coordinates and run parameters.

use crate::error::{HexspotError, Result};
use geo::Point;

/// Validates a point has finite, in-range longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use geo::Point;
/// use hexspot::compute::validation::validate_geographic_point;
///
/// assert!(validate_geographic_point(&Point::new(103.76, 1.46)).is_ok());
/// assert!(validate_geographic_point(&Point::new(200.0, 1.46)).is_err());
/// assert!(validate_geographic_point(&Point::new(103.76, -95.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(HexspotError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(HexspotError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(HexspotError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(HexspotError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}

/// Validates a hexagon circumradius in meters.
pub fn validate_radius(radius_m: f64) -> Result<()> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(HexspotError::InvalidParameter(format!(
            "hex radius must be a positive number of meters, got: {}",
            radius_m
        )));
    }
    Ok(())
}

/// Validates a weight value read from a point attribute.
///
/// Weights must be finite and non-negative so densities stay non-negative.
pub fn validate_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(HexspotError::InvalidInput(format!(
            "Weight must be a finite non-negative number, got: {}",
            weight
        )));
    }
    Ok(())
}
