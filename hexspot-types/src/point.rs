use geo::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A geographic observation with optional numeric attributes.
///
/// Coordinates are `(longitude, latitude)` in degrees. The attribute map
/// carries the numeric fields that were read alongside the point, such as
/// the configured weight field.
///
/// # Examples
///
/// ```
/// use hexspot_types::point::WeightedPoint;
///
/// let incident = WeightedPoint::new(103.76, 1.46).with_attribute("severity", 3.0);
/// assert_eq!(incident.lon(), 103.76);
/// assert_eq!(incident.attribute("severity"), Some(3.0));
/// assert_eq!(incident.contribution(Some("severity")), 3.0);
/// assert_eq!(incident.contribution(None), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    /// The geographic position (x = longitude, y = latitude)
    pub point: Point<f64>,
    /// Numeric attributes keyed by field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, f64>,
}

impl WeightedPoint {
    /// Create a point without attributes.
    ///
    /// # Arguments
    ///
    /// * `lon` - Longitude in degrees
    /// * `lat` - Latitude in degrees
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            point: Point::new(lon, lat),
            attributes: BTreeMap::new(),
        }
    }

    /// Create from an existing `geo::Point`.
    pub fn from_point(point: Point<f64>) -> Self {
        Self {
            point,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach a numeric attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    /// Look up a numeric attribute by name.
    pub fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).copied()
    }

    /// Amount this point adds to its cell.
    ///
    /// Returns the named attribute when `weight_field` is set and present on
    /// this point, otherwise `1.0`.
    pub fn contribution(&self, weight_field: Option<&str>) -> f64 {
        weight_field
            .and_then(|field| self.attribute(field))
            .unwrap_or(1.0)
    }
}

impl From<Point<f64>> for WeightedPoint {
    fn from(point: Point<f64>) -> Self {
        Self::from_point(point)
    }
}
