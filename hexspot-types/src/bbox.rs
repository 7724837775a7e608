use crate::point::WeightedPoint;
use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A geographic axis-aligned bounding box.
///
/// Represents the extent of a point set in degrees, defined by minimum and
/// maximum longitude/latitude. This is a wrapper around `geo::Rect`, which
/// keeps `min <= max` on each axis. A box built from a single point (or from
/// collinear points) is degenerate and has zero width and/or height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl BoundingBox {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// Corners are normalized by `geo::Rect`, so swapped arguments still
    /// produce a valid box.
    ///
    /// # Arguments
    ///
    /// * `min_lon` - Western boundary
    /// * `min_lat` - Southern boundary
    /// * `max_lon` - Eastern boundary
    /// * `max_lat` - Northern boundary
    ///
    /// # Examples
    ///
    /// ```
    /// use hexspot_types::bbox::BoundingBox;
    ///
    /// let singapore = BoundingBox::new(103.6, 1.2, 104.1, 1.5);
    /// assert!(singapore.width() > 0.0);
    /// ```
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: min_lon, y: min_lat },
                geo::coord! { x: max_lon, y: max_lat },
            ),
        }
    }

    /// Smallest box enclosing every point, or `None` for an empty slice.
    pub fn from_points(points: &[WeightedPoint]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_lon, mut min_lat) = (first.lon(), first.lat());
        let (mut max_lon, mut max_lat) = (min_lon, min_lat);

        for p in &points[1..] {
            min_lon = min_lon.min(p.lon());
            min_lat = min_lat.min(p.lat());
            max_lon = max_lon.max(p.lon());
            max_lat = max_lat.max(p.lat());
        }

        Some(Self::new(min_lon, min_lat, max_lon, max_lat))
    }

    pub fn min_lon(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_lat(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_lon(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_lat(&self) -> f64 {
        self.rect.max().y
    }

    /// Get the center point of the bounding box.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_lon() + self.max_lon()) / 2.0,
            (self.min_lat() + self.max_lat()) / 2.0,
        )
    }

    /// Extent in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon() - self.min_lon()
    }

    /// Extent in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat() - self.min_lat()
    }

    /// True when the box has zero area.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Check if a point is contained within this bounding box (edges included).
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x() >= self.min_lon()
            && point.x() <= self.max_lon()
            && point.y() >= self.min_lat()
            && point.y() <= self.max_lat()
    }
}
