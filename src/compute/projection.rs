//! Transforms between geographic degrees and a planar metric projection.
//!
//! Both projections use a spherical Earth with the WGS84 semi-major axis, so
//! planar units are meters. The same [`Projection`] value must be used for
//! grid generation and for area computation, otherwise cell sizes and areas
//! disagree.

use geo::{Coord, MapCoords, Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;
use std::str::FromStr;

/// Sphere radius used by both projections (WGS84 semi-major axis).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Web Mercator is undefined at the poles; latitudes are clamped to the
/// range that maps onto a square world.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Supported planar projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    /// Spherical Mercator (EPSG:3857 semantics)
    #[default]
    WebMercator,
    /// Plate carrée on the same sphere
    Equirectangular,
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebMercator => write!(f, "web_mercator"),
            Self::Equirectangular => write!(f, "equirectangular"),
        }
    }
}

impl FromStr for ProjectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "web_mercator" | "mercator" | "epsg:3857" => Ok(Self::WebMercator),
            "equirectangular" | "plate_carree" => Ok(Self::Equirectangular),
            other => Err(format!(
                "unknown projection '{}', expected web_mercator or equirectangular",
                other
            )),
        }
    }
}

/// A stateless, reusable transform in both directions.
///
/// # Examples
///
/// ```
/// use geo::coord;
/// use hexspot::compute::projection::Projection;
///
/// let proj = Projection::web_mercator();
/// let planar = proj.forward(coord! { x: 103.8, y: 1.35 });
/// let back = proj.inverse(planar);
///
/// assert!((back.x - 103.8).abs() < 1e-9);
/// assert!((back.y - 1.35).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Projection {
    kind: ProjectionKind,
}

impl Projection {
    pub fn new(kind: ProjectionKind) -> Self {
        Self { kind }
    }

    pub fn web_mercator() -> Self {
        Self::new(ProjectionKind::WebMercator)
    }

    pub fn equirectangular() -> Self {
        Self::new(ProjectionKind::Equirectangular)
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    /// Geographic `(lon, lat)` degrees to planar meters.
    #[inline]
    pub fn forward(&self, coord: Coord<f64>) -> Coord<f64> {
        let x = EARTH_RADIUS_M * coord.x.to_radians();
        let y = match self.kind {
            ProjectionKind::WebMercator => {
                let lat = coord
                    .y
                    .clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT)
                    .to_radians();
                EARTH_RADIUS_M * (FRAC_PI_4 + lat / 2.0).tan().ln()
            }
            ProjectionKind::Equirectangular => EARTH_RADIUS_M * coord.y.to_radians(),
        };
        Coord { x, y }
    }

    /// Planar meters back to geographic `(lon, lat)` degrees.
    #[inline]
    pub fn inverse(&self, coord: Coord<f64>) -> Coord<f64> {
        let x = (coord.x / EARTH_RADIUS_M).to_degrees();
        let y = match self.kind {
            ProjectionKind::WebMercator => {
                (2.0 * (coord.y / EARTH_RADIUS_M).exp().atan() - FRAC_PI_2).to_degrees()
            }
            ProjectionKind::Equirectangular => (coord.y / EARTH_RADIUS_M).to_degrees(),
        };
        Coord { x, y }
    }

    /// Planar polygon back to degrees, clamped to `[-180, 180] x [-90, 90]`.
    ///
    /// Cells padded past the poles or the antimeridian come out flattened
    /// against the edge of the valid range.
    pub fn inverse_polygon(&self, polygon: &Polygon<f64>) -> Polygon<f64> {
        polygon.map_coords(|c| {
            let geo = self.inverse(c);
            Coord {
                x: geo.x.clamp(-180.0, 180.0),
                y: geo.y.clamp(-90.0, 90.0),
            }
        })
    }

    /// Project both corners of a geographic rectangle.
    ///
    /// Both projections are monotonic per axis, so the result is the planar
    /// rectangle spanned by the projected corners.
    pub fn forward_rect(&self, rect: &Rect<f64>) -> Rect<f64> {
        Rect::new(self.forward(rect.min()), self.forward(rect.max()))
    }
}
