//! Hexagonal hotspot aggregation for geo-tagged point observations.
//!
//! Turns irregular point observations (e.g. traffic incident locations) into a
//! regular pointy-top hexagon grid, each cell annotated with a count (or
//! weighted sum), its planar area and the resulting density.
//!
//! ## Pipeline
//! - **Load**: merge point features from one or more GeoJSON files
//! - **Tile**: cover the padded extent with hexagons of a fixed circumradius
//! - **Aggregate**: assign each point to exactly one hexagon
//! - **Measure**: planar area in km² and value per km²
//! - **Export**: write every hexagon, empty ones included, as GeoJSON
//!
//! ```rust
//! use hexspot::{Pipeline, WeightedPoint};
//!
//! let pipeline = Pipeline::builder().hex_radius_meters(2000.0).build()?;
//! let points = vec![
//!     WeightedPoint::new(103.76, 1.46),
//!     WeightedPoint::new(103.77, 1.47),
//!     WeightedPoint::new(103.90, 1.55),
//!     WeightedPoint::new(103.60, 1.40),
//! ];
//!
//! let (grid, summary) = pipeline.compute_points(&points)?;
//! assert_eq!(summary.assigned, 4);
//! assert_eq!(grid.total_value(), 4.0);
//! # Ok::<(), hexspot::HexspotError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod pipeline;

pub use config::Config;
pub use error::{HexspotError, Result};
pub use pipeline::{HotspotBuilder, HotspotRun, Pipeline};

pub use compute::aggregate::{AggregateSummary, aggregate};
pub use compute::density::compute_density;
pub use compute::grid::{Grid, generate};
pub use compute::projection::{Projection, ProjectionKind};
pub use export::write_geojson;
pub use loader::{LoadedPoints, load_points};

pub use hexspot_types::bbox::BoundingBox;
pub use hexspot_types::hex::HexCell;
pub use hexspot_types::point::WeightedPoint;
pub use hexspot_types::stats::RunStats;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, HexspotError, HotspotBuilder, Pipeline, Result};

    pub use crate::{BoundingBox, HexCell, RunStats, WeightedPoint};

    pub use crate::{Grid, Projection, ProjectionKind};

    pub use geo::{Point, Polygon};
}
