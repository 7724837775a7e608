//! Geometry for the hotspot pipeline: projection, tiling, aggregation and density.

pub mod aggregate;
pub mod density;
pub mod geojson;
pub mod grid;
pub mod projection;
pub mod validation;
