//! # hexspot-types
//!
//! Core data types for the hexspot hotspot engine.
//!
//! - **Point types**: `WeightedPoint`, a geographic observation with optional numeric attributes
//! - **Bounding box types**: `BoundingBox`, the geographic extent of a point set
//! - **Cell types**: `HexCell`, one annotated hexagon of a grid
//! - **Run summaries**: `RunStats`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use hexspot_types::bbox::BoundingBox;
//! use hexspot_types::point::WeightedPoint;
//!
//! let points = vec![
//!     WeightedPoint::new(103.76, 1.46),
//!     WeightedPoint::new(103.90, 1.55),
//! ];
//!
//! let bbox = BoundingBox::from_points(&points).unwrap();
//! assert_eq!(bbox.min_lon(), 103.76);
//! assert!(bbox.contains_point(&points[1].point));
//! ```

pub mod bbox;
pub mod hex;
pub mod point;
pub mod stats;
