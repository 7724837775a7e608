//! Assigns points to the hexagon containing them and accumulates values.
//!
//! Points are projected with the grid's projection and tested against the
//! planar hexagons. Candidates come from an R*-tree over hexagon envelopes;
//! the exact test is `geo::Intersects`, so points on an edge or vertex count
//! as inside. A point on a shared edge goes to the lowest `hex_id` among the
//! cells touching it, which keeps every point in exactly one cell.

use crate::compute::grid::Grid;
use geo::{BoundingRect, Coord, Intersects, Point};
use hexspot_types::point::WeightedPoint;
use rstar::{AABB, RTree, RTreeObject};

/// Hexagon envelope for R*-tree indexing.
#[derive(Debug, Clone, PartialEq)]
struct IndexedHex {
    hex_id: usize,
    min: [f64; 2],
    max: [f64; 2],
}

impl RTreeObject for IndexedHex {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Spatial index over the planar hexagons of a grid.
#[derive(Debug)]
pub struct HexIndex {
    tree: RTree<IndexedHex>,
}

impl HexIndex {
    pub fn build(grid: &Grid) -> Self {
        let entries: Vec<IndexedHex> = grid
            .planar_polygons()
            .iter()
            .enumerate()
            .filter_map(|(hex_id, hex)| {
                hex.bounding_rect().map(|rect| IndexedHex {
                    hex_id,
                    min: [rect.min().x, rect.min().y],
                    max: [rect.max().x, rect.max().y],
                })
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Lowest `hex_id` whose planar hexagon contains `planar`, boundary included.
    pub fn locate(&self, grid: &Grid, planar: Coord<f64>) -> Option<usize> {
        let point = Point::from(planar);
        let envelope = AABB::from_point([planar.x, planar.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.hex_id)
            .filter(|&hex_id| {
                grid.planar_polygon(hex_id)
                    .is_some_and(|hex| hex.intersects(&point))
            })
            .min()
    }
}

/// Outcome of one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateSummary {
    /// Points added to some cell
    pub assigned: usize,
    /// Points that matched no cell
    pub dropped: usize,
    /// Sum of the amounts added
    pub total_value: f64,
}

/// Add every point to the cell containing it.
///
/// Each point adds its `weight_field` attribute when the field is given and
/// present on that point, otherwise `1`. Points outside every cell are
/// dropped without failing the run.
///
/// # Examples
///
/// ```
/// use hexspot::compute::aggregate::aggregate;
/// use hexspot::compute::grid::generate;
/// use hexspot::compute::projection::Projection;
/// use hexspot_types::bbox::BoundingBox;
/// use hexspot_types::point::WeightedPoint;
///
/// let points = vec![
///     WeightedPoint::new(103.80, 1.35).with_attribute("casualties", 3.0),
///     WeightedPoint::new(103.85, 1.30),
/// ];
/// let bbox = BoundingBox::from_points(&points).unwrap();
/// let mut grid = generate(&bbox, 2000.0, Projection::web_mercator()).unwrap();
///
/// let summary = aggregate(&points, &mut grid, Some("casualties"));
/// assert_eq!(summary.assigned, 2);
/// assert_eq!(grid.total_value(), 4.0);
/// ```
pub fn aggregate(
    points: &[WeightedPoint],
    grid: &mut Grid,
    weight_field: Option<&str>,
) -> AggregateSummary {
    let index = HexIndex::build(grid);
    let projection = grid.projection();
    let mut summary = AggregateSummary::default();

    for point in points {
        let planar = projection.forward(point.point.0);
        match index.locate(grid, planar) {
            Some(hex_id) => {
                let amount = point.contribution(weight_field);
                grid.cells_mut()[hex_id].accumulate(amount);
                summary.assigned += 1;
                summary.total_value += amount;
            }
            None => summary.dropped += 1,
        }
    }

    if summary.dropped > 0 {
        log::debug!(
            "{} of {} points fell outside the grid and were dropped",
            summary.dropped,
            points.len()
        );
    }

    summary
}
