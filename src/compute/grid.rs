//! Pointy-top hexagon tiling over a padded bounding box.
//!
//! Cells are laid out in offset rows: centers are `dx = r * sqrt(3)` apart
//! within a row, rows are `dy = 1.5 * r` apart, and odd rows are shifted
//! east by `dx / 2`. With `r` as the circumradius and vertices at
//! `30° + 60° * i`, adjacent cells share edges exactly, so the tiling has no
//! gaps and no overlaps.
//!
//! Geometry is built in planar meters and every vertex is projected back to
//! degrees for storage. The planar polygons are kept alongside the cells for
//! point assignment.

use crate::compute::projection::Projection;
use crate::compute::validation::validate_radius;
use crate::error::{HexspotError, Result};
use geo::{Coord, LineString, Polygon};
use hexspot_types::bbox::BoundingBox;
use hexspot_types::hex::HexCell;

/// Upper bound on cells per grid, to fail fast on a radius far too small for
/// the extent instead of exhausting memory.
pub const MAX_CELLS: usize = 20_000_000;

/// Padding on every side of the bounding box, in radii.
pub const PADDING_RADII: f64 = 2.0;

/// Horizontal distance between neighbouring centers in a row.
#[inline]
pub fn column_spacing(radius_m: f64) -> f64 {
    radius_m * 3f64.sqrt()
}

/// Vertical distance between neighbouring rows.
#[inline]
pub fn row_spacing(radius_m: f64) -> f64 {
    radius_m * 1.5
}

/// Planar pointy-top hexagon with circumradius `radius`.
///
/// Vertices start at 30° and advance counter-clockwise in 60° steps, so the
/// second vertex points north.
pub fn hexagon(center: Coord<f64>, radius: f64) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = (0..6)
        .map(|i| {
            let angle = (30.0 + 60.0 * i as f64).to_radians();
            Coord {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
        .collect();

    Polygon::new(LineString::from(coords), vec![])
}

/// The generated tiling.
///
/// Owns its cells exclusively. Cell `i` has `hex_id == i`, and cells are in
/// row-major order starting from the south-west corner.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<HexCell>,
    planar: Vec<Polygon<f64>>,
    rows: usize,
    cols: usize,
    radius_m: f64,
    origin: Coord<f64>,
    projection: Projection,
}

impl Grid {
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [HexCell] {
        &mut self.cells
    }

    pub fn cell(&self, hex_id: usize) -> Option<&HexCell> {
        self.cells.get(hex_id)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Planar polygon of a cell, in projected meters.
    pub fn planar_polygon(&self, hex_id: usize) -> Option<&Polygon<f64>> {
        self.planar.get(hex_id)
    }

    pub fn planar_polygons(&self) -> &[Polygon<f64>] {
        &self.planar
    }

    /// Planar center of the cell at `(row, col)`.
    pub fn center(&self, row: usize, col: usize) -> Coord<f64> {
        cell_center(self.origin, self.radius_m, row, col)
    }

    pub fn total_value(&self) -> f64 {
        self.cells.iter().map(|c| c.value).sum()
    }

    pub fn max_value(&self) -> f64 {
        self.cells.iter().map(|c| c.value).fold(0.0, f64::max)
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}

fn cell_center(origin: Coord<f64>, radius_m: f64, row: usize, col: usize) -> Coord<f64> {
    let dx = column_spacing(radius_m);
    let offset = if row % 2 == 1 { dx / 2.0 } else { 0.0 };
    Coord {
        x: origin.x + col as f64 * dx + offset,
        y: origin.y + row as f64 * row_spacing(radius_m),
    }
}

/// Build a grid covering `bbox` padded by two radii on every side.
///
/// Stored geographic vertices are clamped to valid degrees, so cells that
/// pad past a pole or the antimeridian are flattened in the output. The
/// planar polygons keep their full shape and drive aggregation and area.
///
/// # Errors
///
/// Returns [`HexspotError::InvalidParameter`] when `radius_m` is not a
/// positive finite number, or when the grid would exceed [`MAX_CELLS`].
///
/// # Examples
///
/// ```
/// use hexspot::compute::grid::generate;
/// use hexspot::compute::projection::Projection;
/// use hexspot_types::bbox::BoundingBox;
///
/// let bbox = BoundingBox::new(103.60, 1.40, 103.90, 1.55);
/// let grid = generate(&bbox, 2000.0, Projection::web_mercator()).unwrap();
///
/// assert_eq!(grid.len(), grid.rows() * grid.cols());
/// assert_eq!(grid.cells()[0].hex_id, 0);
/// ```
pub fn generate(bbox: &BoundingBox, radius_m: f64, projection: Projection) -> Result<Grid> {
    validate_radius(radius_m)?;

    let planar_box = projection.forward_rect(&bbox.rect);
    let pad = PADDING_RADII * radius_m;
    let min = Coord {
        x: planar_box.min().x - pad,
        y: planar_box.min().y - pad,
    };
    let max = Coord {
        x: planar_box.max().x + pad,
        y: planar_box.max().y + pad,
    };

    let cols_f = ((max.x - min.x) / column_spacing(radius_m)).ceil() + 1.0;
    let rows_f = ((max.y - min.y) / row_spacing(radius_m)).ceil() + 1.0;
    let cell_count = cols_f * rows_f;
    if !cell_count.is_finite() || cell_count > MAX_CELLS as f64 {
        return Err(HexspotError::InvalidParameter(format!(
            "hex radius {} m is too small for the extent: {} x {} cells exceeds the limit of {}",
            radius_m, rows_f, cols_f, MAX_CELLS
        )));
    }
    let (rows, cols) = (rows_f as usize, cols_f as usize);

    log::debug!(
        "Generating {} x {} hex grid (radius {} m, {} cells)",
        rows,
        cols,
        radius_m,
        rows * cols
    );

    let mut cells = Vec::with_capacity(rows * cols);
    let mut planar = Vec::with_capacity(rows * cols);

    for row in 0..rows {
        for col in 0..cols {
            let hex = hexagon(cell_center(min, radius_m, row, col), radius_m);
            let geographic = projection.inverse_polygon(&hex);
            cells.push(HexCell::new(cells.len(), row, col, geographic));
            planar.push(hex);
        }
    }

    Ok(Grid {
        cells,
        planar,
        rows,
        cols,
        radius_m,
        origin: min,
        projection,
    })
}
