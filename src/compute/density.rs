//! Planar cell areas and per-km² densities.

use crate::compute::grid::Grid;
use geo::{Area, Polygon};

const M2_PER_KM2: f64 = 1_000_000.0;

/// Area in km² of a polygon in planar meters.
///
/// Non-finite results are reported as `0.0`.
pub fn planar_area_km2(polygon: &Polygon<f64>) -> f64 {
    let area = polygon.unsigned_area() / M2_PER_KM2;
    if area.is_finite() { area } else { 0.0 }
}

/// `value / area_km2`, or `0.0` when the area is not positive.
///
/// # Examples
///
/// ```
/// use hexspot::compute::density::density_per_km2;
///
/// assert_eq!(density_per_km2(10.0, 2.0), 5.0);
/// assert_eq!(density_per_km2(10.0, 0.0), 0.0);
/// ```
pub fn density_per_km2(value: f64, area_km2: f64) -> f64 {
    if area_km2 > 0.0 {
        let density = value / area_km2;
        if density.is_finite() { density } else { 0.0 }
    } else {
        0.0
    }
}

/// Fill `area_km2` and `density_per_km2` for every cell of the grid.
///
/// Areas come from the planar hexagons the grid was generated from, not from
/// the stored geographic polygons.
pub fn compute_density(grid: &mut Grid) {
    let areas: Vec<f64> = grid.planar_polygons().iter().map(planar_area_km2).collect();
    for (cell, area_km2) in grid.cells_mut().iter_mut().zip(areas) {
        cell.area_km2 = area_km2;
        cell.density_per_km2 = density_per_km2(cell.value, area_km2);
    }
}
