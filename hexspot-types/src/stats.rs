use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of one batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Input files that contributed at least one point
    pub files_read: usize,
    /// Input files skipped (missing, unreadable, unparseable, unsupported CRS, empty)
    pub files_skipped: usize,
    /// Points loaded across all inputs
    pub points_loaded: usize,
    /// Features dropped because their geometry was not a single point
    pub non_point_features: usize,
    /// Points dropped because their coordinates were out of range
    pub invalid_points: usize,
    /// Points assigned to a hexagon
    pub points_aggregated: usize,
    /// Points that matched no hexagon
    pub points_dropped: usize,
    pub hex_count: usize,
    /// Hexagons with a non-zero value
    pub occupied_cells: usize,
    pub rows: usize,
    pub cols: usize,
    /// Sum of `value` over all hexagons
    pub total_value: f64,
    /// Largest `value` of any hexagon
    pub max_value: f64,
    pub output_path: Option<PathBuf>,
}
