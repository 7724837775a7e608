use geo::{Coord, Polygon};
use serde::{Deserialize, Serialize};

/// One hexagon of a grid with its aggregate attributes.
///
/// `hex_id` is the dense, zero-based, row-major index assigned at generation.
/// The polygon is stored in geographic degrees as a closed ring of six
/// vertices in generation order (seven positions, first == last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexCell {
    pub hex_id: usize,
    /// Grid row (0 = southernmost)
    pub row: usize,
    /// Grid column (0 = westernmost)
    pub col: usize,
    pub polygon: Polygon<f64>,
    /// Point count or weighted sum, 0 when empty
    pub value: f64,
    pub area_km2: f64,
    pub density_per_km2: f64,
}

impl HexCell {
    /// Create an empty cell.
    pub fn new(hex_id: usize, row: usize, col: usize, polygon: Polygon<f64>) -> Self {
        Self {
            hex_id,
            row,
            col,
            polygon,
            value: 0.0,
            area_km2: 0.0,
            density_per_km2: 0.0,
        }
    }

    /// The six distinct vertices in generation order.
    pub fn vertices(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.polygon.exterior().coords().take(6).copied()
    }

    /// Add to the aggregate value.
    pub fn accumulate(&mut self, amount: f64) {
        self.value += amount;
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0.0
    }
}
