//! One-shot batch: load, tile, aggregate, measure, export.
//!
//! Each stage runs to completion before the next starts. Nothing is shared
//! between runs, so two runs writing the same output path must be serialized
//! by the caller.

use crate::compute::aggregate::{AggregateSummary, aggregate};
use crate::compute::density::compute_density;
use crate::compute::grid::{Grid, generate};
use crate::compute::projection::{Projection, ProjectionKind};
use crate::config::Config;
use crate::error::{HexspotError, Result};
use crate::export::write_geojson;
use crate::loader::load_points;
use hexspot_types::bbox::BoundingBox;
use hexspot_types::point::WeightedPoint;
use hexspot_types::stats::RunStats;
use std::path::PathBuf;

/// Builder for a pipeline with custom inputs and parameters.
#[derive(Debug)]
pub struct HotspotBuilder {
    config: Config,
    inputs: Vec<PathBuf>,
}

impl HotspotBuilder {
    /// Create a new builder with default parameters.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            inputs: Vec::new(),
        }
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn hex_radius_meters(mut self, radius_m: f64) -> Self {
        self.config.hex_radius_meters = radius_m;
        self
    }

    /// Add an input file. Any inputs added here replace the configured ones.
    pub fn input<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.inputs.push(path.into());
        self
    }

    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn weight_field(mut self, field: impl Into<String>) -> Self {
        self.config.weight_field = Some(field.into());
        self
    }

    pub fn projection(mut self, projection: ProjectionKind) -> Self {
        self.config.projection = projection;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Validate parameters and build the pipeline.
    pub fn build(mut self) -> Result<Pipeline> {
        if !self.inputs.is_empty() {
            self.config.inputs = self.inputs;
        }
        Pipeline::new(self.config)
    }
}

impl Default for HotspotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Grid and summary produced by a run, before or after export.
#[derive(Debug, Clone)]
pub struct HotspotRun {
    pub grid: Grid,
    pub stats: RunStats,
}

/// A validated batch job.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    projection: Projection,
}

impl Pipeline {
    /// Validates parameters up front, before any input is touched.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(HexspotError::InvalidParameter)?;
        let projection = Projection::new(config.projection);
        Ok(Self { config, projection })
    }

    pub fn builder() -> HotspotBuilder {
        HotspotBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tile, aggregate and measure an in-memory point set.
    pub fn compute_points(&self, points: &[WeightedPoint]) -> Result<(Grid, AggregateSummary)> {
        let bbox = BoundingBox::from_points(points).ok_or_else(|| {
            HexspotError::InvalidInput("Cannot build a grid without points".to_string())
        })?;

        let mut grid = generate(&bbox, self.config.hex_radius_meters, self.projection)?;
        log::info!(
            "Built {} x {} hex grid ({} cells, radius {} m, {})",
            grid.rows(),
            grid.cols(),
            grid.len(),
            self.config.hex_radius_meters,
            self.projection.kind()
        );

        let summary = aggregate(points, &mut grid, self.config.weight_field.as_deref());
        compute_density(&mut grid);

        Ok((grid, summary))
    }

    /// Load the configured inputs and compute the grid without writing it.
    ///
    /// # Errors
    ///
    /// [`HexspotError::NoPoints`] when no input yields a usable point.
    pub fn compute(&self) -> Result<HotspotRun> {
        let loaded = load_points(&self.config.inputs, self.config.weight_field.as_deref())?;
        let (grid, summary) = self.compute_points(&loaded.points)?;

        let stats = RunStats {
            files_read: loaded.files_read,
            files_skipped: loaded.files_skipped,
            points_loaded: loaded.len(),
            non_point_features: loaded.non_point_features,
            invalid_points: loaded.invalid_points,
            points_aggregated: summary.assigned,
            points_dropped: summary.dropped,
            hex_count: grid.len(),
            occupied_cells: grid.occupied_cells(),
            rows: grid.rows(),
            cols: grid.cols(),
            total_value: grid.total_value(),
            max_value: grid.max_value(),
            output_path: None,
        };

        Ok(HotspotRun { grid, stats })
    }

    /// Run the full batch and write the output file.
    ///
    /// Nothing is written when loading fails.
    pub fn run(&self) -> Result<RunStats> {
        let HotspotRun { grid, mut stats } = self.compute()?;

        write_geojson(grid.cells(), &self.config.output_path, self.config.pretty)?;
        stats.output_path = Some(self.config.output_path.clone());

        log::info!(
            "Wrote hotspots -> {} (hex_m={}, features={})",
            self.config.output_path.display(),
            self.config.hex_radius_meters,
            stats.hex_count
        );

        Ok(stats)
    }
}
