//! Run configuration for a hotspot batch.
//!
//! Every field has a default, so an empty JSON object (or TOML document) is a
//! complete configuration.
use crate::compute::projection::ProjectionKind;
use serde::de::Error;
use std::path::PathBuf;

/// Parameters of one batch run
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Hexagon circumradius (center to vertex) in meters
    #[serde(default = "Config::default_hex_radius_meters")]
    pub hex_radius_meters: f64,

    /// Point collections to load
    #[serde(default = "Config::default_inputs")]
    pub inputs: Vec<PathBuf>,

    #[serde(default = "Config::default_output_path")]
    pub output_path: PathBuf,

    /// Numeric point attribute summed instead of counting points
    #[serde(default)]
    pub weight_field: Option<String>,

    /// Planar projection shared by grid generation and area computation
    #[serde(default)]
    pub projection: ProjectionKind,

    /// Pretty-print the output document
    #[serde(default)]
    pub pretty: bool,
}

impl Config {
    const fn default_hex_radius_meters() -> f64 {
        2000.0
    }

    fn default_inputs() -> Vec<PathBuf> {
        vec![PathBuf::from("data/traffic_incidents.geojson")]
    }

    fn default_output_path() -> PathBuf {
        PathBuf::from("data/hotspots_hex.geojson")
    }

    pub fn with_hex_radius_meters(mut self, radius_m: f64) -> Self {
        self.hex_radius_meters = radius_m;
        self
    }

    pub fn with_inputs<I, P>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_weight_field(mut self, field: impl Into<String>) -> Self {
        self.weight_field = Some(field.into());
        self
    }

    pub fn with_projection(mut self, projection: ProjectionKind) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.hex_radius_meters.is_finite() || self.hex_radius_meters <= 0.0 {
            return Err(format!(
                "hex_radius_meters must be a positive number, got: {}",
                self.hex_radius_meters
            ));
        }

        if self.inputs.is_empty() {
            return Err("At least one input path is required".to_string());
        }

        if let Some(field) = &self.weight_field
            && field.trim().is_empty()
        {
            return Err("weight_field must not be blank".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hex_radius_meters: Self::default_hex_radius_meters(),
            inputs: Self::default_inputs(),
            output_path: Self::default_output_path(),
            weight_field: None,
            projection: ProjectionKind::default(),
            pretty: false,
        }
    }
}
