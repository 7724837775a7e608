use anyhow::Context;
use clap::Parser;
use hexspot::{Config, HexspotError, Pipeline, ProjectionKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

/// Compute hexagon hotspots from point data.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Hex radius in meters (center to vertex) [default: 2000]
    #[arg(long = "hex-m", visible_alias = "hex_m")]
    hex_m: Option<f64>,

    /// Input point files (GeoJSON)
    #[arg(long, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output GeoJSON path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Numeric field to use as weight per point
    #[arg(long = "weight-field", visible_alias = "weight_field")]
    weight_field: Option<String>,

    /// Planar projection: web_mercator or equirectangular
    #[arg(long)]
    projection: Option<ProjectionKind>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Read parameters from a JSON or TOML file; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        #[cfg(feature = "toml")]
        return Config::from_toml(&text).with_context(|| format!("parsing {}", path.display()));
        #[cfg(not(feature = "toml"))]
        anyhow::bail!("TOML config requires the `toml` feature: {}", path.display());
    }

    Config::from_json(&text).with_context(|| format!("parsing {}", path.display()))
}

fn build_config(args: Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    if let Some(radius) = args.hex_m {
        config.hex_radius_meters = radius;
    }
    if !args.inputs.is_empty() {
        config.inputs = args.inputs;
    }
    if let Some(out) = args.out {
        config.output_path = out;
    }
    if let Some(field) = args.weight_field {
        config.weight_field = Some(field);
    }
    if let Some(projection) = args.projection {
        config.projection = projection;
    }
    if args.pretty {
        config.pretty = true;
    }

    Ok(config)
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexspot=info,info".into()),
        )
        .init();

    let config = build_config(Args::parse())?;
    let pipeline = Pipeline::new(config)?;

    match pipeline.run() {
        Ok(stats) => {
            info!(
                "{} points from {} files ({} skipped), {} of {} hexagons occupied, total value {}",
                stats.points_aggregated,
                stats.files_read,
                stats.files_skipped,
                stats.occupied_cells,
                stats.hex_count,
                stats.total_value
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(HexspotError::NoPoints { checked }) => {
            error!("No point data found. Checked: {:?}", checked);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
