//! Reads point collections from disk and merges them into one point set.
//!
//! Each input is handled independently: a file that is missing, unreadable,
//! unparseable or declares an unsupported coordinate reference is logged and
//! skipped. Loading fails only when no usable point remains across all inputs.

use crate::compute::geojson::{SourceCrs, parse_point_document};
use crate::compute::validation::validate_geographic_point;
use crate::error::{HexspotError, Result};
use geo::Point;
use hexspot_types::point::WeightedPoint;
use std::fs;
use std::path::{Path, PathBuf};

/// Points from a single input, converted to geographic degrees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilePoints {
    pub points: Vec<WeightedPoint>,
    pub non_point_features: usize,
    /// Points dropped for malformed or out-of-range coordinates
    pub invalid_points: usize,
}

/// Merged result of loading every input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedPoints {
    pub points: Vec<WeightedPoint>,
    pub files_read: usize,
    pub files_skipped: usize,
    pub non_point_features: usize,
    pub invalid_points: usize,
}

impl LoadedPoints {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Load one GeoJSON file.
///
/// Without a declared `crs`, coordinates are taken as geographic degrees.
///
/// # Errors
///
/// [`HexspotError::Io`] when the file cannot be read,
/// [`HexspotError::Parse`] when it is not GeoJSON, and
/// [`HexspotError::UnsupportedCrs`] for a reference other than geographic or
/// Web Mercator.
pub fn load_file(path: &Path, weight_field: Option<&str>) -> Result<FilePoints> {
    let text = fs::read_to_string(path).map_err(|e| HexspotError::io(path, e))?;
    let doc = parse_point_document(&text, weight_field)
        .map_err(|e| HexspotError::parse(path, e.to_string()))?;

    let crs = match doc.crs.as_deref() {
        None => SourceCrs::Geographic,
        Some(name) => SourceCrs::from_name(name).ok_or_else(|| HexspotError::UnsupportedCrs {
            path: path.to_path_buf(),
            crs: name.to_string(),
        })?,
    };

    if doc.invalid_weights > 0
        && let Some(field) = weight_field
    {
        log::warn!(
            "{}: {} values of '{}' are not non-negative numbers, counting those points as 1",
            path.display(),
            doc.invalid_weights,
            field
        );
    }

    let mut loaded = FilePoints {
        points: Vec::with_capacity(doc.points.len()),
        non_point_features: doc.non_point_features,
        invalid_points: doc.malformed_points,
    };

    for mut point in doc.points {
        point.point = Point::from(crs.to_geographic(point.point.0));
        match validate_geographic_point(&point.point) {
            Ok(()) => loaded.points.push(point),
            Err(e) => {
                log::warn!("{}: skipping point: {}", path.display(), e);
                loaded.invalid_points += 1;
            }
        }
    }

    Ok(loaded)
}

/// Load and merge every input, in the order given.
///
/// # Errors
///
/// Returns [`HexspotError::NoPoints`] listing the checked paths when no input
/// produced a usable point. Per-file failures are only logged.
pub fn load_points<P: AsRef<Path>>(paths: &[P], weight_field: Option<&str>) -> Result<LoadedPoints> {
    let mut merged = LoadedPoints::default();

    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Input not found, skipping: {}", path.display());
            merged.files_skipped += 1;
            continue;
        }

        match load_file(path, weight_field) {
            Ok(file) => {
                merged.non_point_features += file.non_point_features;
                merged.invalid_points += file.invalid_points;
                if file.non_point_features > 0 {
                    log::debug!(
                        "{}: ignored {} non-point features",
                        path.display(),
                        file.non_point_features
                    );
                }

                if file.points.is_empty() {
                    log::info!("No points in {}, skipping", path.display());
                    merged.files_skipped += 1;
                    continue;
                }

                log::info!("Loaded {} points from {}", file.points.len(), path.display());
                merged.files_read += 1;
                merged.points.extend(file.points);
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                merged.files_skipped += 1;
            }
        }
    }

    if merged.is_empty() {
        return Err(HexspotError::NoPoints {
            checked: paths.iter().map(|p| p.as_ref().to_path_buf()).collect::<Vec<PathBuf>>(),
        });
    }

    Ok(merged)
}
