//! Writes annotated hexagons as a GeoJSON FeatureCollection.

use crate::compute::geojson::cells_to_feature_collection;
use crate::error::{HexspotError, Result};
use hexspot_types::hex::HexCell;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write every cell to `path`, replacing any existing file.
///
/// Missing parent directories are created. The whole document is written on
/// every call; there is no append mode.
pub fn write_geojson(cells: &[HexCell], path: &Path, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| HexspotError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| HexspotError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let collection = cells_to_feature_collection(cells);

    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, &collection)
    } else {
        serde_json::to_writer(&mut writer, &collection)
    };
    written.map_err(|e| {
        HexspotError::SerializationErrorWithContext(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        ))
    })?;

    writer.flush().map_err(|e| HexspotError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;
    use geojson::GeoJson;
    use tempfile::TempDir;

    fn cells(n: usize) -> Vec<HexCell> {
        (0..n)
            .map(|i| {
                let x = i as f64;
                HexCell::new(
                    i,
                    0,
                    i,
                    polygon![(x: x, y: 0.0), (x: x + 1.0, y: 0.0), (x: x + 1.0, y: 1.0)],
                )
            })
            .collect()
    }

    fn feature_count(path: &Path) -> usize {
        let text = fs::read_to_string(path).unwrap();
        match text.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => fc.features.len(),
            _ => panic!("expected a feature collection"),
        }
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/hotspots.geojson");

        write_geojson(&cells(3), &path, false).unwrap();
        assert_eq!(feature_count(&path), 3);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hotspots.geojson");

        write_geojson(&cells(5), &path, true).unwrap();
        write_geojson(&cells(2), &path, false).unwrap();
        assert_eq!(feature_count(&path), 2);
    }

    #[test]
    fn test_unwritable_path_reports_file() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as a file
        let err = write_geojson(&cells(1), dir.path(), false).unwrap_err();
        assert!(matches!(err, HexspotError::Io { .. }));
    }
}
