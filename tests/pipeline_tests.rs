use geojson::{Feature, GeoJson};
use hexspot::{Config, HexspotError, Pipeline, ProjectionKind};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const INCIDENTS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [103.76, 1.46]}, "properties": {"type": "Accident", "casualties": 3}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [103.77, 1.47]}, "properties": {"type": "Vehicle breakdown"}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [103.90, 1.55]}, "properties": {"type": "Roadwork", "casualties": 0}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [103.60, 1.40]}, "properties": {"type": "Accident", "casualties": "2"}},
    {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[103.7, 1.4], [103.8, 1.5]]}, "properties": {}}
  ]
}"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

fn read_features(path: &Path) -> Vec<Feature> {
    let text = fs::read_to_string(path).expect("Output not written");
    match text.parse::<GeoJson>().expect("Output is not GeoJSON") {
        GeoJson::FeatureCollection(fc) => fc.features,
        other => panic!("expected a FeatureCollection, got {:?}", other),
    }
}

fn number(feature: &Feature, key: &str) -> f64 {
    feature
        .properties
        .as_ref()
        .and_then(|p| p.get(key))
        .and_then(|v| v.as_f64())
        .unwrap_or_else(|| panic!("missing numeric property {}", key))
}

#[test]
fn test_end_to_end_count() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "traffic_incidents.geojson", INCIDENTS);
    let output = dir.path().join("out/hotspots_hex.geojson");

    let stats = Pipeline::builder()
        .input(&input)
        .output_path(&output)
        .hex_radius_meters(2000.0)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(stats.points_loaded, 4);
    assert_eq!(stats.non_point_features, 1);
    assert_eq!(stats.points_aggregated, 4);
    assert_eq!(stats.points_dropped, 0);
    assert_eq!(stats.total_value, 4.0);
    assert_eq!(stats.output_path.as_deref(), Some(output.as_path()));

    let features = read_features(&output);
    assert_eq!(features.len(), stats.hex_count);
    assert_eq!(features.len(), stats.rows * stats.cols);

    let mut total = 0.0;
    for (i, feature) in features.iter().enumerate() {
        assert_eq!(number(feature, "hex_id"), i as f64);
        let value = number(feature, "value");
        let area = number(feature, "area_km2");
        let density = number(feature, "density_per_km2");

        assert!(area > 0.0);
        assert!(density >= 0.0);
        assert!((density - value / area).abs() < 1e-12);
        total += value;
    }
    assert_eq!(total, 4.0);
}

#[test]
fn test_end_to_end_weighted() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "incidents.geojson", INCIDENTS);
    let output = dir.path().join("weighted.geojson");

    let stats = Pipeline::builder()
        .input(&input)
        .output_path(&output)
        .weight_field("casualties")
        .build()
        .unwrap()
        .run()
        .unwrap();

    // 3 + (missing -> 1) + 0 + "2"
    assert_eq!(stats.total_value, 6.0);
    let total: f64 = read_features(&output)
        .iter()
        .map(|f| number(f, "value"))
        .sum();
    assert_eq!(total, 6.0);
}

#[test]
fn test_no_points_writes_nothing() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let lines = write_input(
        &dir,
        "lines.geojson",
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]},"properties":{}}
        ]}"#,
    );
    let output = dir.path().join("hotspots.geojson");

    let result = Pipeline::builder()
        .input(&lines)
        .input(dir.path().join("missing.geojson"))
        .output_path(&output)
        .build()
        .unwrap()
        .run();

    assert!(matches!(result, Err(HexspotError::NoPoints { .. })));
    assert!(!output.exists());
}

#[test]
fn test_partial_inputs_still_succeed() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let good = write_input(&dir, "good.geojson", INCIDENTS);
    let broken = write_input(&dir, "broken.geojson", "{ not json");
    let output = dir.path().join("hotspots.geojson");

    let stats = Pipeline::builder()
        .input(dir.path().join("missing.geojson"))
        .input(&broken)
        .input(&good)
        .output_path(&output)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(stats.files_read, 1);
    assert_eq!(stats.files_skipped, 2);
    assert_eq!(stats.total_value, 4.0);
}

#[test]
fn test_runs_are_deterministic() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "incidents.geojson", INCIDENTS);
    let first = dir.path().join("first.geojson");
    let second = dir.path().join("second.geojson");

    for output in [&first, &second] {
        Pipeline::builder()
            .input(&input)
            .output_path(output)
            .build()
            .unwrap()
            .run()
            .unwrap();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_output_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "incidents.geojson", INCIDENTS);
    let output = dir.path().join("hotspots.geojson");
    fs::write(&output, "stale contents that are not geojson").unwrap();

    let stats = Pipeline::builder()
        .input(&input)
        .output_path(&output)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(read_features(&output).len(), stats.hex_count);
}

#[test]
fn test_radius_monotonicity() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "incidents.geojson", INCIDENTS);

    let run = |radius: f64| {
        Pipeline::builder()
            .input(&input)
            .hex_radius_meters(radius)
            .build()
            .unwrap()
            .compute()
            .unwrap()
    };

    let small = run(1000.0);
    let large = run(2000.0);

    assert!(large.grid.len() < small.grid.len());
    let ratio = large.grid.cells()[0].area_km2 / small.grid.cells()[0].area_km2;
    assert!((ratio - 4.0).abs() < 0.01);
    assert_eq!(small.stats.total_value, large.stats.total_value);
}

#[test]
fn test_config_file_drives_run() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "incidents.geojson", INCIDENTS);
    let output = dir.path().join("from_config.geojson");

    let json = serde_json::json!({
        "hex_radius_meters": 1500.0,
        "inputs": [input],
        "output_path": output,
        "projection": "equirectangular",
        "pretty": true
    })
    .to_string();
    let config = Config::from_json(&json).unwrap();
    assert_eq!(config.projection, ProjectionKind::Equirectangular);

    let stats = Pipeline::new(config).unwrap().run().unwrap();
    assert_eq!(stats.total_value, 4.0);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains('\n'));
}
