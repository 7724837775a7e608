//! GeoJSON conversion for point inputs and hexagon output.

use crate::compute::projection::Projection;
use crate::compute::validation::validate_weight;
use crate::error::{HexspotError, Result};
use geo::{Coord, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use hexspot_types::hex::HexCell;
use hexspot_types::point::WeightedPoint;
use serde_json::Map;

/// Coordinate reference a point collection can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCrs {
    /// Longitude/latitude degrees (EPSG:4326, OGC CRS84)
    Geographic,
    /// Spherical Mercator meters (EPSG:3857 and its aliases)
    WebMercator,
}

impl SourceCrs {
    /// Resolve a legacy GeoJSON `crs` name such as `urn:ogc:def:crs:EPSG::3857`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexspot::compute::geojson::SourceCrs;
    ///
    /// assert_eq!(SourceCrs::from_name("EPSG:4326"), Some(SourceCrs::Geographic));
    /// assert_eq!(
    ///     SourceCrs::from_name("urn:ogc:def:crs:EPSG::3857"),
    ///     Some(SourceCrs::WebMercator)
    /// );
    /// assert_eq!(SourceCrs::from_name("EPSG:27700"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        if upper.ends_with("CRS84") {
            return Some(Self::Geographic);
        }

        let code = upper
            .rsplit(':')
            .next()
            .filter(|code| !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()))?;
        match code {
            "4326" => Some(Self::Geographic),
            "3857" | "900913" | "3785" | "102100" | "102113" => Some(Self::WebMercator),
            _ => None,
        }
    }

    /// Convert a coordinate in this reference to geographic degrees.
    pub fn to_geographic(self, coord: Coord<f64>) -> Coord<f64> {
        match self {
            Self::Geographic => coord,
            Self::WebMercator => Projection::web_mercator().inverse(coord),
        }
    }
}

/// Points read from one GeoJSON document, still in the declared reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointDocument {
    /// Name from the legacy `crs` member, if declared
    pub crs: Option<String>,
    pub points: Vec<WeightedPoint>,
    /// Features without a single point geometry
    pub non_point_features: usize,
    /// Points whose position had fewer than two coordinates
    pub malformed_points: usize,
    /// Weight values that were present but unusable
    pub invalid_weights: usize,
}

impl PointDocument {
    fn push_feature(&mut self, feature: &Feature, weight_field: Option<&str>) {
        match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::Point(position)) => {
                let Some(mut point) = point_from_position(position) else {
                    self.malformed_points += 1;
                    return;
                };
                if let Some(field) = weight_field
                    && let Some(raw) = feature.properties.as_ref().and_then(|p| p.get(field))
                {
                    match weight_from_json(raw) {
                        Some(weight) => {
                            point.attributes.insert(field.to_string(), weight);
                        }
                        None => self.invalid_weights += 1,
                    }
                }
                self.points.push(point);
            }
            _ => self.non_point_features += 1,
        }
    }
}

fn point_from_position(position: &[f64]) -> Option<WeightedPoint> {
    match position {
        [x, y, ..] => Some(WeightedPoint::new(*x, *y)),
        _ => None,
    }
}

/// Numeric weight from a property value; numeric strings are accepted.
///
/// `null` and unparseable or negative values yield `None`.
fn weight_from_json(value: &serde_json::Value) -> Option<f64> {
    let weight = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    validate_weight(weight).ok().map(|_| weight)
}

/// Name of the legacy `crs` member, e.g. `{"type":"name","properties":{"name":"EPSG:3857"}}`.
pub fn declared_crs(foreign_members: Option<&JsonObject>) -> Option<String> {
    foreign_members?
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

/// Parses a GeoJSON document into its point features.
///
/// Accepts a `FeatureCollection`, a single `Feature`, or a bare geometry.
/// Non-point features are counted and discarded. When `weight_field` is
/// given, its numeric value is kept as an attribute of each point.
pub fn parse_point_document(geojson: &str, weight_field: Option<&str>) -> Result<PointDocument> {
    let parsed: GeoJson = geojson
        .parse()
        .map_err(|e| HexspotError::InvalidInput(format!("Failed to parse GeoJSON: {}", e)))?;

    let mut doc = PointDocument::default();
    match parsed {
        GeoJson::FeatureCollection(collection) => {
            doc.crs = declared_crs(collection.foreign_members.as_ref());
            for feature in &collection.features {
                doc.push_feature(feature, weight_field);
            }
        }
        GeoJson::Feature(feature) => {
            doc.crs = declared_crs(feature.foreign_members.as_ref());
            doc.push_feature(&feature, weight_field);
        }
        GeoJson::Geometry(geometry) => {
            doc.crs = declared_crs(geometry.foreign_members.as_ref());
            let feature = Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            };
            doc.push_feature(&feature, weight_field);
        }
    }

    Ok(doc)
}

/// Converts a Polygon to a GeoJSON geometry (closed rings).
pub fn polygon_to_geometry(polygon: &Polygon<f64>) -> Geometry {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());

    let exterior: Vec<Vec<f64>> = polygon
        .exterior()
        .coords()
        .map(|coord| vec![coord.x, coord.y])
        .collect();
    rings.push(exterior);

    for interior in polygon.interiors() {
        let ring: Vec<Vec<f64>> = interior
            .coords()
            .map(|coord| vec![coord.x, coord.y])
            .collect();
        rings.push(ring);
    }

    Geometry::new(Value::Polygon(rings))
}

/// One output feature: the hexagon polygon with its id and metrics.
pub fn hex_to_feature(cell: &HexCell) -> Feature {
    let mut props = Map::new();
    props.insert("hex_id".to_string(), serde_json::json!(cell.hex_id));
    props.insert("value".to_string(), serde_json::json!(cell.value));
    props.insert("area_km2".to_string(), serde_json::json!(cell.area_km2));
    props.insert(
        "density_per_km2".to_string(),
        serde_json::json!(cell.density_per_km2),
    );

    Feature {
        bbox: None,
        geometry: Some(polygon_to_geometry(&cell.polygon)),
        id: Some(geojson::feature::Id::Number(serde_json::Number::from(
            cell.hex_id as u64,
        ))),
        properties: Some(props),
        foreign_members: None,
    }
}

/// All cells as a FeatureCollection, in `hex_id` order.
pub fn cells_to_feature_collection(cells: &[HexCell]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: cells.iter().map(hex_to_feature).collect(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    const MIXED: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [103.76, 1.46]},
             "properties": {"casualties": 2, "road": "PIE"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [103.77, 1.47, 12.0]},
             "properties": {"casualties": "3.5"}},
            {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[103.7, 1.4], [103.8, 1.5]]},
             "properties": {}},
            {"type": "Feature", "geometry": null, "properties": {"casualties": 1}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [103.9, 1.55]},
             "properties": {"casualties": "n/a"}}
        ]
    }"#;

    #[test]
    fn test_parse_filters_non_points() {
        let doc = parse_point_document(MIXED, None).unwrap();

        assert_eq!(doc.points.len(), 3);
        assert_eq!(doc.non_point_features, 2);
        assert!(doc.crs.is_none());
        assert_eq!(doc.points[1].lon(), 103.77);
        assert!(doc.points.iter().all(|p| p.attributes.is_empty()));
    }

    #[test]
    fn test_parse_keeps_weights() {
        let doc = parse_point_document(MIXED, Some("casualties")).unwrap();

        assert_eq!(doc.points[0].attribute("casualties"), Some(2.0));
        assert_eq!(doc.points[1].attribute("casualties"), Some(3.5));
        assert_eq!(doc.points[2].attribute("casualties"), None);
        assert_eq!(doc.invalid_weights, 1);
    }

    #[test]
    fn test_parse_single_feature_and_geometry() {
        let feature = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":null}"#;
        let doc = parse_point_document(feature, Some("w")).unwrap();
        assert_eq!(doc.points.len(), 1);

        let geometry = r#"{"type":"Point","coordinates":[1.0,2.0]}"#;
        let doc = parse_point_document(geometry, None).unwrap();
        assert_eq!(doc.points, vec![WeightedPoint::new(1.0, 2.0)]);

        let polygon = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#;
        let doc = parse_point_document(polygon, None).unwrap();
        assert!(doc.points.is_empty());
        assert_eq!(doc.non_point_features, 1);
    }

    #[test]
    fn test_declared_crs() {
        let json = r#"{
            "type": "FeatureCollection",
            "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::3857"}},
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [11550000.0, 162000.0]}, "properties": {}}
            ]
        }"#;
        let doc = parse_point_document(json, None).unwrap();
        assert_eq!(doc.crs.as_deref(), Some("urn:ogc:def:crs:EPSG::3857"));

        let crs = SourceCrs::from_name(doc.crs.as_deref().unwrap()).unwrap();
        let geographic = crs.to_geographic(doc.points[0].point.0);
        assert!((geographic.x - 103.755).abs() < 0.01);
        assert!((geographic.y - 1.455).abs() < 0.01);
    }

    #[test]
    fn test_crs_names() {
        assert_eq!(
            SourceCrs::from_name("urn:ogc:def:crs:OGC:1.3:CRS84"),
            Some(SourceCrs::Geographic)
        );
        assert_eq!(SourceCrs::from_name("epsg:900913"), Some(SourceCrs::WebMercator));
        assert_eq!(SourceCrs::from_name("EPSG:"), None);
        assert_eq!(SourceCrs::from_name("WGS 84"), None);
    }

    #[test]
    fn test_invalid_geojson() {
        assert!(parse_point_document("not valid json", None).is_err());
        assert!(parse_point_document(r#"{"type":"Nope"}"#, None).is_err());
    }

    #[test]
    fn test_hex_to_feature() {
        let mut cell = HexCell::new(
            7,
            0,
            7,
            polygon![
                (x: 103.80, y: 1.350),
                (x: 103.79, y: 1.355),
                (x: 103.78, y: 1.350),
                (x: 103.78, y: 1.340),
                (x: 103.79, y: 1.335),
                (x: 103.80, y: 1.340),
            ],
        );
        cell.value = 2.0;
        cell.area_km2 = 4.0;
        cell.density_per_km2 = 0.5;

        let feature = hex_to_feature(&cell);
        let props = feature.properties.as_ref().unwrap();
        assert_eq!(props["hex_id"], serde_json::json!(7));
        assert_eq!(props["value"], serde_json::json!(2.0));
        assert_eq!(props["area_km2"], serde_json::json!(4.0));
        assert_eq!(props["density_per_km2"], serde_json::json!(0.5));

        match &feature.geometry.as_ref().unwrap().value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 7);
                assert_eq!(rings[0][0], rings[0][6]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_cells_to_feature_collection_keeps_order() {
        let cells = vec![
            HexCell::new(0, 0, 0, polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]),
            HexCell::new(1, 0, 1, polygon![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 1.0)]),
        ];

        let collection = cells_to_feature_collection(&cells);
        assert_eq!(collection.features.len(), 2);
        for (i, feature) in collection.features.iter().enumerate() {
            let hex_id = feature.property("hex_id").and_then(|v| v.as_u64());
            assert_eq!(hex_id, Some(i as u64));
            assert!(feature.contains_property("density_per_km2"));
        }
    }
}
