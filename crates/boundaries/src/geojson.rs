//! Minimal GeoJSON reader for country boundary collections.
//!
//! Only `Polygon` and `MultiPolygon` geometries are understood; positions
//! may carry extra ordinates, which are ignored.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{BoundaryError, Result};

/// Fallback when a feature carries no usable name.
pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

type Position = Vec<f64>;
type Ring = Vec<Position>;

/// A named boundary as read from the file.
#[derive(Debug, Clone)]
pub struct NamedGeometry {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

/// Parse a FeatureCollection into named multipolygons.
///
/// Features without a supported geometry are skipped with a warning; a
/// document that is not a FeatureCollection is an error.
pub fn parse_feature_collection(bytes: &[u8]) -> Result<Vec<NamedGeometry>> {
    let collection: RawCollection = serde_json::from_slice(bytes)?;
    let total = collection.features.len();

    let mut parsed = Vec::with_capacity(total);
    for (index, feature) in collection.features.into_iter().enumerate() {
        let name = feature_name(feature.properties.as_ref());

        let Some(geometry) = feature.geometry else {
            warn!(feature = index, name = %name, "Skipping feature without geometry");
            continue;
        };

        match to_multipolygon(&geometry) {
            Ok(geometry) => parsed.push(NamedGeometry { name, geometry }),
            Err(e) => {
                warn!(
                    feature = index,
                    name = %name,
                    geometry_type = %geometry.kind,
                    error = %e,
                    "Skipping feature with unsupported geometry"
                );
            }
        }
    }

    if parsed.len() < total {
        warn!(
            parsed = parsed.len(),
            skipped = total - parsed.len(),
            "Some boundary features were skipped"
        );
    }

    Ok(parsed)
}

/// `ADMIN`, then `name`, then [`UNKNOWN_NAME`]. Empty strings are skipped.
fn feature_name(properties: Option<&Map<String, Value>>) -> String {
    let non_empty = |p: &Map<String, Value>, key: &str| {
        p.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    properties
        .and_then(|p| non_empty(p, "ADMIN").or_else(|| non_empty(p, "name")))
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

fn to_multipolygon(geometry: &RawGeometry) -> Result<MultiPolygon<f64>> {
    match geometry.kind.as_str() {
        "Polygon" => {
            let rings: Vec<Ring> = serde_json::from_value(geometry.coordinates.clone())?;
            Ok(MultiPolygon::new(vec![to_polygon(rings)?]))
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<Ring>> = serde_json::from_value(geometry.coordinates.clone())?;
            let polygons = polygons
                .into_iter()
                .map(to_polygon)
                .collect::<Result<Vec<_>>>()?;
            Ok(MultiPolygon::new(polygons))
        }
        other => Err(BoundaryError::Parse(format!(
            "unsupported geometry type {}",
            other
        ))),
    }
}

/// First ring is the exterior, the rest are holes.
fn to_polygon(rings: Vec<Ring>) -> Result<Polygon<f64>> {
    let mut rings = rings.into_iter().map(to_line_string);
    let exterior = rings
        .next()
        .ok_or_else(|| BoundaryError::Parse("polygon without rings".to_string()))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn to_line_string(ring: Ring) -> Result<LineString<f64>> {
    ring.into_iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(BoundaryError::Parse(format!(
                "position needs at least 2 ordinates, got {}",
                position.len()
            ))),
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;
    use serde_json::json;

    fn parse(value: Value) -> Vec<NamedGeometry> {
        parse_feature_collection(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_polygon_and_multipolygon() {
        let parsed = parse(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "ADMIN": "Squareland" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": { "ADMIN": "Islands" },
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[10, 10], [11, 10], [11, 11], [10, 11], [10, 10]]],
                            [[[20, 20], [21, 20], [21, 21], [20, 21], [20, 20]]]
                        ]
                    }
                }
            ]
        }));

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "Squareland");
        assert!((parsed[0].geometry.unsigned_area() - 4.0).abs() < 1e-12);
        assert_eq!(parsed[1].geometry.0.len(), 2);
    }

    #[test]
    fn test_name_fallbacks() {
        let parsed = parse(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "name": "ByName" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
                },
                {
                    "type": "Feature",
                    "properties": null,
                    "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
                }
            ]
        }));

        assert_eq!(parsed[0].name, "ByName");
        assert_eq!(parsed[1].name, UNKNOWN_NAME);
    }

    #[test]
    fn test_empty_admin_falls_back_to_name() {
        let parsed = parse(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "ADMIN": "", "name": "ByName" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
                },
                {
                    "type": "Feature",
                    "properties": { "ADMIN": "", "name": "" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
                }
            ]
        }));

        assert_eq!(parsed[0].name, "ByName");
        assert_eq!(parsed[1].name, UNKNOWN_NAME);
    }

    #[test]
    fn test_holes_and_z_ordinates() {
        let parsed = parse(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "ADMIN": "Donut" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[0, 0, 5], [4, 0, 5], [4, 4, 5], [0, 4, 5], [0, 0, 5]],
                        [[1, 1], [3, 1], [3, 3], [1, 3], [1, 1]]
                    ]
                }
            }]
        }));

        let polygon = &parsed[0].geometry.0[0];
        assert_eq!(polygon.interiors().len(), 1);
        assert!((parsed[0].geometry.unsigned_area() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_unsupported_geometry_skipped() {
        let parsed = parse(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "ADMIN": "Dot" },
                    "geometry": { "type": "Point", "coordinates": [0, 0] }
                },
                {
                    "type": "Feature",
                    "properties": { "ADMIN": "Nothing" },
                    "geometry": null
                },
                {
                    "type": "Feature",
                    "properties": { "ADMIN": "Broken" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0]]] }
                }
            ]
        }));

        assert!(parsed.is_empty());
    }

    #[test]
    fn test_not_a_collection() {
        assert!(matches!(
            parse_feature_collection(b"{\"type\": \"Feature\"}"),
            Err(BoundaryError::Parse(_))
        ));
        assert!(parse_feature_collection(b"not json").is_err());
    }
}
