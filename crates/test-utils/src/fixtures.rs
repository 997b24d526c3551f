//! Common test fixtures: country boundary GeoJSON.
//!
//! Coordinates are `[lon, lat]` pairs as in GeoJSON.

use serde_json::{json, Value};

/// Closed ring of an axis-aligned square.
pub fn square_ring(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Value {
    json!([
        [min_lon, min_lat],
        [max_lon, min_lat],
        [max_lon, max_lat],
        [min_lon, max_lat],
        [min_lon, min_lat]
    ])
}

/// Square of side `2 * half` centred on (lon, lat).
pub fn square_around(lon: f64, lat: f64, half: f64) -> Value {
    square_ring(lon - half, lat - half, lon + half, lat + half)
}

/// A Feature with a Polygon geometry and an `ADMIN` name.
pub fn polygon_feature(name: &str, ring: Value) -> Value {
    json!({
        "type": "Feature",
        "properties": { "ADMIN": name },
        "geometry": { "type": "Polygon", "coordinates": [ring] }
    })
}

/// A Feature with a MultiPolygon geometry and an `ADMIN` name.
pub fn multipolygon_feature(name: &str, rings: Vec<Value>) -> Value {
    let polygons: Vec<Value> = rings.into_iter().map(|ring| json!([ring])).collect();
    json!({
        "type": "Feature",
        "properties": { "ADMIN": name },
        "geometry": { "type": "MultiPolygon", "coordinates": polygons }
    })
}

pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

/// Two countries on a 4x4 global grid, each covering exactly one cell.
///
/// On a 4x4 grid the cell centres sit at longitudes -180, -60, 60, 180 and
/// latitudes 90, 30, -30, -90. "Westland" covers (lon -60, lat 30) and
/// "Eastland" covers (lon 60, lat -30).
pub fn two_country_collection() -> Value {
    feature_collection(vec![
        polygon_feature("Westland", square_around(-60.0, 30.0, 0.5)),
        polygon_feature("Eastland", square_around(60.0, -30.0, 0.5)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_ring_closed() {
        let ring = square_ring(0.0, 0.0, 1.0, 1.0);
        let points = ring.as_array().unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], points[4]);
    }

    #[test]
    fn test_two_country_collection() {
        let fc = two_country_collection();
        let features = fc["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["properties"]["ADMIN"], "Westland");
        assert_eq!(features[1]["geometry"]["type"], "Polygon");
    }
}
