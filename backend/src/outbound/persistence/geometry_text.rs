//! GeoJSON text exchanged with `ST_GeomFromGeoJSON` / `ST_AsGeoJSON`.

use geojson::Geometry;

pub(super) fn encode(geometry: &Geometry) -> Result<String, String> {
    serde_json::to_string(geometry).map_err(|err| format!("encode geometry: {err}"))
}

pub(super) fn decode(text: &str) -> Result<Geometry, String> {
    serde_json::from_str(text).map_err(|err| format!("decode geometry: {err}"))
}
