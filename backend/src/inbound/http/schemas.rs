//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! GeoJSON values come from the `geojson` crate, so their schemas are
//! described here as loose objects.

use utoipa::ToSchema;

/// Error response body.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Client-facing message.
    #[schema(example = "Polygon collection not found")]
    error: String,
}

/// GeoJSON geometry object (RFC 7946 section 3.1), stored with SRID 4326.
#[derive(ToSchema)]
#[schema(example = json!({"type": "Point", "coordinates": [-97.74, 30.27]}))]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct GeometrySchema {
    /// Geometry type such as `Polygon` or `GeometryCollection`.
    r#type: String,
    /// Coordinates for simple geometries.
    #[schema(value_type = Object)]
    coordinates: Option<serde_json::Value>,
    /// Members of a `GeometryCollection`.
    #[schema(value_type = Vec<Object>)]
    geometries: Option<Vec<serde_json::Value>>,
}

/// GeoJSON feature.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct FeatureSchema {
    /// Always `Feature`.
    #[schema(example = "Feature")]
    r#type: String,
    /// Numeric record id or ISO code.
    #[schema(value_type = Object)]
    id: Option<serde_json::Value>,
    /// Feature properties.
    #[schema(value_type = Object)]
    properties: serde_json::Value,
    geometry: GeometrySchema,
}

/// GeoJSON feature collection.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct FeatureCollectionSchema {
    /// Always `FeatureCollection`.
    #[schema(example = "FeatureCollection")]
    r#type: String,
    features: Vec<FeatureSchema>,
}
