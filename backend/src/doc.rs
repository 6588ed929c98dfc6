//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler and the loose GeoJSON schemas from
//! [`crate::inbound::http::schemas`]. Swagger UI serves it at `/docs` in
//! debug builds.

use utoipa::OpenApi;

use crate::inbound::http::health::DatabaseHealthBody;
use crate::inbound::http::polygons::{
    DeleteOwnerPolygonsResponse, DeletePolygonResponse, DeletedPolygonBody, PolygonStatsBody,
    PolygonStatsResponse, PolygonSummaryBody, SavePolygonRequest, SavePolygonResponse,
};
use crate::inbound::http::regions::{LocationsRequest, StatesRequest};
use crate::inbound::http::schemas::{
    ErrorSchema, FeatureCollectionSchema, FeatureSchema, GeometrySchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Polygon service API",
        description = "Store user-drawn map polygons and resolve region boundaries by name."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::database_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::polygons::save_polygon,
        crate::inbound::http::polygons::list_polygons,
        crate::inbound::http::polygons::get_polygon,
        crate::inbound::http::polygons::delete_polygon,
        crate::inbound::http::polygons::delete_owner_polygons,
        crate::inbound::http::polygons::polygon_stats,
        crate::inbound::http::regions::states,
        crate::inbound::http::regions::locations_geojson,
    ),
    components(schemas(
        ErrorSchema,
        GeometrySchema,
        FeatureSchema,
        FeatureCollectionSchema,
        DatabaseHealthBody,
        SavePolygonRequest,
        SavePolygonResponse,
        DeletedPolygonBody,
        DeletePolygonResponse,
        PolygonSummaryBody,
        DeleteOwnerPolygonsResponse,
        PolygonStatsBody,
        PolygonStatsResponse,
        StatesRequest,
        LocationsRequest,
    )),
    tags(
        (name = "health", description = "Database and orchestration health checks"),
        (name = "polygons", description = "User drawing sets"),
        (name = "regions", description = "Country, state, city and urban-area boundaries")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/")]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[case("/polygons")]
    #[case("/polygons/{id}")]
    #[case("/polygons/agent/{agent_id}/user/{user_id}")]
    #[case("/stats")]
    #[case("/states")]
    #[case("/locations-geojson")]
    fn openapi_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn openapi_error_schema_has_message_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("ErrorSchema").expect("ErrorSchema");
        assert_object_schema_has_field(error_schema, "error");
    }

    #[rstest]
    fn openapi_delete_owner_response_is_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get("DeleteOwnerPolygonsResponse")
            .expect("delete owner schema");
        assert_object_schema_has_field(schema, "deletedRecords");
    }
}
