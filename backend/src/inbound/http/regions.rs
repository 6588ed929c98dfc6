//! Region lookup endpoints.
//!
//! ```text
//! POST /states             {"states": ["Texas", "Ohio"]}
//! POST /locations-geojson  {"locations": ["France", "Austin"]}
//! ```

use actix_web::{post, web};
use geojson::FeatureCollection;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::features::{collection, location_feature, state_feature};
use crate::inbound::http::schemas::{ErrorSchema, FeatureCollectionSchema};
use crate::inbound::http::state::HttpState;

const STATES_SHAPE: &str = "Need an array of state names";
const LOCATIONS_SHAPE: &str = "Need an array of location names";

/// Body for `POST /states`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StatesRequest {
    /// Exact state names.
    #[serde(default)]
    #[schema(value_type = Vec<String>, example = json!(["Texas", "Ohio"]))]
    pub states: Option<Value>,
}

/// Body for `POST /locations-geojson`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LocationsRequest {
    /// Country, state, city or urban-area names.
    #[serde(default)]
    #[schema(value_type = Vec<String>, example = json!(["France", "Austin"]))]
    pub locations: Option<Value>,
}

/// Take the string entries of a JSON array; anything else is a 400.
fn parse_names(value: Option<Value>, message: &'static str) -> Result<Vec<String>, Error> {
    match value {
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                _ => None,
            })
            .collect()),
        _ => Err(Error::invalid_request(message)),
    }
}

/// Boundaries for US states matched by exact name.
#[utoipa::path(
    post,
    path = "/states",
    request_body = StatesRequest,
    responses(
        (status = 200, description = "State boundaries", body = FeatureCollectionSchema),
        (status = 400, description = "Need an array of state names", body = ErrorSchema),
        (status = 404, description = "No states found", body = ErrorSchema),
        (status = 500, description = "State fetch failed", body = ErrorSchema)
    ),
    tags = ["regions"],
    operation_id = "states"
)]
#[post("/states")]
pub async fn states(
    state: web::Data<HttpState>,
    payload: web::Json<StatesRequest>,
) -> ApiResult<web::Json<FeatureCollection>> {
    let names = parse_names(payload.into_inner().states, STATES_SHAPE)?;
    let regions = state.regions.states(names).await?;
    Ok(web::Json(collection(
        regions.into_iter().map(state_feature).collect(),
    )))
}

/// Resolve free-form place names to boundaries, tagging each with the tier
/// that matched. Unresolved names are skipped.
#[utoipa::path(
    post,
    path = "/locations-geojson",
    request_body = LocationsRequest,
    responses(
        (status = 200, description = "Resolved boundaries", body = FeatureCollectionSchema),
        (status = 400, description = "Need an array of location names", body = ErrorSchema),
        (status = 404, description = "No locations found", body = ErrorSchema)
    ),
    tags = ["regions"],
    operation_id = "locationsGeojson"
)]
#[post("/locations-geojson")]
pub async fn locations_geojson(
    state: web::Data<HttpState>,
    payload: web::Json<LocationsRequest>,
) -> ApiResult<web::Json<FeatureCollection>> {
    let names = parse_names(payload.into_inner().locations, LOCATIONS_SHAPE)?;
    let regions = state.regions.resolve_locations(names).await?;
    Ok(web::Json(collection(
        regions.into_iter().map(location_feature).collect(),
    )))
}

#[cfg(test)]
#[path = "regions_tests.rs"]
mod tests;
