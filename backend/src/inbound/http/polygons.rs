//! Drawing-set endpoints.
//!
//! ```text
//! POST   /polygons                                   save-replace one set
//! GET    /polygons?agent_id=..&user_id=..            list as FeatureCollection
//! GET    /polygons/{id}                              one Feature
//! DELETE /polygons/{id}                              remove by id
//! DELETE /polygons/agent/{agent_id}/user/{user_id}   remove an owner's sets
//! GET    /stats                                      per-owner aggregates
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    DeletedPolygon, Error, PolygonDraft, PolygonFilter, PolygonOwner, PolygonStats,
    PolygonSummary, PolygonValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::features::{collection, polygon_feature};
use crate::inbound::http::schemas::{
    ErrorSchema, FeatureCollectionSchema, FeatureSchema, GeometrySchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, non_blank, parse_geometry, parse_identifier, parse_optional_object,
};

const GEOMETRY: FieldName = FieldName::new("geometry");
const AGENT_ID: FieldName = FieldName::new("agent_id");
const USER_ID: FieldName = FieldName::new("user_id");
const PROPERTIES: FieldName = FieldName::new("properties");

/// Body for `POST /polygons`.
///
/// Fields are loosely typed so that shape errors surface as precise 400
/// messages rather than a generic deserialisation failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SavePolygonRequest {
    /// Display name; defaults to `Drawing Set for Agent {agent_id}`.
    #[serde(default)]
    pub name: Option<String>,
    /// GeoJSON geometry, usually a `GeometryCollection`.
    #[serde(default)]
    #[schema(value_type = GeometrySchema)]
    pub geometry: Option<Value>,
    /// Agent identifier (string or number).
    #[serde(default)]
    #[schema(value_type = String, example = "agent-7")]
    pub agent_id: Option<Value>,
    /// User identifier (string or number).
    #[serde(default)]
    #[schema(value_type = String, example = "42")]
    pub user_id: Option<Value>,
    /// Free-form properties; `featureCount` is reported back.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub properties: Option<Value>,
}

/// Response for a successful save.
#[derive(Debug, Serialize, ToSchema)]
pub struct SavePolygonResponse {
    #[schema(value_type = String, example = "saved")]
    pub status: &'static str,
    pub id: i32,
    /// US states the geometry intersects; omitted when not computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    #[schema(example = "Saved 3 drawings in one record")]
    pub message: String,
}

/// Optional list filters. Blank values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PolygonListQuery {
    pub agent_id: Option<String>,
    pub user_id: Option<String>,
}

impl From<PolygonListQuery> for PolygonFilter {
    fn from(query: PolygonListQuery) -> Self {
        Self {
            agent_id: non_blank(query.agent_id),
            user_id: non_blank(query.user_id),
        }
    }
}

/// A record removed by id.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedPolygonBody {
    pub id: i32,
    pub name: String,
    pub agent_id: String,
    pub user_id: String,
}

impl From<DeletedPolygon> for DeletedPolygonBody {
    fn from(value: DeletedPolygon) -> Self {
        Self {
            id: value.id,
            name: value.name,
            agent_id: value.agent_id,
            user_id: value.user_id,
        }
    }
}

/// Response for `DELETE /polygons/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletePolygonResponse {
    #[schema(value_type = String, example = "deleted")]
    pub status: &'static str,
    pub record: DeletedPolygonBody,
}

/// Identifier and name of a removed record.
#[derive(Debug, Serialize, ToSchema)]
pub struct PolygonSummaryBody {
    pub id: i32,
    pub name: String,
}

impl From<PolygonSummary> for PolygonSummaryBody {
    fn from(value: PolygonSummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Response for `DELETE /polygons/agent/{agent_id}/user/{user_id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOwnerPolygonsResponse {
    #[schema(value_type = String, example = "deleted")]
    pub status: &'static str,
    pub deleted_records: usize,
    pub records: Vec<PolygonSummaryBody>,
}

/// Aggregates for one agent/user pair.
#[derive(Debug, Serialize, ToSchema)]
pub struct PolygonStatsBody {
    pub agent_id: String,
    pub user_id: String,
    pub total_records: i64,
    pub last_updated: DateTime<Utc>,
    /// `null` when no record in the group carries a `featureCount`.
    pub total_features: Option<i64>,
}

impl From<PolygonStats> for PolygonStatsBody {
    fn from(value: PolygonStats) -> Self {
        Self {
            agent_id: value.agent_id,
            user_id: value.user_id,
            total_records: value.total_records,
            last_updated: value.last_updated,
            total_features: value.total_features,
        }
    }
}

/// Response for `GET /stats`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PolygonStatsResponse {
    pub stats: Vec<PolygonStatsBody>,
}

fn map_owner_error(err: PolygonValidationError) -> Error {
    match err {
        PolygonValidationError::EmptyAgentId => Error::invalid_request("Missing agent_id"),
        PolygonValidationError::EmptyUserId => Error::invalid_request("Missing user_id"),
    }
}

impl TryFrom<SavePolygonRequest> for PolygonDraft {
    type Error = Error;

    /// Geometry is checked first so a body without one reports
    /// `Missing geometry` regardless of the other fields.
    fn try_from(body: SavePolygonRequest) -> Result<Self, Self::Error> {
        let geometry = parse_geometry(body.geometry, GEOMETRY)?;
        let agent_id = parse_identifier(body.agent_id, AGENT_ID)?;
        let user_id = parse_identifier(body.user_id, USER_ID)?;
        let properties = parse_optional_object(body.properties, PROPERTIES)?;
        let owner = PolygonOwner::new(agent_id, user_id).map_err(map_owner_error)?;
        Ok(Self::new(owner, body.name, geometry, properties))
    }
}

/// Save a drawing set, replacing any existing set for the same owner.
#[utoipa::path(
    post,
    path = "/polygons",
    request_body = SavePolygonRequest,
    responses(
        (status = 200, description = "Saved", body = SavePolygonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Save failed", body = ErrorSchema)
    ),
    tags = ["polygons"],
    operation_id = "savePolygon"
)]
#[post("/polygons")]
pub async fn save_polygon(
    state: web::Data<HttpState>,
    payload: web::Json<SavePolygonRequest>,
) -> ApiResult<web::Json<SavePolygonResponse>> {
    let draft = PolygonDraft::try_from(payload.into_inner())?;
    let saved = state.polygons.save(draft).await?;
    Ok(web::Json(SavePolygonResponse {
        status: "saved",
        id: saved.id,
        message: saved.message(),
        states: saved.intersecting_states,
    }))
}

/// List drawing sets, newest first.
#[utoipa::path(
    get,
    path = "/polygons",
    params(PolygonListQuery),
    responses(
        (status = 200, description = "Drawing sets", body = FeatureCollectionSchema),
        (status = 500, description = "Fetch failed", body = ErrorSchema)
    ),
    tags = ["polygons"],
    operation_id = "listPolygons"
)]
#[get("/polygons")]
pub async fn list_polygons(
    state: web::Data<HttpState>,
    query: web::Query<PolygonListQuery>,
) -> ApiResult<web::Json<FeatureCollection>> {
    let records = state.polygons_query.list(query.into_inner().into()).await?;
    Ok(web::Json(collection(
        records.into_iter().map(polygon_feature).collect(),
    )))
}

/// Fetch one drawing set.
#[utoipa::path(
    get,
    path = "/polygons/{id}",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "Drawing set", body = FeatureSchema),
        (status = 400, description = "Non-numeric id", body = ErrorSchema),
        (status = 404, description = "Polygon collection not found", body = ErrorSchema),
        (status = 500, description = "Fetch failed", body = ErrorSchema)
    ),
    tags = ["polygons"],
    operation_id = "getPolygon"
)]
#[get("/polygons/{id}")]
pub async fn get_polygon(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Feature>> {
    let record = state.polygons_query.get(path.into_inner()).await?;
    Ok(web::Json(polygon_feature(record)))
}

/// Delete one drawing set by id.
#[utoipa::path(
    delete,
    path = "/polygons/{id}",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "Deleted", body = DeletePolygonResponse),
        (status = 400, description = "Non-numeric id", body = ErrorSchema),
        (status = 404, description = "Polygon collection not found", body = ErrorSchema),
        (status = 500, description = "Delete failed", body = ErrorSchema)
    ),
    tags = ["polygons"],
    operation_id = "deletePolygon"
)]
#[delete("/polygons/{id}")]
pub async fn delete_polygon(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeletePolygonResponse>> {
    let deleted = state.polygons.delete(path.into_inner()).await?;
    Ok(web::Json(DeletePolygonResponse {
        status: "deleted",
        record: deleted.into(),
    }))
}

/// Delete every drawing set for an agent/user pair. Succeeds with zero
/// records when the owner has none.
#[utoipa::path(
    delete,
    path = "/polygons/agent/{agent_id}/user/{user_id}",
    params(
        ("agent_id" = String, Path, description = "Agent identifier"),
        ("user_id" = String, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "Deleted", body = DeleteOwnerPolygonsResponse),
        (status = 500, description = "Delete failed", body = ErrorSchema)
    ),
    tags = ["polygons"],
    operation_id = "deleteOwnerPolygons"
)]
#[delete("/polygons/agent/{agent_id}/user/{user_id}")]
pub async fn delete_owner_polygons(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (agent_id, user_id) = path.into_inner();
    let owner = PolygonOwner::new(agent_id, user_id).map_err(map_owner_error)?;
    let removed = state.polygons.delete_for_owner(&owner).await?;
    Ok(HttpResponse::Ok().json(DeleteOwnerPolygonsResponse {
        status: "deleted",
        deleted_records: removed.len(),
        records: removed.into_iter().map(PolygonSummaryBody::from).collect(),
    }))
}

/// Per-owner record counts, latest update and feature totals.
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Statistics", body = PolygonStatsResponse),
        (status = 500, description = "Stats fetch failed", body = ErrorSchema)
    ),
    tags = ["polygons"],
    operation_id = "polygonStats"
)]
#[get("/stats")]
pub async fn polygon_stats(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PolygonStatsResponse>> {
    let stats = state.polygons_query.stats().await?;
    Ok(web::Json(PolygonStatsResponse {
        stats: stats.into_iter().map(PolygonStatsBody::from).collect(),
    }))
}

#[cfg(test)]
#[path = "polygons_tests.rs"]
mod tests;
