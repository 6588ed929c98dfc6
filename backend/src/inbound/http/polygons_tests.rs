//! Tests for drawing-set HTTP handlers.

use super::*;
use crate::domain::ports::{MockPolygonCommand, MockPolygonQuery};
use crate::domain::{PolygonRecord, SavedPolygon};
use crate::inbound::http::routes::configure;
use crate::inbound::http::test_utils::InMemoryPolygons;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::TimeZone;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

fn square(agent_id: &str, user_id: &str, feature_count: u64) -> Value {
    json!({
        "name": "Survey",
        "agent_id": agent_id,
        "user_id": user_id,
        "geometry": {
            "type": "GeometryCollection",
            "geometries": [{
                "type": "Polygon",
                "coordinates": [[[-97.0, 30.0], [-96.0, 30.0], [-96.0, 31.0], [-97.0, 30.0]]]
            }]
        },
        "properties": {"featureCount": feature_count}
    })
}

async fn call(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    req: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body: Value = actix_test::read_body_json(res).await;
    (status, body)
}

#[actix_web::test]
async fn save_replaces_previous_set_for_owner() {
    let store = InMemoryPolygons::default();
    let app = actix_test::init_service(test_app(store.http_state())).await;

    let (status, first) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/polygons")
            .set_json(square("agent-7", "42", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "saved");
    assert_eq!(first["message"], "Saved 2 drawings in one record");
    assert!(first.get("states").is_none());

    let (_, second) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/polygons")
            .set_json(square("agent-7", "42", 5)),
    )
    .await;
    assert_ne!(first["id"], second["id"]);

    let (status, listing) = call(
        &app,
        actix_test::TestRequest::get().uri("/polygons?agent_id=agent-7&user_id=42"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["type"], "FeatureCollection");
    let features = listing["features"].as_array().expect("features array");
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["id"], second["id"]);
    assert_eq!(features[0]["properties"]["featureCount"], 5);
}

#[actix_web::test]
async fn numeric_identifiers_are_stored_as_text() {
    let store = InMemoryPolygons::default();
    let app = actix_test::init_service(test_app(store.http_state())).await;
    let mut body = square("ignored", "ignored", 1);
    body["agent_id"] = json!(7);
    body["user_id"] = json!(42);

    let (status, saved) = call(
        &app,
        actix_test::TestRequest::post().uri("/polygons").set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/polygons/{}", saved["id"]);
    let (status, feature) = call(&app, actix_test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feature["type"], "Feature");
    assert_eq!(feature["properties"]["agent_id"], "7");
    assert_eq!(feature["properties"]["user_id"], "42");
    assert_eq!(feature["properties"]["name"], "Survey");
}

#[rstest]
#[case(json!({"agent_id": "a", "user_id": "u"}), "Missing geometry")]
#[case(json!({"geometry": null, "agent_id": "a"}), "Missing geometry")]
#[case(json!({"geometry": {"type": "Point", "coordinates": [0, 0]}, "user_id": "u"}), "Missing agent_id")]
#[case(json!({"geometry": {"type": "Point", "coordinates": [0, 0]}, "agent_id": "a", "user_id": " "}), "Missing user_id")]
#[case(json!({"geometry": {"type": "Point", "coordinates": [0, 0]}, "agent_id": "a", "user_id": "u", "properties": [1]}), "properties must be an object")]
#[actix_web::test]
async fn save_rejects_invalid_bodies(#[case] body: Value, #[case] message: &str) {
    let mut command = MockPolygonCommand::new();
    command.expect_save().never();
    let state = HttpState::default()
        .with_polygons(Arc::new(command), Arc::new(MockPolygonQuery::new()));
    let app = actix_test::init_service(test_app(state)).await;

    let (status, error) = call(
        &app,
        actix_test::TestRequest::post().uri("/polygons").set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({"error": message}));
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/polygons")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn save_reports_intersecting_states() {
    let mut command = MockPolygonCommand::new();
    command.expect_save().times(1).return_once(|draft| {
        assert_eq!(draft.name(), "Drawing Set for Agent agent-7");
        Ok(SavedPolygon {
            id: 31,
            feature_count: draft.feature_count(),
            intersecting_states: Some(vec!["Texas".to_owned()]),
        })
    });
    let state = HttpState::default()
        .with_polygons(Arc::new(command), Arc::new(MockPolygonQuery::new()));
    let app = actix_test::init_service(test_app(state)).await;
    let mut body = square("agent-7", "42", 1);
    body["name"] = Value::Null;

    let (status, saved) = call(
        &app,
        actix_test::TestRequest::post().uri("/polygons").set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        saved,
        json!({
            "status": "saved",
            "id": 31,
            "states": ["Texas"],
            "message": "Saved 1 drawings in one record"
        })
    );
}

#[actix_web::test]
async fn save_failure_hides_detail() {
    let mut command = MockPolygonCommand::new();
    command.expect_save().return_once(|_| {
        Err(crate::domain::Error::internal("Save failed").with_detail("deadlock detected"))
    });
    let state = HttpState::default()
        .with_polygons(Arc::new(command), Arc::new(MockPolygonQuery::new()));
    let app = actix_test::init_service(test_app(state)).await;

    let (status, error) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/polygons")
            .set_json(square("a", "u", 0)),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error, json!({"error": "Save failed"}));
}

#[actix_web::test]
async fn list_ignores_blank_filters() {
    let mut query = MockPolygonQuery::new();
    query
        .expect_list()
        .withf(|filter| *filter == PolygonFilter {
            agent_id: None,
            user_id: Some("42".to_owned()),
        })
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let state = HttpState::default()
        .with_polygons(Arc::new(MockPolygonCommand::new()), Arc::new(query));
    let app = actix_test::init_service(test_app(state)).await;

    let (status, listing) = call(
        &app,
        actix_test::TestRequest::get().uri("/polygons?agent_id=&user_id=42"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing, json!({"type": "FeatureCollection", "features": []}));
}

#[rstest]
#[case(actix_test::TestRequest::get())]
#[case(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn non_numeric_id_is_bad_request(#[case] req: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(HttpState::default())).await;
    let (status, error) = call(&app, req.uri("/polygons/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());
}

#[rstest]
#[case(actix_test::TestRequest::get())]
#[case(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn unknown_id_is_not_found(#[case] req: actix_test::TestRequest) {
    let store = InMemoryPolygons::default();
    let app = actix_test::init_service(test_app(store.http_state())).await;
    let (status, error) = call(&app, req.uri("/polygons/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error, json!({"error": "Polygon collection not found"}));
}

#[actix_web::test]
async fn delete_by_id_returns_record() {
    let store = InMemoryPolygons::default();
    let app = actix_test::init_service(test_app(store.http_state())).await;
    let (_, saved) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/polygons")
            .set_json(square("agent-7", "42", 1)),
    )
    .await;

    let uri = format!("/polygons/{}", saved["id"]);
    let (status, deleted) = call(&app, actix_test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        deleted,
        json!({
            "status": "deleted",
            "record": {"id": saved["id"], "name": "Survey", "agent_id": "agent-7", "user_id": "42"}
        })
    );

    let (status, _) = call(&app, actix_test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_for_owner_reports_removed_records() {
    let store = InMemoryPolygons::default();
    let app = actix_test::init_service(test_app(store.http_state())).await;
    let (_, saved) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/polygons")
            .set_json(square("agent-7", "42", 1)),
    )
    .await;

    let (status, removed) = call(
        &app,
        actix_test::TestRequest::delete().uri("/polygons/agent/agent-7/user/42"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        removed,
        json!({
            "status": "deleted",
            "deletedRecords": 1,
            "records": [{"id": saved["id"], "name": "Survey"}]
        })
    );

    let (status, again) = call(
        &app,
        actix_test::TestRequest::delete().uri("/polygons/agent/agent-7/user/42"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["deletedRecords"], 0);
}

#[actix_web::test]
async fn stats_render_null_feature_totals() {
    let at = Utc
        .with_ymd_and_hms(2025, 1, 15, 9, 30, 0)
        .single()
        .expect("valid time");
    let mut query = MockPolygonQuery::new();
    query.expect_stats().return_once(move || {
        Ok(vec![PolygonStats {
            agent_id: "agent-7".to_owned(),
            user_id: "42".to_owned(),
            total_records: 2,
            last_updated: at,
            total_features: None,
        }])
    });
    let state = HttpState::default()
        .with_polygons(Arc::new(MockPolygonCommand::new()), Arc::new(query));
    let app = actix_test::init_service(test_app(state)).await;

    let (status, stats) = call(&app, actix_test::TestRequest::get().uri("/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({"stats": [{
            "agent_id": "agent-7",
            "user_id": "42",
            "total_records": 2,
            "last_updated": "2025-01-15T09:30:00Z",
            "total_features": null
        }]})
    );
}

#[actix_web::test]
async fn get_renders_record_as_feature() {
    let at = Utc
        .with_ymd_and_hms(2025, 1, 15, 9, 30, 0)
        .single()
        .expect("valid time");
    let mut query = MockPolygonQuery::new();
    query.expect_get().withf(|id| *id == 5).return_once(move |_| {
        Ok(PolygonRecord {
            id: 5,
            name: "Survey".to_owned(),
            agent_id: "a".to_owned(),
            user_id: "u".to_owned(),
            properties: geojson::JsonObject::new(),
            geometry: geojson::Geometry::new(geojson::Value::Point(vec![1.0, 2.0])),
            created_at: at,
            updated_at: at,
        })
    });
    let state = HttpState::default()
        .with_polygons(Arc::new(MockPolygonCommand::new()), Arc::new(query));
    let app = actix_test::init_service(test_app(state)).await;

    let (status, feature) = call(&app, actix_test::TestRequest::get().uri("/polygons/5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feature["id"], 5);
    assert_eq!(feature["geometry"], json!({"type": "Point", "coordinates": [1.0, 2.0]}));
}
