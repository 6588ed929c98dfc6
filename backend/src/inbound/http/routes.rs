//! Route table for the HTTP adapter.
//!
//! Registers every handler plus the extractor configuration that turns
//! malformed bodies, query strings and path segments into the standard
//! `{"error": ...}` 400 envelope.

use actix_web::web;

use crate::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::inbound::http::{health, polygons, regions};

/// Register handlers and extractor configs on an app or scope.
///
/// Handlers expect `web::Data<HttpState>` and, for the probes,
/// `web::Data<HealthState>` to be registered by the caller.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use polygon_service::inbound::http::routes::configure;
/// use polygon_service::inbound::http::state::HttpState;
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(health::database_health)
        .service(health::live)
        .service(health::ready)
        .service(polygons::save_polygon)
        .service(polygons::list_polygons)
        // Owner deletes first so the two-segment path never reaches the id
        // extractor.
        .service(polygons::delete_owner_polygons)
        .service(polygons::get_polygon)
        .service(polygons::delete_polygon)
        .service(polygons::polygon_stats)
        .service(regions::states)
        .service(regions::locations_geojson);
}
