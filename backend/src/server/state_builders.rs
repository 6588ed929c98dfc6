//! Builders wiring outbound adapters into domain services and HTTP state.

use std::sync::Arc;

use polygon_service::domain::{HealthService, PolygonService, RegionQueryService};
use polygon_service::inbound::http::state::HttpState;
use polygon_service::outbound::persistence::{
    DieselHealthProbe, DieselPolygonRepository, DieselReferenceRegionRepository,
};

use super::ServerConfig;

/// Build HTTP state backed by PostGIS adapters sharing one pool.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let pool = &config.db_pool;
    let regions_repo = Arc::new(DieselReferenceRegionRepository::new(pool.clone()));

    let polygons = Arc::new(PolygonService::new(
        Arc::new(DieselPolygonRepository::new(pool.clone())),
        regions_repo.clone(),
        config.report_intersections,
    ));
    let regions = Arc::new(RegionQueryService::new(
        config.countries.clone(),
        regions_repo,
    ));
    let health = Arc::new(HealthService::new(Arc::new(DieselHealthProbe::new(
        pool.clone(),
    ))));

    HttpState::new(polygons.clone(), polygons, regions, health)
}
