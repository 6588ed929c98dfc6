//! Service entry-point: loads settings, prepares PostGIS and the country
//! index, then serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use polygon_service::config::AppSettings;
use polygon_service::inbound::http::health::HealthState;
use polygon_service::outbound::persistence::{DbPool, run_pending_migrations};
use polygon_service::outbound::static_regions::load_country_index;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let pool_config = settings.pool_config().map_err(std::io::Error::other)?;

    if settings.run_migrations() {
        run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
    }

    let countries =
        load_country_index(&settings.countries_path()).map_err(std::io::Error::other)?;

    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;

    let bind_addr = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, pool, countries)
        .with_report_intersections(settings.report_intersections());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "polygon service listening");

    // Fail liveness as soon as a shutdown signal arrives so orchestrators stop
    // routing traffic while actix drains.
    let drain_state = health_state.clone();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            drain_state.mark_unhealthy();
            info!("shutdown signal received, draining");
        }
    });

    server.await
}
