//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `POLYGONS_*` environment variables over an
//! optional config file. Only the database URL has no default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

fn default_countries_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("countries.geojson")
}

/// Configuration problems detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// No database URL was supplied by any layer.
    #[error("database_url is required (set POLYGONS_DATABASE_URL)")]
    MissingDatabaseUrl,
}

/// Runtime settings for the polygon service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POLYGONS")]
pub struct AppSettings {
    /// PostgreSQL/PostGIS connection string.
    pub database_url: Option<String>,
    /// Listen address.
    pub host: Option<IpAddr>,
    /// Listen port.
    pub port: Option<u16>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept warm.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Country boundary GeoJSON; defaults to the bundled dataset.
    pub countries_path: Option<PathBuf>,
    /// Report intersecting US states when saving (default on).
    pub report_intersections: Option<bool>,
    /// Apply embedded migrations before serving (default on).
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Return the database URL, failing when none was configured.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Return the socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Return the country dataset path, falling back to the bundled file.
    pub fn countries_path(&self) -> PathBuf {
        self.countries_path
            .clone()
            .unwrap_or_else(default_countries_path)
    }

    /// Whether saves report the US states they intersect.
    pub fn report_intersections(&self) -> bool {
        self.report_intersections.unwrap_or(true)
    }

    /// Whether embedded migrations run at startup.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Build pool settings from the configured values.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
            .with_connection_timeout(Duration::from_secs(
                self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
            )))
    }
}
