//! PostgreSQL/PostGIS persistence adapters.
//!
//! Adapters translate between row structs and domain types and nothing else.
//! Row structs and the `table!` schema stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use polygon_service::outbound::persistence::{DbPool, DieselPolygonRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/gis")).await?;
//! let polygons = DieselPolygonRepository::new(pool.clone());
//! ```

mod diesel_error_mapping;
mod diesel_health_probe;
mod diesel_polygon_repository;
mod diesel_reference_region_repository;
mod geometry_text;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_health_probe::DieselHealthProbe;
pub use diesel_polygon_repository::DieselPolygonRepository;
pub use diesel_reference_region_repository::DieselReferenceRegionRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
