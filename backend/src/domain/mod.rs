//! Domain types, services, and ports.
//!
//! Purpose: keep request handling transport agnostic. Types here know about
//! GeoJSON but not about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: failure category plus client-facing message.
//! - TraceId: request correlation identifier held in task-local storage.
//! - Polygon types: owner key, draft, stored record, stats, save outcome.
//! - Region types and the static [`CountryIndex`].
//! - Services implementing the driving ports in [`ports`].

pub mod country_index;
pub mod error;
pub mod health_service;
pub mod location_resolver;
pub mod polygon;
pub mod polygon_service;
pub mod ports;
pub mod region;
pub mod region_service;
pub mod trace_id;

pub use self::country_index::CountryIndex;
pub use self::error::{Error, ErrorCode};
pub use self::health_service::HealthService;
pub use self::location_resolver::LocationResolver;
pub use self::polygon::{
    DeletedPolygon, FEATURE_COUNT_KEY, PolygonDraft, PolygonFilter, PolygonOwner, PolygonRecord,
    PolygonStats, PolygonSummary, PolygonValidationError, SavedPolygon, feature_count,
};
pub use self::polygon_service::PolygonService;
pub use self::region::{Region, RegionId, RegionLevel};
pub use self::region_service::RegionQueryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for driving ports and handlers.
pub type ApiResult<T> = Result<T, Error>;
