//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`HealthProbe`]) are implemented by outbound
//! adapters and expose typed errors. Driving ports (`*Command`, `*Query`)
//! are implemented by domain services and consumed by HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod health_probe;
mod health_query;
mod polygon_command;
mod polygon_query;
mod polygon_repository;
mod reference_region_repository;
mod region_query;

#[cfg(test)]
pub use health_probe::MockHealthProbe;
pub use health_probe::{HealthProbe, HealthProbeError};
#[cfg(test)]
pub use health_query::MockHealthQuery;
pub use health_query::{FixtureHealthQuery, HealthQuery};
#[cfg(test)]
pub use polygon_command::MockPolygonCommand;
pub use polygon_command::{FixturePolygonCommand, PolygonCommand};
#[cfg(test)]
pub use polygon_query::MockPolygonQuery;
pub use polygon_query::{FixturePolygonQuery, PolygonQuery};
#[cfg(test)]
pub use polygon_repository::MockPolygonRepository;
pub use polygon_repository::{PolygonRepository, PolygonRepositoryError};
#[cfg(test)]
pub use reference_region_repository::MockReferenceRegionRepository;
pub use reference_region_repository::{ReferenceRegionRepository, ReferenceRegionRepositoryError};
#[cfg(test)]
pub use region_query::MockRegionQuery;
pub use region_query::{FixtureRegionQuery, RegionQuery};
