//! Driving port for region lookups.
//!
//! Inbound adapters pass raw names through; blank-list validation and
//! not-found reporting happen behind this port.

use async_trait::async_trait;

use crate::domain::{Error, Region};

/// Driving port for state and free-text location lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegionQuery: Send + Sync {
    /// States whose name matches one of `names` exactly.
    async fn states(&self, names: Vec<String>) -> Result<Vec<Region>, Error>;

    /// Resolve each name through the country, state, city, and urban-area
    /// tiers. Unresolved names are dropped.
    async fn resolve_locations(&self, names: Vec<String>) -> Result<Vec<Region>, Error>;
}

/// Fixture implementation that resolves nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegionQuery;

#[async_trait]
impl RegionQuery for FixtureRegionQuery {
    async fn states(&self, _names: Vec<String>) -> Result<Vec<Region>, Error> {
        Err(Error::not_found("No states found"))
    }

    async fn resolve_locations(&self, _names: Vec<String>) -> Result<Vec<Region>, Error> {
        Err(Error::not_found("No locations found"))
    }
}
