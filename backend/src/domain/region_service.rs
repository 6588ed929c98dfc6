//! Region lookup service backing the `/states` and `/locations-geojson`
//! endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{ReferenceRegionRepository, RegionQuery};
use super::{CountryIndex, Error, LocationResolver, Region};

/// Keep non-blank names, trimmed, in request order.
fn non_blank(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Region service implementing [`RegionQuery`].
#[derive(Clone)]
pub struct RegionQueryService<R> {
    regions: Arc<R>,
    resolver: LocationResolver<R>,
}

impl<R> RegionQueryService<R> {
    /// Create a service over the country index and reference tables.
    pub fn new(countries: Arc<CountryIndex>, regions: Arc<R>) -> Self {
        Self {
            resolver: LocationResolver::new(countries, Arc::clone(&regions)),
            regions,
        }
    }
}

#[async_trait]
impl<R> RegionQuery for RegionQueryService<R>
where
    R: ReferenceRegionRepository,
{
    async fn states(&self, names: Vec<String>) -> Result<Vec<Region>, Error> {
        let names = non_blank(names);
        if names.is_empty() {
            return Err(Error::invalid_request("Need an array of state names"));
        }

        let states = self.regions.states_named(&names).await.map_err(|err| {
            Error::internal("State fetch failed").with_detail(err.to_string())
        })?;
        if states.is_empty() {
            return Err(Error::not_found("No states found"));
        }
        Ok(states)
    }

    async fn resolve_locations(&self, names: Vec<String>) -> Result<Vec<Region>, Error> {
        let names = non_blank(names);
        if names.is_empty() {
            return Err(Error::invalid_request("Need an array of location names"));
        }

        let mut resolved = Vec::with_capacity(names.len());
        for name in &names {
            match self.resolver.resolve(name).await {
                Ok(Some(region)) => resolved.push(region),
                Ok(None) => info!(name = %name, "location not resolved"),
                Err(err) => warn!(name = %name, error = %err, "location lookup failed"),
            }
        }

        if resolved.is_empty() {
            return Err(Error::not_found("No locations found"));
        }
        Ok(resolved)
    }
}

#[cfg(test)]
#[path = "region_service_tests.rs"]
mod tests;
