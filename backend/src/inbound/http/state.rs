//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be tested without a database.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureHealthQuery, FixturePolygonCommand, FixturePolygonQuery, FixtureRegionQuery,
    HealthQuery, PolygonCommand, PolygonQuery, RegionQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub polygons: Arc<dyn PolygonCommand>,
    pub polygons_query: Arc<dyn PolygonQuery>,
    pub regions: Arc<dyn RegionQuery>,
    pub health: Arc<dyn HealthQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        polygons: Arc<dyn PolygonCommand>,
        polygons_query: Arc<dyn PolygonQuery>,
        regions: Arc<dyn RegionQuery>,
        health: Arc<dyn HealthQuery>,
    ) -> Self {
        Self {
            polygons,
            polygons_query,
            regions,
            health,
        }
    }

    /// Replace the polygon ports, keeping the rest.
    #[must_use]
    pub fn with_polygons(
        mut self,
        command: Arc<dyn PolygonCommand>,
        query: Arc<dyn PolygonQuery>,
    ) -> Self {
        self.polygons = command;
        self.polygons_query = query;
        self
    }

    /// Replace the region port, keeping the rest.
    #[must_use]
    pub fn with_regions(mut self, regions: Arc<dyn RegionQuery>) -> Self {
        self.regions = regions;
        self
    }

    /// Replace the health port, keeping the rest.
    #[must_use]
    pub fn with_health(mut self, health: Arc<dyn HealthQuery>) -> Self {
        self.health = health;
        self
    }
}

impl Default for HttpState {
    /// Fixture ports throughout: nothing stored, nothing resolved.
    ///
    /// # Examples
    /// ```
    /// use polygon_service::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::default();
    /// let _regions = state.regions.clone();
    /// ```
    fn default() -> Self {
        Self::new(
            Arc::new(FixturePolygonCommand),
            Arc::new(FixturePolygonQuery),
            Arc::new(FixtureRegionQuery),
            Arc::new(FixtureHealthQuery),
        )
    }
}
