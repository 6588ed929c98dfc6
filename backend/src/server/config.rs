//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use polygon_service::domain::CountryIndex;
use polygon_service::outbound::persistence::DbPool;

/// Everything the server needs once startup I/O has completed.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) countries: Arc<CountryIndex>,
    pub(crate) report_intersections: bool,
}

impl ServerConfig {
    /// Construct a server configuration from a ready pool and country index.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, countries: CountryIndex) -> Self {
        Self {
            bind_addr,
            db_pool,
            countries: Arc::new(countries),
            report_intersections: true,
        }
    }

    /// Toggle the intersecting-states lookup performed after each save.
    #[must_use]
    pub fn with_report_intersections(mut self, enabled: bool) -> Self {
        self.report_intersections = enabled;
        self
    }
}
