//! Port for the read-only US reference tables (states, places, urban areas).

use async_trait::async_trait;
use geojson::Geometry;

use crate::domain::Region;

use super::define_port_error;

define_port_error! {
    /// Errors raised by reference region adapters.
    pub enum ReferenceRegionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "reference region repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "reference region repository query failed: {message}",
    }
}

/// Port for looking up named regions in the reference tables.
///
/// Name comparisons are case-insensitive. Each lookup returns the first row
/// in table order when several match.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRegionRepository: Send + Sync {
    /// States whose name equals one of `names` exactly.
    async fn states_named(
        &self,
        names: &[String],
    ) -> Result<Vec<Region>, ReferenceRegionRepositoryError>;

    /// State matching `name` by name or postal code.
    async fn find_state(&self, name: &str)
    -> Result<Option<Region>, ReferenceRegionRepositoryError>;

    /// City or place matching `name`.
    async fn find_city(&self, name: &str) -> Result<Option<Region>, ReferenceRegionRepositoryError>;

    /// Urban area whose name starts with `prefix`.
    async fn find_urban_area_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<Option<Region>, ReferenceRegionRepositoryError>;

    /// Names of states intersecting `geometry`, sorted.
    async fn states_intersecting(
        &self,
        geometry: &Geometry,
    ) -> Result<Vec<String>, ReferenceRegionRepositoryError>;
}
