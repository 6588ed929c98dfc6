//! Port for drawing-set persistence.

use async_trait::async_trait;

use crate::domain::{
    DeletedPolygon, PolygonDraft, PolygonFilter, PolygonOwner, PolygonRecord, PolygonStats,
    PolygonSummary,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by polygon repository adapters.
    pub enum PolygonRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "polygon repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "polygon repository query failed: {message}",
    }
}

/// Port for storing, reading, and aggregating drawing sets.
///
/// Geometries cross this boundary as GeoJSON; adapters store them with SRID
/// 4326 and never reproject.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PolygonRepository: Send + Sync {
    /// Remove every record owned by `owner`, returning what was removed.
    async fn delete_for_owner(
        &self,
        owner: &PolygonOwner,
    ) -> Result<Vec<PolygonSummary>, PolygonRepositoryError>;

    /// Insert a new record and return its identifier.
    async fn insert(&self, draft: &PolygonDraft) -> Result<i32, PolygonRepositoryError>;

    /// List records matching `filter`, newest first.
    async fn list(
        &self,
        filter: &PolygonFilter,
    ) -> Result<Vec<PolygonRecord>, PolygonRepositoryError>;

    /// Fetch one record by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<PolygonRecord>, PolygonRepositoryError>;

    /// Remove one record by identifier.
    async fn delete_by_id(&self, id: i32)
    -> Result<Option<DeletedPolygon>, PolygonRepositoryError>;

    /// Per agent/user aggregates, most recently updated first.
    async fn stats(&self) -> Result<Vec<PolygonStats>, PolygonRepositoryError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(PolygonRepositoryError::query("broken sql"), "query failed: broken sql")]
    #[case(
        PolygonRepositoryError::connection("pool timed out"),
        "connection failed: pool timed out"
    )]
    fn errors_format_message(#[case] err: PolygonRepositoryError, #[case] expected: &str) {
        assert!(err.to_string().ends_with(expected));
    }
}
