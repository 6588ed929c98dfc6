//! Driving port for drawing-set reads.

use async_trait::async_trait;

use crate::domain::{Error, PolygonFilter, PolygonRecord, PolygonStats};

/// Driving port for listing, fetching, and aggregating drawing sets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PolygonQuery: Send + Sync {
    /// Records matching `filter`, newest first.
    async fn list(&self, filter: PolygonFilter) -> Result<Vec<PolygonRecord>, Error>;

    /// One record; not-found when absent.
    async fn get(&self, id: i32) -> Result<PolygonRecord, Error>;

    /// Per agent/user aggregates.
    async fn stats(&self) -> Result<Vec<PolygonStats>, Error>;
}

/// Fixture implementation with no stored records.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePolygonQuery;

#[async_trait]
impl PolygonQuery for FixturePolygonQuery {
    async fn list(&self, _filter: PolygonFilter) -> Result<Vec<PolygonRecord>, Error> {
        Ok(Vec::new())
    }

    async fn get(&self, _id: i32) -> Result<PolygonRecord, Error> {
        Err(Error::not_found("Polygon collection not found"))
    }

    async fn stats(&self) -> Result<Vec<PolygonStats>, Error> {
        Ok(Vec::new())
    }
}
