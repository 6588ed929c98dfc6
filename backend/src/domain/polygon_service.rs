//! Drawing-set domain service.
//!
//! Implements [`PolygonCommand`] and [`PolygonQuery`] over a
//! [`PolygonRepository`]. Saves optionally report which US states the new
//! geometry intersects; that lookup is best effort and never fails a save.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::ports::{
    PolygonCommand, PolygonQuery, PolygonRepository, PolygonRepositoryError,
    ReferenceRegionRepository,
};
use super::{
    DeletedPolygon, Error, PolygonDraft, PolygonFilter, PolygonOwner, PolygonRecord,
    PolygonStats, PolygonSummary, SavedPolygon,
};

const NOT_FOUND: &str = "Polygon collection not found";

/// Redact a repository failure behind the operation's public message.
fn repository_error(message: &'static str) -> impl Fn(PolygonRepositoryError) -> Error {
    move |err| Error::internal(message).with_detail(err.to_string())
}

/// Polygon service implementing the drawing-set driving ports.
#[derive(Clone)]
pub struct PolygonService<P, R> {
    polygons: Arc<P>,
    regions: Arc<R>,
    report_intersections: bool,
}

impl<P, R> PolygonService<P, R> {
    /// Create a service. When `report_intersections` is set, saves look up
    /// intersecting states through `regions`.
    pub fn new(polygons: Arc<P>, regions: Arc<R>, report_intersections: bool) -> Self {
        Self {
            polygons,
            regions,
            report_intersections,
        }
    }
}

impl<P, R> PolygonService<P, R>
where
    R: ReferenceRegionRepository,
{
    async fn intersecting_states(&self, draft: &PolygonDraft) -> Option<Vec<String>> {
        if !self.report_intersections {
            return None;
        }
        match self.regions.states_intersecting(draft.geometry()).await {
            Ok(states) => Some(states),
            Err(err) => {
                warn!(
                    agent_id = draft.owner().agent_id(),
                    user_id = draft.owner().user_id(),
                    error = %err,
                    "state intersection lookup failed"
                );
                None
            }
        }
    }
}

#[async_trait]
impl<P, R> PolygonCommand for PolygonService<P, R>
where
    P: PolygonRepository,
    R: ReferenceRegionRepository,
{
    async fn save(&self, draft: PolygonDraft) -> Result<SavedPolygon, Error> {
        // Replace-on-write: a reader between these two statements sees no
        // record for the owner.
        let replaced = self
            .polygons
            .delete_for_owner(draft.owner())
            .await
            .map_err(repository_error("Save failed"))?;
        if !replaced.is_empty() {
            debug!(
                agent_id = draft.owner().agent_id(),
                user_id = draft.owner().user_id(),
                replaced = replaced.len(),
                "replacing existing drawing set"
            );
        }

        let id = self
            .polygons
            .insert(&draft)
            .await
            .map_err(repository_error("Save failed"))?;
        let intersecting_states = self.intersecting_states(&draft).await;

        info!(
            id,
            agent_id = draft.owner().agent_id(),
            user_id = draft.owner().user_id(),
            "saved drawing set"
        );
        Ok(SavedPolygon {
            id,
            feature_count: draft.feature_count(),
            intersecting_states,
        })
    }

    async fn delete(&self, id: i32) -> Result<DeletedPolygon, Error> {
        self.polygons
            .delete_by_id(id)
            .await
            .map_err(repository_error("Delete failed"))?
            .ok_or_else(|| Error::not_found(NOT_FOUND))
    }

    async fn delete_for_owner(&self, owner: &PolygonOwner) -> Result<Vec<PolygonSummary>, Error> {
        self.polygons
            .delete_for_owner(owner)
            .await
            .map_err(repository_error("Delete failed"))
    }
}

#[async_trait]
impl<P, R> PolygonQuery for PolygonService<P, R>
where
    P: PolygonRepository,
    R: ReferenceRegionRepository,
{
    async fn list(&self, filter: PolygonFilter) -> Result<Vec<PolygonRecord>, Error> {
        self.polygons
            .list(&filter)
            .await
            .map_err(repository_error("Fetch failed"))
    }

    async fn get(&self, id: i32) -> Result<PolygonRecord, Error> {
        self.polygons
            .find_by_id(id)
            .await
            .map_err(repository_error("Fetch failed"))?
            .ok_or_else(|| Error::not_found(NOT_FOUND))
    }

    async fn stats(&self) -> Result<Vec<PolygonStats>, Error> {
        self.polygons
            .stats()
            .await
            .map_err(repository_error("Stats fetch failed"))
    }
}

#[cfg(test)]
#[path = "polygon_service_tests.rs"]
mod tests;
