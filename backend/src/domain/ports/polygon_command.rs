//! Driving port for drawing-set mutations.

use async_trait::async_trait;

use crate::domain::{
    DeletedPolygon, Error, PolygonDraft, PolygonOwner, PolygonSummary, SavedPolygon,
};

/// Driving port for saving and deleting drawing sets.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), polygon_service::domain::Error> {
/// use polygon_service::domain::PolygonOwner;
/// use polygon_service::domain::ports::{FixturePolygonCommand, PolygonCommand};
///
/// let owner = PolygonOwner::new("agent-1", "user-1").expect("valid owner");
/// let removed = FixturePolygonCommand.delete_for_owner(&owner).await?;
/// assert!(removed.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PolygonCommand: Send + Sync {
    /// Replace the owner's drawing set with `draft`.
    async fn save(&self, draft: PolygonDraft) -> Result<SavedPolygon, Error>;

    /// Delete one record; not-found when absent.
    async fn delete(&self, id: i32) -> Result<DeletedPolygon, Error>;

    /// Delete every record for an agent/user pair. Deleting nothing succeeds.
    async fn delete_for_owner(&self, owner: &PolygonOwner) -> Result<Vec<PolygonSummary>, Error>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePolygonCommand;

#[async_trait]
impl PolygonCommand for FixturePolygonCommand {
    async fn save(&self, draft: PolygonDraft) -> Result<SavedPolygon, Error> {
        Ok(SavedPolygon {
            id: 1,
            feature_count: draft.feature_count(),
            intersecting_states: None,
        })
    }

    async fn delete(&self, _id: i32) -> Result<DeletedPolygon, Error> {
        Err(Error::not_found("Polygon collection not found"))
    }

    async fn delete_for_owner(&self, _owner: &PolygonOwner) -> Result<Vec<PolygonSummary>, Error> {
        Ok(Vec::new())
    }
}
