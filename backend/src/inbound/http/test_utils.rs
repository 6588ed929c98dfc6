//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{PolygonCommand, PolygonQuery};
use crate::domain::{
    DeletedPolygon, Error, FEATURE_COUNT_KEY, PolygonDraft, PolygonFilter, PolygonOwner,
    PolygonRecord, PolygonStats, PolygonSummary, SavedPolygon,
};
use crate::inbound::http::state::HttpState;

const NOT_FOUND: &str = "Polygon collection not found";

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    records: Vec<PolygonRecord>,
}

/// In-memory drawing-set store honouring the save-replace rule.
///
/// Implements both polygon ports so handler tests can chain requests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPolygons {
    store: Arc<Mutex<Store>>,
}

impl InMemoryPolygons {
    fn with_store<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut guard = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// HTTP state whose polygon ports share this store.
    pub fn http_state(&self) -> HttpState {
        HttpState::default().with_polygons(Arc::new(self.clone()), Arc::new(self.clone()))
    }
}

fn remove_owner(store: &mut Store, owner: &PolygonOwner) -> Vec<PolygonSummary> {
    let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut store.records)
        .into_iter()
        .partition(|record| {
            record.agent_id == owner.agent_id() && record.user_id == owner.user_id()
        });
    store.records = kept;
    removed
        .into_iter()
        .map(|record| PolygonSummary {
            id: record.id,
            name: record.name,
        })
        .collect()
}

#[async_trait]
impl PolygonCommand for InMemoryPolygons {
    async fn save(&self, draft: PolygonDraft) -> Result<SavedPolygon, Error> {
        Ok(self.with_store(|store| {
            remove_owner(store, draft.owner());
            store.next_id += 1;
            let now = Utc::now();
            store.records.push(PolygonRecord {
                id: store.next_id,
                name: draft.name().to_owned(),
                agent_id: draft.owner().agent_id().to_owned(),
                user_id: draft.owner().user_id().to_owned(),
                properties: draft.properties().clone(),
                geometry: draft.geometry().clone(),
                created_at: now,
                updated_at: now,
            });
            SavedPolygon {
                id: store.next_id,
                feature_count: draft.feature_count(),
                intersecting_states: None,
            }
        }))
    }

    async fn delete(&self, id: i32) -> Result<DeletedPolygon, Error> {
        self.with_store(|store| {
            let position = store.records.iter().position(|record| record.id == id);
            position
                .map(|index| {
                    let record = store.records.remove(index);
                    DeletedPolygon {
                        id: record.id,
                        name: record.name,
                        agent_id: record.agent_id,
                        user_id: record.user_id,
                    }
                })
                .ok_or_else(|| Error::not_found(NOT_FOUND))
        })
    }

    async fn delete_for_owner(&self, owner: &PolygonOwner) -> Result<Vec<PolygonSummary>, Error> {
        Ok(self.with_store(|store| remove_owner(store, owner)))
    }
}

#[async_trait]
impl PolygonQuery for InMemoryPolygons {
    async fn list(&self, filter: PolygonFilter) -> Result<Vec<PolygonRecord>, Error> {
        Ok(self.with_store(|store| {
            store
                .records
                .iter()
                .rev()
                .filter(|record| filter.matches(record))
                .cloned()
                .collect()
        }))
    }

    async fn get(&self, id: i32) -> Result<PolygonRecord, Error> {
        self.with_store(|store| {
            store
                .records
                .iter()
                .find(|record| record.id == id)
                .cloned()
                .ok_or_else(|| Error::not_found(NOT_FOUND))
        })
    }

    async fn stats(&self) -> Result<Vec<PolygonStats>, Error> {
        Ok(self.with_store(|store| {
            store
                .records
                .iter()
                .map(|record| PolygonStats {
                    agent_id: record.agent_id.clone(),
                    user_id: record.user_id.clone(),
                    total_records: 1,
                    last_updated: record.updated_at,
                    total_features: record
                        .properties
                        .get(FEATURE_COUNT_KEY)
                        .and_then(serde_json::Value::as_i64),
                })
                .collect()
        }))
    }
}
