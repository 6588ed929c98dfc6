//! Drawing-set records stored per agent/user pair.
//!
//! A record holds one GeoJSON geometry (usually a `GeometryCollection` of
//! everything the user drew) plus a free-form properties object. Saving is
//! replace-on-write: at most one record survives per [`PolygonOwner`].

use chrono::{DateTime, Utc};
use geojson::{Geometry, JsonObject};
use serde_json::Value;
use thiserror::Error;

/// Properties key carrying the client-reported number of drawn features.
pub const FEATURE_COUNT_KEY: &str = "featureCount";

/// Validation errors raised while building polygon domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolygonValidationError {
    /// `agent_id` was empty once trimmed.
    #[error("agent_id must not be empty")]
    EmptyAgentId,
    /// `user_id` was empty once trimmed.
    #[error("user_id must not be empty")]
    EmptyUserId,
}

/// The agent/user pair a drawing set belongs to.
///
/// # Examples
/// ```
/// use polygon_service::domain::PolygonOwner;
///
/// let owner = PolygonOwner::new("agent-7", "42").expect("valid owner");
/// assert_eq!(owner.agent_id(), "agent-7");
/// assert!(PolygonOwner::new(" ", "42").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolygonOwner {
    agent_id: String,
    user_id: String,
}

impl PolygonOwner {
    /// Build an owner key, rejecting blank identifiers.
    pub fn new(
        agent_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self, PolygonValidationError> {
        let agent_id = agent_id.into();
        let user_id = user_id.into();
        if agent_id.trim().is_empty() {
            return Err(PolygonValidationError::EmptyAgentId);
        }
        if user_id.trim().is_empty() {
            return Err(PolygonValidationError::EmptyUserId);
        }
        Ok(Self { agent_id, user_id })
    }

    /// Agent identifier.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// User identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Read the client-reported feature count, defaulting to zero.
///
/// Only non-negative integers count; anything else is treated as absent.
pub fn feature_count(properties: &JsonObject) -> u64 {
    properties
        .get(FEATURE_COUNT_KEY)
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

/// A validated drawing set ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonDraft {
    owner: PolygonOwner,
    name: String,
    geometry: Geometry,
    properties: JsonObject,
}

impl PolygonDraft {
    /// Build a draft. A missing or blank `name` becomes
    /// `Drawing Set for Agent {agent_id}`.
    pub fn new(
        owner: PolygonOwner,
        name: Option<String>,
        geometry: Geometry,
        properties: Option<JsonObject>,
    ) -> Self {
        let name = name
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| format!("Drawing Set for Agent {}", owner.agent_id()));
        Self {
            owner,
            name,
            geometry,
            properties: properties.unwrap_or_default(),
        }
    }

    /// Owning agent/user pair.
    pub fn owner(&self) -> &PolygonOwner {
        &self.owner
    }

    /// Display name stored with the record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometry to store (interpreted as SRID 4326).
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Free-form properties blob.
    pub fn properties(&self) -> &JsonObject {
        &self.properties
    }

    /// Client-reported number of features in this set.
    pub fn feature_count(&self) -> u64 {
        feature_count(&self.properties)
    }
}

/// A stored drawing set.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRecord {
    pub id: i32,
    pub name: String,
    pub agent_id: String,
    pub user_id: String,
    pub properties: JsonObject,
    pub geometry: Geometry,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identifier and name of a removed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonSummary {
    pub id: i32,
    pub name: String,
}

/// A record removed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedPolygon {
    pub id: i32,
    pub name: String,
    pub agent_id: String,
    pub user_id: String,
}

/// Optional agent/user filters for listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonFilter {
    pub agent_id: Option<String>,
    pub user_id: Option<String>,
}

impl PolygonFilter {
    /// Whether `record` passes both filters.
    pub fn matches(&self, record: &PolygonRecord) -> bool {
        self.agent_id
            .as_deref()
            .is_none_or(|agent_id| agent_id == record.agent_id)
            && self
                .user_id
                .as_deref()
                .is_none_or(|user_id| user_id == record.user_id)
    }
}

/// Aggregates for one agent/user group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonStats {
    pub agent_id: String,
    pub user_id: String,
    pub total_records: i64,
    pub last_updated: DateTime<Utc>,
    /// Sum of `featureCount` across the group; `None` when no record has one.
    pub total_features: Option<i64>,
}

/// Result of a save-replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPolygon {
    pub id: i32,
    pub feature_count: u64,
    /// Names of US states the geometry intersects, when reporting is enabled
    /// and the lookup succeeded.
    pub intersecting_states: Option<Vec<String>>,
}

impl SavedPolygon {
    /// Human-readable confirmation.
    pub fn message(&self) -> String {
        format!("Saved {} drawings in one record", self.feature_count)
    }
}

#[cfg(test)]
mod tests {
    use geojson::Value as GeoValue;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn owner() -> PolygonOwner {
        PolygonOwner::new("agent-7", "user-3").expect("valid owner")
    }

    #[fixture]
    fn point() -> Geometry {
        Geometry::new(GeoValue::Point(vec![2.35, 48.85]))
    }

    fn props(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[rstest]
    #[case("", "user", PolygonValidationError::EmptyAgentId)]
    #[case("agent", "  ", PolygonValidationError::EmptyUserId)]
    fn owner_rejects_blank_ids(
        #[case] agent: &str,
        #[case] user: &str,
        #[case] expected: PolygonValidationError,
    ) {
        assert_eq!(PolygonOwner::new(agent, user), Err(expected));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   ".to_owned()))]
    fn draft_defaults_name_from_agent(
        owner: PolygonOwner,
        point: Geometry,
        #[case] name: Option<String>,
    ) {
        let draft = PolygonDraft::new(owner, name, point, None);
        assert_eq!(draft.name(), "Drawing Set for Agent agent-7");
        assert!(draft.properties().is_empty());
    }

    #[rstest]
    fn draft_keeps_explicit_name(owner: PolygonOwner, point: Geometry) {
        let draft = PolygonDraft::new(owner, Some("Survey".to_owned()), point, None);
        assert_eq!(draft.name(), "Survey");
    }

    #[rstest]
    #[case(json!({"featureCount": 4}), 4)]
    #[case(json!({"featureCount": -1}), 0)]
    #[case(json!({"featureCount": "4"}), 0)]
    #[case(json!({}), 0)]
    fn feature_count_reads_non_negative_integers(
        #[case] properties: serde_json::Value,
        #[case] expected: u64,
    ) {
        assert_eq!(feature_count(&props(properties)), expected);
    }

    #[rstest]
    fn saved_message_reports_count() {
        let saved = SavedPolygon {
            id: 9,
            feature_count: 3,
            intersecting_states: None,
        };
        assert_eq!(saved.message(), "Saved 3 drawings in one record");
    }

    #[rstest]
    fn filter_matches_on_present_fields(point: Geometry) {
        let now = Utc::now();
        let record = PolygonRecord {
            id: 1,
            name: "a".to_owned(),
            agent_id: "agent-7".to_owned(),
            user_id: "user-3".to_owned(),
            properties: JsonObject::new(),
            geometry: point,
            created_at: now,
            updated_at: now,
        };

        assert!(PolygonFilter::default().matches(&record));
        let by_agent = PolygonFilter {
            agent_id: Some("agent-7".to_owned()),
            user_id: None,
        };
        assert!(by_agent.matches(&record));
        let other_user = PolygonFilter {
            agent_id: Some("agent-7".to_owned()),
            user_id: Some("user-4".to_owned()),
        };
        assert!(!other_user.matches(&record));
    }
}
