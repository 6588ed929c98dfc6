//! Internal Diesel row structs.
//!
//! Geometry columns arrive as `ST_AsGeoJSON` text and are decoded into
//! `geojson::Geometry` by the repositories, never here.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Jsonb, Nullable, Text, Timestamptz};

use super::schema::user_polygons;

/// Full polygon row, read via `sql_query` so `geom` can be rendered.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct PolygonRow {
    #[diesel(sql_type = Integer)]
    pub id: i32,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub agent_id: String,
    #[diesel(sql_type = Text)]
    pub user_id: String,
    #[diesel(sql_type = Jsonb)]
    pub properties: serde_json::Value,
    #[diesel(sql_type = Text)]
    pub geometry: String,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
    #[diesel(sql_type = Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Identifier returned by an insert.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct InsertedIdRow {
    #[diesel(sql_type = Integer)]
    pub id: i32,
}

/// Columns returned when deleting an owner's records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_polygons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PolygonSummaryRow {
    pub id: i32,
    pub name: String,
}

/// Columns returned when deleting one record by id.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_polygons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DeletedPolygonRow {
    pub id: i32,
    pub name: String,
    pub agent_id: String,
    pub user_id: String,
}

/// One agent/user aggregate.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct PolygonStatsRow {
    #[diesel(sql_type = Text)]
    pub agent_id: String,
    #[diesel(sql_type = Text)]
    pub user_id: String,
    #[diesel(sql_type = BigInt)]
    pub total_records: i64,
    #[diesel(sql_type = Timestamptz)]
    pub last_updated: DateTime<Utc>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub total_features: Option<i64>,
}

/// Row from any of the US reference tables.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct RegionRow {
    #[diesel(sql_type = Integer)]
    pub gid: i32,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub code: Option<String>,
    #[diesel(sql_type = Text)]
    pub geometry: String,
}

/// Bare name column.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct NameRow {
    #[diesel(sql_type = Text)]
    pub name: String,
}

/// Database clock.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct NowRow {
    #[diesel(sql_type = Timestamptz)]
    pub now: DateTime<Utc>,
}
