//! PostGIS-backed `PolygonRepository`.
//!
//! Statements that read or write `geom` use `sql_query` with typed binds;
//! plain deletes go through the Diesel DSL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Integer, Jsonb, Nullable, Text};
use diesel_async::RunQueryDsl;
use geojson::JsonObject;
use serde_json::Value;

use crate::domain::ports::{PolygonRepository, PolygonRepositoryError};
use crate::domain::{
    DeletedPolygon, PolygonDraft, PolygonFilter, PolygonOwner, PolygonRecord, PolygonStats,
    PolygonSummary,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::geometry_text;
use super::models::{
    DeletedPolygonRow, InsertedIdRow, PolygonRow, PolygonStatsRow, PolygonSummaryRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::user_polygons;

const INSERT_SQL: &str = r#"
INSERT INTO user_polygons (name, agent_id, user_id, properties, geom)
VALUES ($1, $2, $3, $4, ST_SetSRID(ST_GeomFromGeoJSON($5), 4326))
RETURNING id
"#;

const SELECT_COLUMNS: &str = r#"
SELECT id, name, agent_id, user_id, properties,
       ST_AsGeoJSON(geom, 15) AS geometry, created_at, updated_at
FROM user_polygons
"#;

const STATS_SQL: &str = r#"
SELECT agent_id,
       user_id,
       COUNT(*) AS total_records,
       MAX(created_at) AS last_updated,
       SUM(
           CASE
               WHEN jsonb_typeof(properties -> 'featureCount') = 'number'
                    AND properties ->> 'featureCount' ~ '^[0-9]+$'
               THEN (properties ->> 'featureCount')::bigint
           END
       )::bigint AS total_features
FROM user_polygons
GROUP BY agent_id, user_id
ORDER BY last_updated DESC
"#;

/// Diesel-backed implementation of the polygon repository port.
#[derive(Clone)]
pub struct DieselPolygonRepository {
    pool: DbPool,
}

impl DieselPolygonRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PolygonRepositoryError {
    map_pool_error(error, PolygonRepositoryError::connection)
}

fn diesel_error(
    operation: &'static str,
) -> impl FnOnce(diesel::result::Error) -> PolygonRepositoryError {
    move |error| {
        map_diesel_error(
            error,
            operation,
            PolygonRepositoryError::query,
            PolygonRepositoryError::connection,
        )
    }
}

fn record_from_row(row: PolygonRow) -> Result<PolygonRecord, PolygonRepositoryError> {
    let geometry = geometry_text::decode(&row.geometry).map_err(PolygonRepositoryError::query)?;
    let properties = match row.properties {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Ok(PolygonRecord {
        id: row.id,
        name: row.name,
        agent_id: row.agent_id,
        user_id: row.user_id,
        properties,
        geometry,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl PolygonRepository for DieselPolygonRepository {
    async fn delete_for_owner(
        &self,
        owner: &PolygonOwner,
    ) -> Result<Vec<PolygonSummary>, PolygonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<PolygonSummaryRow> = diesel::delete(
            user_polygons::table
                .filter(user_polygons::agent_id.eq(owner.agent_id()))
                .filter(user_polygons::user_id.eq(owner.user_id())),
        )
        .returning(PolygonSummaryRow::as_returning())
        .get_results(&mut conn)
        .await
        .map_err(diesel_error("delete polygons for owner"))?;

        Ok(rows
            .into_iter()
            .map(|row| PolygonSummary {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    async fn insert(&self, draft: &PolygonDraft) -> Result<i32, PolygonRepositoryError> {
        let geometry =
            geometry_text::encode(draft.geometry()).map_err(PolygonRepositoryError::query)?;
        let properties = Value::Object(draft.properties().clone());

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: InsertedIdRow = sql_query(INSERT_SQL)
            .bind::<Text, _>(draft.name())
            .bind::<Text, _>(draft.owner().agent_id())
            .bind::<Text, _>(draft.owner().user_id())
            .bind::<Jsonb, _>(&properties)
            .bind::<Text, _>(&geometry)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error("insert polygon"))?;
        Ok(row.id)
    }

    async fn list(
        &self,
        filter: &PolygonFilter,
    ) -> Result<Vec<PolygonRecord>, PolygonRepositoryError> {
        let statement = format!(
            "{SELECT_COLUMNS} WHERE ($1::text IS NULL OR agent_id = $1) \
             AND ($2::text IS NULL OR user_id = $2) ORDER BY created_at DESC, id DESC"
        );
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<PolygonRow> = sql_query(statement)
            .bind::<Nullable<Text>, _>(filter.agent_id.as_deref())
            .bind::<Nullable<Text>, _>(filter.user_id.as_deref())
            .load(&mut conn)
            .await
            .map_err(diesel_error("list polygons"))?;

        rows.into_iter().map(record_from_row).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PolygonRecord>, PolygonRepositoryError> {
        let statement = format!("{SELECT_COLUMNS} WHERE id = $1");
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<PolygonRow> = sql_query(statement)
            .bind::<Integer, _>(id)
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error("load polygon"))?;

        row.map(record_from_row).transpose()
    }

    async fn delete_by_id(
        &self,
        id: i32,
    ) -> Result<Option<DeletedPolygon>, PolygonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<DeletedPolygonRow> =
            diesel::delete(user_polygons::table.filter(user_polygons::id.eq(id)))
                .returning(DeletedPolygonRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error("delete polygon"))?;

        Ok(row.map(|row| DeletedPolygon {
            id: row.id,
            name: row.name,
            agent_id: row.agent_id,
            user_id: row.user_id,
        }))
    }

    async fn stats(&self) -> Result<Vec<PolygonStats>, PolygonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<PolygonStatsRow> = sql_query(STATS_SQL)
            .load(&mut conn)
            .await
            .map_err(diesel_error("aggregate polygon stats"))?;

        Ok(rows
            .into_iter()
            .map(|row| PolygonStats {
                agent_id: row.agent_id,
                user_id: row.user_id,
                total_records: row.total_records,
                last_updated: row.last_updated,
                total_features: row.total_features,
            })
            .collect())
    }
}
