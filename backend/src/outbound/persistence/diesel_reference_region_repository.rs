//! PostGIS-backed lookups against the US reference tables.
//!
//! The tables are loaded by an external shapefile import, so only the columns
//! listed in the statements below are relied on.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::{Array, Text};
use diesel_async::RunQueryDsl;
use geojson::Geometry;

use crate::domain::ports::{ReferenceRegionRepository, ReferenceRegionRepositoryError};
use crate::domain::{Region, RegionId, RegionLevel};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::geometry_text;
use super::models::{NameRow, RegionRow};
use super::pool::{DbPool, PoolError};

const STATES_NAMED_SQL: &str = r#"
SELECT gid, name, stusps AS code, ST_AsGeoJSON(geom, 15) AS geometry
FROM us_state
WHERE name = ANY($1)
ORDER BY name
"#;

const FIND_STATE_SQL: &str = r#"
SELECT gid, name, stusps AS code, ST_AsGeoJSON(geom, 15) AS geometry
FROM us_state
WHERE lower(name) = lower($1) OR lower(stusps) = lower($1)
ORDER BY gid
LIMIT 1
"#;

const FIND_CITY_SQL: &str = r#"
SELECT gid, name, stusps AS code, ST_AsGeoJSON(geom, 15) AS geometry
FROM us_place
WHERE lower(name) = lower($1)
ORDER BY gid
LIMIT 1
"#;

const FIND_URBAN_AREA_SQL: &str = r#"
SELECT gid, name, NULL::text AS code, ST_AsGeoJSON(geom, 15) AS geometry
FROM us_urban_area
WHERE name ILIKE $1 ESCAPE '\'
ORDER BY gid
LIMIT 1
"#;

const STATES_INTERSECTING_SQL: &str = r#"
SELECT name
FROM us_state
WHERE ST_Intersects(geom, ST_SetSRID(ST_GeomFromGeoJSON($1), 4326))
ORDER BY name
"#;

/// Diesel-backed implementation of the reference region port.
#[derive(Clone)]
pub struct DieselReferenceRegionRepository {
    pool: DbPool,
}

impl DieselReferenceRegionRepository {
    /// Create a repository over the reference tables reachable through `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        statement: &'static str,
        value: String,
        level: RegionLevel,
        operation: &'static str,
    ) -> Result<Option<Region>, ReferenceRegionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<RegionRow> = sql_query(statement)
            .bind::<Text, _>(value)
            .load(&mut conn)
            .await
            .map_err(diesel_error(operation))?;

        rows.into_iter()
            .next()
            .map(|row| region_from_row(row, level))
            .transpose()
    }
}

fn pool_error(error: PoolError) -> ReferenceRegionRepositoryError {
    map_pool_error(error, ReferenceRegionRepositoryError::connection)
}

fn diesel_error(
    operation: &'static str,
) -> impl FnOnce(diesel::result::Error) -> ReferenceRegionRepositoryError {
    move |error| {
        map_diesel_error(
            error,
            operation,
            ReferenceRegionRepositoryError::query,
            ReferenceRegionRepositoryError::connection,
        )
    }
}

fn region_from_row(
    row: RegionRow,
    level: RegionLevel,
) -> Result<Region, ReferenceRegionRepositoryError> {
    let geometry =
        geometry_text::decode(&row.geometry).map_err(ReferenceRegionRepositoryError::query)?;
    Ok(Region {
        id: RegionId::Number(i64::from(row.gid)),
        name: row.name,
        code: row.code,
        level,
        geometry,
    })
}

/// Escape `LIKE` wildcards in `prefix` and append `%`.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ReferenceRegionRepository for DieselReferenceRegionRepository {
    async fn states_named(
        &self,
        names: &[String],
    ) -> Result<Vec<Region>, ReferenceRegionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<RegionRow> = sql_query(STATES_NAMED_SQL)
            .bind::<Array<Text>, _>(names)
            .load(&mut conn)
            .await
            .map_err(diesel_error("load states by name"))?;

        rows.into_iter()
            .map(|row| region_from_row(row, RegionLevel::State))
            .collect()
    }

    async fn find_state(
        &self,
        name: &str,
    ) -> Result<Option<Region>, ReferenceRegionRepositoryError> {
        self.find_one(FIND_STATE_SQL, name.to_owned(), RegionLevel::State, "find state")
            .await
    }

    async fn find_city(
        &self,
        name: &str,
    ) -> Result<Option<Region>, ReferenceRegionRepositoryError> {
        self.find_one(FIND_CITY_SQL, name.to_owned(), RegionLevel::City, "find city")
            .await
    }

    async fn find_urban_area_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<Option<Region>, ReferenceRegionRepositoryError> {
        self.find_one(
            FIND_URBAN_AREA_SQL,
            like_prefix(prefix),
            RegionLevel::UrbanArea,
            "find urban area",
        )
        .await
    }

    async fn states_intersecting(
        &self,
        geometry: &Geometry,
    ) -> Result<Vec<String>, ReferenceRegionRepositoryError> {
        let geometry =
            geometry_text::encode(geometry).map_err(ReferenceRegionRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<NameRow> = sql_query(STATES_INTERSECTING_SQL)
            .bind::<Text, _>(geometry)
            .load(&mut conn)
            .await
            .map_err(diesel_error("intersect states"))?;

        Ok(rows.into_iter().map(|row| row.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Dallas", "Dallas%")]
    #[case("50%_off", "50\\%\\_off%")]
    #[case("back\\slash", "back\\\\slash%")]
    fn like_prefix_escapes_wildcards(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(like_prefix(input), expected);
    }
}
