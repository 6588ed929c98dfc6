//! `SELECT NOW()` health probe.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::sql_query;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HealthProbe, HealthProbeError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NowRow;
use super::pool::DbPool;

/// Diesel-backed implementation of the health probe port.
#[derive(Clone)]
pub struct DieselHealthProbe {
    pool: DbPool,
}

impl DieselHealthProbe {
    /// Create a probe that checks out connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for DieselHealthProbe {
    async fn database_time(&self) -> Result<DateTime<Utc>, HealthProbeError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, HealthProbeError::connection))?;
        let row: NowRow = sql_query("SELECT NOW() AS now")
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    "select now",
                    HealthProbeError::query,
                    HealthProbeError::connection,
                )
            })?;
        Ok(row.now)
    }
}
