//! Database health check service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Error;
use super::ports::{HealthProbe, HealthQuery};

/// Health service implementing [`HealthQuery`] over a [`HealthProbe`].
#[derive(Clone)]
pub struct HealthService<H> {
    probe: Arc<H>,
}

impl<H> HealthService<H> {
    /// Create a service reporting through `probe`.
    pub fn new(probe: Arc<H>) -> Self {
        Self { probe }
    }
}

#[async_trait]
impl<H> HealthQuery for HealthService<H>
where
    H: HealthProbe,
{
    async fn check(&self) -> Result<DateTime<Utc>, Error> {
        self.probe
            .database_time()
            .await
            .map_err(|err| Error::internal("DB connection failed").with_detail(err.to_string()))
    }
}
