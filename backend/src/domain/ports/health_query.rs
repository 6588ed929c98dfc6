//! Driving port for the database health check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::Error;

/// Driving port reporting whether the database answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthQuery: Send + Sync {
    /// Database clock on success.
    async fn check(&self) -> Result<DateTime<Utc>, Error>;
}

/// Fixture implementation that reports the local clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHealthQuery;

#[async_trait]
impl HealthQuery for FixtureHealthQuery {
    async fn check(&self) -> Result<DateTime<Utc>, Error> {
        Ok(Utc::now())
    }
}
