//! Port for checking database reachability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;

define_port_error! {
    /// Errors raised by health probe adapters.
    pub enum HealthProbeError {
        /// Repository connection could not be established.
        Connection { message: String } => "health probe connection failed: {message}",
        /// The probe query failed.
        Query { message: String } => "health probe query failed: {message}",
    }
}

/// Port returning the database clock, proving a round trip succeeded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Current database time.
    async fn database_time(&self) -> Result<DateTime<Utc>, HealthProbeError>;
}
