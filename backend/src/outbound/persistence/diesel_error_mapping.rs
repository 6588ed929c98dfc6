//! Shared mapping from pool and Diesel failures to port error constructors.

use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through a port's connection-error constructor.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel failure through a port's query/connection constructors.
///
/// PostgreSQL's own message is kept (it names the failing relation or the
/// GeoJSON parse error) so the service layer can log it; it is never sent to
/// clients.
pub(super) fn map_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    operation: &str,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(operation, message = info.message(), "database connection closed");
            connection(format!("{operation}: {}", info.message()))
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(operation, ?kind, message = info.message(), "database error");
            query(format!("{operation}: {}", info.message()))
        }
        DieselError::NotFound => query(format!("{operation}: record not found")),
        other => {
            debug!(operation, error = %other, "diesel operation failed");
            query(format!("{operation}: {other}"))
        }
    }
}
