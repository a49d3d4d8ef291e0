//! Translation of Diesel and pool failures into repository port errors.
//!
//! Raw database text is logged at `debug` and never copied into the port
//! error, which may reach log lines at higher levels.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constructors a repository error type exposes for mapping.
pub(crate) trait RepositoryFailure: Sized {
    fn connection(message: String) -> Self;
    fn query(message: String) -> Self;
}

pub(crate) fn map_pool_error<E: RepositoryFailure>(error: PoolError) -> E {
    debug!(%error, "connection checkout failed");
    E::connection(error.message().to_owned())
}

pub(crate) fn map_diesel_error<E: RepositoryFailure>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            E::connection("database connection error".to_owned())
        }
        DieselError::QueryBuilderError(_) => E::query("database query error".to_owned()),
        DieselError::DeserializationError(_) | DieselError::SerializationError(_) => {
            E::query("database value conversion error".to_owned())
        }
        _ => E::query("database error".to_owned()),
    }
}

impl RepositoryFailure for crate::domain::ports::CategoryRepositoryError {
    fn connection(message: String) -> Self {
        Self::connection(message)
    }

    fn query(message: String) -> Self {
        Self::query(message)
    }
}

impl RepositoryFailure for crate::domain::ports::ProductRepositoryError {
    fn connection(message: String) -> Self {
        Self::connection(message)
    }

    fn query(message: String) -> Self {
        Self::query(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CategoryRepositoryError;
    use rstest::rstest;

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let err: CategoryRepositoryError = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));
        assert_eq!(
            err,
            CategoryRepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    fn raw_database_text_is_not_propagated() {
        let err: CategoryRepositoryError = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::Unknown,
            Box::new("relation \"categories\" does not exist".to_owned()),
        ));
        assert_eq!(err, CategoryRepositoryError::query("database error"));
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let err: CategoryRepositoryError = map_pool_error(PoolError::Checkout {
            message: "timed out waiting for connection".to_owned(),
        });
        assert_eq!(
            err,
            CategoryRepositoryError::connection("timed out waiting for connection")
        );
    }
}
