//! Per-call deadline applied to storage port calls.

use std::future::Future;
use std::time::Duration;

use super::Error;

/// Message carried by errors raised when a deadline expires.
pub const TIMEOUT_MESSAGE: &str = "The operation timed out.";

/// Await `fut` for at most `limit`, classifying its error with `classify`.
///
/// Expiry drops `fut` and reports an internal error whose source is the
/// Tokio elapsed marker.
pub(crate) async fn with_deadline<F, T, E>(
    limit: Duration,
    fut: F,
    classify: impl FnOnce(E) -> Error,
) -> Result<T, Error>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(classify),
        Err(elapsed) => Err(Error::internal(TIMEOUT_MESSAGE).with_source(elapsed)),
    }
}
