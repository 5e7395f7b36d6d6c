//! Fixed-interval waiting with cancellation support.

use crate::error::TeardownError;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Sleep for `delay` unless `cancel` fires first.
///
/// Returns [`TeardownError::Cancelled`] when the token is (or becomes)
/// cancelled.
pub async fn sleep_or_cancel(
    delay: Duration,
    cancel: &CancellationToken,
) -> Result<(), TeardownError> {
    if cancel.is_cancelled() {
        return Err(TeardownError::Cancelled);
    }

    debug!(delay_ms = delay.as_millis(), "Waiting before next try");
    tokio::select! {
        _ = tokio::time::sleep(delay) => Ok(()),
        _ = cancel.cancelled() => Err(TeardownError::Cancelled),
    }
}
