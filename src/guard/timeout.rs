use std::future::Future;
use std::time::Duration;

use crate::guard::GuardError;

pub async fn with_timeout<F>(fut: F, deadline: Duration) -> Result<F::Output, GuardError>
where
    F: Future,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| GuardError::Timeout(deadline))
}

// On expiry the closure keeps running; its result is dropped.
pub async fn run_blocking_with_deadline<T, F>(work: F, deadline: Duration) -> Result<T, GuardError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(work);
    match with_timeout(handle, deadline).await? {
        Ok(value) => Ok(value),
        Err(join_err) => Err(GuardError::Unexpected(format!(
            "pipeline worker failed: {join_err}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/guard/timeout.rs"]
mod tests;
