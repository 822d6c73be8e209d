// file: src/pipeline/deadline.rs
// description: bounded blocking work and a runtime that does not wait on abandoned tasks
// reference: https://docs.rs/tokio/latest/tokio/runtime/struct.Runtime.html#method.shutdown_background

use crate::error::{QaError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Run CPU-bound `work` on the blocking pool. Past `timeout` the caller gets
/// `QaError::Timeout` and the result is discarded whenever the work ends.
pub async fn run_blocking_with_timeout<T, F>(timeout: Duration, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(work);

    match tokio::time::timeout(timeout, task).await {
        Err(_) => {
            warn!("Blocking work exceeded {:?}; abandoning it", timeout);
            Err(QaError::Timeout(timeout))
        }
        Ok(Err(join)) => Err(QaError::Task(join.to_string())),
        Ok(Ok(result)) => result,
    }
}

/// Drive `future` on a fresh multi-threaded runtime, then shut the runtime
/// down without joining blocking tasks that are still running.
pub fn block_on_detached<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let output = runtime.block_on(future);
    runtime.shutdown_background();

    Ok(output)
}
