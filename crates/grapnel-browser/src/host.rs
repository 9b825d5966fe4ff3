//! The host-page seam and the bounded-wait utility.

use crate::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Async access to the page the pipeline is currently observing.
///
/// The collector drives everything through this trait so it stays
/// independent of the concrete browser transport. Implementations must be
/// cheap to call repeatedly; `document_html` in particular backs the
/// polling waits.
#[async_trait::async_trait]
pub trait PageHost: Send + Sync {
    /// Serialize the currently loaded document to HTML.
    async fn document_html(&self) -> Result<String>;

    /// Click the first element matching any of the candidate selectors,
    /// in candidate order.
    async fn click_first(&self, candidates: &[String]) -> Result<()>;

    /// Scroll the viewport vertically by `delta_y` pixels.
    async fn scroll_by(&self, delta_y: f64) -> Result<()>;
}

/// Poll `predicate` until it returns `true` or `timeout` elapses.
///
/// Resolves to `false` on timeout instead of erroring: callers that wait
/// for a page to settle must be able to proceed regardless of outcome
/// rather than hang or abort the session.
pub async fn wait_for<F, Fut>(mut predicate: F, timeout: Duration, poll_interval: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if predicate().await {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn wait_for_resolves_true_when_predicate_passes() {
        let calls = AtomicU32::new(0);
        let calls_ref = &calls;
        let result = wait_for(
            move || async move {
                calls_ref.fetch_add(1, Ordering::SeqCst);
                calls_ref.load(Ordering::SeqCst) >= 3
            },
            Duration::from_secs(10),
            Duration::from_millis(100),
        )
        .await;

        assert!(result);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_resolves_false_on_timeout() {
        let result = wait_for(
            || async { false },
            Duration::from_secs(2),
            Duration::from_millis(100),
        )
        .await;

        assert!(!result);
    }
}
