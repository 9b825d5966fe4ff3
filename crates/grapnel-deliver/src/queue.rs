//! Per-endpoint delivery queues.
//!
//! The manager owns one [`EndpointQueueState`] per distinct destination
//! URL. Within an endpoint, ordering is strictly FIFO and enforced by the
//! queue itself; across endpoints, queues are fully independent and their
//! drain tasks interleave freely. A minimum inter-send interval of zero
//! means unlimited.

use crate::error::{DeliverError, Result, SendError};
use crate::sender::{HttpSender, PayloadSender};
use grapnel_core::{
    EndpointConfig, EndpointUrl, Notification, NotificationKind, NotificationSink,
};
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Bounded-retry configuration for send dispatch.
///
/// The defaults are observed behavior, preserved for parity: three total
/// attempts, ~1 s between HTTP-level failures, ~2 s after a network-level
/// failure.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Backoff after a non-success HTTP response.
    pub http_backoff: Duration,
    /// Backoff after a transport error.
    pub transport_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            http_backoff: Duration::from_secs(1),
            transport_backoff: Duration::from_secs(2),
        }
    }
}

struct QueueEntry {
    payload: serde_json::Value,
    display_name: String,
    #[allow(dead_code)]
    enqueued_at: Instant,
}

struct EndpointQueueState {
    endpoint_name: String,
    pending: VecDeque<QueueEntry>,
    last_send: Option<Instant>,
    min_interval: Duration,
    draining: bool,
    refreshing: bool,
}

impl EndpointQueueState {
    fn new(endpoint_name: String, min_interval: Duration) -> Self {
        Self {
            endpoint_name,
            pending: VecDeque::new(),
            last_send: None,
            min_interval,
            draining: false,
            refreshing: false,
        }
    }

    fn interval_remaining(&self, now: Instant) -> Duration {
        self.last_send.map_or(Duration::ZERO, |last| {
            self.min_interval.saturating_sub(now.duration_since(last))
        })
    }

    /// Estimated wait until the current tail entry goes out.
    fn eta(&self, now: Instant) -> Duration {
        let queued_ahead = self.pending.len().saturating_sub(1) as u32;
        self.interval_remaining(now) + self.min_interval * queued_ahead
    }
}

struct Inner {
    queues: Mutex<HashMap<EndpointUrl, EndpointQueueState>>,
    sender: Arc<dyn PayloadSender>,
    sink: Arc<dyn NotificationSink>,
    retry: RetryPolicy,
    refresh_interval: Duration,
    refresh_ceiling: Duration,
}

/// Owns the per-endpoint queues and their drain tasks.
pub struct DeliveryQueueManager {
    inner: Arc<Inner>,
}

impl DeliveryQueueManager {
    /// Create a manager that dispatches over HTTP.
    #[must_use]
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_sender(sink, Arc::new(HttpSender::new()))
    }

    /// Create a manager with a custom dispatch seam.
    #[must_use]
    pub fn with_sender(sink: Arc<dyn NotificationSink>, sender: Arc<dyn PayloadSender>) -> Self {
        Self {
            inner: Arc::new(Inner {
                queues: Mutex::new(HashMap::new()),
                sender,
                sink,
                retry: RetryPolicy::default(),
                refresh_interval: Duration::from_secs(5),
                refresh_ceiling: Duration::from_secs(60),
            }),
        }
    }

    /// Override the retry policy. Only effective before any enqueue.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.retry = retry;
        }
        self
    }

    /// Override the queued-notification refresh cadence and its hard
    /// ceiling. Only effective before any enqueue.
    #[must_use]
    pub fn with_refresh(mut self, interval: Duration, ceiling: Duration) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.refresh_interval = interval;
            inner.refresh_ceiling = ceiling;
        }
        self
    }

    /// Append a payload to an endpoint's queue and kick its drain task.
    ///
    /// Raises a "queued" notification (with queue depth and estimated
    /// wait) whenever the entry will not go out immediately: the queue
    /// already had pending items, or the minimum interval since the last
    /// send has not yet elapsed.
    pub async fn enqueue(
        &self,
        endpoint: &EndpointConfig,
        payload: serde_json::Value,
        display_name: &str,
    ) -> Result<()> {
        let url = EndpointUrl::new(&endpoint.url)?;
        let min_interval = Duration::from_secs(endpoint.min_interval_secs);
        let now = Instant::now();

        let (queued_notice, start_drain, start_refresh) = {
            let mut queues = self.inner.queues.lock().await;
            let state = queues
                .entry(url.clone())
                .or_insert_with(|| {
                    EndpointQueueState::new(endpoint.display_name.clone(), min_interval)
                });
            state.min_interval = min_interval;
            state.endpoint_name.clone_from(&endpoint.display_name);

            let immediate = state.pending.is_empty()
                && state.interval_remaining(now).is_zero()
                && !state.draining;
            state.pending.push_back(QueueEntry {
                payload,
                display_name: display_name.to_string(),
                enqueued_at: now,
            });

            let queued_notice =
                (!immediate).then(|| (state.pending.len(), state.eta(now)));
            let start_drain = !state.draining;
            state.draining = true;
            let start_refresh = queued_notice.is_some() && !state.refreshing;
            if start_refresh {
                state.refreshing = true;
            }
            (queued_notice, start_drain, start_refresh)
        };

        if let Some((depth, eta)) = queued_notice {
            self.inner.sink.notify(queued_notification(
                &endpoint.display_name,
                display_name,
                depth,
                eta,
            ));
        }
        if start_drain {
            tokio::spawn(drain(self.inner.clone(), url.clone()));
        }
        if start_refresh {
            tokio::spawn(refresh(self.inner.clone(), url));
        }
        Ok(())
    }

    pub(crate) fn sink(&self) -> &dyn NotificationSink {
        self.inner.sink.as_ref()
    }

    /// Number of entries still waiting for `endpoint`.
    pub async fn queue_depth(&self, endpoint_url: &str) -> usize {
        let Ok(url) = EndpointUrl::new(endpoint_url) else {
            return 0;
        };
        let queues = self.inner.queues.lock().await;
        queues.get(&url).map_or(0, |state| state.pending.len())
    }
}

fn queued_notification(
    endpoint_name: &str,
    entry_name: &str,
    depth: usize,
    eta: Duration,
) -> Notification {
    Notification {
        kind: NotificationKind::Queued,
        endpoint: endpoint_name.to_string(),
        message: format!(
            "{entry_name} queued for delivery (position {depth}, ~{}s wait)",
            eta.as_secs()
        ),
        detail: json!({ "depth": depth, "etaSecs": eta.as_secs(), "entry": entry_name }),
    }
}

enum DrainStep {
    Wait(Duration),
    Send(QueueEntry, String),
    Done,
}

/// Drain one endpoint's queue. Runs after every enqueue and every
/// completed send; exits when the queue empties.
async fn drain(inner: Arc<Inner>, url: EndpointUrl) {
    loop {
        let step = {
            let mut queues = inner.queues.lock().await;
            let Some(state) = queues.get_mut(&url) else {
                return;
            };
            if state.pending.is_empty() {
                state.draining = false;
                DrainStep::Done
            } else {
                let now = Instant::now();
                let wait = state.interval_remaining(now);
                if wait.is_zero() {
                    match state.pending.pop_front() {
                        Some(entry) => {
                            state.last_send = Some(now);
                            DrainStep::Send(entry, state.endpoint_name.clone())
                        }
                        None => {
                            state.draining = false;
                            DrainStep::Done
                        }
                    }
                } else {
                    DrainStep::Wait(wait)
                }
            }
        };

        match step {
            DrainStep::Done => return,
            DrainStep::Wait(wait) => tokio::time::sleep(wait).await,
            DrainStep::Send(entry, endpoint_name) => {
                match send_with_retry(&inner, &url, &entry.payload).await {
                    Ok(attempts) => inner.sink.notify(Notification {
                        kind: NotificationKind::Success,
                        endpoint: endpoint_name,
                        message: format!("delivered {}", entry.display_name),
                        detail: json!({ "attempts": attempts, "entry": entry.display_name }),
                    }),
                    Err(e) => {
                        tracing::error!(endpoint = %url, "permanent delivery failure: {e}");
                        inner.sink.notify(Notification {
                            kind: NotificationKind::Failure,
                            endpoint: endpoint_name,
                            message: format!("failed to deliver {}: {e}", entry.display_name),
                            detail: json!({ "entry": entry.display_name, "error": e.to_string() }),
                        });
                    }
                }
            }
        }
    }
}

/// Dispatch with bounded retry. The backoff depends on the failure class:
/// HTTP-level failures wait [`RetryPolicy::http_backoff`], transport
/// failures wait [`RetryPolicy::transport_backoff`].
async fn send_with_retry(
    inner: &Inner,
    url: &EndpointUrl,
    payload: &serde_json::Value,
) -> std::result::Result<u32, DeliverError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match inner.sender.send(url, payload).await {
            Ok(()) => return Ok(attempt),
            Err(e) => {
                if attempt >= inner.retry.max_attempts {
                    return Err(DeliverError::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                let backoff = match &e {
                    SendError::Status(_) => inner.retry.http_backoff,
                    SendError::Transport(_) => inner.retry.transport_backoff,
                };
                tracing::warn!(
                    endpoint = %url,
                    attempt,
                    max = inner.retry.max_attempts,
                    "send failed ({e}), retrying in {backoff:?}"
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

/// Periodically re-raise the queued notification for an endpoint while
/// entries wait. Self-cancels once the queue empties or after the hard
/// ceiling, to avoid indefinite background timers.
async fn refresh(inner: Arc<Inner>, url: EndpointUrl) {
    let started = Instant::now();
    loop {
        tokio::time::sleep(inner.refresh_interval).await;
        let notice = {
            let mut queues = inner.queues.lock().await;
            let Some(state) = queues.get_mut(&url) else {
                return;
            };
            if state.pending.is_empty() || started.elapsed() >= inner.refresh_ceiling {
                state.refreshing = false;
                None
            } else {
                let entry_name = state
                    .pending
                    .front()
                    .map(|entry| entry.display_name.clone())
                    .unwrap_or_default();
                Some((
                    state.endpoint_name.clone(),
                    entry_name,
                    state.pending.len(),
                    state.eta(Instant::now()),
                ))
            }
        };
        match notice {
            None => return,
            Some((endpoint_name, entry_name, depth, eta)) => {
                inner
                    .sink
                    .notify(queued_notification(&endpoint_name, &entry_name, depth, eta));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_defaults_preserved() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.http_backoff, Duration::from_secs(1));
        assert_eq!(retry.transport_backoff, Duration::from_secs(2));
        assert!(retry.transport_backoff > retry.http_backoff);
    }

    #[test]
    fn eta_accounts_for_interval_and_depth() {
        let mut state =
            EndpointQueueState::new("Test".to_string(), Duration::from_secs(30));
        let now = Instant::now();
        state.last_send = Some(now);
        state.pending.push_back(QueueEntry {
            payload: json!({}),
            display_name: "a".to_string(),
            enqueued_at: now,
        });
        state.pending.push_back(QueueEntry {
            payload: json!({}),
            display_name: "b".to_string(),
            enqueued_at: now,
        });

        // tail entry waits out the current interval plus one full interval
        assert_eq!(state.eta(now), Duration::from_secs(60));
    }
}
