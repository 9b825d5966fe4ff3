//! The multi-page session collector.

use crate::error::{Result, SessionError};
use grapnel_browser::{policy, wait_for, PageHost};
use grapnel_core::{DeliveryConfig, SessionId, SessionLimits};
use grapnel_extract::{ConnectionRecord, PageParser};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// How often the page is re-inspected while waiting for a new page's
/// results container.
const PAGE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Identity of the profile whose connections are being collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceProfile {
    /// Display name, when known.
    pub name: Option<String>,
    /// Canonical profile URL.
    pub profile_url: String,
    /// Opaque server-side identifier from the connections affordance.
    pub encoded_id: Option<String>,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The result set was exhausted (or the page cap reached).
    Completed,
    /// The wall-clock session timeout elapsed mid-collection.
    TimedOut,
    /// A block signal tripped; collection stopped immediately.
    Blocked,
    /// The host failed mid-collection (navigation or protocol error).
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl SessionOutcome {
    /// Whether the session ended by exhausting the result set.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Everything one session produced. Partial on aborts, never discarded.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Session identifier stamped on every delivered payload.
    pub session_id: SessionId,
    /// The profile the session collected connections for.
    pub source: SourceProfile,
    /// Accumulated connection records, in page order.
    pub records: Vec<ConnectionRecord>,
    /// Result pages parsed before the session ended.
    pub pages_scraped: u32,
    /// Wall-clock duration of the session in milliseconds.
    pub duration_ms: u64,
    /// How the session ended.
    pub outcome: SessionOutcome,
}

/// Drives the page parser across a paginated result set.
///
/// At most one session runs per collector instance; concurrent starts fail
/// immediately rather than queue. The abort checks (block signal, timeout)
/// are cooperative - observed once per page iteration - so the worst-case
/// stop latency is one page's parse-plus-navigate time.
pub struct SessionCollector {
    host: Arc<dyn PageHost>,
    parser: PageParser,
    limits: SessionLimits,
    pacing_override: Option<Duration>,
    running: AtomicBool,
}

impl SessionCollector {
    /// Create a collector over a page host and a configured parser.
    #[must_use]
    pub fn new(host: Arc<dyn PageHost>, parser: PageParser, limits: SessionLimits) -> Self {
        Self {
            host,
            parser,
            limits,
            pacing_override: None,
            running: AtomicBool::new(false),
        }
    }

    /// Create a collector from the host-supplied delivery configuration:
    /// session limits plus any fixed pacing override.
    #[must_use]
    pub fn from_config(
        host: Arc<dyn PageHost>,
        parser: PageParser,
        config: &DeliveryConfig,
    ) -> Self {
        let collector = Self::new(host, parser, config.session.clone());
        match config.pacing_delay_override_secs {
            Some(secs) => collector.with_pacing_override(Duration::from_secs(secs)),
            None => collector,
        }
    }

    /// Replace the randomized between-pages delay with a fixed one.
    #[must_use]
    pub fn with_pacing_override(mut self, delay: Duration) -> Self {
        self.pacing_override = Some(delay);
        self
    }

    /// Whether a session is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Collect connection records for `source` across the paginated result
    /// set currently loaded in the host.
    ///
    /// Returns a summary on every path that gets past the exclusivity
    /// check: aborts (block signal, timeout, host failure) yield the
    /// partial summary with a typed outcome.
    pub async fn collect_connections(&self, source: SourceProfile) -> Result<SessionSummary> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyInProgress);
        }
        let summary = self.run_session(source).await;
        self.running.store(false, Ordering::SeqCst);
        Ok(summary)
    }

    async fn run_session(&self, source: SourceProfile) -> SessionSummary {
        let session_id = SessionId::generate();
        let started = Instant::now();
        let timeout = Duration::from_secs(self.limits.session_timeout_secs);

        let mut records: Vec<ConnectionRecord> = Vec::new();
        let mut pages_scraped: u32 = 0;
        let mut outcome = SessionOutcome::Completed;

        tracing::info!(session = %session_id, source = %source.profile_url, "session started");

        for _ in 0..self.limits.max_pages {
            let html = match self.host.document_html().await {
                Ok(html) => html,
                Err(e) => {
                    tracing::error!(session = %session_id, "host failed mid-session: {e}");
                    outcome = SessionOutcome::Failed {
                        reason: e.to_string(),
                    };
                    break;
                }
            };

            if policy::detect_blocked(&html) {
                tracing::warn!(session = %session_id, "aborting: protection triggered");
                outcome = SessionOutcome::Blocked;
                break;
            }

            records.extend(self.parser.parse_result_page(&html));
            pages_scraped += 1;

            if started.elapsed() >= timeout {
                tracing::warn!(session = %session_id, "aborting: session timeout");
                outcome = SessionOutcome::TimedOut;
                break;
            }

            // No next-page affordance means the result set is exhausted.
            if !self.parser.has_next_page(&html) {
                break;
            }

            match self.pacing_override {
                Some(delay) => tokio::time::sleep(delay).await,
                None => {
                    let (min_ms, max_ms) = policy::PAGE_DELAY_MS;
                    policy::random_delay(min_ms, max_ms).await;
                }
            }

            if let Err(e) = self.host.click_first(self.parser.next_button_selectors()).await {
                tracing::error!(session = %session_id, "next-page navigation failed: {e}");
                outcome = SessionOutcome::Failed {
                    reason: e.to_string(),
                };
                break;
            }

            let appeared = wait_for(
                move || async move {
                    match self.host.document_html().await {
                        Ok(html) => self.parser.results_container_present(&html),
                        Err(_) => false,
                    }
                },
                Duration::from_secs(self.limits.page_load_wait_secs),
                PAGE_POLL_INTERVAL,
            )
            .await;
            if !appeared {
                // Proceed regardless of outcome; the next iteration's parse
                // will simply come up empty if the page never settled.
                tracing::warn!(session = %session_id, "results container did not appear in time");
            }
        }

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            session = %session_id,
            pages = pages_scraped,
            records = records.len(),
            ?outcome,
            "session ended"
        );

        SessionSummary {
            session_id,
            source,
            records,
            pages_scraped,
            duration_ms,
            outcome,
        }
    }
}
