//! Session-to-endpoint fan-out.
//!
//! Takes a finished collection session, assembles the configured payload
//! shape, and enqueues everything on every active endpoint. Queueing is
//! fire-and-forget; progress arrives through the notification sink.

use crate::error::Result;
use crate::queue::DeliveryQueueManager;
use grapnel_core::{DeliveryConfig, Notification, NotificationKind};
use grapnel_session::payload::{build_bidirectional, build_single, OutboundPayload};
use grapnel_session::{SessionOutcome, SessionSummary};
use serde_json::json;

/// Enqueue a session's payloads on every active endpoint.
///
/// Raises one informational summary notification per session, then, with
/// `bidirectional` set, the aggregate payload is followed by one
/// relationship payload per connection record, in record order; otherwise
/// only the aggregate goes out. Returns the number of entries enqueued
/// across all endpoints.
pub async fn deliver_summary(
    manager: &DeliveryQueueManager,
    config: &DeliveryConfig,
    summary: &SessionSummary,
) -> Result<usize> {
    let outcome_text = match &summary.outcome {
        SessionOutcome::Completed => "completed".to_string(),
        SessionOutcome::TimedOut => "timed out with partial results".to_string(),
        SessionOutcome::Blocked => "aborted: protection triggered".to_string(),
        SessionOutcome::Failed { reason } => format!("failed: {reason}"),
    };
    manager.sink().notify(Notification {
        kind: NotificationKind::Info,
        endpoint: String::new(),
        message: format!(
            "collection {outcome_text}: {} connections over {} pages",
            summary.records.len(),
            summary.pages_scraped
        ),
        detail: json!({
            "sessionId": summary.session_id.as_str(),
            "records": summary.records.len(),
            "pages": summary.pages_scraped,
            "durationMs": summary.duration_ms,
        }),
    });

    let endpoints = config.active_endpoints();
    if endpoints.is_empty() {
        tracing::debug!(
            session = %summary.session_id,
            "no active endpoints, skipping delivery"
        );
        return Ok(0);
    }

    let payloads = if config.bidirectional {
        build_bidirectional(summary)
    } else {
        vec![OutboundPayload::Aggregate(Box::new(build_single(summary)))]
    };

    let source_name = summary
        .source
        .name
        .clone()
        .unwrap_or_else(|| summary.source.profile_url.clone());

    let mut enqueued = 0;
    for payload in &payloads {
        let (value, entry_name) = match payload {
            OutboundPayload::Aggregate(aggregate) => (
                serde_json::to_value(aggregate)?,
                format!("connections of {source_name}"),
            ),
            OutboundPayload::Relationship(relationship) => (
                serde_json::to_value(relationship)?,
                format!("relationship: {}", relationship.connection_details.name),
            ),
        };
        for endpoint in &endpoints {
            manager
                .enqueue(endpoint, value.clone(), &entry_name)
                .await?;
            enqueued += 1;
        }
    }

    tracing::info!(
        session = %summary.session_id,
        payloads = payloads.len(),
        endpoints = endpoints.len(),
        "session payloads enqueued"
    );
    Ok(enqueued)
}
