//! Delivery queue behavior: FIFO pacing, endpoint independence, bounded
//! retry, and session fan-out.

use async_trait::async_trait;
use chrono::Utc;
use grapnel_core::{
    DeliveryConfig, EndpointConfig, EndpointUrl, NotificationKind, RecordingSink, SendMode,
    SessionId,
};
use grapnel_deliver::{
    deliver_summary, DeliverError, DeliveryQueueManager, PayloadSender, SendError,
};
use grapnel_extract::ConnectionRecord;
use grapnel_session::{SessionOutcome, SessionSummary, SourceProfile};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct SendRecord {
    endpoint: String,
    payload: serde_json::Value,
    at: Instant,
}

/// Sender that logs every attempt and fails the first `fail_first` calls.
struct ScriptedSender {
    log: Mutex<Vec<SendRecord>>,
    fail_first: AtomicU32,
    transport_failures: bool,
}

impl ScriptedSender {
    fn reliable() -> Self {
        Self::failing(0, false)
    }

    fn failing(fail_first: u32, transport: bool) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            fail_first: AtomicU32::new(fail_first),
            transport_failures: transport,
        }
    }

    fn attempts(&self) -> Vec<SendRecord> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl PayloadSender for ScriptedSender {
    async fn send(
        &self,
        endpoint: &EndpointUrl,
        payload: &serde_json::Value,
    ) -> Result<(), SendError> {
        self.log.lock().unwrap().push(SendRecord {
            endpoint: endpoint.to_string(),
            payload: payload.clone(),
            at: Instant::now(),
        });
        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_first.store(remaining - 1, Ordering::SeqCst);
            if self.transport_failures {
                return Err(SendError::Transport("connection reset".to_string()));
            }
            return Err(SendError::Status(500));
        }
        Ok(())
    }
}

fn endpoint(url: &str, name: &str, min_interval_secs: u64) -> EndpointConfig {
    EndpointConfig {
        url: url.to_string(),
        display_name: name.to_string(),
        min_interval_secs,
    }
}

fn manager_with(
    sender: Arc<ScriptedSender>,
) -> (DeliveryQueueManager, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let manager = DeliveryQueueManager::with_sender(sink.clone(), sender);
    (manager, sink)
}

#[tokio::test(start_paused = true)]
async fn fifo_order_with_minimum_spacing() {
    let sender = Arc::new(ScriptedSender::reliable());
    let sink = Arc::new(RecordingSink::new());
    // refresh pushed out of the way so only the initial queued notices count
    let manager = DeliveryQueueManager::with_sender(sink.clone(), sender.clone())
        .with_refresh(Duration::from_secs(600), Duration::from_secs(600));
    let target = endpoint("https://hooks.example.com/a", "CRM", 30);

    for label in ["first", "second", "third"] {
        manager
            .enqueue(&target, json!({ "label": label }), label)
            .await
            .unwrap();
    }
    tokio::time::sleep(Duration::from_secs(90)).await;

    let attempts = sender.attempts();
    assert_eq!(attempts.len(), 3);
    let labels: Vec<_> = attempts
        .iter()
        .map(|a| a.payload["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, ["first", "second", "third"]);
    for pair in attempts.windows(2) {
        let gap = pair[1].at.duration_since(pair[0].at);
        assert!(gap >= Duration::from_secs(30), "sends {gap:?} apart");
    }

    // one immediate send, two queued notifications, three successes
    assert_eq!(sink.count(NotificationKind::Queued), 2);
    assert_eq!(sink.count(NotificationKind::Success), 3);
    assert_eq!(sink.count(NotificationKind::Failure), 0);
    assert_eq!(manager.queue_depth("https://hooks.example.com/a").await, 0);
}

#[tokio::test(start_paused = true)]
async fn endpoints_drain_independently() {
    let sender = Arc::new(ScriptedSender::reliable());
    let (manager, _sink) = manager_with(sender.clone());
    let slow = endpoint("https://hooks.example.com/slow", "Slow", 30);
    let fast = endpoint("https://hooks.example.com/fast", "Fast", 0);

    for target in [&slow, &fast, &slow, &fast] {
        manager
            .enqueue(target, json!({}), "entry")
            .await
            .unwrap();
    }
    tokio::time::sleep(Duration::from_secs(1)).await;

    // the unlimited endpoint never waits on the rate-limited one
    let by_endpoint = |suffix: &str| {
        sender
            .attempts()
            .iter()
            .filter(|a| a.endpoint.ends_with(suffix))
            .count()
    };
    assert_eq!(by_endpoint("/fast"), 2);
    assert_eq!(by_endpoint("/slow"), 1);

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(by_endpoint("/slow"), 2);
}

#[tokio::test(start_paused = true)]
async fn retry_succeeds_on_third_attempt() {
    let sender = Arc::new(ScriptedSender::failing(2, false));
    let (manager, sink) = manager_with(sender.clone());
    let target = endpoint("https://hooks.example.com/a", "CRM", 0);

    manager.enqueue(&target, json!({}), "entry").await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    let attempts = sender.attempts();
    assert_eq!(attempts.len(), 3);
    // HTTP-level failures back off ~1 s between attempts
    for pair in attempts.windows(2) {
        let gap = pair[1].at.duration_since(pair[0].at);
        assert!(gap >= Duration::from_secs(1) && gap < Duration::from_secs(2));
    }
    assert_eq!(sink.count(NotificationKind::Success), 1);
    assert_eq!(sink.count(NotificationKind::Failure), 0);
}

#[tokio::test(start_paused = true)]
async fn transport_failures_back_off_longer() {
    let sender = Arc::new(ScriptedSender::failing(1, true));
    let (manager, sink) = manager_with(sender.clone());
    let target = endpoint("https://hooks.example.com/a", "CRM", 0);

    manager.enqueue(&target, json!({}), "entry").await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    let attempts = sender.attempts();
    assert_eq!(attempts.len(), 2);
    let gap = attempts[1].at.duration_since(attempts[0].at);
    assert!(gap >= Duration::from_secs(2));
    assert_eq!(sink.count(NotificationKind::Success), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_report_failure_and_queue_continues() {
    // first entry burns all three attempts, second entry then succeeds
    let sender = Arc::new(ScriptedSender::failing(3, false));
    let (manager, sink) = manager_with(sender.clone());
    let target = endpoint("https://hooks.example.com/a", "CRM", 0);

    manager
        .enqueue(&target, json!({ "n": 1 }), "doomed")
        .await
        .unwrap();
    manager
        .enqueue(&target, json!({ "n": 2 }), "fine")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(sender.attempts().len(), 4);
    assert_eq!(sink.count(NotificationKind::Failure), 1);
    assert_eq!(sink.count(NotificationKind::Success), 1);
    let failure = sink
        .received()
        .into_iter()
        .find(|n| n.kind == NotificationKind::Failure)
        .unwrap();
    assert!(failure.message.contains("doomed"));
    assert_eq!(manager.queue_depth("https://hooks.example.com/a").await, 0);
}

#[tokio::test(start_paused = true)]
async fn queued_notification_refreshes_while_waiting() {
    let sender = Arc::new(ScriptedSender::reliable());
    let sink = Arc::new(RecordingSink::new());
    let manager = DeliveryQueueManager::with_sender(sink.clone(), sender)
        .with_refresh(Duration::from_secs(5), Duration::from_secs(60));
    let target = endpoint("https://hooks.example.com/a", "CRM", 30);

    manager.enqueue(&target, json!({}), "first").await.unwrap();
    manager.enqueue(&target, json!({}), "second").await.unwrap();
    tokio::time::sleep(Duration::from_secs(20)).await;

    // initial queued notice plus refreshes at ~5 s cadence while waiting
    assert!(sink.count(NotificationKind::Queued) >= 3);

    tokio::time::sleep(Duration::from_secs(60)).await;
    let final_queued = sink.count(NotificationKind::Queued);
    tokio::time::sleep(Duration::from_secs(60)).await;
    // refresh stops once the queue empties
    assert_eq!(sink.count(NotificationKind::Queued), final_queued);
}

#[tokio::test]
async fn invalid_endpoint_url_rejected() {
    let sender = Arc::new(ScriptedSender::reliable());
    let (manager, _sink) = manager_with(sender);
    let target = endpoint("ftp://example.com/a", "Bad", 0);

    let err = manager
        .enqueue(&target, json!({}), "entry")
        .await
        .unwrap_err();
    assert!(matches!(err, DeliverError::InvalidEndpoint(_)));
}

fn sample_summary(records: usize) -> SessionSummary {
    let records = (0..records)
        .map(|i| ConnectionRecord {
            name: format!("Person {i}"),
            profile_url: format!("https://example.com/in/person-{i}"),
            headline: None,
            location: None,
            image_url: None,
            degree_label: None,
            premium: false,
            extracted_at: Utc::now(),
        })
        .collect();
    SessionSummary {
        session_id: SessionId::generate(),
        source: SourceProfile {
            name: Some("Jane Doe".to_string()),
            profile_url: "https://example.com/in/jane-doe".to_string(),
            encoded_id: None,
        },
        records,
        pages_scraped: 1,
        duration_ms: 1000,
        outcome: SessionOutcome::Completed,
    }
}

#[tokio::test(start_paused = true)]
async fn deliver_summary_fans_out_to_active_endpoints() {
    let sender = Arc::new(ScriptedSender::reliable());
    let (manager, _sink) = manager_with(sender.clone());
    let config = DeliveryConfig {
        endpoints: vec![
            endpoint("https://hooks.example.com/a", "A", 0),
            endpoint("https://hooks.example.com/b", "B", 0),
        ],
        bidirectional: true,
        ..DeliveryConfig::default()
    };

    // aggregate plus two relationship payloads, to two endpoints
    let enqueued = deliver_summary(&manager, &config, &sample_summary(2))
        .await
        .unwrap();
    assert_eq!(enqueued, 6);

    tokio::time::sleep(Duration::from_secs(5)).await;
    let attempts = sender.attempts();
    assert_eq!(attempts.len(), 6);
    let aggregates = attempts
        .iter()
        .filter(|a| a.payload.get("totalCount").is_some())
        .count();
    assert_eq!(aggregates, 2);
    let relationships = attempts
        .iter()
        .filter(|a| a.payload["metadata"]["relationType"] == "mutual_connection")
        .count();
    assert_eq!(relationships, 4);
}

#[tokio::test]
async fn deliver_summary_respects_send_mode_none() {
    let sender = Arc::new(ScriptedSender::reliable());
    let (manager, _sink) = manager_with(sender.clone());
    let config = DeliveryConfig {
        endpoints: vec![endpoint("https://hooks.example.com/a", "A", 0)],
        send_mode: SendMode::None,
        ..DeliveryConfig::default()
    };

    let enqueued = deliver_summary(&manager, &config, &sample_summary(1))
        .await
        .unwrap();
    assert_eq!(enqueued, 0);
    assert!(sender.attempts().is_empty());
}
