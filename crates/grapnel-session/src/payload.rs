//! Wire payload assembly.
//!
//! Payloads are POSTed as JSON with camelCase keys. The single variant
//! wraps the whole session; the bi-directional variant additionally emits
//! one payload per connection describing the relationship from that
//! connection's point of view, so downstream systems can index it from
//! either side.

use crate::collector::{SessionSummary, SourceProfile};
use chrono::{DateTime, Utc};
use grapnel_core::SessionId;
use grapnel_extract::ConnectionRecord;
use serde::{Deserialize, Serialize};

/// Schema version tag stamped into payload metadata.
pub const PAYLOAD_VERSION: &str = "1.0";

/// Source tag stamped into payload metadata.
pub const PAYLOAD_SOURCE: &str = "grapnel";

/// Relation tag on per-connection payloads.
const RELATION_MUTUAL: &str = "mutual_connection";

/// Metadata block common to every payload variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadMetadata {
    /// Assembly timestamp.
    pub timestamp: DateTime<Utc>,
    /// Session the payload was collected in.
    pub session_id: SessionId,
    /// Schema version tag.
    pub version: String,
    /// Producing system tag.
    pub source: String,
    /// Relation tag, present only on per-connection payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<String>,
}

impl PayloadMetadata {
    fn new(session_id: SessionId, relation_type: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id,
            version: PAYLOAD_VERSION.to_string(),
            source: PAYLOAD_SOURCE.to_string(),
            relation_type,
        }
    }
}

/// The aggregate payload: one session's records in a single object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPayload {
    /// The profile the session collected connections for.
    pub profile_viewed: SourceProfile,
    /// All accumulated connection records.
    pub mutual_connections: Vec<ConnectionRecord>,
    /// Number of records in `mutual_connections`.
    pub total_count: usize,
    /// Result pages parsed during the session.
    pub pages_scraped: u32,
    /// Session wall-clock duration in milliseconds.
    pub extraction_duration: u64,
    /// Payload metadata.
    pub metadata: PayloadMetadata,
}

/// A per-connection payload describing the relationship from that
/// connection's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPayload {
    /// The connection, cast as the profile being described.
    pub profile_viewed: SourceProfile,
    /// The session's source profile, as the shared contact.
    pub mutual_connections_with: SourceProfile,
    /// The full connection record.
    pub connection_details: ConnectionRecord,
    /// Payload metadata with `relationType` set.
    pub metadata: PayloadMetadata,
}

/// Either payload variant, serialized by shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutboundPayload {
    /// The aggregate session payload.
    Aggregate(Box<DeliveryPayload>),
    /// A per-connection relationship payload.
    Relationship(Box<ConnectionPayload>),
}

/// Build the single aggregate payload for a session.
#[must_use]
pub fn build_single(summary: &SessionSummary) -> DeliveryPayload {
    DeliveryPayload {
        profile_viewed: summary.source.clone(),
        mutual_connections: summary.records.clone(),
        total_count: summary.records.len(),
        pages_scraped: summary.pages_scraped,
        extraction_duration: summary.duration_ms,
        metadata: PayloadMetadata::new(summary.session_id.clone(), None),
    }
}

/// Build the aggregate payload plus one relationship payload per
/// connection record.
#[must_use]
pub fn build_bidirectional(summary: &SessionSummary) -> Vec<OutboundPayload> {
    let mut payloads = Vec::with_capacity(summary.records.len() + 1);
    payloads.push(OutboundPayload::Aggregate(Box::new(build_single(summary))));

    for record in &summary.records {
        payloads.push(OutboundPayload::Relationship(Box::new(ConnectionPayload {
            profile_viewed: SourceProfile {
                name: Some(record.name.clone()),
                profile_url: record.profile_url.clone(),
                encoded_id: None,
            },
            mutual_connections_with: summary.source.clone(),
            connection_details: record.clone(),
            metadata: PayloadMetadata::new(
                summary.session_id.clone(),
                Some(RELATION_MUTUAL.to_string()),
            ),
        })));
    }

    payloads
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::SessionOutcome;

    fn sample_summary() -> SessionSummary {
        let record = ConnectionRecord {
            name: "Alex Roe".to_string(),
            profile_url: "https://example.com/in/alex-roe".to_string(),
            headline: Some("Designer".to_string()),
            location: None,
            image_url: None,
            degree_label: Some("2nd".to_string()),
            premium: false,
            extracted_at: Utc::now(),
        };
        SessionSummary {
            session_id: SessionId::generate(),
            source: SourceProfile {
                name: Some("Jane Doe".to_string()),
                profile_url: "https://example.com/in/jane-doe".to_string(),
                encoded_id: Some("XYZ".to_string()),
            },
            records: vec![record.clone(), ConnectionRecord {
                name: "Bo Li".to_string(),
                profile_url: "https://example.com/in/bo-li".to_string(),
                ..record
            }],
            pages_scraped: 2,
            duration_ms: 4200,
            outcome: SessionOutcome::Completed,
        }
    }

    #[test]
    fn single_payload_wire_shape() {
        let summary = sample_summary();
        let json = serde_json::to_value(build_single(&summary)).expect("serialize payload");

        assert_eq!(json["profileViewed"]["name"], "Jane Doe");
        assert_eq!(json["profileViewed"]["encodedId"], "XYZ");
        assert_eq!(json["totalCount"], 2);
        assert_eq!(json["pagesScraped"], 2);
        assert_eq!(json["extractionDuration"], 4200);
        assert_eq!(json["metadata"]["version"], PAYLOAD_VERSION);
        assert_eq!(json["metadata"]["source"], PAYLOAD_SOURCE);
        assert_eq!(
            json["metadata"]["sessionId"],
            summary.session_id.as_str()
        );
        // relationType is absent on the aggregate payload
        assert!(json["metadata"].get("relationType").is_none());
        assert_eq!(json["mutualConnections"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn bidirectional_emits_aggregate_plus_one_per_connection() {
        let summary = sample_summary();
        let payloads = build_bidirectional(&summary);
        assert_eq!(payloads.len(), 1 + summary.records.len());

        let json =
            serde_json::to_value(&payloads[1]).expect("serialize relationship payload");
        assert_eq!(json["profileViewed"]["name"], "Alex Roe");
        assert_eq!(json["mutualConnectionsWith"]["name"], "Jane Doe");
        assert_eq!(json["connectionDetails"]["profileUrl"], summary.records[0].profile_url);
        assert_eq!(json["metadata"]["relationType"], "mutual_connection");
    }
}
