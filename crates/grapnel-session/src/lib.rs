//! Grapnel session - bounded multi-page collection and payload assembly.
//!
//! A session is one bounded run of paginated collection against a
//! connections result set: walk pages through the page parser under a page
//! cap and wall-clock timeout, pace between fetches, abort on block
//! signals, and keep whatever was collected before an abort - partial data
//! has value. The payload builder then wraps the accumulated records into
//! the wire payloads delivery expects.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod collector;
pub mod error;
pub mod payload;

pub use collector::{SessionCollector, SessionOutcome, SessionSummary, SourceProfile};
pub use error::{Result, SessionError};
pub use payload::{
    ConnectionPayload, DeliveryPayload, OutboundPayload, PayloadMetadata, PAYLOAD_SOURCE,
    PAYLOAD_VERSION,
};
