//! Grapnel deliver - per-endpoint rate-limited payload delivery.
//!
//! Each destination endpoint gets its own strictly-FIFO queue with a
//! minimum inter-send interval; endpoints never wait on each other. Sends
//! POST JSON with bounded retry, and the external observer hears about
//! queueing, success, and permanent failure through the notification sink.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod pipeline;
pub mod queue;
pub mod sender;

pub use error::{DeliverError, Result, SendError};
pub use pipeline::deliver_summary;
pub use queue::{DeliveryQueueManager, RetryPolicy};
pub use sender::{HttpSender, PayloadSender};
