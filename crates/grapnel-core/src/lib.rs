//! Grapnel core - shared types and interfaces.
//!
//! This crate defines the types shared by every stage of the extraction
//! pipeline: validated identifier newtypes, the plain configuration object
//! supplied by the host application, and the notification-sink interface
//! through which the pipeline reports delivery progress.
//!
//! The core never reads or writes persistent storage; configuration is
//! handed in by the caller and notifications are handed back out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod notify;
pub mod types;

pub use config::{DeliveryConfig, EndpointConfig, SendMode, SessionLimits};
pub use error::{CoreError, Result};
pub use notify::{Notification, NotificationKind, NotificationSink, RecordingSink};
pub use types::{EndpointUrl, ProfileSlug, SessionId};
