//! Grapnel browser - host-page access and anti-detection pacing.
//!
//! The collector never talks to a browser directly; it goes through the
//! [`PageHost`] trait, an async request/response seam decoupled from any
//! specific transport. [`ChromiumHost`] is the production implementation.
//! The [`policy`] module carries the pacing and block-signal logic that
//! keeps the pipeline from tripping anti-automation countermeasures - and
//! stops it cold when they trip anyway.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod host;
pub mod policy;

pub use engine::ChromiumHost;
pub use error::{HostError, Result};
pub use fingerprint::FingerprintConfig;
pub use host::{wait_for, PageHost};
