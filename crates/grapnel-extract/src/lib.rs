//! Grapnel extract - resilient DOM scraping.
//!
//! This crate turns the unstable, semi-obfuscated markup of the source site
//! into structured records. Every logical field is looked up through an
//! ordered fallback-selector list so the parser survives markup redesigns:
//! a selector that fails to parse or match simply advances to the next
//! candidate, and total exhaustion yields a `None` field rather than an
//! error. Records are best-effort and partial records are valid.
//!
//! Selector tables are plain data ([`SelectorTable`]) passed into
//! [`PageParser`] at construction, so selector drift can be patched without
//! touching parsing logic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod fields;
pub mod page;
pub mod record;
pub mod section;
pub mod selectors;

pub use page::{ConnectionsAffordance, PageParser, INLINE_NAMED_CONNECTIONS};
pub use record::{
    ConnectionRecord, EducationEntry, ExperienceEntry, ProfileRecord, SkillEntry,
};
pub use selectors::{ProfileSelectors, ResultSelectors, SelectorTable};
