//! Structured records produced by the parsers.
//!
//! All records are best-effort: absence of a DOM node yields a `None`
//! field, never an error. The only hard requirements are the single
//! required field per entry type (title / school / name) and, for
//! connection rows, name plus profile URL - rows missing those are dropped
//! by the section parser rather than represented here.

use chrono::{DateTime, Utc};
use grapnel_core::ProfileSlug;
use serde::{Deserialize, Serialize};

/// One fully parsed profile page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Display name.
    pub name: Option<String>,
    /// Headline / title line under the name.
    pub headline: Option<String>,
    /// Location line.
    pub location: Option<String>,
    /// Profile image URL.
    pub image_url: Option<String>,
    /// Canonical profile URL.
    pub profile_url: Option<String>,
    /// About / summary text.
    pub about: Option<String>,
    /// Connections count parsed from its label, when present.
    pub connections_count: Option<u64>,
    /// Followers count parsed from its label, when present.
    pub followers_count: Option<u64>,
    /// Mutual-connections count (includes the inline-named offset).
    pub mutual_connections_count: Option<u64>,
    /// URL of the shared-connections search, when the affordance exists.
    pub mutual_connections_url: Option<String>,
    /// Whether a premium badge element is present.
    pub premium: bool,
    /// Stable identifier derived deterministically from the profile URL.
    pub slug: Option<ProfileSlug>,
    /// Experience entries that passed required-field validation.
    pub experience: Vec<ExperienceEntry>,
    /// Education entries that passed required-field validation.
    pub education: Vec<EducationEntry>,
    /// Skill entries that passed required-field validation.
    pub skills: Vec<SkillEntry>,
    /// When this record was extracted.
    pub extracted_at: DateTime<Utc>,
}

/// One experience (position) entry. `title` is the only required field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    /// Position title.
    pub title: String,
    /// Company name.
    pub company: Option<String>,
    /// Free-text date range, kept verbatim.
    pub duration: Option<String>,
    /// Location line.
    pub location: Option<String>,
    /// Description text.
    pub description: Option<String>,
}

/// One education entry. `school` is the only required field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    /// Institution name.
    pub school: String,
    /// Degree name.
    pub degree: Option<String>,
    /// Field of study.
    pub field_of_study: Option<String>,
    /// Free-text date range, kept verbatim.
    pub duration: Option<String>,
    /// Description text.
    pub description: Option<String>,
}

/// One skill entry. `name` is the only required field.
///
/// The endorsement count is kept as free text since the source formats it
/// inconsistently (e.g. "99+").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    /// Skill name.
    pub name: String,
    /// Endorsement count label, verbatim.
    pub endorsements: Option<String>,
}

/// One search-result row. Name and profile URL are the fields downstream
/// identity matching depends on; rows missing either are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    /// Display name.
    pub name: String,
    /// Canonical profile URL.
    pub profile_url: String,
    /// Headline line.
    pub headline: Option<String>,
    /// Location line.
    pub location: Option<String>,
    /// Profile image URL.
    pub image_url: Option<String>,
    /// Connection-degree label (e.g. "2nd").
    pub degree_label: Option<String>,
    /// Whether a premium badge element is present.
    pub premium: bool,
    /// When this record was extracted.
    pub extracted_at: DateTime<Utc>,
}
