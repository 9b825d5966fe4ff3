//! Shared identifier newtypes.
//!
//! These newtypes give the pipeline type safety at its seams: session ids
//! tag every delivered payload, profile slugs are the stable identity of a
//! scraped profile, and endpoint URLs key the per-endpoint delivery queues.

use crate::error::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static UUID_V4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("valid regex")
});

/// Newtype for collection-session identifiers.
///
/// Session IDs are UUID v4 strings; they stamp every payload assembled from
/// one collection run so downstream receivers can group deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a `SessionId` from an existing string.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid UUID v4.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if UUID_V4.is_match(&id) {
            Ok(Self(id))
        } else {
            Err(CoreError::Validation(format!(
                "invalid session ID: must be a UUID v4, got '{id}'"
            )))
        }
    }

    /// Generate a fresh random `SessionId`.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable profile identifier derived from a profile URL path.
///
/// The slug is the last meaningful path segment of the canonical profile
/// URL (e.g. `https://example.com/in/jane-doe-1a2b/` -> `jane-doe-1a2b`).
/// Derivation is deterministic: the same URL always yields the same slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileSlug(String);

impl ProfileSlug {
    /// Derive a slug from a profile URL.
    ///
    /// Returns `None` when the URL cannot be parsed or has no non-empty
    /// path segment, in keeping with the best-effort extraction policy.
    #[must_use]
    pub fn derive(profile_url: &str) -> Option<Self> {
        let parsed = url::Url::parse(profile_url).ok()?;
        let slug = parsed
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .last()?
            .to_string();
        if slug.is_empty() {
            None
        } else {
            Some(Self(slug))
        }
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated destination endpoint URL.
///
/// Exactly one delivery queue exists per distinct endpoint URL, so the
/// canonical string form of this type is the queue key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointUrl(String);

impl EndpointUrl {
    /// Create an `EndpointUrl` from a string.
    ///
    /// # Errors
    /// Returns an error unless the string parses as an absolute http(s)
    /// URL with a host.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let parsed = url::Url::parse(&raw)
            .map_err(|e| CoreError::Validation(format!("invalid endpoint URL '{raw}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CoreError::Validation(format!(
                "invalid endpoint URL '{raw}': scheme must be http or https"
            )));
        }
        if parsed.host_str().is_none() {
            return Err(CoreError::Validation(format!(
                "invalid endpoint URL '{raw}': missing host"
            )));
        }
        Ok(Self(raw))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_valid() {
        let id = "550e8400-e29b-41d4-a716-446655440000";
        let session_id = SessionId::new(id).expect("valid session ID");
        assert_eq!(session_id.as_str(), id);
    }

    #[test]
    fn session_id_invalid() {
        for id in [
            "not-a-uuid",
            "550e8400-e29b-51d4-a716-446655440000", // wrong version
            "",
        ] {
            assert!(SessionId::new(id).is_err(), "should fail for: {id}");
        }
    }

    #[test]
    fn session_id_generate_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn slug_from_profile_url() {
        let slug = ProfileSlug::derive("https://example.com/in/jane-doe-1a2b/")
            .expect("slug from URL");
        assert_eq!(slug.as_str(), "jane-doe-1a2b");
    }

    #[test]
    fn slug_deterministic() {
        let url = "https://example.com/in/john-smith-77";
        assert_eq!(ProfileSlug::derive(url), ProfileSlug::derive(url));
    }

    #[test]
    fn slug_missing_path() {
        assert!(ProfileSlug::derive("https://example.com/").is_none());
        assert!(ProfileSlug::derive("not a url").is_none());
    }

    #[test]
    fn endpoint_url_valid() {
        let endpoint = EndpointUrl::new("https://hooks.example.com/ingest").expect("valid URL");
        assert_eq!(endpoint.as_str(), "https://hooks.example.com/ingest");
    }

    #[test]
    fn endpoint_url_invalid() {
        assert!(EndpointUrl::new("ftp://example.com/x").is_err());
        assert!(EndpointUrl::new("nonsense").is_err());
    }
}
