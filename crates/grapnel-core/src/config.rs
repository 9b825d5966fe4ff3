//! Pipeline configuration.
//!
//! The host application assembles a [`DeliveryConfig`] and passes it in;
//! the pipeline itself never touches persistent storage. All sections use
//! `serde(default)` so partial configurations deserialize cleanly.

use serde::{Deserialize, Serialize};

/// Top-level configuration handed to the pipeline by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Configured destination endpoints.
    pub endpoints: Vec<EndpointConfig>,
    /// Which endpoints receive collected payloads.
    pub send_mode: SendMode,
    /// Emit one extra payload per connection, describing the relationship
    /// from that connection's point of view.
    pub bidirectional: bool,
    /// Override for the between-pages pacing delay, in seconds. `None`
    /// keeps the randomized default bounds.
    pub pacing_delay_override_secs: Option<u64>,
    /// Bounds on a single collection session.
    pub session: SessionLimits,
}

impl DeliveryConfig {
    /// Endpoints that should receive payloads under the configured
    /// [`SendMode`].
    #[must_use]
    pub fn active_endpoints(&self) -> Vec<&EndpointConfig> {
        match &self.send_mode {
            SendMode::None => Vec::new(),
            SendMode::All => self.endpoints.iter().collect(),
            SendMode::Selected { endpoints } => self
                .endpoints
                .iter()
                .filter(|e| endpoints.iter().any(|url| url == &e.url))
                .collect(),
        }
    }
}

/// One configured destination endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Destination URL payloads are POSTed to.
    pub url: String,
    /// Human-readable name used in notifications.
    pub display_name: String,
    /// Minimum interval between sends to this endpoint, in seconds.
    /// `0` means unlimited.
    #[serde(default)]
    pub min_interval_secs: u64,
}

/// Which configured endpoints receive collected payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendMode {
    /// Deliver to no endpoints (collection only).
    None,
    /// Deliver to every configured endpoint.
    #[default]
    All,
    /// Deliver only to the listed endpoint URLs.
    Selected {
        /// URLs of the chosen endpoints.
        endpoints: Vec<String>,
    },
}

/// Bounds on a single multi-page collection session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionLimits {
    /// Maximum result pages to walk in one session.
    pub max_pages: u32,
    /// Wall-clock session timeout in seconds.
    pub session_timeout_secs: u64,
    /// Bounded wait for a new page's results container, in seconds. The
    /// session proceeds regardless of outcome once this elapses.
    pub page_load_wait_secs: u64,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_pages: 50,
            session_timeout_secs: 300,
            page_load_wait_secs: 10,
        }
    }
}
