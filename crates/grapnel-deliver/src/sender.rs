//! Payload dispatch seam.

use crate::error::SendError;
use grapnel_core::EndpointUrl;

/// Dispatches one payload to one endpoint. The queue manager drives all
/// retry and pacing; implementations make exactly one attempt per call.
#[async_trait::async_trait]
pub trait PayloadSender: Send + Sync {
    /// POST `payload` to `endpoint` once.
    async fn send(
        &self,
        endpoint: &EndpointUrl,
        payload: &serde_json::Value,
    ) -> Result<(), SendError>;
}

/// Production sender: JSON POST over reqwest.
pub struct HttpSender {
    client: reqwest::Client,
}

impl HttpSender {
    /// Create a sender with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PayloadSender for HttpSender {
    async fn send(
        &self,
        endpoint: &EndpointUrl,
        payload: &serde_json::Value,
    ) -> Result<(), SendError> {
        let response = self
            .client
            .post(endpoint.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SendError::Status(status.as_u16()))
        }
    }
}
