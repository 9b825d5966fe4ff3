//! Chromium-backed page host.

use crate::error::{HostError, Result};
use crate::fingerprint::FingerprintConfig;
use crate::host::PageHost;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;

/// Production [`PageHost`] driving a headless Chromium instance.
pub struct ChromiumHost {
    #[allow(dead_code)]
    browser: Browser,
    page: Page,
    #[allow(dead_code)]
    fingerprint: FingerprintConfig,
}

impl ChromiumHost {
    /// Launch a browser with a randomized fingerprint and open `start_url`.
    pub async fn launch(start_url: &str) -> Result<Self> {
        Self::launch_with_fingerprint(start_url, FingerprintConfig::randomized()).await
    }

    /// Launch with a specific fingerprint.
    pub async fn launch_with_fingerprint(
        start_url: &str,
        fingerprint: FingerprintConfig,
    ) -> Result<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .build()
            .map_err(HostError::Chromium)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| HostError::Chromium(e.to_string()))?;

        // The handler stream must be polled for the browser to make progress.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {e}");
                }
            }
        });

        let page = browser
            .new_page(start_url)
            .await
            .map_err(|e| HostError::Navigation(e.to_string()))?;

        page.set_user_agent(&fingerprint.user_agent)
            .await
            .map_err(|e| HostError::Chromium(e.to_string()))?;

        Ok(Self {
            browser,
            page,
            fingerprint,
        })
    }
}

#[async_trait::async_trait]
impl PageHost for ChromiumHost {
    async fn document_html(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| HostError::Chromium(e.to_string()))
    }

    async fn click_first(&self, candidates: &[String]) -> Result<()> {
        for candidate in candidates {
            if let Ok(element) = self.page.find_element(candidate.as_str()).await {
                element
                    .click()
                    .await
                    .map_err(|e| HostError::Navigation(e.to_string()))?;
                return Ok(());
            }
        }
        Err(HostError::SelectorNotFound(candidates.join(", ")))
    }

    async fn scroll_by(&self, delta_y: f64) -> Result<()> {
        self.page
            .evaluate(format!("window.scrollBy(0, {delta_y})"))
            .await
            .map_err(|e| HostError::Evaluation(e.to_string()))?;
        Ok(())
    }
}
