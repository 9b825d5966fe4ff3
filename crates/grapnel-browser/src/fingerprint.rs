//! Browser fingerprint randomization.

use rand::seq::SliceRandom;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
];

const VIEWPORTS: &[(u32, u32)] = &[(1920, 1080), (1536, 864), (1440, 900), (1366, 768)];

/// A randomized browser identity for one host instance.
///
/// Picked once at launch so the identity stays consistent for the whole
/// session; varying it mid-session is itself a detection signal.
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    /// User-agent string presented to the site.
    pub user_agent: String,
    /// Viewport width in pixels.
    pub viewport_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
    /// Accept-Language header value.
    pub accept_language: String,
}

impl FingerprintConfig {
    /// Pick a random identity from the common-desktop pools.
    #[must_use]
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();
        let user_agent = USER_AGENTS
            .choose(&mut rng)
            .copied()
            .unwrap_or(USER_AGENTS[0])
            .to_string();
        let (viewport_width, viewport_height) =
            *VIEWPORTS.choose(&mut rng).unwrap_or(&VIEWPORTS[0]);

        Self {
            user_agent,
            viewport_width,
            viewport_height,
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn randomized_fields_are_populated() {
        let config = FingerprintConfig::randomized();
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.viewport_width >= 1366);
        assert!(config.viewport_height >= 768);
    }

    #[test]
    fn identities_vary_across_launches() {
        let configs: Vec<_> = (0..32).map(|_| FingerprintConfig::randomized()).collect();
        let first = &configs[0].user_agent;
        assert!(
            configs.iter().any(|c| &c.user_agent != first),
            "expected some variation across 32 draws"
        );
    }
}
