//! Anti-detection policy: pacing, block-signal inspection, human scroll.
//!
//! Pacing inserts a randomized suspension before any page-affecting
//! action, wider between pages than between in-page item extractions.
//! Inspection scans the current document for block signals; a tripped
//! block signal is a fatal stop for the calling session, never retried
//! or swallowed - unlike ordinary extraction misses, which are always
//! swallowed.

use crate::host::PageHost;
use crate::Result;
use rand::Rng;
use std::time::Duration;

/// Default pacing bounds between page fetches, in milliseconds.
pub const PAGE_DELAY_MS: (u64, u64) = (2000, 7000);

/// Default pacing bounds between in-page item extractions, in milliseconds.
pub const ITEM_DELAY_MS: (u64, u64) = (200, 500);

/// Markup-level block markers: CAPTCHA widgets, challenge pages,
/// authentication walls, security checkpoints.
const BLOCK_MARKERS: &[&str] = &[
    "captcha",
    "g-recaptcha",
    "challenge-page",
    "challenge-form",
    "authwall",
    "checkpoint",
];

/// Rate-limit phrasing that shows up in block-page body text.
const BLOCK_PHRASES: &[&str] = &[
    "slow down",
    "too many requests",
    "unusual activity",
    "security verification",
];

/// Suspend for a uniformly random duration in `[min_ms, max_ms]`.
pub async fn random_delay(min_ms: u64, max_ms: u64) {
    let (min_ms, max_ms) = if min_ms <= max_ms {
        (min_ms, max_ms)
    } else {
        (max_ms, min_ms)
    };
    let millis = rand::thread_rng().gen_range(min_ms..=max_ms);
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// Scan a document for block signals. Any single marker or phrase is
/// sufficient to report blocked.
#[must_use]
pub fn detect_blocked(html: &str) -> bool {
    let lowered = html.to_lowercase();
    let marker = BLOCK_MARKERS.iter().find(|m| lowered.contains(**m));
    let phrase = BLOCK_PHRASES.iter().find(|p| lowered.contains(**p));

    if let Some(signal) = marker.or(phrase) {
        tracing::warn!(signal, "block signal detected on page");
        return true;
    }
    false
}

/// Scroll toward `target_y` in several eased steps over roughly 1-3
/// seconds, instead of one instant jump.
pub async fn human_scroll(host: &dyn PageHost, target_y: f64) -> Result<()> {
    let (steps, total_ms) = {
        let mut rng = rand::thread_rng();
        (rng.gen_range(6..=12_u32), rng.gen_range(1000..=3000_u64))
    };
    let step_delta = target_y / f64::from(steps);
    let step_pause = Duration::from_millis(total_ms / u64::from(steps));

    for _ in 0..steps {
        host.scroll_by(step_delta).await?;
        tokio::time::sleep(step_pause).await;
    }
    Ok(())
}
