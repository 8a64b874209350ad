//! Reusable element-interaction flows.
//!
//! Small routines a browser E2E suite keeps reaching for around the
//! pagination engine: fallback-chain lookups for buttons whose markup
//! varies between deployments, best-effort popup dismissal, and guided
//! click sequences for product tours.

use crate::element::{try_visible, Element};
use crate::result::{HojearError, HojearResult};
use std::time::Duration;
use tracing::debug;

/// Default per-candidate visibility budget for fallback lookups (6 seconds)
pub const DEFAULT_CANDIDATE_TIMEOUT_MS: u64 = 6_000;

/// Pause after dismissing an overlay, for the close animation (500ms)
pub const POST_DISMISS_PAUSE_MS: u64 = 500;

/// Probe `candidates` in order and return the index of the first visible one.
///
/// Probe timeouts are absorbed per candidate; runtime failures escalate.
///
/// # Errors
///
/// [`HojearError::ElementNotFound`] when no candidate becomes visible, or
/// any non-timeout probe failure.
pub async fn first_visible(
    candidates: &[&dyn Element],
    timeout: Duration,
) -> HojearResult<usize> {
    for (index, candidate) in candidates.iter().enumerate() {
        if try_visible(*candidate, timeout).await? {
            debug!(index, label = %candidate.label(), "candidate visible");
            return Ok(index);
        }
    }

    let labels: Vec<String> = candidates.iter().map(|c| c.label()).collect();
    Err(HojearError::ElementNotFound {
        selector: labels.join(", "),
    })
}

/// Like [`first_visible`], then activate the winning candidate.
///
/// # Errors
///
/// [`HojearError::ElementNotFound`] when no candidate becomes visible, plus
/// any activation failure from the winner.
pub async fn click_first_visible(
    candidates: &[&dyn Element],
    timeout: Duration,
) -> HojearResult<usize> {
    let index = first_visible(candidates, timeout).await?;
    candidates[index].click().await?;
    Ok(index)
}

/// Dismiss an overlay if it is currently shown.
///
/// Probes `popup` within `timeout`; when visible, activates `close` and
/// pauses [`POST_DISMISS_PAUSE_MS`] for the dismiss animation. Absence is
/// not an error: returns whether a dismissal happened.
///
/// # Errors
///
/// Non-timeout probe failures and activation failures of `close`.
pub async fn dismiss_if_visible(
    popup: &dyn Element,
    close: &dyn Element,
    timeout: Duration,
) -> HojearResult<bool> {
    if !try_visible(popup, timeout).await? {
        return Ok(false);
    }

    debug!(popup = %popup.label(), "dismissing overlay");
    close.click().await?;
    tokio::time::sleep(Duration::from_millis(POST_DISMISS_PAUSE_MS)).await;
    Ok(true)
}

/// Walk a guided sequence of steps, waiting for and activating each in turn.
///
/// Unlike the probing helpers, a step that never appears is an error: the
/// sequence is broken and continuing would click the wrong thing.
///
/// # Errors
///
/// The first visibility or activation failure of any step.
pub async fn click_sequence(
    steps: &[&dyn Element],
    step_timeout: Duration,
) -> HojearResult<()> {
    for (index, step) in steps.iter().enumerate() {
        debug!(index, label = %step.label(), "sequence step");
        step.wait_visible(step_timeout).await?;
        step.click().await?;
    }
    Ok(())
}
