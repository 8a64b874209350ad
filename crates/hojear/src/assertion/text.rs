//! Polling text expectations.
//!
//! Success and error banners render asynchronously, so a one-shot text
//! comparison races the UI. [`expect_text`] polls the element until the
//! expectation holds or the budget runs out, and reports the last observed
//! text on failure. Comparison is on trimmed text.

use crate::element::{try_visible, Element};
use crate::result::{HojearError, HojearResult};
use std::time::Duration;
use tokio::time::Instant;

/// Default expectation budget (60 seconds)
pub const DEFAULT_ASSERT_TIMEOUT_MS: u64 = 60_000;

/// Default polling interval (250ms)
pub const DEFAULT_ASSERT_POLL_MS: u64 = 250;

/// Start a polling text expectation against `element`
pub fn expect_text<E: Element + ?Sized>(element: &E) -> TextExpectation<'_, E> {
    TextExpectation {
        element,
        timeout: Duration::from_millis(DEFAULT_ASSERT_TIMEOUT_MS),
        poll_interval: Duration::from_millis(DEFAULT_ASSERT_POLL_MS),
    }
}

/// A pending text expectation; terminal methods run the poll loop
#[derive(Debug)]
pub struct TextExpectation<'a, E: Element + ?Sized> {
    element: &'a E,
    timeout: Duration,
    poll_interval: Duration,
}

impl<'a, E: Element + ?Sized> TextExpectation<'a, E> {
    /// Set the overall expectation budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval (also used as the per-probe budget)
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Expect the element's trimmed text to equal `expected`.
    ///
    /// # Errors
    ///
    /// [`HojearError::AssertionFailed`] on budget expiry, carrying the last
    /// observed text; probe runtime failures and text-read failures
    /// escalate unchanged.
    pub async fn to_equal(&self, expected: &str) -> HojearResult<()> {
        self.poll(
            |text| text == expected,
            |last| format!("to equal {expected:?}, {last}"),
        )
        .await
    }

    /// Expect the element's trimmed text to contain `fragment`.
    ///
    /// # Errors
    ///
    /// Same as [`TextExpectation::to_equal`].
    pub async fn to_contain(&self, fragment: &str) -> HojearResult<()> {
        self.poll(
            |text| text.contains(fragment),
            |last| format!("to contain {fragment:?}, {last}"),
        )
        .await
    }

    /// Expect the element to become visible within the budget.
    ///
    /// # Errors
    ///
    /// [`HojearError::AssertionFailed`] on budget expiry; probe runtime
    /// failures escalate.
    pub async fn to_be_visible(&self) -> HojearResult<()> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if try_visible(self.element, self.poll_interval).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(HojearError::AssertionFailed {
                    message: format!(
                        "expected '{}' to be visible within {}ms",
                        self.element.label(),
                        self.timeout.as_millis()
                    ),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn poll<M, D>(&self, matches: M, describe: D) -> HojearResult<()>
    where
        M: Fn(&str) -> bool,
        D: Fn(&str) -> String,
    {
        let deadline = Instant::now() + self.timeout;
        let mut last_observed: Option<String> = None;

        loop {
            if try_visible(self.element, self.poll_interval).await? {
                let text = self.element.inner_text().await?;
                let trimmed = text.trim().to_string();
                if matches(&trimmed) {
                    return Ok(());
                }
                last_observed = Some(trimmed);
            }

            if Instant::now() >= deadline {
                let last = last_observed.map_or_else(
                    || "element never visible".to_string(),
                    |text| format!("last observed {text:?}"),
                );
                return Err(HojearError::AssertionFailed {
                    message: format!("expected text of '{}' {}", self.element.label(), describe(&last)),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::element::MockElement;

    #[tokio::test]
    async fn test_equal_passes_on_trimmed_text() {
        let banner = MockElement::visible("banner").with_text("  Deployment succeeded \n");
        expect_text(&banner)
            .to_equal("Deployment succeeded")
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_equal_waits_for_late_element() {
        // Visible on the third probe; well inside the default budget
        let banner = MockElement::visible_after("banner", 2).with_text("Done");
        expect_text(&banner).to_equal("Done").await.unwrap();
        assert_eq!(banner.probe_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_equal_failure_reports_last_observed() {
        let banner = MockElement::visible("banner").with_text("Pending");
        let err = expect_text(&banner)
            .with_timeout(Duration::from_millis(500))
            .with_poll_interval(Duration::from_millis(100))
            .to_equal("Done")
            .await
            .unwrap_err();

        match err {
            HojearError::AssertionFailed { message } => {
                assert!(message.contains("\"Done\""));
                assert!(message.contains("last observed \"Pending\""));
            }
            other => panic!("expected AssertionFailed, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_on_never_visible_element() {
        let ghost = MockElement::hidden("ghost");
        let err = expect_text(&ghost)
            .with_timeout(Duration::from_millis(300))
            .with_poll_interval(Duration::from_millis(100))
            .to_contain("anything")
            .await
            .unwrap_err();

        match err {
            HojearError::AssertionFailed { message } => {
                assert!(message.contains("element never visible"));
            }
            other => panic!("expected AssertionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_contain_passes() {
        let banner = MockElement::visible("banner").with_text("Application onboarded: demo-app");
        expect_text(&banner).to_contain("onboarded").await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_to_be_visible() {
        let late = MockElement::visible_after("late", 1);
        expect_text(&late).to_be_visible().await.unwrap();

        let ghost = MockElement::hidden("ghost");
        let err = expect_text(&ghost)
            .with_timeout(Duration::from_millis(200))
            .with_poll_interval(Duration::from_millis(50))
            .to_be_visible()
            .await
            .unwrap_err();
        assert!(matches!(err, HojearError::AssertionFailed { .. }));
    }

    #[tokio::test]
    async fn test_probe_runtime_error_escalates() {
        let broken = MockElement::visible("broken").with_probe_failure("socket closed");
        let err = expect_text(&broken).to_equal("x").await.unwrap_err();
        assert!(matches!(err, HojearError::Interaction { .. }));
    }

    #[test]
    fn test_builder_configuration() {
        let banner = MockElement::visible("banner");
        let expectation = expect_text(&banner)
            .with_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(50));
        assert_eq!(expectation.timeout, Duration::from_secs(5));
        assert_eq!(expectation.poll_interval, Duration::from_millis(50));
    }
}
