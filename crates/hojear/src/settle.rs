//! Page stabilization contract.
//!
//! After each pagination advance the external system needs time to reach a
//! quiescent state before probing is meaningful. What "quiescent" means is
//! a policy question (network idle, document ready, a fixed pause), so the
//! engine takes it as an injected [`Settle`] dependency rather than hiding
//! a global wait. Doubles can settle instantly or slowly, deterministically.

use crate::result::HojearResult;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::time::Duration;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for settle operations (30 seconds)
pub const DEFAULT_SETTLE_TIMEOUT_MS: u64 = 30_000;

/// Network idle threshold (500ms without requests)
pub const NETWORK_IDLE_THRESHOLD_MS: u64 = 500;

// =============================================================================
// LOAD STATE
// =============================================================================

/// Page load states a browser-backed settle strategy can wait on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// Wait for the `load` event to fire
    Load,
    /// Wait for `DOMContentLoaded`
    DomContentLoaded,
    /// Wait for network to be idle (no requests for 500ms)
    NetworkIdle,
}

impl LoadState {
    /// Get the browser event name for this load state
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::NetworkIdle => "networkidle",
        }
    }

    /// Get default timeout for this load state
    #[must_use]
    pub const fn default_timeout_ms(&self) -> u64 {
        match self {
            Self::Load | Self::DomContentLoaded => DEFAULT_SETTLE_TIMEOUT_MS,
            Self::NetworkIdle => 60_000, // Network idle can take longer
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::NetworkIdle
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_name())
    }
}

// =============================================================================
// SETTLE TRAIT
// =============================================================================

/// Strategy for waiting until the current screen is settled.
#[async_trait]
pub trait Settle: Send + Sync {
    /// Suspend until the external system is judged quiescent.
    async fn wait_settled(&self) -> HojearResult<()>;

    /// Description for logs and error messages.
    fn description(&self) -> String {
        "settle".to_string()
    }
}

/// Settle strategy that resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSettle;

#[async_trait]
impl Settle for InstantSettle {
    async fn wait_settled(&self) -> HojearResult<()> {
        Ok(())
    }

    fn description(&self) -> String {
        "instant".to_string()
    }
}

/// Settle strategy that pauses for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Create a fixed-delay strategy
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a fixed-delay strategy from milliseconds
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// The configured delay
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Settle for FixedDelay {
    async fn wait_settled(&self) -> HojearResult<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    fn description(&self) -> String {
        format!("fixed delay {}ms", self.delay.as_millis())
    }
}

/// A function-based settle strategy.
///
/// The closure is invoked once per settle wait and returns the future to
/// await, so state captured by the closure can observe every call.
pub struct FnSettle<F>
where
    F: Fn() -> BoxFuture<'static, HojearResult<()>> + Send + Sync,
{
    func: F,
    description: String,
}

impl<F> FnSettle<F>
where
    F: Fn() -> BoxFuture<'static, HojearResult<()>> + Send + Sync,
{
    /// Create a new function-based settle strategy
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

impl<F> std::fmt::Debug for FnSettle<F>
where
    F: Fn() -> BoxFuture<'static, HojearResult<()>> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSettle")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> Settle for FnSettle<F>
where
    F: Fn() -> BoxFuture<'static, HojearResult<()>> + Send + Sync,
{
    async fn wait_settled(&self) -> HojearResult<()> {
        (self.func)().await
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::result::HojearError;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    mod load_state_tests {
        use super::*;

        #[test]
        fn test_event_names() {
            assert_eq!(LoadState::Load.event_name(), "load");
            assert_eq!(LoadState::DomContentLoaded.event_name(), "DOMContentLoaded");
            assert_eq!(LoadState::NetworkIdle.event_name(), "networkidle");
        }

        #[test]
        fn test_default_timeouts() {
            assert_eq!(LoadState::Load.default_timeout_ms(), 30_000);
            assert_eq!(LoadState::DomContentLoaded.default_timeout_ms(), 30_000);
            assert_eq!(LoadState::NetworkIdle.default_timeout_ms(), 60_000);
        }

        #[test]
        fn test_default_is_network_idle() {
            assert_eq!(LoadState::default(), LoadState::NetworkIdle);
        }

        #[test]
        fn test_display() {
            assert_eq!(format!("{}", LoadState::NetworkIdle), "networkidle");
        }
    }

    mod instant_settle_tests {
        use super::*;

        #[tokio::test]
        async fn test_resolves_immediately() {
            let settle = InstantSettle;
            assert!(settle.wait_settled().await.is_ok());
            assert_eq!(settle.description(), "instant");
        }
    }

    mod fixed_delay_tests {
        use super::*;

        #[tokio::test]
        async fn test_waits_at_least_the_delay() {
            let settle = FixedDelay::from_millis(20);
            let start = Instant::now();
            settle.wait_settled().await.unwrap();
            assert!(start.elapsed() >= Duration::from_millis(20));
        }

        #[test]
        fn test_description_includes_delay() {
            let settle = FixedDelay::new(Duration::from_millis(250));
            assert!(settle.description().contains("250"));
            assert_eq!(settle.delay(), Duration::from_millis(250));
        }
    }

    mod fn_settle_tests {
        use super::*;

        #[tokio::test]
        async fn test_closure_runs_per_wait() {
            let calls = Arc::new(AtomicUsize::new(0));
            let counter = calls.clone();
            let settle = FnSettle::new(
                move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }
                    .boxed()
                },
                "counting",
            );

            settle.wait_settled().await.unwrap();
            settle.wait_settled().await.unwrap();
            assert_eq!(calls.load(Ordering::SeqCst), 2);
            assert_eq!(settle.description(), "counting");
        }

        #[tokio::test]
        async fn test_closure_error_propagates() {
            let settle = FnSettle::new(
                || {
                    async {
                        Err(HojearError::Page {
                            message: "never settled".to_string(),
                        })
                    }
                    .boxed()
                },
                "failing",
            );

            let err = settle.wait_settled().await.unwrap_err();
            assert!(matches!(err, HojearError::Page { .. }));
        }
    }
}
