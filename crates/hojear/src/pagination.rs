//! Pagination search engine.
//!
//! Scans an unbounded, linearly-ordered sequence of pages for a target
//! element and performs one caller-selected action on the first occurrence:
//! activate it, extract its text, or report presence. The engine owns only
//! the scan loop; visibility, activation, and page stabilization are the
//! injected [`Element`](crate::element::Element) and
//! [`Settle`](crate::settle::Settle) contracts.
//!
//! On every page the target probe strictly precedes the advance probe, so
//! the advance control is activated at most once per page and the target is
//! still checked on the final page after the advance control is gone.

use crate::element::{try_visible, Element};
use crate::result::{HojearError, HojearResult};
use crate::settle::Settle;
use std::time::{Duration, Instant};
use tracing::debug;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default per-probe visibility budget (2 seconds)
///
/// Deliberately much shorter than assertion budgets: the scan itself is the
/// retry, and a long probe would multiply across every page visited. Use
/// [`Paginator::with_probe_timeout`] for slow-rendering pages.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

// =============================================================================
// SEARCH ACTION
// =============================================================================

/// Action performed on the target once it is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchAction {
    /// Activate the target
    Click,
    /// Read the target's visible text
    GetText,
    /// Only report whether the target exists
    Exists,
}

impl SearchAction {
    /// Get the action name string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::GetText => "text",
            Self::Exists => "exists",
        }
    }
}

impl std::fmt::Display for SearchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// SEARCH OUTCOME
// =============================================================================

/// Successful outcome of a pagination search, shaped by the requested action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The target was found and activated
    Clicked,
    /// The target was found and its text extracted
    Text(String),
    /// Presence report: `true` if the target was found on any page
    Exists(bool),
}

impl SearchOutcome {
    /// Whether this outcome proves the target was present
    #[must_use]
    pub const fn found(&self) -> bool {
        match self {
            Self::Clicked | Self::Text(_) => true,
            Self::Exists(present) => *present,
        }
    }

    /// Extracted text, if this is a text outcome
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Clicked | Self::Exists(_) => None,
        }
    }
}

// =============================================================================
// PAGINATOR
// =============================================================================

/// Pagination search engine.
///
/// Stateless between calls; one instance can serve any number of searches.
/// Concurrent searches against the same external system race on its single
/// current page, so callers must serialize them.
///
/// ## Example
///
/// ```ignore
/// let paginator = Paginator::new().with_deadline(Duration::from_secs(120));
/// let outcome = paginator
///     .search(&row, &next_button, &settle, SearchAction::Click)
///     .await?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    probe_timeout: Duration,
    deadline: Option<Duration>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            deadline: None,
        }
    }
}

impl Paginator {
    /// Create a paginator with the default probe budget and no deadline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-probe visibility budget
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Arm a whole-search deadline.
    ///
    /// Without one, a perpetually-visible advance control (cyclic
    /// pagination) makes the scan non-terminating. Expiry surfaces as
    /// [`HojearError::DeadlineExceeded`], never as `TargetNotFound`.
    #[must_use]
    pub const fn with_deadline(mut self, limit: Duration) -> Self {
        self.deadline = Some(limit);
        self
    }

    /// The configured per-probe budget
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// The configured whole-search deadline, if any
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Search the page sequence for `target`, advancing via `next`.
    ///
    /// The caller must already be on page 1. After each advance activation
    /// the injected `settle` dependency is awaited before re-probing.
    ///
    /// # Errors
    ///
    /// - [`HojearError::TargetNotFound`] when the sequence is exhausted and
    ///   the action was `Click` or `GetText`.
    /// - [`HojearError::DeadlineExceeded`] when an armed deadline expires.
    /// - Any activation, settle, or non-timeout probe failure, unmodified.
    pub async fn search<E, N, S>(
        &self,
        target: &E,
        next: &N,
        settle: &S,
        action: SearchAction,
    ) -> HojearResult<SearchOutcome>
    where
        E: Element + ?Sized,
        N: Element + ?Sized,
        S: Settle + ?Sized,
    {
        match self.deadline {
            None => self.scan(target, next, settle, action).await,
            Some(limit) => {
                // Two layers: the wall-clock check inside the scan catches
                // fast-cycling loops that never yield, the outer timeout
                // catches hangs inside a single probe, click, or settle.
                let ms = limit.as_millis() as u64;
                match tokio::time::timeout(limit, self.scan(target, next, settle, action)).await {
                    Ok(result) => result,
                    Err(_) => Err(HojearError::DeadlineExceeded { ms }),
                }
            }
        }
    }

    async fn scan<E, N, S>(
        &self,
        target: &E,
        next: &N,
        settle: &S,
        action: SearchAction,
    ) -> HojearResult<SearchOutcome>
    where
        E: Element + ?Sized,
        N: Element + ?Sized,
        S: Settle + ?Sized,
    {
        let expiry = self.deadline.map(|limit| (Instant::now() + limit, limit));
        let mut page: u32 = 1;

        loop {
            if let Some((at, limit)) = expiry {
                if Instant::now() >= at {
                    return Err(HojearError::DeadlineExceeded {
                        ms: limit.as_millis() as u64,
                    });
                }
            }

            if try_visible(target, self.probe_timeout).await? {
                debug!(
                    target_element = %target.label(),
                    page,
                    %action,
                    "target found"
                );
                return match action {
                    SearchAction::Click => {
                        target.click().await?;
                        Ok(SearchOutcome::Clicked)
                    }
                    SearchAction::GetText => Ok(SearchOutcome::Text(target.inner_text().await?)),
                    SearchAction::Exists => Ok(SearchOutcome::Exists(true)),
                };
            }

            if try_visible(next, self.probe_timeout).await? {
                debug!(page, advance = %next.label(), "advancing to next page");
                next.click().await?;
                settle.wait_settled().await?;
                page += 1;
            } else {
                debug!(pages = page, %action, "sequence exhausted");
                return match action {
                    SearchAction::Exists => Ok(SearchOutcome::Exists(false)),
                    SearchAction::Click | SearchAction::GetText => {
                        Err(HojearError::TargetNotFound { pages: page })
                    }
                };
            }
        }
    }

    /// Search and activate the target.
    ///
    /// # Errors
    ///
    /// Same as [`Paginator::search`].
    pub async fn click<E, N, S>(&self, target: &E, next: &N, settle: &S) -> HojearResult<()>
    where
        E: Element + ?Sized,
        N: Element + ?Sized,
        S: Settle + ?Sized,
    {
        self.search(target, next, settle, SearchAction::Click)
            .await
            .map(|_| ())
    }

    /// Search and extract the target's text.
    ///
    /// # Errors
    ///
    /// Same as [`Paginator::search`].
    pub async fn text<E, N, S>(&self, target: &E, next: &N, settle: &S) -> HojearResult<String>
    where
        E: Element + ?Sized,
        N: Element + ?Sized,
        S: Settle + ?Sized,
    {
        match self.search(target, next, settle, SearchAction::GetText).await? {
            SearchOutcome::Text(text) => Ok(text),
            other => Err(HojearError::InvalidState {
                message: format!("text search produced non-text outcome {other:?}"),
            }),
        }
    }

    /// Search and report whether the target exists on any page.
    ///
    /// Exhaustion is a valid `false` here, not an error.
    ///
    /// # Errors
    ///
    /// Deadline expiry and collaborator failures, as in [`Paginator::search`].
    pub async fn exists<E, N, S>(&self, target: &E, next: &N, settle: &S) -> HojearResult<bool>
    where
        E: Element + ?Sized,
        N: Element + ?Sized,
        S: Settle + ?Sized,
    {
        match self.search(target, next, settle, SearchAction::Exists).await? {
            SearchOutcome::Exists(found) => Ok(found),
            // Any other outcome proves presence
            _ => Ok(true),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
