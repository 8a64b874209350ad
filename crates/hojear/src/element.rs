//! Element contract and test doubles.
//!
//! The pagination engine and the interaction flows never talk to a browser
//! directly. They operate on the [`Element`] trait: a bounded-timeout
//! visibility wait, an activation, and a text read. The `browser` feature
//! provides a CDP-backed implementation; [`MockElement`] provides an
//! instrumented in-memory one for tests.

use crate::result::{HojearError, HojearResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// An interactable element on the page under test.
///
/// `wait_visible` must resolve once the element is visible and fail with
/// [`HojearError::Timeout`] when it is not visible within the budget. Any
/// other failure mode (lost connection, detached node, script error) must
/// surface as a different variant so callers can tell "not found in time"
/// from "something broke".
#[async_trait]
pub trait Element: Send + Sync {
    /// Wait until the element is visible, up to `timeout`.
    async fn wait_visible(&self, timeout: Duration) -> HojearResult<()>;

    /// Activate the element (canonical click interaction).
    async fn click(&self) -> HojearResult<()>;

    /// Read the element's visible text.
    async fn inner_text(&self) -> HojearResult<String>;

    /// Diagnostic name used in logs and error messages.
    fn label(&self) -> String {
        "element".to_string()
    }
}

/// Probe an element's visibility without treating "not in time" as an error.
///
/// Absorbs ONLY [`HojearError::Timeout`], converting it to `Ok(false)`.
/// Every other failure escalates unchanged: a probe that dies because the
/// page crashed is not the same thing as a probe that ran out of time.
///
/// # Errors
///
/// Returns any non-timeout error raised by the underlying wait.
pub async fn try_visible<E: Element + ?Sized>(
    element: &E,
    timeout: Duration,
) -> HojearResult<bool> {
    match element.wait_visible(timeout).await {
        Ok(()) => Ok(true),
        Err(HojearError::Timeout { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Shared call recorder for verifying interaction order across doubles.
///
/// Cloning is cheap and clones share the same underlying log, so one
/// `CallLog` can be handed to several [`MockElement`]s (and to a settle
/// double) to capture a single interleaved sequence of events.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn record(&self, entry: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.into());
    }

    /// Snapshot of all entries in recording order
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Check if any entry starts with the given prefix
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.starts_with(prefix))
    }

    /// Number of recorded entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory element double with a scripted visibility schedule.
///
/// Visibility is expressed as "fail the first N probes, then report
/// visible": `visible_after(name, 3)` times out three probes and succeeds
/// on the fourth, which models an element that appears on page 4 of a
/// paginated sequence.
#[derive(Debug)]
pub struct MockElement {
    name: String,
    visible_after: usize,
    hide_after: Option<usize>,
    text: String,
    click_failure: Option<String>,
    probe_failure: Option<String>,
    probes: AtomicUsize,
    clicks: AtomicUsize,
    text_reads: AtomicUsize,
    log: Option<CallLog>,
}

impl MockElement {
    fn with_schedule(name: impl Into<String>, visible_after: usize) -> Self {
        Self {
            name: name.into(),
            visible_after,
            hide_after: None,
            text: String::new(),
            click_failure: None,
            probe_failure: None,
            probes: AtomicUsize::new(0),
            clicks: AtomicUsize::new(0),
            text_reads: AtomicUsize::new(0),
            log: None,
        }
    }

    /// Element that is visible from the first probe
    #[must_use]
    pub fn visible(name: impl Into<String>) -> Self {
        Self::with_schedule(name, 0)
    }

    /// Element that never becomes visible
    #[must_use]
    pub fn hidden(name: impl Into<String>) -> Self {
        Self::with_schedule(name, usize::MAX)
    }

    /// Element that times out the first `failed_probes` probes, then is visible
    #[must_use]
    pub fn visible_after(name: impl Into<String>, failed_probes: usize) -> Self {
        Self::with_schedule(name, failed_probes)
    }

    /// Element visible for the first `probes` probes, then gone for good.
    ///
    /// Models a pagination control that disappears on the last page.
    #[must_use]
    pub fn visible_until(name: impl Into<String>, probes: usize) -> Self {
        let mut element = Self::with_schedule(name, 0);
        element.hide_after = Some(probes);
        element
    }

    /// Set the text returned by `inner_text`
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Make every `click` fail with an interaction error
    #[must_use]
    pub fn with_click_failure(mut self, message: impl Into<String>) -> Self {
        self.click_failure = Some(message.into());
        self
    }

    /// Make every probe fail with an interaction error (not a timeout)
    #[must_use]
    pub fn with_probe_failure(mut self, message: impl Into<String>) -> Self {
        self.probe_failure = Some(message.into());
        self
    }

    /// Attach a shared call log
    #[must_use]
    pub fn with_log(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    /// Element name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of visibility probes received
    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    /// Number of clicks received
    #[must_use]
    pub fn click_count(&self) -> usize {
        self.clicks.load(Ordering::SeqCst)
    }

    /// Number of text reads received
    #[must_use]
    pub fn text_read_count(&self) -> usize {
        self.text_reads.load(Ordering::SeqCst)
    }

    fn record(&self, event: &str) {
        if let Some(ref log) = self.log {
            log.record(format!("{}.{event}", self.name));
        }
    }
}

#[async_trait]
impl Element for MockElement {
    async fn wait_visible(&self, timeout: Duration) -> HojearResult<()> {
        self.record("wait_visible");
        let attempt = self.probes.fetch_add(1, Ordering::SeqCst);

        if let Some(ref message) = self.probe_failure {
            return Err(HojearError::Interaction {
                message: message.clone(),
            });
        }

        let hidden_again = self.hide_after.is_some_and(|limit| attempt >= limit);
        if attempt >= self.visible_after && !hidden_again {
            Ok(())
        } else {
            Err(HojearError::Timeout {
                ms: timeout.as_millis() as u64,
            })
        }
    }

    async fn click(&self) -> HojearResult<()> {
        self.record("click");
        self.clicks.fetch_add(1, Ordering::SeqCst);

        match self.click_failure {
            Some(ref message) => Err(HojearError::Interaction {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn inner_text(&self) -> HojearResult<String> {
        self.record("inner_text");
        self.text_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
