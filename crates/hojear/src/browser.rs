//! Real browser backend over the Chrome DevTools Protocol.
//!
//! Compiled only with the `browser` feature. Provides CDP-backed
//! implementations of both collaborator contracts: [`CdpElement`] for
//! [`Element`](crate::element::Element) and [`CdpSettle`] for
//! [`Settle`](crate::settle::Settle). Element operations run through
//! script evaluation with JSON-escaped selectors; visibility is computed
//! style + layout, the way a user would judge it.

use crate::element::Element;
use crate::result::{HojearError, HojearResult};
use crate::settle::{LoadState, Settle, NETWORK_IDLE_THRESHOLD_MS};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Polling interval for script-driven waits (100ms)
const SCRIPT_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// CONFIG
// =============================================================================

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// Browser instance with a live CDP connection
#[derive(Debug)]
pub struct Browser {
    config: BrowserConfig,
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a new browser instance.
    ///
    /// # Errors
    ///
    /// [`HojearError::BrowserLaunch`] if the browser cannot be started.
    pub async fn launch(config: BrowserConfig) -> HojearResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(|e| HojearError::BrowserLaunch {
            message: e.to_string(),
        })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| HojearError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        // Drive the CDP event stream until the connection drops
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!(headless = config.headless, "browser launched");

        Ok(Self {
            config,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a new blank page.
    ///
    /// # Errors
    ///
    /// [`HojearError::Page`] if the page cannot be created.
    pub async fn new_page(&self) -> HojearResult<BrowserPage> {
        let browser = self.inner.lock().await;
        let cdp_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| HojearError::Page {
                message: e.to_string(),
            })?;

        Ok(BrowserPage {
            inner: Arc::new(Mutex::new(cdp_page)),
            url: String::from("about:blank"),
        })
    }

    /// The launch configuration
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Shut the browser down.
    ///
    /// # Errors
    ///
    /// [`HojearError::BrowserLaunch`] if shutdown fails.
    pub async fn close(self) -> HojearResult<()> {
        let mut browser = self.inner.lock().await;
        browser.close().await.map_err(|e| HojearError::BrowserLaunch {
            message: e.to_string(),
        })?;
        Ok(())
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// An open browser page
#[derive(Debug)]
pub struct BrowserPage {
    inner: Arc<Mutex<CdpPage>>,
    url: String,
}

impl BrowserPage {
    /// Navigate to a URL.
    ///
    /// # Errors
    ///
    /// [`HojearError::Page`] on navigation failure.
    pub async fn goto(&mut self, url: &str) -> HojearResult<()> {
        {
            let page = self.inner.lock().await;
            page.goto(url).await.map_err(|e| HojearError::Page {
                message: format!("navigation to {url} failed: {e}"),
            })?;
        }
        self.url = url.to_string();
        Ok(())
    }

    /// Current URL as last navigated
    #[must_use]
    pub fn current_url(&self) -> &str {
        &self.url
    }

    /// Element handle for a CSS selector on this page
    #[must_use]
    pub fn element(&self, selector: impl Into<String>) -> CdpElement {
        CdpElement {
            page: Arc::clone(&self.inner),
            selector: selector.into(),
        }
    }

    /// Settle strategy waiting for a load state on this page
    #[must_use]
    pub fn settle(&self, state: LoadState) -> CdpSettle {
        CdpSettle {
            page: Arc::clone(&self.inner),
            state,
        }
    }

    /// Evaluate a script and deserialize its result.
    ///
    /// # Errors
    ///
    /// [`HojearError::Page`] on evaluation or deserialization failure.
    pub async fn eval<T: serde::de::DeserializeOwned>(&self, script: &str) -> HojearResult<T> {
        evaluate(&self.inner, script).await
    }
}

async fn evaluate<T: serde::de::DeserializeOwned>(
    page: &Arc<Mutex<CdpPage>>,
    script: &str,
) -> HojearResult<T> {
    let page = page.lock().await;
    let result = page.evaluate(script).await.map_err(|e| HojearError::Page {
        message: e.to_string(),
    })?;
    result.into_value().map_err(|e| HojearError::Page {
        message: e.to_string(),
    })
}

// Selectors are interpolated into scripts; JSON encoding both quotes and
// escapes them.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

// =============================================================================
// ELEMENT
// =============================================================================

/// CDP-backed element handle, resolved by CSS selector at interaction time
#[derive(Debug, Clone)]
pub struct CdpElement {
    page: Arc<Mutex<CdpPage>>,
    selector: String,
}

fn visibility_script(selector: &str) -> String {
    format!(
        "(() => {{ \
            const el = document.querySelector({sel}); \
            if (!el) return false; \
            const style = window.getComputedStyle(el); \
            const rect = el.getBoundingClientRect(); \
            return style.display !== 'none' \
                && style.visibility !== 'hidden' \
                && rect.width > 0 && rect.height > 0; \
        }})()",
        sel = js_string(selector)
    )
}

fn click_script(selector: &str) -> String {
    format!(
        "(() => {{ \
            const el = document.querySelector({sel}); \
            if (!el) return false; \
            el.click(); \
            return true; \
        }})()",
        sel = js_string(selector)
    )
}

fn inner_text_script(selector: &str) -> String {
    format!(
        "(() => {{ \
            const el = document.querySelector({sel}); \
            return el ? el.innerText : null; \
        }})()",
        sel = js_string(selector)
    )
}

impl CdpElement {
    /// The CSS selector this handle resolves
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

#[async_trait]
impl Element for CdpElement {
    async fn wait_visible(&self, timeout: Duration) -> HojearResult<()> {
        let script = visibility_script(&self.selector);
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let visible: bool = evaluate(&self.page, &script).await?;
            if visible {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(HojearError::Timeout {
                    ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(Duration::from_millis(SCRIPT_POLL_INTERVAL_MS)).await;
        }
    }

    async fn click(&self) -> HojearResult<()> {
        let script = click_script(&self.selector);

        let clicked: bool = evaluate(&self.page, &script)
            .await
            .map_err(|e| HojearError::Interaction {
                message: e.to_string(),
            })?;

        if clicked {
            Ok(())
        } else {
            Err(HojearError::ElementNotFound {
                selector: self.selector.clone(),
            })
        }
    }

    async fn inner_text(&self) -> HojearResult<String> {
        let script = inner_text_script(&self.selector);

        let text: Option<String> =
            evaluate(&self.page, &script)
                .await
                .map_err(|e| HojearError::Interaction {
                    message: e.to_string(),
                })?;

        text.ok_or_else(|| HojearError::ElementNotFound {
            selector: self.selector.clone(),
        })
    }

    fn label(&self) -> String {
        self.selector.clone()
    }
}

// =============================================================================
// SETTLE
// =============================================================================

/// CDP-backed settle strategy driven by document ready state.
///
/// `NetworkIdle` is approximated: document complete, then a quiet window of
/// [`NETWORK_IDLE_THRESHOLD_MS`].
#[derive(Debug, Clone)]
pub struct CdpSettle {
    page: Arc<Mutex<CdpPage>>,
    state: LoadState,
}

impl CdpSettle {
    /// The load state this strategy waits on
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }
}

#[async_trait]
impl Settle for CdpSettle {
    async fn wait_settled(&self) -> HojearResult<()> {
        let required = match self.state {
            LoadState::DomContentLoaded => "interactive",
            LoadState::Load | LoadState::NetworkIdle => "complete",
        };
        let script = format!(
            "document.readyState === 'complete' || document.readyState === {required}",
            required = js_string(required)
        );

        let timeout = Duration::from_millis(self.state.default_timeout_ms());
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let ready: bool = evaluate(&self.page, &script).await?;
            if ready {
                break;
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(HojearError::Page {
                    message: format!(
                        "page did not reach '{}' within {}ms",
                        self.state,
                        timeout.as_millis()
                    ),
                });
            }
            tokio::time::sleep(Duration::from_millis(SCRIPT_POLL_INTERVAL_MS)).await;
        }

        if self.state == LoadState::NetworkIdle {
            tokio::time::sleep(Duration::from_millis(NETWORK_IDLE_THRESHOLD_MS)).await;
        }

        Ok(())
    }

    fn description(&self) -> String {
        format!("load state {}", self.state)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = BrowserConfig::default();
            assert!(config.headless);
            assert!(config.sandbox);
            assert_eq!(config.viewport_width, 1280);
            assert_eq!(config.viewport_height, 720);
            assert!(config.chromium_path.is_none());
        }

        #[test]
        fn test_builder_chain() {
            let config = BrowserConfig::default()
                .with_viewport(1920, 1080)
                .with_headless(false)
                .with_no_sandbox()
                .with_chromium_path("/usr/bin/chromium");
            assert_eq!(config.viewport_width, 1920);
            assert!(!config.headless);
            assert!(!config.sandbox);
            assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        }
    }

    mod script_tests {
        use super::*;

        #[test]
        fn test_js_string_escapes_quotes() {
            assert_eq!(js_string("a'b\"c"), "\"a'b\\\"c\"");
        }

        #[test]
        fn test_visibility_script_embeds_escaped_selector() {
            let script = visibility_script("button[data-id=\"next\"]");
            assert!(script.contains("document.querySelector(\"button[data-id=\\\"next\\\"]\")"));
            assert!(script.contains("getBoundingClientRect"));
        }

        #[test]
        fn test_click_script_reports_missing_element() {
            let script = click_script("#go");
            assert!(script.contains("if (!el) return false"));
            assert!(script.contains("el.click()"));
        }

        #[test]
        fn test_inner_text_script_yields_null_when_missing() {
            let script = inner_text_script(".banner");
            assert!(script.contains("el.innerText : null"));
        }
    }
}
