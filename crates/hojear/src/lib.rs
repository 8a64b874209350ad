//! Hojear: pagination search engine for browser E2E suites
//!
//! Hojear (Spanish: "to leaf through") drives a search across a paginated
//! UI: probe the current page for a target element, advance to the next
//! page when it is absent, and perform one caller-selected action on the
//! first occurrence found. Around the engine it carries the seams and
//! helpers a real suite needs: the element and settle contracts with
//! instrumented doubles, fallback-chain interaction flows, polling text
//! assertions, a soft-assertion collector, typed fixture loading, and an
//! optional CDP-backed browser.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     HOJEAR Architecture                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐     ┌────────────┐     ┌────────────┐       │
//! │   │ Test Flow  │     │ Paginator  │     │ Element /  │       │
//! │   │ (Rust)     │────►│ scan loop  │────►│ Settle     │       │
//! │   │            │     │            │     │ contracts  │       │
//! │   └────────────┘     └────────────┘     └─────┬──────┘       │
//! │                                               │              │
//! │                               mock doubles ◄──┴──► CDP page  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use hojear::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> HojearResult<()> {
//! // A row that appears on page 3 of a paginated table
//! let row = MockElement::visible_after("row", 2);
//! let next = MockElement::visible("next-page");
//!
//! let paginator = Paginator::new().with_deadline(Duration::from_secs(60));
//! let outcome = paginator
//!     .search(&row, &next, &InstantSettle, SearchAction::GetText)
//!     .await?;
//! assert!(outcome.found());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod assertion;
pub mod data;
pub mod element;
pub mod flows;
pub mod page;
pub mod pagination;
pub mod result;
pub mod settle;

#[cfg(feature = "browser")]
pub mod browser;

pub use element::{try_visible, CallLog, Element, MockElement};
pub use pagination::{Paginator, SearchAction, SearchOutcome, DEFAULT_PROBE_TIMEOUT_MS};
pub use result::{HojearError, HojearResult};
pub use settle::{FixedDelay, FnSettle, InstantSettle, LoadState, Settle};

#[cfg(feature = "browser")]
pub use browser::{Browser, BrowserConfig, BrowserPage, CdpElement, CdpSettle};

/// Initialize tracing output for tests.
///
/// Respects `RUST_LOG`; safe to call from every test, repeated calls are
/// no-ops.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Commonly used types and functions
pub mod prelude {
    pub use crate::assertion::{expect_text, SoftAssertions, TextExpectation};
    pub use crate::data::{load_json, load_yaml, load_yaml_str};
    pub use crate::element::{try_visible, CallLog, Element, MockElement};
    pub use crate::flows::{
        click_first_visible, click_sequence, dismiss_if_visible, first_visible,
        DEFAULT_CANDIDATE_TIMEOUT_MS,
    };
    pub use crate::page::{PageObject, UrlPattern};
    pub use crate::pagination::{
        Paginator, SearchAction, SearchOutcome, DEFAULT_PROBE_TIMEOUT_MS,
    };
    pub use crate::result::{HojearError, HojearResult};
    pub use crate::settle::{FixedDelay, FnSettle, InstantSettle, LoadState, Settle};

    #[cfg(feature = "browser")]
    pub use crate::browser::{Browser, BrowserConfig, BrowserPage, CdpElement, CdpSettle};
}
