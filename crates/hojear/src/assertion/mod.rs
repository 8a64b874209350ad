//! Assertion helpers for E2E flows.
//!
//! Two layers: polling text expectations over an
//! [`Element`](crate::element::Element) for eventually-consistent banners
//! and labels, and a soft-assertion collector that records failures without
//! stopping the flow.

pub mod soft;
pub mod text;

pub use soft::{AssertionSummary, SoftAssertions};
pub use text::{
    expect_text, TextExpectation, DEFAULT_ASSERT_POLL_MS, DEFAULT_ASSERT_TIMEOUT_MS,
};
