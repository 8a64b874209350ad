//! Soft assertions.
//!
//! Collects failures without stopping the flow, so a long scenario can
//! report every broken expectation in one run instead of dying on the
//! first. `verify()` turns the collected failures into a single
//! [`HojearError::AssertionFailed`].

use crate::result::{HojearError, HojearResult};
use std::fmt::Debug;

/// Soft assertion collector.
///
/// ## Example
///
/// ```ignore
/// let mut soft = SoftAssertions::new();
/// soft.assert_true(status.is_ok(), "deployment status");
/// soft.assert_contains(&banner_text, "succeeded", "completion banner");
/// soft.verify()?;
/// ```
#[derive(Debug, Default)]
pub struct SoftAssertions {
    failures: Vec<String>,
    checks: usize,
}

impl SoftAssertions {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert a condition is true
    pub fn assert_true(&mut self, condition: bool, message: &str) {
        self.checks += 1;
        if !condition {
            self.failures.push(format!("{message}: expected true, got false"));
        }
    }

    /// Assert a condition is false
    pub fn assert_false(&mut self, condition: bool, message: &str) {
        self.checks += 1;
        if condition {
            self.failures.push(format!("{message}: expected false, got true"));
        }
    }

    /// Assert two values are equal
    pub fn assert_eq<T: PartialEq + Debug>(&mut self, actual: &T, expected: &T, message: &str) {
        self.checks += 1;
        if actual != expected {
            self.failures
                .push(format!("{message}: expected {expected:?}, got {actual:?}"));
        }
    }

    /// Assert a string contains a substring
    pub fn assert_contains(&mut self, haystack: &str, needle: &str, message: &str) {
        self.checks += 1;
        if !haystack.contains(needle) {
            self.failures.push(format!(
                "{message}: expected '{haystack}' to contain '{needle}'"
            ));
        }
    }

    /// Record a failure unconditionally
    pub fn fail(&mut self, message: impl Into<String>) {
        self.checks += 1;
        self.failures.push(message.into());
    }

    /// All recorded failure messages, in order
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Number of checks recorded so far
    #[must_use]
    pub const fn check_count(&self) -> usize {
        self.checks
    }

    /// Number of failed checks
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether every check so far passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Pass/fail totals for reporting
    #[must_use]
    pub fn summary(&self) -> AssertionSummary {
        AssertionSummary {
            total: self.checks,
            passed: self.checks - self.failures.len(),
            failed: self.failures.len(),
        }
    }

    /// Fail with every collected failure if any check failed.
    ///
    /// # Errors
    ///
    /// [`HojearError::AssertionFailed`] enumerating all failures.
    pub fn verify(&self) -> HojearResult<()> {
        if self.failures.is_empty() {
            return Ok(());
        }

        use std::fmt::Write as _;
        let mut message = format!("{} of {} check(s) failed:", self.failures.len(), self.checks);
        for (i, failure) in self.failures.iter().enumerate() {
            let _ = write!(message, "\n  {}. {failure}", i + 1);
        }
        Err(HojearError::AssertionFailed { message })
    }

    /// Reset the collector
    pub fn clear(&mut self) {
        self.failures.clear();
        self.checks = 0;
    }
}

/// Totals of a soft-assertion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssertionSummary {
    /// Checks recorded
    pub total: usize,
    /// Checks that passed
    pub passed: usize,
    /// Checks that failed
    pub failed: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collector_passes() {
        let soft = SoftAssertions::new();
        assert!(soft.all_passed());
        assert!(soft.verify().is_ok());
        assert_eq!(soft.check_count(), 0);
    }

    #[test]
    fn test_collects_multiple_failures() {
        let mut soft = SoftAssertions::new();
        soft.assert_true(false, "first");
        soft.assert_eq(&1, &2, "second");
        soft.assert_contains("hello", "world", "third");

        assert_eq!(soft.failure_count(), 3);
        assert_eq!(soft.check_count(), 3);
        assert!(!soft.all_passed());
    }

    #[test]
    fn test_mixed_pass_and_fail_summary() {
        let mut soft = SoftAssertions::new();
        soft.assert_true(true, "pass");
        soft.assert_false(true, "fail");
        soft.assert_eq(&"a", &"a", "pass");

        let summary = soft.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_verify_enumerates_all_failures() {
        let mut soft = SoftAssertions::new();
        soft.assert_eq(&1, &2, "count mismatch");
        soft.fail("banner missing");

        let err = soft.verify().unwrap_err();
        match err {
            HojearError::AssertionFailed { message } => {
                assert!(message.contains("2 of 2 check(s) failed"));
                assert!(message.contains("1. count mismatch"));
                assert!(message.contains("2. banner missing"));
            }
            other => panic!("expected AssertionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_failures_are_ordered() {
        let mut soft = SoftAssertions::new();
        soft.fail("a");
        soft.fail("b");
        assert_eq!(soft.failures(), ["a", "b"]);
    }

    #[test]
    fn test_clear_resets() {
        let mut soft = SoftAssertions::new();
        soft.assert_true(false, "fail");
        soft.clear();
        assert!(soft.all_passed());
        assert_eq!(soft.check_count(), 0);
    }
}
