//! Page object support.
//!
//! The crate defines no concrete page; it provides the skeleton suites
//! hang their page objects on: a trait carrying the page's URL identity
//! and load budget, and a pattern type for asserting URLs.

use serde::{Deserialize, Serialize};

/// Pattern for matching page URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlPattern {
    /// Exact URL match
    Exact(String),
    /// Prefix match
    Prefix(String),
    /// Contains substring
    Contains(String),
    /// Regex match
    Regex(String),
    /// Match any URL
    Any,
}

impl UrlPattern {
    /// Check if a URL matches this pattern.
    ///
    /// An invalid regex never matches.
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(pattern) => url == pattern,
            Self::Prefix(pattern) => url.starts_with(pattern),
            Self::Contains(pattern) => url.contains(pattern),
            Self::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(url))
                .unwrap_or(false),
            Self::Any => true,
        }
    }
}

/// Trait for page objects representing a page or screen in the UI.
///
/// # Example
///
/// ```ignore
/// struct ApplicationsPage;
///
/// impl PageObject for ApplicationsPage {
///     fn url_pattern(&self) -> &UrlPattern {
///         static PATTERN: UrlPattern = UrlPattern::Any;
///         &PATTERN
///     }
/// }
/// ```
pub trait PageObject {
    /// URL pattern identifying this page
    fn url_pattern(&self) -> &UrlPattern;

    /// Page name for logging and error messages
    fn page_name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Load budget for this page in milliseconds
    fn load_timeout_ms(&self) -> u64 {
        30_000
    }
}
