//! Trust policy for outgoing request URLs
//!
//! Decides which URLs are eligible to receive the bearer token. The check is
//! a plain prefix test over the URL string, not a URL parse — that matches
//! the permissive security model of the SSO scheme this crate implements,
//! and it is documented here rather than silently tightened.

/// Prefix reserved for local development hosts, always trusted.
const LOCALHOST_PREFIX: &str = "http://localhost:";

/// Pure predicate classifying URLs as trusted or not.
///
/// A URL is trusted iff it starts with the configured secure prefix (scheme
/// plus leading hostname fragment, e.g. `https://api.example`) or with
/// `http://localhost:`.
///
/// Because this is a prefix test, every hostname that merely *begins* with
/// the configured fragment also matches (`https://api.example-evil.com`
/// under the prefix `https://api.example`). Configure the prefix
/// accordingly. An empty prefix trusts localhost only.
///
/// # Example
///
/// ```
/// use ssokit::policy::TrustPolicy;
///
/// let policy = TrustPolicy::new("https://api.example.com");
/// assert!(policy.is_trusted("https://api.example.com/v1/data"));
/// assert!(policy.is_trusted("http://localhost:8080/v1/data"));
/// assert!(!policy.is_trusted("http://evil.com/v1/data"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustPolicy {
    secure_prefix: String,
}

impl TrustPolicy {
    /// Creates a policy trusting URLs under the given secure prefix
    pub fn new(secure_prefix: impl Into<String>) -> Self {
        Self {
            secure_prefix: secure_prefix.into(),
        }
    }

    /// Returns the configured secure prefix
    pub fn secure_prefix(&self) -> &str {
        &self.secure_prefix
    }

    /// Returns true iff `url` may receive the bearer token
    pub fn is_trusted(&self, url: &str) -> bool {
        if !self.secure_prefix.is_empty() && url.starts_with(&self.secure_prefix) {
            return true;
        }
        url.starts_with(LOCALHOST_PREFIX)
    }
}
