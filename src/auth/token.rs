//! Bearer token value type with automatic memory zeroization
//!
//! Tokens are opaque credentials handed back by the SSO server. They are
//! zeroed on drop, compared in constant time, and never rendered by `Debug`,
//! so a stray log line cannot leak them.

use std::fmt;
use zeroize::Zeroize;

/// An opaque bearer credential.
///
/// A token is either absent or a non-empty string; `Token::new` enforces the
/// non-empty half of that invariant, the `Option` it returns models the rest.
///
/// # Example
///
/// ```
/// use ssokit::auth::Token;
///
/// let token = Token::new("sk-example-token").unwrap();
/// assert_eq!(token.as_str(), "sk-example-token");
/// assert_eq!(token.bearer(), "Bearer sk-example-token");
/// assert!(Token::new("").is_none());
/// ```
#[derive(Clone)]
pub struct Token {
    inner: String,
}

impl Token {
    /// Creates a token from a raw credential string.
    ///
    /// Returns `None` for the empty string; there is no such thing as an
    /// empty token.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self { inner: value })
        }
    }

    /// Returns the raw credential value.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the credential in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Renders the token as an `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.inner)
    }
}

impl Drop for Token {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl Zeroize for Token {
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

// Intentionally NOT implementing Display to prevent accidental logging
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("len", &self.inner.len())
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        // Constant-time comparison to prevent timing attacks
        constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
    }
}

impl Eq for Token {}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        constant_time_eq(self.inner.as_bytes(), other.as_bytes())
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        constant_time_eq(self.inner.as_bytes(), other.as_bytes())
    }
}

/// Constant-time byte comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
