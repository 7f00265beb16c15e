//! Data sanitization for secure logging
//!
//! A token travels through this crate in two shapes a log line could leak:
//! the raw credential, and the page URL carrying it as a query parameter.
//! Both get masked here before any tracing call sees them.

/// Sanitizer for sensitive data
///
/// Static helpers applied at every logging call site that touches a token
/// or a token-bearing URL.
pub struct Sanitizer;

impl Sanitizer {
    /// Sanitizes a token for safe logging
    ///
    /// Shows only the last 4 characters preceded by "***".
    ///
    /// # Examples
    ///
    /// ```
    /// use ssokit::security::Sanitizer;
    ///
    /// assert_eq!(Sanitizer::sanitize_token("eyJhbGciOiJIUzI1NiJ9"), "***NiJ9");
    /// assert_eq!(Sanitizer::sanitize_token("abc"), "****");
    /// ```
    pub fn sanitize_token(token: &str) -> String {
        if token.len() > 4 {
            format!("***{}", &token[token.len() - 4..])
        } else {
            "****".to_string()
        }
    }

    /// Sanitizes a URL by removing query parameters and fragments
    ///
    /// The page URL at capture time carries the token in its query string;
    /// log the sanitized form, never the whole URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use ssokit::security::Sanitizer;
    ///
    /// assert_eq!(
    ///     Sanitizer::sanitize_url("https://app.example.com/index?token=secret"),
    ///     "https://app.example.com/index"
    /// );
    /// ```
    pub fn sanitize_url(url: &str) -> String {
        url.split('?')
            .next()
            .unwrap_or(url)
            .split('#')
            .next()
            .unwrap_or(url)
            .to_string()
    }
}
