//! URL helpers for token capture and SSO redirects
//!
//! Everything here is a total function over plain URL strings: malformed
//! input degrades to "nothing found" or passes through unchanged, it never
//! errors. Query parsing deliberately mirrors the SSO scheme's wire format
//! (`&`-separated pairs split at the first `=`, values kept raw).

use std::borrow::Cow;

/// Returns the raw query portion of a URL (between `?` and `#`), if any.
fn raw_query(url: &str) -> Option<&str> {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    without_fragment.split_once('?').map(|(_, query)| query)
}

/// Extracts a query parameter value from a URL.
///
/// Pairs are `&`-separated and split at the FIRST `=`; a pair without `=`
/// never matches. The first occurrence of `name` wins. Values are returned
/// raw — NOT percent-decoded — because the SSO server hands the token back
/// verbatim and dependents may rely on the raw form.
///
/// # Example
///
/// ```
/// use ssokit::location::query_param;
///
/// assert_eq!(query_param("https://app/page?token=XYZ&other=1", "token"), Some("XYZ".to_string()));
/// assert_eq!(query_param("https://app/page", "token"), None);
/// assert_eq!(query_param("https://app/page?token=a%2Fb", "token"), Some("a%2Fb".to_string()));
/// ```
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let query = raw_query(url)?;
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            if key == name {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Returns the URL with its query string removed: origin + path + fragment.
///
/// This is the address a host should show after consuming a `?token=`
/// parameter, so the credential leaves the address bar and history while
/// any fragment routing state survives.
pub fn scrubbed(url: &str) -> String {
    let (without_fragment, fragment) = match url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (url, None),
    };
    let head = without_fragment
        .split_once('?')
        .map_or(without_fragment, |(head, _)| head);
    match fragment {
        Some(fragment) => format!("{head}#{fragment}"),
        None => head.to_string(),
    }
}

/// Returns the URL with query AND fragment removed: origin + path.
///
/// This is the "current page" a login redirect points back to.
pub fn page_base(url: &str) -> String {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    without_fragment
        .split_once('?')
        .map_or(without_fragment, |(head, _)| head)
        .to_string()
}

fn encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Builds login-page URLs for the external SSO server.
///
/// The SSO server receives a `redirect_uri` parameter and, after the user
/// signs in, sends them back there with `?token=<value>` appended. When a
/// destination is carried along it is percent-encoded and concatenated
/// directly after the encoded return address, with no separator — the SSO
/// server splits the two on its side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    sso_url: String,
}

impl LoginRedirect {
    /// Creates a builder for the given SSO login page URL
    pub fn new(sso_url: impl Into<String>) -> Self {
        Self {
            sso_url: sso_url.into(),
        }
    }

    /// Returns the SSO login page URL
    pub fn sso_url(&self) -> &str {
        &self.sso_url
    }

    /// Login URL for a cancelled route transition: return address plus the
    /// route the user was heading to.
    pub fn for_route(&self, current_base: &str, destination: &str) -> String {
        format!(
            "{}?redirect_uri={}{}",
            self.sso_url,
            encode(current_base),
            encode(destination)
        )
    }

    /// Login URL for a rejected request: the full current location, plus the
    /// failing request URL when the host wants it carried along.
    pub fn for_forbidden(&self, current_url: &str, destination: Option<&str>) -> String {
        let mut redirect = format!("{}?redirect_uri={}", self.sso_url, encode(current_url));
        if let Some(destination) = destination {
            redirect.push_str(&encode(destination));
        }
        redirect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_present() {
        assert_eq!(
            query_param("https://app/page?token=XYZ&other=1", "token"),
            Some("XYZ".to_string())
        );
        assert_eq!(
            query_param("https://app/page?other=1&token=XYZ", "token"),
            Some("XYZ".to_string())
        );
    }

    #[test]
    fn test_query_param_absent() {
        assert_eq!(query_param("https://app/page", "token"), None);
        assert_eq!(query_param("https://app/page?other=1", "token"), None);
        assert_eq!(query_param("https://app/page?", "token"), None);
    }

    #[test]
    fn test_query_param_without_equals_never_matches() {
        assert_eq!(query_param("https://app/page?token", "token"), None);
        assert_eq!(query_param("https://app/page?token&x=1", "token"), None);
    }

    #[test]
    fn test_query_param_splits_at_first_equals() {
        assert_eq!(
            query_param("https://app/page?token=a=b", "token"),
            Some("a=b".to_string())
        );
    }

    #[test]
    fn test_query_param_values_stay_raw() {
        assert_eq!(
            query_param("https://app/page?token=a%2Fb%3D", "token"),
            Some("a%2Fb%3D".to_string())
        );
    }

    #[test]
    fn test_query_param_first_occurrence_wins() {
        assert_eq!(
            query_param("https://app/page?token=first&token=second", "token"),
            Some("first".to_string())
        );
    }

    #[test]
    fn test_query_param_ignores_fragment() {
        assert_eq!(
            query_param("https://app/page?token=XYZ#section", "token"),
            Some("XYZ".to_string())
        );
        assert_eq!(query_param("https://app/page#?token=XYZ", "token"), None);
    }

    #[test]
    fn test_scrubbed_drops_query_keeps_fragment() {
        assert_eq!(
            scrubbed("https://app/page?token=XYZ#home"),
            "https://app/page#home"
        );
        assert_eq!(scrubbed("https://app/page?token=XYZ"), "https://app/page");
    }

    #[test]
    fn test_scrubbed_without_query_is_identity() {
        assert_eq!(scrubbed("https://app/page"), "https://app/page");
        assert_eq!(scrubbed("https://app/page#home"), "https://app/page#home");
    }

    #[test]
    fn test_page_base_drops_query_and_fragment() {
        assert_eq!(
            page_base("https://app/page?token=XYZ#home"),
            "https://app/page"
        );
        assert_eq!(page_base("https://app:8443/page"), "https://app:8443/page");
    }

    #[test]
    fn test_for_route_concatenates_encoded_parts() {
        let redirect = LoginRedirect::new("https://sso.example.com/");
        let url = redirect.for_route("https://app.example.com/index", "/reports/42");

        assert_eq!(
            url,
            "https://sso.example.com/?redirect_uri=https%3A%2F%2Fapp.example.com%2Findex%2Freports%2F42"
        );
    }

    #[test]
    fn test_for_forbidden_without_destination() {
        let redirect = LoginRedirect::new("https://sso.example.com/");
        let url = redirect.for_forbidden("https://app.example.com/index?tab=2", None);

        assert_eq!(
            url,
            "https://sso.example.com/?redirect_uri=https%3A%2F%2Fapp.example.com%2Findex%3Ftab%3D2"
        );
    }

    #[test]
    fn test_for_forbidden_with_destination() {
        let redirect = LoginRedirect::new("https://sso.example.com/");
        let url = redirect.for_forbidden(
            "https://app.example.com/index",
            Some("https://api.example.com/v1/reports"),
        );

        assert!(url.starts_with(
            "https://sso.example.com/?redirect_uri=https%3A%2F%2Fapp.example.com%2Findex"
        ));
        assert!(url.ends_with("https%3A%2F%2Fapi.example.com%2Fv1%2Freports"));
    }
}
