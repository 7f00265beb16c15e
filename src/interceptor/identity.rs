//! The identity interceptor
//!
//! Mediates between the host's request pipeline / navigation lifecycle and
//! the stored bearer token. One instance owns the trust policy, the injected
//! token store, and the two host seams (current location, navigation); the
//! host registers its trait impls as pipeline callbacks.

use std::sync::Arc;

use crate::auth::{StoreError, Token, TokenStore};
use crate::config::IdentityConfig;
use crate::location::{self, LoginRedirect};
use crate::policy::TrustPolicy;
use crate::security::Sanitizer;

use super::base::{
    CaptureOutcome, ErrorOutcome, GuardOutcome, LocationProvider, NavigationGuard, Navigator,
    Request, RequestDecorator, Response, ResponseErrorHandler, Route,
};

/// Status code converted into a login redirect on trusted URLs.
const FORBIDDEN: u16 = 403;

/// Header carrying the bearer token.
const AUTHORIZATION_HEADER: &str = "Authorization";

/// Auto-login interceptor for an external SSO service.
///
/// All operations are synchronous callbacks; the pipeline-facing ones
/// (`decorate`, `handle_error`, `guard`) are total and degrade store
/// failures to "unauthorized" instead of erroring, because the host pipeline
/// has no error channel for its hooks.
pub struct IdentityInterceptor {
    policy: TrustPolicy,
    redirect: LoginRedirect,
    token_param: String,
    include_destination_on_forbidden: bool,
    store: Arc<dyn TokenStore>,
    location: Arc<dyn LocationProvider>,
    navigator: Arc<dyn Navigator>,
}

impl IdentityInterceptor {
    /// Creates an interceptor from its configuration and injected
    /// collaborators.
    pub fn new(
        config: &IdentityConfig,
        store: Arc<dyn TokenStore>,
        location: Arc<dyn LocationProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            policy: TrustPolicy::new(config.secure_url_prefix.clone()),
            redirect: LoginRedirect::new(config.sso_login_url.clone()),
            token_param: config.token_param.clone(),
            include_destination_on_forbidden: config.include_destination_on_forbidden,
            store,
            location,
            navigator,
        }
    }

    /// Returns the trust policy in effect
    pub fn policy(&self) -> &TrustPolicy {
        &self.policy
    }

    /// Returns the stored token, if any.
    ///
    /// Store failures are logged and read as "no token".
    pub fn token(&self) -> Option<Token> {
        match self.store.get() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Token store read failed: {}", e);
                None
            }
        }
    }

    /// Returns true iff a token is currently stored. No side effects.
    pub fn is_authorized(&self) -> bool {
        self.token().is_some()
    }

    /// Stores a token, replacing any previous one.
    ///
    /// An empty value clears instead — a token is either absent or
    /// non-empty. Returns whether a token is stored afterwards.
    pub fn set_token(&self, value: &str) -> Result<bool, StoreError> {
        match Token::new(value) {
            Some(token) => {
                self.store.set(&token)?;
                tracing::debug!("Stored token {}", Sanitizer::sanitize_token(value));
                Ok(true)
            }
            None => {
                self.store.clear()?;
                Ok(false)
            }
        }
    }

    /// Removes the stored token. Returns whether one was removed.
    pub fn clear_token(&self) -> Result<bool, StoreError> {
        self.store.clear()
    }

    /// Returns the `Authorization` header value for the stored token, or an
    /// empty string when no token is stored.
    pub fn authorization_header(&self) -> String {
        self.token().map(|token| token.bearer()).unwrap_or_default()
    }

    /// Scans the host's current location for a returned token.
    ///
    /// Call once at startup, before the pipeline issues requests, so the
    /// token is persisted before anything reads it.
    pub fn capture(&self) -> Result<CaptureOutcome, StoreError> {
        let url = self.location.current_url();
        self.capture_from_url(&url)
    }

    /// Scans `url` for the token query parameter.
    ///
    /// When present, the value is persisted raw (not percent-decoded) and
    /// the navigator is pointed at the URL minus its query string, so the
    /// token leaves the address bar and history.
    pub fn capture_from_url(&self, url: &str) -> Result<CaptureOutcome, StoreError> {
        let Some(raw) = location::query_param(url, &self.token_param) else {
            return Ok(CaptureOutcome::NotPresent);
        };
        let Some(token) = Token::new(raw.as_str()) else {
            tracing::debug!(
                "Ignoring empty {} parameter on {}",
                self.token_param,
                Sanitizer::sanitize_url(url)
            );
            return Ok(CaptureOutcome::NotPresent);
        };

        self.store.set(&token)?;
        let scrubbed = location::scrubbed(url);
        tracing::info!(
            "Captured token {} from {}, reloading at {}",
            Sanitizer::sanitize_token(&raw),
            Sanitizer::sanitize_url(url),
            scrubbed
        );
        self.navigator.navigate(&scrubbed);
        Ok(CaptureOutcome::Stored { scrubbed })
    }

    fn redirect_to(&self, login_url: &str) {
        tracing::info!("Redirecting to: {}", login_url);
        self.navigator.navigate(login_url);
    }
}

impl RequestDecorator for IdentityInterceptor {
    fn decorate(&self, request: &Request) -> Request {
        if !self.policy.is_trusted(&request.url) {
            return request.clone();
        }
        match self.token() {
            Some(token) => request
                .clone()
                .with_header(AUTHORIZATION_HEADER, token.bearer()),
            None => request.clone(),
        }
    }
}

impl ResponseErrorHandler for IdentityInterceptor {
    fn handle_error(&self, response: &Response) -> ErrorOutcome {
        if response.status != FORBIDDEN || !self.policy.is_trusted(&response.url) {
            return ErrorOutcome::Propagate;
        }

        let current = self.location.current_url();
        let destination = self
            .include_destination_on_forbidden
            .then_some(response.url.as_str());
        let login_url = self.redirect.for_forbidden(&current, destination);
        self.redirect_to(&login_url);
        ErrorOutcome::Redirected {
            location: login_url,
        }
    }
}

impl NavigationGuard for IdentityInterceptor {
    fn guard(&self, route: &Route) -> GuardOutcome {
        if !route.need_auth || self.is_authorized() {
            return GuardOutcome::Allow;
        }

        let current_base = location::page_base(&self.location.current_url());
        let login_url = self.redirect.for_route(&current_base, &route.href);
        self.redirect_to(&login_url);
        GuardOutcome::Cancelled {
            location: login_url,
        }
    }
}
