//! Base types and traits for the identity interceptor
//!
//! Defines the value objects flowing through the host's request pipeline
//! and the capability traits the host wires the interceptor into. The hooks
//! are explicit interfaces: a decorator for outgoing requests, an error
//! handler for failed responses, a guard for route transitions, and two
//! side-effect seams the host supplies (current location, browser
//! navigation).

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// An outgoing request descriptor.
///
/// Immutable in use: decoration never mutates a request, it returns a new
/// value with an updated header map, so a shared request template can be
/// reused safely across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method (e.g. "GET")
    pub method: String,
    /// Absolute request URL
    pub url: String,
    /// Header name/value map
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Creates a request with an empty header map
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Creates a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Returns a copy of this request with the given header set
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the value of a header, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// A failed-response descriptor: the status code and the URL the request
/// went to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// URL of the originating request
    pub url: String,
}

impl Response {
    /// Creates a response descriptor
    pub fn new(status: u16, url: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
        }
    }
}

/// Target-route metadata for a pending navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// The route's href, as the host's router renders it
    pub href: String,
    /// Whether entering this route requires an authenticated user
    pub need_auth: bool,
}

impl Route {
    /// Creates a route that anyone may enter
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            need_auth: false,
        }
    }

    /// Marks this route as requiring authentication
    pub fn with_auth_required(mut self) -> Self {
        self.need_auth = true;
        self
    }
}

/// Outcome of handling a failed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorOutcome {
    /// The failure was consumed and the browser sent to the login page;
    /// the host's error channel should not see it
    Redirected {
        /// The login URL the navigator was pointed at
        location: String,
    },
    /// Not an authorization failure this interceptor owns; the host's
    /// normal error handling observes the response unchanged
    Propagate,
}

/// Outcome of guarding a route transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The transition may proceed
    Allow,
    /// The transition was cancelled and the browser sent to the login page
    Cancelled {
        /// The login URL the navigator was pointed at
        location: String,
    },
}

/// Outcome of scanning a URL for a returned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A token was stored; the host should now be showing `scrubbed`
    Stored {
        /// The page URL with the query string removed
        scrubbed: String,
    },
    /// No token parameter present; nothing happened
    NotPresent,
}

/// Decorates outgoing requests with credentials
pub trait RequestDecorator {
    /// Returns a copy of `request`, with the `Authorization` header set when
    /// the request qualifies
    fn decorate(&self, request: &Request) -> Request;
}

/// Handles failed responses from the host pipeline
pub trait ResponseErrorHandler {
    /// Decides whether a failure is consumed (login redirect) or propagated
    fn handle_error(&self, response: &Response) -> ErrorOutcome;
}

/// Guards route transitions in the host's navigation lifecycle
pub trait NavigationGuard {
    /// Decides whether a pending transition may proceed
    fn guard(&self, route: &Route) -> GuardOutcome;
}

/// The browser-navigation side effect.
///
/// Navigating away is terminal for the page's execution context, so the
/// interceptor treats a call to this as fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Points the browser at `location`
    fn navigate(&self, location: &str);
}

/// The host's ambient current-page location.
#[cfg_attr(test, mockall::automock)]
pub trait LocationProvider: Send + Sync {
    /// Returns the full URL currently shown to the user
    fn current_url(&self) -> String;
}

/// Navigator that opens URLs in the system browser.
pub struct SystemBrowserNavigator;

impl Navigator for SystemBrowserNavigator {
    fn navigate(&self, location: &str) {
        if let Err(e) = opener::open(location) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }
}

/// Location provider for hosts that track their own current URL.
///
/// The host updates it on every navigation; the interceptor reads it when
/// building redirects.
pub struct SharedLocation {
    url: Mutex<String>,
}

impl SharedLocation {
    /// Creates a location provider showing `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            url: Mutex::new(initial.into()),
        }
    }

    /// Records a navigation to `url`
    pub fn set(&self, url: impl Into<String>) {
        let mut guard = self.url.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = url.into();
    }
}

impl LocationProvider for SharedLocation {
    fn current_url(&self) -> String {
        self.url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
