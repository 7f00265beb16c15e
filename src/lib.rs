//! SsoKit - auto-login identity interceptor for webview apps
//!
//! Wires a host application into an external SSO service: include this
//! crate's interceptor in the host's request pipeline and navigation
//! lifecycle and it will send unauthenticated users to the SSO login page,
//! capture the bearer token the SSO server hands back via a `?token=` query
//! parameter, persist it, and attach it as an `Authorization` header to
//! every subsequent request whose URL the trust policy accepts.
//!
//! ## Features
//!
//! - Token capture from the page URL, with address-bar scrubbing
//! - Pluggable token persistence (memory, JSON file, OS credential store)
//! - Copy-on-write request decoration with `Bearer` credentials
//! - 403-to-login-redirect conversion on trusted URLs
//! - Route guarding for views that require an authenticated user
//! - Zeroizing token type and sanitized logging throughout
//!
//! ## Architecture
//!
//! The crate is organized around one component and its seams:
//!
//! - **Interceptor**: the pipeline hooks (decorate / handle error / guard)
//! - **Auth**: the token value type and its persistence backends
//! - **Policy**: the trust predicate over outgoing URLs
//! - **Location**: query extraction, scrubbing, and SSO redirect URLs
//! - **Http**: a `reqwest` pipeline with the interceptor pre-registered
//! - **Security**: log sanitization for credentials
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ssokit::auth::MemoryTokenStore;
//! use ssokit::interceptor::{Request, RequestDecorator, SharedLocation, SystemBrowserNavigator};
//! use ssokit::{IdentityConfig, IdentityInterceptor};
//!
//! let config = IdentityConfig::new("https://sso.example.com/", "https://api.example.com");
//! let location = Arc::new(SharedLocation::new("https://app.example.com/index"));
//! let interceptor = IdentityInterceptor::new(
//!     &config,
//!     Arc::new(MemoryTokenStore::new()),
//!     location,
//!     Arc::new(SystemBrowserNavigator),
//! );
//!
//! // Startup: consume a token returned by the SSO page, if any
//! interceptor.capture().unwrap();
//!
//! // Pipeline: decorate outgoing requests
//! let request = interceptor.decorate(&Request::get("https://api.example.com/v1/data"));
//! ```

pub mod auth;
pub mod config;
pub mod http;
pub mod interceptor;
pub mod location;
pub mod policy;
pub mod security;

pub use config::IdentityConfig;
pub use interceptor::IdentityInterceptor;
