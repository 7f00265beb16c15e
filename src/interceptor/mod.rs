//! Interceptor module - pipeline hooks and the identity interceptor
//!
//! The hooks the host pipeline calls are explicit traits rather than
//! duck-typed callbacks:
//! - `RequestDecorator` for the before-send hook
//! - `ResponseErrorHandler` for the on-error hook
//! - `NavigationGuard` for the before-transition hook
//!
//! `IdentityInterceptor` implements all three over one token store.

mod base;
mod identity;

pub use base::*;
pub use identity::IdentityInterceptor;
