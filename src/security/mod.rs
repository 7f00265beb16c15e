//! Security module - log hygiene for credentials
//!
//! Masking helpers applied before tokens or token-bearing URLs reach the
//! logs. The token value type itself (zeroization, redacted debug) lives in
//! `crate::auth`.

mod sanitizer;

pub use sanitizer::Sanitizer;
