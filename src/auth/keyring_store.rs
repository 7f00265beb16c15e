//! OS credential-store token backend
//!
//! Persists the bearer token in the platform credential store (Windows
//! Credential Manager, macOS Keychain, Linux Secret Service) via the
//! `keyring` crate. Data is tied to the current OS user account.

use keyring::Entry;

use super::store::{StoreError, TokenStore};
use super::token::Token;

/// Token store backed by the OS credential store.
///
/// One `(service, key)` pair addresses exactly one credential slot; hosts
/// that embed several independent apps should give each its own service
/// name.
///
/// # Example
///
/// ```no_run
/// use ssokit::auth::{KeyringTokenStore, Token, TokenStore};
///
/// let store = KeyringTokenStore::new("MyApp", "jwt");
/// store.set(&Token::new("my-token").unwrap()).unwrap();
/// let token = store.get().unwrap();
/// assert_eq!(token.unwrap(), "my-token");
/// store.clear().unwrap();
/// ```
pub struct KeyringTokenStore {
    service: String,
    key: String,
}

impl KeyringTokenStore {
    /// Creates a store addressing the given service and credential key
    pub fn new(service: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            key: key.into(),
        }
    }

    /// Returns the service name used for this store
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the credential key used for this store
    pub fn key(&self) -> &str {
        &self.key
    }

    fn entry(&self) -> Result<Entry, StoreError> {
        Ok(Entry::new(&self.service, &self.key)?)
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Result<Option<Token>, StoreError> {
        match self.entry()?.get_password() {
            Ok(value) => Ok(Token::new(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::Keyring(e)),
        }
    }

    fn set(&self, token: &Token) -> Result<(), StoreError> {
        self.entry()?.set_password(token.as_str())?;
        Ok(())
    }

    fn clear(&self) -> Result<bool, StoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(StoreError::Keyring(e)),
        }
    }
}
