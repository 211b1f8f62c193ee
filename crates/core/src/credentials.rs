//! Injectable storage for the bearer token.
//!
//! Callers hand a [`CredentialProvider`] to whatever needs the token instead
//! of reading storage directly. [`TieredCredentials`] keeps an older store
//! readable for one release: on construction it copies a token found only in
//! the legacy store into the primary one.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

pub trait CredentialProvider: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

impl<T: CredentialProvider + ?Sized> CredentialProvider for Arc<T> {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str) {
        (**self).set(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: RwLock<Option<String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl CredentialProvider for MemoryCredentials {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// A primary store backed by a legacy one.
///
/// Reads only consult the primary store; writes and clears go to both so a
/// client still on the legacy store stays signed in or out consistently.
#[derive(Debug)]
pub struct TieredCredentials<P, L> {
    primary: P,
    legacy: L,
}

impl<P: CredentialProvider, L: CredentialProvider> TieredCredentials<P, L> {
    /// Wraps both stores and migrates a legacy-only token into the primary.
    pub fn initialize(primary: P, legacy: L) -> Self {
        if primary.get().is_none() {
            if let Some(token) = legacy.get() {
                primary.set(&token);
                info!("Migrated token from legacy store");
            }
        }
        Self { primary, legacy }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn legacy(&self) -> &L {
        &self.legacy
    }
}

impl<P: CredentialProvider, L: CredentialProvider> CredentialProvider for TieredCredentials<P, L> {
    fn get(&self) -> Option<String> {
        self.primary.get()
    }

    fn set(&self, token: &str) {
        self.primary.set(token);
        self.legacy.set(token);
    }

    fn clear(&self) {
        self.primary.clear();
        self.legacy.clear();
    }
}
