//! Credential pair persistence
//!
//! The backend issues a short-lived access token paired with a longer-lived
//! refresh token. This module defines the [`CredentialPair`] value, the
//! [`CredentialStore`] trait the gateway reads and writes through, and two
//! implementations: [`KeyringStore`] persists the pair in the operating
//! system's native credential store (Keychain on macOS, Secret Service on
//! Linux, Windows Credential Manager on Windows), and [`MemoryStore`] keeps
//! it in process memory for tests and embedding.
//!
//! Invariant: a stored pair is all-or-nothing. `get` reports a pair only
//! when both tokens are present; `set` writes both; `clear` removes both.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{BoardctlError, Result};

/// Keyring entry key for the access token.
const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Keyring entry key for the refresh token.
const REFRESH_TOKEN_KEY: &str = "refreshToken";

// ---------------------------------------------------------------------------
// CredentialPair
// ---------------------------------------------------------------------------

/// The access/refresh token pair issued by `/auth/signin` and
/// `/auth/refresh`.
///
/// Both tokens are opaque bearer strings; no structure is assumed beyond
/// non-emptiness, which is not validated here.
///
/// # Examples
///
/// ```
/// use boardctl::client::credentials::CredentialPair;
///
/// let pair = CredentialPair {
///     access_token: "acc".to_string(),
///     refresh_token: "ref".to_string(),
/// };
/// assert_eq!(pair.access_token, "acc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    /// Short-lived bearer token attached to authenticated requests.
    pub access_token: String,

    /// Longer-lived token exchanged at `/auth/refresh` for a new pair.
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// CredentialStore
// ---------------------------------------------------------------------------

/// Storage seam for the credential pair.
///
/// The gateway is constructed with an injected `Arc<dyn CredentialStore>`,
/// so production code uses [`KeyringStore`] while tests use [`MemoryStore`].
/// All methods are synchronous; implementations must not block for longer
/// than a local credential-store round-trip.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored pair, or `None` when unauthenticated.
    ///
    /// Must return a pair only when both tokens are present.
    fn get(&self) -> Result<Option<CredentialPair>>;

    /// Overwrites both tokens.
    fn set(&self, pair: &CredentialPair) -> Result<()>;

    /// Removes both tokens. A no-op when nothing is stored.
    fn clear(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// KeyringStore
// ---------------------------------------------------------------------------

/// OS-keyring-backed store.
///
/// The two tokens are persisted as separate entries keyed `accessToken` and
/// `refreshToken` under a namespaced service name, so they survive process
/// restarts. A half-written pair (one entry present, the other missing) is
/// treated as unauthenticated and cleaned up on the next `get`.
///
/// # Examples
///
/// ```no_run
/// use boardctl::client::credentials::{CredentialPair, CredentialStore, KeyringStore};
///
/// # fn example() -> boardctl::error::Result<()> {
/// let store = KeyringStore::new("default");
/// store.set(&CredentialPair {
///     access_token: "acc".to_string(),
///     refresh_token: "ref".to_string(),
/// })?;
/// assert!(store.get()?.is_some());
/// store.clear()?;
/// # Ok(())
/// # }
/// ```
pub struct KeyringStore {
    /// Keyring service name, derived from the profile identifier.
    service: String,
}

impl KeyringStore {
    /// Creates a store for the named profile.
    ///
    /// The service name is prefixed with `boardctl.` to avoid collisions
    /// with other applications using the same keyring.
    pub fn new(profile: &str) -> Self {
        Self {
            service: format!("boardctl.{}", profile),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key)
            .map_err(|e| BoardctlError::Keyring(e).into())
    }

    /// Reads one entry, mapping a missing entry to `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(BoardctlError::Keyring(e).into()),
        }
    }

    /// Deletes one entry, treating a missing entry as success.
    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(BoardctlError::Keyring(e).into()),
        }
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self) -> Result<Option<CredentialPair>> {
        let access = self.read(ACCESS_TOKEN_KEY)?;
        let refresh = self.read(REFRESH_TOKEN_KEY)?;

        match (access, refresh) {
            (Some(access_token), Some(refresh_token)) => Ok(Some(CredentialPair {
                access_token,
                refresh_token,
            })),
            (None, None) => Ok(None),
            // Partial state can only come from an interrupted write; drop it
            // so the pair invariant holds for callers.
            _ => {
                tracing::warn!("partial credential pair found in keyring, clearing");
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn set(&self, pair: &CredentialPair) -> Result<()> {
        self.entry(ACCESS_TOKEN_KEY)?
            .set_password(&pair.access_token)
            .map_err(BoardctlError::Keyring)?;
        self.entry(REFRESH_TOKEN_KEY)?
            .set_password(&pair.refresh_token)
            .map_err(BoardctlError::Keyring)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.remove(ACCESS_TOKEN_KEY)?;
        self.remove(REFRESH_TOKEN_KEY)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store used by tests and embedders that manage persistence
/// themselves.
///
/// # Examples
///
/// ```
/// use boardctl::client::credentials::{CredentialPair, CredentialStore, MemoryStore};
///
/// let store = MemoryStore::default();
/// assert!(store.get().unwrap().is_none());
///
/// store
///     .set(&CredentialPair {
///         access_token: "acc".to_string(),
///         refresh_token: "ref".to_string(),
///     })
///     .unwrap();
/// assert!(store.get().unwrap().is_some());
///
/// store.clear().unwrap();
/// assert!(store.get().unwrap().is_none());
/// ```
#[derive(Default)]
pub struct MemoryStore {
    pair: Mutex<Option<CredentialPair>>,
}

impl MemoryStore {
    /// Creates a store pre-populated with the given pair.
    pub fn with_pair(pair: CredentialPair) -> Self {
        Self {
            pair: Mutex::new(Some(pair)),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Result<Option<CredentialPair>> {
        let guard = self
            .pair
            .lock()
            .map_err(|_| BoardctlError::CredentialStore("memory store poisoned".into()))?;
        Ok(guard.clone())
    }

    fn set(&self, pair: &CredentialPair) -> Result<()> {
        let mut guard = self
            .pair
            .lock()
            .map_err(|_| BoardctlError::CredentialStore("memory store poisoned".into()))?;
        *guard = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .pair
            .lock()
            .map_err(|_| BoardctlError::CredentialStore("memory store poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
