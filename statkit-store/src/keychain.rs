//! API token storage in the system keychain.
//!
//! Tokens are stored under service `statkit`, one account per profile:
//! - macOS: Keychain Services
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KDE Wallet)
//!
//! Lookups are cached for the lifetime of the process so a command that
//! resolves a profile more than once only prompts once.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use keyring::Entry;
use tracing::{debug, trace, warn};

use crate::error::StoreError;

/// Keychain service name.
pub const SERVICE: &str = "statkit";

/// Profile name to cached token (`None` means "no entry").
static TOKEN_CACHE: OnceLock<Mutex<HashMap<String, Option<String>>>> = OnceLock::new();

fn cache() -> MutexGuard<'static, HashMap<String, Option<String>>> {
    TOKEN_CACHE
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn entry(profile: &str) -> Result<Entry, StoreError> {
    Entry::new(SERVICE, profile)
        .map_err(|e| StoreError::Keychain(format!("Failed to create keychain entry: {e}")))
}

/// Stores the token for a profile.
pub fn store_token(profile: &str, token: &str) -> Result<(), StoreError> {
    entry(profile)?
        .set_password(token)
        .map_err(|e| StoreError::Keychain(format!("Failed to store token: {e}")))?;

    cache().remove(profile);
    debug!(profile = profile, "Token stored in keychain");
    Ok(())
}

/// Returns the token for a profile, if one is stored and non-empty.
pub fn get_token(profile: &str) -> Option<String> {
    if let Some(cached) = cache().get(profile) {
        trace!(profile = profile, hit = true, "Keychain cache lookup");
        return cached.clone();
    }

    let result = match entry(profile) {
        Ok(entry) => match entry.get_password() {
            Ok(token) if !token.is_empty() => Some(token),
            Ok(_) | Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(profile = profile, error = %e, "Failed to read token from keychain");
                None
            }
        },
        Err(e) => {
            warn!(profile = profile, error = %e, "Keychain unavailable");
            None
        }
    };

    cache().insert(profile.to_string(), result.clone());
    result
}

/// Deletes the token for a profile. Deleting a missing token succeeds.
pub fn delete_token(profile: &str) -> Result<(), StoreError> {
    let result = match entry(profile)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => {
            debug!(profile = profile, "Token deleted from keychain");
            Ok(())
        }
        Err(e) => Err(StoreError::Keychain(format!("Failed to delete token: {e}"))),
    };

    cache().remove(profile);
    result
}

/// Returns true if a token is stored for the profile.
pub fn has_token(profile: &str) -> bool {
    get_token(profile).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_lookup_skips_keychain() {
        cache().insert("cached-profile".to_string(), Some("abc".to_string()));
        assert_eq!(get_token("cached-profile").as_deref(), Some("abc"));
        assert!(has_token("cached-profile"));

        cache().insert("empty-profile".to_string(), None);
        assert!(!has_token("empty-profile"));
    }

    // Real keychain access needs a platform secret service and is left to
    // manual testing.
}
