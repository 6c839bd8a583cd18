//! `localStorage` backend for the session.

use resources::config::{SESSION_KEY, TOKEN_KEY};
use resources::{Session, SessionStorage, StorageError};
use secrecy::{ExposeSecret, SecretString};
use web_sys::{Storage, window};

pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

pub fn read_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

pub fn write_item(key: &'static str, value: &str) -> Result<(), StorageError> {
    local_storage()
        .ok_or(StorageError::Unavailable)?
        .set_item(key, value)
        .map_err(|_| StorageError::Write(key))
}

pub fn remove_item(key: &'static str) -> Result<(), StorageError> {
    local_storage()
        .ok_or(StorageError::Unavailable)?
        .remove_item(key)
        .map_err(|_| StorageError::Write(key))
}

/// The browser profile's session slot and token slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl SessionStorage for LocalStorage {
    fn load(&self) -> Option<Session> {
        let raw = read_item(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("ignoring unreadable stored session: {e}");
                None
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        write_item(SESSION_KEY, &serde_json::to_string(session)?)
    }

    fn clear(&self) -> Result<(), StorageError> {
        remove_item(SESSION_KEY)
    }

    fn load_token(&self) -> Option<SecretString> {
        read_item(TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .map(SecretString::from)
    }

    fn save_token(&self, token: &SecretString) -> Result<(), StorageError> {
        write_item(TOKEN_KEY, token.expose_secret())
    }

    fn clear_token(&self) -> Result<(), StorageError> {
        remove_item(TOKEN_KEY)
    }
}
