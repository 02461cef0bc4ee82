//! Logged-in player
//!
//! The username is only a score-table key. It is remembered under `username`
//! so the login surface can prefill it next time.

use std::fmt;

use crate::storage::{self, KeyValueStore};

/// Storage key for the remembered username
pub const USERNAME_KEY: &str = "username";

/// Why a login attempt was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    EmptyUsername,
    AlreadyLoggedIn,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::EmptyUsername => write!(f, "username must not be empty"),
            LoginError::AlreadyLoggedIn => write!(f, "a player is already logged in"),
        }
    }
}

impl std::error::Error for LoginError {}

/// The logged-in username. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    /// Create a session for a non-empty username
    pub fn login(username: &str) -> Result<Self, LoginError> {
        if username.is_empty() {
            return Err(LoginError::EmptyUsername);
        }
        Ok(Self {
            username: username.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Remember the username for the next visit. Failures are logged only.
    pub fn remember(&self, store: &mut dyn KeyValueStore) {
        if let Err(e) = storage::save_json(store, USERNAME_KEY, &self.username) {
            log::warn!("Could not remember username: {e}");
        }
    }
}

/// Username saved by a previous [`Session::remember`], if any
pub fn remembered_username(store: &dyn KeyValueStore) -> Option<String> {
    storage::load_json::<String>(store, USERNAME_KEY).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::storage::tests::BrokenStore;

    #[test]
    fn test_login_rejects_empty() {
        assert_eq!(Session::login(""), Err(LoginError::EmptyUsername));
    }

    #[test]
    fn test_login_keeps_name_verbatim() {
        let session = Session::login(" alice ").unwrap();
        assert_eq!(session.username(), " alice ");
    }

    #[test]
    fn test_remember_and_restore() {
        let mut store = MemoryStore::new();
        assert_eq!(remembered_username(&store), None);

        Session::login("alice").unwrap().remember(&mut store);
        assert_eq!(remembered_username(&store).as_deref(), Some("alice"));
    }

    #[test]
    fn test_remember_on_broken_store_is_not_fatal() {
        let session = Session::login("alice").unwrap();
        session.remember(&mut BrokenStore);
        assert_eq!(remembered_username(&BrokenStore), None);
    }
}
