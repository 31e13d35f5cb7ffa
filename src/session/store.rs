//! Client-side session store

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[cfg(test)]
use super::storage::MemoryStorage;
use super::storage::{AUTH_STORAGE_KEY, SessionStorage, TOKEN_KEY};
use super::token::{self, TokenPayload, TokenState};
use crate::client::models::User;
use crate::error::Result;

/// In-memory view of the current login state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

/// A session that passed the expiry check
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    pub token: String,
    pub user: User,
    pub claims: TokenPayload,
}

/// Result of asking the store for a usable session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Valid(ActiveSession),
    Expired,
    Missing,
    Malformed,
}

impl SessionStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionStatus::Valid(_))
    }
}

/// Shape written under `auth-storage`. The token is never part of it.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    user: Option<User>,
}

/// Owner of the session state.
///
/// Cloning is cheap and every clone observes the same state.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Session>>,
    storage: Arc<dyn SessionStorage>,
    /// Set once the end of the current session has been announced
    end_announced: Arc<AtomicBool>,
}

impl SessionStore {
    /// Create a store over `storage`, restoring a previously persisted user
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let user = Self::read_persisted_user(storage.as_ref());

        Self {
            state: Arc::new(RwLock::new(Session {
                user,
                ..Session::default()
            })),
            storage,
            end_announced: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Store backed by process memory only
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    fn read_persisted_user(storage: &dyn SessionStorage) -> Option<User> {
        let raw = match storage.get(AUTH_STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Failed to read persisted session: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(persisted) => persisted.state.user,
            Err(e) => {
                log::warn!("Ignoring unreadable persisted session: {}", e);
                None
            }
        }
    }

    fn persist_user(&self, user: Option<&User>) -> Result<()> {
        let persisted = PersistedSession {
            state: PersistedState {
                user: user.cloned(),
            },
            version: 0,
        };
        self.storage
            .set(AUTH_STORAGE_KEY, &serde_json::to_string(&persisted)?)
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    /// Token currently held in session storage, if any
    pub fn stored_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).ok().flatten()
    }

    /// Accept a token and user as the current session. No validation.
    pub async fn set_auth(&self, token: String, user: User) -> Result<()> {
        self.storage.set(TOKEN_KEY, &token)?;
        self.persist_user(Some(&user))?;
        self.end_announced.store(false, Ordering::SeqCst);

        let mut state = self.state.write().await;
        *state = Session {
            token: Some(token),
            user: Some(user),
            is_authenticated: true,
            is_loading: false,
        };
        log::debug!("Session established");
        Ok(())
    }

    /// Clear the session. Calling it again is a no-op.
    pub async fn logout(&self) -> Result<()> {
        let removed = self.storage.remove(TOKEN_KEY);
        let persisted = self.persist_user(None);

        {
            let mut state = self.state.write().await;
            *state = Session {
                is_loading: false,
                ..Session::default()
            };
        }
        log::debug!("Session cleared");

        removed?;
        persisted
    }

    /// `true` for the first caller after a session ends, `false` after that
    /// until a new session is set
    pub fn claim_end_notice(&self) -> bool {
        !self.end_announced.swap(true, Ordering::SeqCst)
    }

    pub async fn set_loading(&self, loading: bool) {
        self.state.write().await.is_loading = loading;
    }

    /// `true` when a usable session exists
    pub async fn check_auth(&self) -> bool {
        self.ensure_session().await.is_valid()
    }

    /// Check the stored token against the current time
    pub async fn ensure_session(&self) -> SessionStatus {
        self.ensure_session_at(Utc::now()).await
    }

    /// Check the stored token against `now`.
    ///
    /// Expired or undecodable tokens end the session before returning.
    pub async fn ensure_session_at(&self, now: DateTime<Utc>) -> SessionStatus {
        let token = match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.mark_unauthenticated().await;
                return SessionStatus::Missing;
            }
            Err(e) => {
                log::warn!("Failed to read session token: {}", e);
                self.mark_unauthenticated().await;
                return SessionStatus::Missing;
            }
        };

        match token::inspect(&token, now) {
            TokenState::Valid(claims) => {
                let mut state = self.state.write().await;
                state.token = Some(token.clone());
                state.is_authenticated = true;
                state.is_loading = false;

                let user = state
                    .user
                    .clone()
                    .unwrap_or_else(|| User::from_claims(&claims));

                SessionStatus::Valid(ActiveSession {
                    token,
                    user,
                    claims,
                })
            }
            TokenState::Expired(claims) => {
                log::debug!("Session token expired at {:?}", claims.expires_at());
                self.logout_quietly().await;
                SessionStatus::Expired
            }
            TokenState::Malformed(err) => {
                log::warn!("Discarding malformed session token: {}", err);
                self.logout_quietly().await;
                SessionStatus::Malformed
            }
        }
    }

    async fn mark_unauthenticated(&self) {
        let mut state = self.state.write().await;
        state.is_authenticated = false;
        state.is_loading = false;
    }

    async fn logout_quietly(&self) {
        if let Err(e) = self.logout().await {
            log::warn!("Failed to clear session storage: {}", e);
        }
    }
}
