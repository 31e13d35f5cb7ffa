//! Route guard for protected commands

use super::login_redirect;
use crate::error::{Error, Result};
use crate::session::{ActiveSession, SessionContext, SessionStatus};

/// Where a guarded navigation stands
#[derive(Debug, Clone, PartialEq)]
pub enum GuardState {
    /// Session check not finished yet
    Loading,
    Authenticated(ActiveSession),
    Unauthenticated { redirect_to: String },
}

/// One navigation to a protected route.
///
/// Starts in [`GuardState::Loading`]; [`verify`](Self::verify) settles it
/// once and the settled state is final for this navigation.
#[derive(Debug)]
pub struct ProtectedRoute {
    path: String,
    state: GuardState,
}

impl ProtectedRoute {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            state: GuardState::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, GuardState::Loading)
    }

    /// Run the session check and redirect to login when it fails
    pub async fn verify(&mut self, session: &SessionContext) -> &GuardState {
        if !self.is_loading() {
            return &self.state;
        }

        let status = session.store().ensure_session().await;
        self.state = match status {
            SessionStatus::Valid(active) => GuardState::Authenticated(active),
            other => {
                log::debug!("Guard refused {}: {:?}", self.path, other);
                let redirect_to = login_redirect(&self.path);
                session.navigate(&redirect_to);
                GuardState::Unauthenticated { redirect_to }
            }
        };

        &self.state
    }

    /// The admitted session, or the redirect as an error
    pub fn into_session(self) -> Result<ActiveSession> {
        match self.state {
            GuardState::Authenticated(active) => Ok(active),
            GuardState::Unauthenticated { redirect_to } => Err(Error::LoginRequired { redirect_to }),
            GuardState::Loading => Err(Error::Other(format!(
                "route {} was not verified",
                self.path
            ))),
        }
    }
}
