//! Offline authentication backend
//!
//! Stands in for `/api/v1/auth` while the real backend is unavailable. It
//! accepts a single demo account and mints unsigned tokens with the same
//! shape the backend uses.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::api::AuthApi;
use super::models::{AuthResponse, LoginCredentials, RefreshResponse, RegisterCredentials, User};
use crate::error::{ApiError, Result};
use crate::session::token::{TokenPayload, encode};
use crate::session::{ActiveSession, SessionContext, SessionEnd, SessionStatus};
use crate::validation::Validate;

/// Demo account accepted by [`MockAuthClient::login`]
pub const DEMO_EMAIL: &str = "admin@aerocast.com";
pub const DEMO_PASSWORD: &str = "password123";

const LOGIN_DELAY: Duration = Duration::from_millis(1000);
const REGISTER_DELAY: Duration = Duration::from_millis(1500);
const CHECK_DELAY: Duration = Duration::from_millis(500);

/// Mock implementation of [`AuthApi`].
///
/// Simulated network latency can be switched off for tests and scripting.
pub struct MockAuthClient {
    session: SessionContext,
    latency: bool,
}

impl MockAuthClient {
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            latency: true,
        }
    }

    pub fn with_latency(mut self, latency: bool) -> Self {
        self.latency = latency;
        self
    }

    async fn delay(&self, duration: Duration) {
        if self.latency {
            tokio::time::sleep(duration).await;
        }
    }

    fn mint(id: &str, email: &str) -> String {
        encode(&TokenPayload::issue(id, email, Utc::now()))
    }

    /// Same acceptance rules as the HTTP client applies before sending
    async fn require_session(&self) -> Result<ActiveSession> {
        match self.session.store().ensure_session().await {
            SessionStatus::Valid(active) => Ok(active),
            SessionStatus::Missing => {
                self.session.end_session(SessionEnd::Rejected).await;
                Err(ApiError::Unauthorized.into())
            }
            SessionStatus::Expired => {
                self.session.end_session(SessionEnd::Expired).await;
                Err(ApiError::SessionExpired.into())
            }
            SessionStatus::Malformed => {
                self.session.end_session(SessionEnd::Malformed).await;
                Err(ApiError::InvalidToken.into())
            }
        }
    }
}

#[async_trait]
impl AuthApi for MockAuthClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        credentials.validate()?;
        self.delay(LOGIN_DELAY).await;

        if credentials.email != DEMO_EMAIL || credentials.password != DEMO_PASSWORD {
            log::debug!("Mock login refused for {}", credentials.email);
            return Err(ApiError::InvalidCredentials.into());
        }

        Ok(AuthResponse {
            token: Self::mint("1", &credentials.email),
            user: User {
                id: "1".to_string(),
                name: "John Doe".to_string(),
                email: credentials.email.clone(),
                role: Some("user".to_string()),
                numero_passport: None,
            },
        })
    }

    async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthResponse> {
        credentials.validate()?;
        self.delay(REGISTER_DELAY).await;

        Ok(AuthResponse {
            token: Self::mint("2", &credentials.email),
            user: User {
                id: "2".to_string(),
                name: credentials.name.clone(),
                email: credentials.email.clone(),
                role: None,
                numero_passport: Some(credentials.numero_passport.clone()),
            },
        })
    }

    async fn refresh(&self) -> Result<RefreshResponse> {
        let active = self.require_session().await?;
        Ok(RefreshResponse {
            token: Self::mint(&active.claims.id, &active.claims.email),
        })
    }

    async fn profile(&self) -> Result<User> {
        Ok(self.require_session().await?.user)
    }

    async fn sign_out(&self) -> Result<()> {
        Ok(())
    }

    /// Any stored token is accepted by the mock backend
    async fn check_session(&self) -> Result<bool> {
        self.delay(CHECK_DELAY).await;
        Ok(self.session.store().stored_token().is_some())
    }
}
