//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{
    AuthResponse, LoginCredentials, RefreshResponse, RegisterCredentials, User,
};
use crate::error::Result;

/// Authentication operations (`/api/v1/auth`)
///
/// Login and registration are public; the rest carry the session token.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/connexion`
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse>;

    /// `POST /auth/inscription`
    async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthResponse>;

    /// `POST /auth/rafraichir`
    async fn refresh(&self) -> Result<RefreshResponse>;

    /// `GET /auth/profil`
    async fn profile(&self) -> Result<User>;

    /// `POST /auth/deconnexion`
    async fn sign_out(&self) -> Result<()>;

    /// Whether the backend still accepts the current session
    async fn check_session(&self) -> Result<bool>;
}

pub mod keys {
    use crate::cache::QueryKey;

    pub const SCOPE: &str = "auth";

    pub fn profile() -> QueryKey {
        QueryKey::new(SCOPE, "profil")
    }
}
