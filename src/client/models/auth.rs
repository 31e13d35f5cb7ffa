//! Authentication models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::session::token::TokenPayload;
use crate::validation::{
    NAME_MIN_LEN, PASSPORT_MIN_LEN, PASSWORD_MIN_LEN, Validate, check_email, check_min_len,
};

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role (user, admin, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Passport number, set for travellers who registered themselves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_passport: Option<String>,
}

impl User {
    /// Minimal user rebuilt from token claims when no profile was stored
    pub fn from_claims(claims: &TokenPayload) -> Self {
        Self {
            id: claims.id.clone(),
            name: claims.email.clone(),
            email: claims.email.clone(),
            role: None,
            numero_passport: None,
        }
    }
}

/// Login form
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Validate for LoginCredentials {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, "email", &self.email);
        check_min_len(&mut errors, "password", &self.password, PASSWORD_MIN_LEN, "Password");
        errors.into_result()
    }
}

/// Registration form
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterCredentials {
    pub name: String,
    pub email: String,
    pub password: String,
    pub numero_passport: String,
}

impl fmt::Debug for RegisterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCredentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("numero_passport", &self.numero_passport)
            .finish()
    }
}

impl Validate for RegisterCredentials {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_min_len(&mut errors, "name", &self.name, NAME_MIN_LEN, "Name");
        check_email(&mut errors, "email", &self.email);
        check_min_len(&mut errors, "password", &self.password, PASSWORD_MIN_LEN, "Password");
        check_min_len(
            &mut errors,
            "numero_passport",
            &self.numero_passport,
            PASSPORT_MIN_LEN,
            "Passport number",
        );
        errors.into_result()
    }
}

/// Body of `POST /auth/inscription`
#[derive(Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub numero_passport: &'a str,
    pub nom: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a RegisterCredentials> for RegisterRequest<'a> {
    fn from(creds: &'a RegisterCredentials) -> Self {
        Self {
            numero_passport: &creds.numero_passport,
            nom: &creds.name,
            email: &creds.email,
            password: &creds.password,
        }
    }
}

/// Token and user returned by login and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Response of `POST /auth/rafraichir`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}
