//! Session token decoding and expiry
//!
//! Tokens are JWT-shaped (`header.payload.signature`) but unsigned: the
//! signature segment of tokens minted here is the literal `signature` and no
//! signature is verified anywhere. Only the payload's `exp` claim is trusted,
//! which is enough to drive the client-side session lifecycle and nothing
//! more.
//!
//! [`inspect`] is the only place that decides whether a token is usable.
//! The session store, the HTTP client and the route guard all go through it.

use base64::Engine as _;
use base64::engine::general_purpose;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed header segment (`{"alg":"HS256","typ":"JWT"}`) of minted tokens
pub const MOCK_HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

/// Placeholder written where a signature would be
pub const SIGNATURE_PLACEHOLDER: &str = "signature";

/// Lifetime of a minted token in seconds (24 hours)
pub const TOKEN_LIFETIME_SECS: i64 = 86_400;

/// Claims carried in the token's middle segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// User ID
    #[serde(default)]
    pub id: String,

    /// User email
    #[serde(default)]
    pub email: String,

    /// Issued-at, epoch seconds
    #[serde(default)]
    pub iat: i64,

    /// Expiry, epoch seconds
    pub exp: i64,
}

impl TokenPayload {
    /// Claims for a token issued at `now` and valid for 24 hours
    pub fn issue(id: impl Into<String>, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            id: id.into(),
            email: email.into(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        }
    }

    /// Expiry as a timestamp, if representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// `exp` is in seconds; compare in milliseconds against `now`.
    /// A token expiring exactly now is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.saturating_mul(1000) < now.timestamp_millis()
    }
}

/// Why a token could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("expected 3 dot-separated segments, found {0}")]
    Segments(usize),

    #[error("payload is not valid base64: {0}")]
    Encoding(String),

    #[error("payload is not a valid claim set: {0}")]
    Payload(String),
}

/// Outcome of inspecting a token at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Valid(TokenPayload),
    Expired(TokenPayload),
    Malformed(TokenError),
}

/// Decode base64 in either the standard or URL-safe alphabet, with or
/// without padding.
fn base64_decode_lenient(input: &str) -> Result<Vec<u8>, String> {
    let unpadded = input.trim_end_matches('=');
    if unpadded.len() % 4 == 1 {
        return Err("invalid base64 length".to_string());
    }

    let standard = unpadded.replace('-', "+").replace('_', "/");

    general_purpose::STANDARD_NO_PAD
        .decode(standard.as_bytes())
        .map_err(|e| e.to_string())
}

/// Decode the payload segment of a token
pub fn decode(token: &str) -> Result<TokenPayload, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::Segments(parts.len()));
    }

    let bytes = base64_decode_lenient(parts[1]).map_err(TokenError::Encoding)?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::Payload(e.to_string()))
}

/// Encode claims into an unsigned token
pub fn encode(payload: &TokenPayload) -> String {
    // TokenPayload only holds strings and integers
    let json = serde_json::to_vec(payload).unwrap_or_default();
    format!(
        "{}.{}.{}",
        MOCK_HEADER,
        general_purpose::STANDARD.encode(json),
        SIGNATURE_PLACEHOLDER
    )
}

/// Decide whether `token` is usable at `now`
pub fn inspect(token: &str, now: DateTime<Utc>) -> TokenState {
    match decode(token) {
        Ok(payload) if payload.is_expired_at(now) => TokenState::Expired(payload),
        Ok(payload) => TokenState::Valid(payload),
        Err(err) => TokenState::Malformed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token_with_payload(json: &str) -> String {
        format!(
            "{}.{}.{}",
            MOCK_HEADER,
            general_purpose::STANDARD.encode(json),
            SIGNATURE_PLACEHOLDER
        )
    }

    #[test]
    fn test_issue_sets_24h_lifetime() {
        let now = Utc::now();
        let claims = TokenPayload::issue("1", "a@b.com", now);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn test_encode_then_inspect_is_valid() {
        let now = Utc::now();
        let token = encode(&TokenPayload::issue("1", "admin@aerocast.com", now));

        assert!(token.starts_with(MOCK_HEADER));
        assert!(token.ends_with(".signature"));

        match inspect(&token, now) {
            TokenState::Valid(claims) => {
                assert_eq!(claims.id, "1");
                assert_eq!(claims.email, "admin@aerocast.com");
            }
            other => panic!("expected valid token, got {:?}", other),
        }
    }

    #[test]
    fn test_long_expired_token() {
        let token = token_with_payload(r#"{"id":"1","email":"a@b.com","iat":1000,"exp":1000}"#);
        assert!(matches!(
            inspect(&token, Utc::now()),
            TokenState::Expired(_)
        ));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = TokenPayload {
            id: "1".into(),
            email: "a@b.com".into(),
            iat: 1_699_990_000,
            exp: 1_700_000_000,
        };

        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(now + Duration::milliseconds(1)));
        assert!(!claims.is_expired_at(now - Duration::seconds(30)));
    }

    #[test]
    fn test_wrong_segment_count() {
        assert_eq!(decode("abc"), Err(TokenError::Segments(1)));
        assert_eq!(decode("a.b"), Err(TokenError::Segments(2)));
        assert_eq!(decode("a.b.c.d"), Err(TokenError::Segments(4)));
    }

    #[test]
    fn test_payload_not_base64() {
        let err = decode("header.!!!not-base64!!!.sig").unwrap_err();
        assert!(matches!(err, TokenError::Encoding(_)));
    }

    #[test]
    fn test_payload_not_json() {
        let token = token_with_payload("just some text");
        assert!(matches!(decode(&token), Err(TokenError::Payload(_))));
    }

    #[test]
    fn test_payload_without_exp_is_malformed() {
        let token = token_with_payload(r#"{"id":"1","email":"a@b.com"}"#);
        assert!(matches!(
            inspect(&token, Utc::now()),
            TokenState::Malformed(TokenError::Payload(_))
        ));
    }

    #[test]
    fn test_accepts_url_safe_unpadded_payload() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let json = format!(r#"{{"id":"42","email":"ops+test@aerocast.com","iat":1,"exp":{}}}"#, exp);
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(json);
        let token = format!("{}.{}.sig", MOCK_HEADER, payload);

        let claims = decode(&token).unwrap();
        assert_eq!(claims.id, "42");
        assert_eq!(claims.exp, exp);
    }

    #[test]
    fn test_empty_token_is_malformed() {
        assert!(matches!(
            inspect("", Utc::now()),
            TokenState::Malformed(TokenError::Segments(1))
        ));
    }
}
