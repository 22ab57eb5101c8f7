use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Stringified user id
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Missing bearer token")]
    Missing,
    #[error("Invalid token: {0}")]
    Invalid(String),
    #[error("Token generation error: {0}")]
    Generation(String),
}

/// Issues and verifies signed, time-limited identity tokens.
///
/// The signing key and TTL are fixed at construction and read-only afterwards,
/// so a shared instance is safe for concurrent use without locking.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Produce a signed token with subject = `subject` and expiry = now + TTL.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Verify signature and expiry, returning the subject claim unchanged.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        // HS256 only: rejects "none" and any asymmetric algorithm in the header
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        Ok(token_data.claims.sub)
    }
}

/// Extract the bearer token from the Authorization header.
///
/// A missing header, a value without the `Bearer ` scheme, or an empty token
/// all yield `TokenError::Missing` so callers can tell "no credential" apart
/// from "credential failed verification".
pub fn extract_token(headers: &HeaderMap) -> Result<&str, TokenError> {
    let auth_header = headers.get(AUTHORIZATION).ok_or(TokenError::Missing)?;
    let auth_str = auth_header.to_str().map_err(|_| TokenError::Missing)?;

    let token = auth_str.strip_prefix("Bearer ").ok_or(TokenError::Missing)?;
    if token.trim().is_empty() {
        return Err(TokenError::Missing);
    }
    Ok(token)
}
