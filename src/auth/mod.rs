use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Claims carried by the bearer tokens the identity provider mints for
/// dashboard sessions. `sub` is the provider's opaque user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: String, email: Option<String>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            email,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("JWT secret is not configured")]
    MissingSecret,
}

/// Mint a signed token for the given claims using the configured secret.
/// Used by the CLI `token` command and by tests.
pub fn issue_token(claims: &Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }
    encode_with_secret(claims, secret)
}

pub fn encode_with_secret(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn decode_with_secret(token: &str, secret: &str) -> Result<Claims, String> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| format!("Invalid bearer token: {}", e))?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn claims() -> Claims {
        let now = Utc::now();
        Claims {
            sub: "user_2xh9q".to_string(),
            email: Some("analyst@example.com".to_string()),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        }
    }

    #[test]
    fn token_round_trips() {
        let token = encode_with_secret(&claims(), SECRET).unwrap();
        let decoded = decode_with_secret(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "user_2xh9q");
        assert_eq!(decoded.email.as_deref(), Some("analyst@example.com"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = encode_with_secret(&claims(), SECRET).unwrap();
        assert!(decode_with_secret(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let expired = Claims {
            sub: "user_2xh9q".to_string(),
            email: None,
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode_with_secret(&expired, SECRET).unwrap();
        assert!(decode_with_secret(&token, SECRET).is_err());
    }
}
