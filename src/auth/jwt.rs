//! JWT Token Handler
//! Mission: Issue and verify signed, time-limited tokens

use crate::auth::models::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Default token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to generate JWT: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    /// Bad signature, malformed token, or expired.
    #[error("Invalid or expired token")]
    InvalidToken,
}

/// HS256 token issuer/verifier over a shared secret
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a handler; tokens expire `ttl_secs` after issuance.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        // Expiry is exact: no clock tolerance past `exp`
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Generate a token for the given identity
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        debug!(
            "Generating JWT for {}, expires in {}s",
            username,
            self.ttl.num_seconds()
        );

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Encode)
    }

    /// Validate a token and extract its claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let decoded = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!("Rejected JWT: {}", e);
            TokenError::InvalidToken
        })?;

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-12345";

    #[test]
    fn test_jwt_issue_and_verify() {
        let handler = JwtHandler::new(SECRET, DEFAULT_TOKEN_TTL_SECS);

        let token = handler.issue("admin").unwrap();
        assert!(!token.is_empty());

        let claims = handler.verify(&token).unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let handler = JwtHandler::new(SECRET, DEFAULT_TOKEN_TTL_SECS);

        let result = handler.verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_different_secrets_reject() {
        let handler1 = JwtHandler::new("secret1", DEFAULT_TOKEN_TTL_SECS);
        let handler2 = JwtHandler::new("secret2", DEFAULT_TOKEN_TTL_SECS);

        let token = handler1.issue("admin").unwrap();

        assert!(handler2.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let handler = JwtHandler::new(SECRET, -3600);

        let token = handler.issue("admin").unwrap();
        assert!(matches!(
            handler.verify(&token),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_just_expired_token_rejected() {
        // Half a minute past expiry must already fail
        let handler = JwtHandler::new(SECRET, -30);

        let token = handler.issue("admin").unwrap();
        assert!(matches!(
            handler.verify(&token),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let handler = JwtHandler::new(SECRET, DEFAULT_TOKEN_TTL_SECS);

        let admin = handler.issue("admin").unwrap();
        let mallory = handler.issue("mallory").unwrap();

        // Splice mallory's payload under admin's signature
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let mallory_parts: Vec<&str> = mallory.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            admin_parts[0], mallory_parts[1], admin_parts[2]
        );

        assert!(handler.verify(&forged).is_err());
    }
}
