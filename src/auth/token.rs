use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::TOKEN_TTL_SECS;
use crate::error::{FerrotaskError, Result};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

impl Claims {
    /// Creates claims for a subject, valid from now for the token lifetime
    pub fn new(subject: impl Into<String>) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_secs() as usize;

        Self {
            sub: subject.into(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        }
    }

    /// Check if the claims are past their expiration
    pub fn is_expired(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_secs() as usize;

        now > self.exp
    }
}

/// Issues and verifies compact signed bearer credentials.
///
/// Tokens are HS256 JWTs: three base64url segments, the signature covering
/// the exact encoded bytes of header and payload. The signing secret is
/// injected at construction and shared by issue and verify.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Creates an issuer keyed by the UTF-8 bytes of a secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Signs a credential binding `subject` to a seven-day validity window
    pub fn issue(&self, subject: &str) -> Result<String> {
        let claims = Claims::new(subject);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| FerrotaskError::AuthError(format!("Failed to issue token: {}", e)))
    }

    /// Verifies a token and returns the embedded subject.
    ///
    /// Returns `None` for any failure: bad signature, malformed structure,
    /// expired claims, or a secret mismatch. Callers cannot distinguish
    /// these cases.
    pub fn verify(&self, token: &str) -> Option<String> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .ok()
            .map(|data| data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_carry_ttl() {
        let claims = Claims::new("user-1");
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_verify_rejects_empty_token() {
        let issuer = TokenIssuer::new("unit-test-secret");
        assert_eq!(issuer.verify(""), None);
    }
}
