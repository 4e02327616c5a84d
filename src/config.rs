//! Server configuration module
//! Handles configuration parameters for the REST API server

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{FerrotaskError, Result};
use std::env;

/// Server configuration parameters
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JWT secret for token signing and verification
    pub jwt_secret: String,
    /// Deployment-wide salt mixed into password hashing
    pub password_salt: String,
    /// Development mode (relaxes logging expectations only)
    pub development_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        panic!("ServerConfig::default() is not allowed for security reasons. Use ServerConfig::from_env() instead.");
    }
}

impl ServerConfig {
    /// Create a test configuration - DANGEROUS: Only for testing!
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jwt_secret: "unit-jwt-0123456789-abcdefghijklmnop-!".to_string(),
            password_salt: "unit-salt-0123456789".to_string(),
            development_mode: true,
        }
    }

    /// Validate that a secret meets security requirements
    fn validate_secret(secret: &str, secret_type: &str, min_len: usize) -> Result<()> {
        if secret.len() < min_len {
            return Err(FerrotaskError::ConfigError(format!(
                "{} must be at least {} characters long",
                secret_type, min_len
            )));
        }

        // Check for insecure default or example values
        let insecure_patterns = [
            "your-secret-key",
            "change-this",
            "INSECURE-DEFAULT",
            "example",
            "default",
            "secret",
            "password",
            "12345",
        ];

        for pattern in &insecure_patterns {
            if secret.contains(pattern) {
                return Err(FerrotaskError::ConfigError(format!(
                    "{} contains insecure pattern '{}'. Generate a secure random value with: openssl rand -base64 32",
                    secret_type, pattern
                )));
            }
        }

        Ok(())
    }

    /// Ensure the JWT secret and password salt are independent values
    fn validate_secrets_are_different(jwt_secret: &str, password_salt: &str) -> Result<()> {
        if jwt_secret == password_salt {
            return Err(FerrotaskError::ConfigError(
                "JWT secret and password salt must be different values. Reusing one secret for both purposes increases attack surface.".to_string()
            ));
        }
        Ok(())
    }

    /// Load configuration from environment variables if available
    pub fn from_env() -> Result<Self> {
        let host = env::var("FERROTASK_HOST").unwrap_or(DEFAULT_HOST.to_string());
        let port = env::var("FERROTASK_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let jwt_secret = env::var("FERROTASK_JWT_SECRET")
            .or_else(|_| env::var("JWT_SECRET"))
            .map_err(|_| {
                FerrotaskError::ConfigError(
                    "JWT_SECRET environment variable is required for security. \
                     Generate one with: openssl rand -base64 32"
                        .to_string(),
                )
            })?;

        let password_salt = env::var("FERROTASK_PASSWORD_SALT")
            .or_else(|_| env::var("PASSWORD_SALT"))
            .map_err(|_| {
                FerrotaskError::ConfigError(
                    "PASSWORD_SALT environment variable is required for security. \
                     Generate one with: openssl rand -base64 32 \
                     NOTE: the salt must be different from the JWT secret."
                        .to_string(),
                )
            })?;

        let development_mode = env::var("FERROTASK_DEVELOPMENT_MODE")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false); // SECURITY: Default to false (production mode)

        Self::validate_secret(&jwt_secret, "JWT secret", 32)?;
        Self::validate_secret(&password_salt, "Password salt", 16)?;
        Self::validate_secrets_are_different(&jwt_secret, &password_salt)?;

        Ok(Self {
            host,
            port,
            jwt_secret,
            password_salt,
            development_mode,
        })
    }
}
