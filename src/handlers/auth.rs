//! Registration and login handlers

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use super::{AppState, Envelope};
use crate::auth::user::{User, UserRecord};
use crate::constants::MIN_AUTH_RESPONSE_MS;
use crate::error::{FerrotaskError, Result};
use crate::security::AuthTimer;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User plus freshly issued token, returned by both register and login
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: User,
    pub token: String,
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| FerrotaskError::ValidationError("Invalid email address".to_string()))?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(FerrotaskError::ValidationError(
            "Invalid email address".to_string(),
        ));
    }
    if password.chars().count() < 6 {
        return Err(FerrotaskError::ValidationError(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

/// POST /auth/register
pub async fn register(
    request: RegisterRequest,
    state: Arc<AppState>,
) -> std::result::Result<impl Reply, Rejection> {
    validate_credentials(&request.email, &request.password).map_err(warp::reject::custom)?;

    let email = request.email.trim().to_lowercase();
    let digest = state
        .hasher
        .hash(&request.password)
        .map_err(warp::reject::custom)?;

    let user = state
        .users
        .create_user(UserRecord::new(email, digest))
        .await
        .map_err(warp::reject::custom)?;

    let token = state.issuer.issue(&user.id).map_err(warp::reject::custom)?;
    info!("Registered user {}", user.id);

    Ok(warp::reply::with_status(
        warp::reply::json(&Envelope::new(AuthData { user, token })),
        StatusCode::CREATED,
    ))
}

/// POST /auth/login
///
/// Unknown email and wrong password are indistinguishable to the caller,
/// both in message and in response time.
pub async fn login(
    request: LoginRequest,
    state: Arc<AppState>,
) -> std::result::Result<impl Reply, Rejection> {
    let timer = AuthTimer::new(Duration::from_millis(MIN_AUTH_RESPONSE_MS));
    let email = request.email.trim().to_lowercase();

    let record = match state
        .users
        .get_user_by_email(&email)
        .await
        .map_err(warp::reject::custom)?
    {
        Some(record) => record,
        None => {
            // Burn a derivation so this path costs the same as a wrong password
            let _ = state.hasher.hash(&request.password);
            debug!("Login failed: unknown email");
            timer.wait().await;
            return Err(warp::reject::custom(FerrotaskError::InvalidCredentials));
        }
    };

    if !state
        .hasher
        .verify(&request.password, &record.password_digest)
    {
        debug!("Login failed: digest mismatch for user {}", record.user.id);
        timer.wait().await;
        return Err(warp::reject::custom(FerrotaskError::InvalidCredentials));
    }

    let token = state
        .issuer
        .issue(&record.user.id)
        .map_err(warp::reject::custom)?;
    info!("User {} logged in", record.user.id);

    Ok(warp::reply::with_status(
        warp::reply::json(&Envelope::new(AuthData {
            user: record.user,
            token,
        })),
        StatusCode::OK,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape_validation() {
        assert!(validate_credentials("user@example.com", "password123").is_ok());
        assert!(validate_credentials("no-at-sign", "password123").is_err());
        assert!(validate_credentials("@example.com", "password123").is_err());
        assert!(validate_credentials("user@", "password123").is_err());
        assert!(validate_credentials("user@nodot", "password123").is_err());
        assert!(validate_credentials("us er@example.com", "password123").is_err());
    }

    #[test]
    fn test_password_length_validation() {
        assert!(validate_credentials("user@example.com", "12345").is_err());
        assert!(validate_credentials("user@example.com", "123456").is_ok());
    }
}
