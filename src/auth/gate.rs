//! Per-request authentication gate.
//!
//! Converts an inbound bearer credential into an authenticated identity or
//! rejects the request before any handler runs. The header must start with
//! the exact literal `"Bearer "`; anything else is rejected without
//! consulting the token verifier.

use std::sync::Arc;
use warp::{Filter, Rejection};

use crate::auth::token::TokenIssuer;
use crate::constants::BEARER_PREFIX;
use crate::error::{FerrotaskError, Result};

/// Request-scoped identity established by the gate on success
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

/// Resolves an `Authorization` header value into an identity.
///
/// Absent or malformed headers fail before the verifier is called;
/// well-formed headers fail only if the token itself does not verify.
pub fn authenticate(header: Option<&str>, issuer: &TokenIssuer) -> Result<Identity> {
    let header = header.ok_or(FerrotaskError::MissingAuthorization)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(FerrotaskError::MissingAuthorization)?;

    match issuer.verify(token) {
        Some(user_id) => Ok(Identity { user_id }),
        None => Err(FerrotaskError::InvalidToken),
    }
}

/// Warp filter that authenticates the request and extracts its identity.
///
/// On failure the request pipeline short-circuits with a typed rejection;
/// downstream handlers are never invoked.
pub fn require_auth(
    issuer: Arc<TokenIssuer>,
) -> impl Filter<Extract = (Identity,), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(move |header: Option<String>| {
        let issuer = issuer.clone();
        async move { authenticate(header.as_deref(), &issuer).map_err(warp::reject::custom) }
    })
}
