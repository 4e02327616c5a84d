//! Request handlers for the REST API endpoints

pub mod auth;
pub mod image;
pub mod todo;

use log::error;
use serde::Serialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::config::ServerConfig;
use crate::error::FerrotaskError;
use crate::storage::memory::MemoryStore;
use crate::storage::traits::{ObjectStore, TodoStore, UserStore};

/// Shared per-process application state.
///
/// The hasher and issuer are pure and stateless; the stores guard their own
/// interior state. Everything here is safe for concurrent use by any number
/// of in-flight requests.
pub struct AppState {
    pub hasher: PasswordHasher,
    pub issuer: Arc<TokenIssuer>,
    pub users: Arc<dyn UserStore>,
    pub todos: Arc<dyn TodoStore>,
    pub objects: Arc<dyn ObjectStore>,
}

impl AppState {
    /// Builds state backed by the in-memory storage provider
    pub fn new(config: &ServerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_stores(config, store.clone(), store.clone(), store)
    }

    /// Builds state over explicit storage backends
    pub fn with_stores(
        config: &ServerConfig,
        users: Arc<dyn UserStore>,
        todos: Arc<dyn TodoStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            hasher: PasswordHasher::new(config.password_salt.clone()),
            issuer: Arc::new(TokenIssuer::new(&config.jwt_secret)),
            users,
            todos,
            objects,
        }
    }
}

/// Standard success envelope: `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Standard error envelope: `{"success": false, "error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Translates rejections into the JSON error envelope.
///
/// Typed `FerrotaskError` rejections carry their own status; everything
/// else falls through to warp's built-in rejection kinds. Always replies;
/// nothing is left for a downstream recovery stage.
pub async fn handle_rejection(err: Rejection) -> std::result::Result<impl Reply, Rejection> {
    let (status, message) = if let Some(api_err) = err.find::<FerrotaskError>() {
        (api_err.status_code(), api_err.to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Resource not found".to_string())
    } else if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
    } else if err.find::<warp::reject::InvalidHeader>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid request header".to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large".to_string(),
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            "Content length required".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else {
        error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody::new(message)),
        status,
    ))
}
