use std::error::Error;
use std::fmt;

use warp::http::StatusCode;

#[derive(Debug)]
pub enum FerrotaskError {
    // Configuration errors
    ConfigError(String),

    // Authentication errors
    AuthError(String),
    MissingAuthorization,
    InvalidToken,
    InvalidCredentials,

    // Domain errors
    EmailTaken,
    NotFound(String),
    Forbidden(String),
    ValidationError(String),

    // Infrastructure errors
    StorageError(String),
    SystemError(String),
}

impl FerrotaskError {
    /// HTTP status this error maps to at the API boundary.
    ///
    /// The auth core itself never picks status codes; this mapping is
    /// consulted only by the rejection handler.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::MissingAuthorization | Self::InvalidToken | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::ConfigError(_)
            | Self::AuthError(_)
            | Self::StorageError(_)
            | Self::SystemError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for FerrotaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // User-facing variants render as the exact API error message
            Self::MissingAuthorization => write!(f, "Missing or invalid authorization header"),
            Self::InvalidToken => write!(f, "Invalid or expired token"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::EmailTaken => write!(f, "Email already registered"),
            Self::NotFound(what) => write!(f, "{} not found", what),
            Self::Forbidden(msg) => write!(f, "{}", msg),
            Self::ValidationError(msg) => write!(f, "{}", msg),
            // Internal variants carry a prefixed description
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::AuthError(msg) => write!(f, "Authentication error: {}", msg),
            Self::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Self::SystemError(msg) => write!(f, "System error: {}", msg),
        }
    }
}

impl Error for FerrotaskError {}

// Lets handlers short-circuit the request pipeline with a typed error;
// the recover stage turns it back into a JSON envelope.
impl warp::reject::Reject for FerrotaskError {}

// Generic result type for Ferrotask
pub type Result<T> = std::result::Result<T, FerrotaskError>;
