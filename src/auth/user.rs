use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public shape of a user account, as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Normalized (lowercase) email address
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a generated id
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Stored account record: the public user plus its password digest.
///
/// Deliberately not serializable so the digest can never leak into a
/// response body.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_digest: String,
}

impl UserRecord {
    pub fn new(email: impl Into<String>, password_digest: impl Into<String>) -> Self {
        Self {
            user: User::new(email),
            password_digest: password_digest.into(),
        }
    }
}
