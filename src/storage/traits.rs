//! Abstract storage interfaces for pluggable backends
//!
//! The handlers only ever talk to these traits. The in-memory provider in
//! this crate implements all of them; a relational or object-storage
//! backend can be swapped in behind the same seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::auth::user::{User, UserRecord};
use crate::core::todo::Todo;
use crate::error::Result;

/// A stored blob plus the metadata needed to serve it back
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Key of the form `{user_id}/{object_id}.{ext}`; the first path
    /// segment identifies the owner
    pub key: String,
    pub data: Vec<u8>,
    pub content_type: String,
    pub size: usize,
    pub etag: String,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredObject {
    pub fn new(key: impl Into<String>, data: Vec<u8>, content_type: impl Into<String>) -> Self {
        let etag = hex::encode(Sha256::digest(&data));
        Self {
            key: key.into(),
            size: data.len(),
            data,
            content_type: content_type.into(),
            etag,
            uploaded_at: Utc::now(),
        }
    }

    /// Owner derived from the key's leading path segment
    pub fn owner(&self) -> &str {
        self.key.split('/').next().unwrap_or_default()
    }
}

/// User account storage interface
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store a new account; fails with `EmailTaken` on a duplicate email
    async fn create_user(&self, record: UserRecord) -> Result<User>;

    /// Get the public user by ID
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Get the full record (including digest) by normalized email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
}

/// Todo storage interface; every read and write is scoped to an owner
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Store a new todo
    async fn insert_todo(&self, todo: Todo) -> Result<Todo>;

    /// Get a todo only if it belongs to `user_id`
    async fn get_todo(&self, user_id: &str, todo_id: &str) -> Result<Option<Todo>>;

    /// List a user's todos, oldest first
    async fn list_todos(&self, user_id: &str) -> Result<Vec<Todo>>;

    /// Persist a modified todo
    async fn update_todo(&self, todo: Todo) -> Result<()>;

    /// Remove a todo if it belongs to `user_id`, returning the removed item
    async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<Option<Todo>>;
}

/// Blob storage interface
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a blob under its key, replacing any previous object
    async fn put_object(&self, object: StoredObject) -> Result<()>;

    /// Fetch a blob by key
    async fn get_object(&self, key: &str) -> Result<Option<StoredObject>>;

    /// Delete a blob by key; returns whether it existed
    async fn delete_object(&self, key: &str) -> Result<bool>;
}
