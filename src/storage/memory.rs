//! In-memory storage implementation for development and testing
//!
//! Keeps every account, todo, and blob in process memory behind RwLocks.
//! Suitable for development, testing, or small single-node deployments;
//! it stands in for managed relational and object storage backends.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{ObjectStore, StoredObject, TodoStore, UserStore};
use crate::auth::user::{User, UserRecord};
use crate::core::todo::Todo;
use crate::error::{FerrotaskError, Result};

/// In-memory provider implementing every storage trait
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
    user_emails: Arc<RwLock<HashMap<String, String>>>, // email -> user_id
    todos: Arc<RwLock<HashMap<String, Todo>>>,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            user_emails: Arc::new(RwLock::new(HashMap::new())),
            todos: Arc::new(RwLock::new(HashMap::new())),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, record: UserRecord) -> Result<User> {
        let mut users = self.users.write().await;
        let mut emails = self.user_emails.write().await;

        if emails.contains_key(&record.user.email) {
            return Err(FerrotaskError::EmailTaken);
        }

        emails.insert(record.user.email.clone(), record.user.id.clone());
        let user = record.user.clone();
        users.insert(record.user.id.clone(), record);

        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(user_id).map(|record| record.user.clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let emails = self.user_emails.read().await;
        let users = self.users.read().await;

        if let Some(user_id) = emails.get(email) {
            Ok(users.get(user_id).cloned())
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert_todo(&self, todo: Todo) -> Result<Todo> {
        let mut todos = self.todos.write().await;
        todos.insert(todo.id.clone(), todo.clone());
        Ok(todo)
    }

    async fn get_todo(&self, user_id: &str, todo_id: &str) -> Result<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos
            .get(todo_id)
            .filter(|todo| todo.user_id == user_id)
            .cloned())
    }

    async fn list_todos(&self, user_id: &str) -> Result<Vec<Todo>> {
        let todos = self.todos.read().await;
        let mut result: Vec<Todo> = todos
            .values()
            .filter(|todo| todo.user_id == user_id)
            .cloned()
            .collect();

        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(result)
    }

    async fn update_todo(&self, todo: Todo) -> Result<()> {
        let mut todos = self.todos.write().await;
        todos.insert(todo.id.clone(), todo);
        Ok(())
    }

    async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<Option<Todo>> {
        let mut todos = self.todos.write().await;

        match todos.get(todo_id) {
            Some(todo) if todo.user_id == user_id => Ok(todos.remove(todo_id)),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(&self, object: StoredObject) -> Result<()> {
        let mut objects = self.objects.write().await;
        objects.insert(object.key.clone(), object);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Option<StoredObject>> {
        let objects = self.objects.read().await;
        Ok(objects.get(key).cloned())
    }

    async fn delete_object(&self, key: &str) -> Result<bool> {
        let mut objects = self.objects.write().await;
        Ok(objects.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::todo::CreateTodoInput;

    fn todo_for(user_id: &str, title: &str) -> Todo {
        Todo::new(
            user_id,
            CreateTodoInput {
                title: title.to_string(),
                completed: false,
                location: None,
                photo_uri: None,
            },
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store
            .create_user(UserRecord::new("a@example.com", "digest"))
            .await
            .unwrap();

        let result = store
            .create_user(UserRecord::new("a@example.com", "digest"))
            .await;
        assert!(matches!(result, Err(FerrotaskError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_email_lookup_returns_digest() {
        let store = MemoryStore::new();
        let user = store
            .create_user(UserRecord::new("a@example.com", "digest-123"))
            .await
            .unwrap();

        let record = store.get_user_by_email("a@example.com").await.unwrap();
        assert_eq!(record.unwrap().password_digest, "digest-123");
        assert!(store
            .get_user_by_email("b@example.com")
            .await
            .unwrap()
            .is_none());

        let by_id = store.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@example.com");
        assert!(store.get_user("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_todo_reads_are_owner_scoped() {
        let store = MemoryStore::new();
        let todo = store.insert_todo(todo_for("user-a", "Mine")).await.unwrap();

        assert!(store.get_todo("user-a", &todo.id).await.unwrap().is_some());
        assert!(store.get_todo("user-b", &todo.id).await.unwrap().is_none());
        assert!(store.delete_todo("user-b", &todo.id).await.unwrap().is_none());
        assert!(store.get_todo("user-a", &todo.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let store = MemoryStore::new();
        let first = store.insert_todo(todo_for("user-a", "first")).await.unwrap();
        let second = store
            .insert_todo(todo_for("user-a", "second"))
            .await
            .unwrap();

        let listed = store.list_todos("user-a").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[tokio::test]
    async fn test_object_roundtrip_and_delete() {
        let store = MemoryStore::new();
        let object = StoredObject::new("user-a/pic.png", vec![1, 2, 3], "image/png");
        let etag = object.etag.clone();

        store.put_object(object).await.unwrap();
        let fetched = store.get_object("user-a/pic.png").await.unwrap().unwrap();
        assert_eq!(fetched.size, 3);
        assert_eq!(fetched.etag, etag);
        assert_eq!(fetched.owner(), "user-a");

        assert!(store.delete_object("user-a/pic.png").await.unwrap());
        assert!(!store.delete_object("user-a/pic.png").await.unwrap());
    }
}
