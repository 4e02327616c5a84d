use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FerrotaskError, Result};

/// Geographic coordinates attached to a todo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(FerrotaskError::ValidationError(
                "Latitude must be between -90 and 90".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(FerrotaskError::ValidationError(
                "Longitude must be between -180 and 180".to_string(),
            ));
        }
        Ok(())
    }
}

/// A todo item owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a todo for a user from validated input
    pub fn new(user_id: impl Into<String>, input: CreateTodoInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: input.title,
            completed: input.completed,
            location: input.location,
            photo_uri: input.photo_uri,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field, bumping `updated_at`
    pub fn apply_update(&mut self, input: UpdateTodoInput) {
        self.title = input.title;
        self.completed = input.completed;
        self.location = input.location;
        self.photo_uri = input.photo_uri;
        self.updated_at = Utc::now();
    }

    /// Applies only the fields present in the patch, bumping `updated_at`
    pub fn apply_patch(&mut self, patch: PatchTodoInput) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(photo_uri) = patch.photo_uri {
            self.photo_uri = Some(photo_uri);
        }
        self.updated_at = Utc::now();
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(FerrotaskError::ValidationError(
            "Title must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Request body for creating a todo
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub location: Option<Location>,
    pub photo_uri: Option<String>,
}

impl CreateTodoInput {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }
}

/// Request body for a full replace of a todo
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub location: Option<Location>,
    pub photo_uri: Option<String>,
}

impl UpdateTodoInput {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }
}

/// Request body for a partial update; absent fields are left untouched
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchTodoInput {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub location: Option<Location>,
    pub photo_uri: Option<String>,
}

impl PatchTodoInput {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(title: &str) -> CreateTodoInput {
        CreateTodoInput {
            title: title.to_string(),
            completed: false,
            location: None,
            photo_uri: None,
        }
    }

    #[test]
    fn test_location_bounds() {
        assert!(Location {
            latitude: 90.0,
            longitude: -180.0
        }
        .validate()
        .is_ok());
        assert!(Location {
            latitude: 90.1,
            longitude: 0.0
        }
        .validate()
        .is_err());
        assert!(Location {
            latitude: 0.0,
            longitude: 180.5
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(create_input("   ").validate().is_err());
        assert!(create_input("Buy groceries").validate().is_ok());
    }

    #[test]
    fn test_patch_leaves_absent_fields_untouched() {
        let mut todo = Todo::new("user-1", create_input("Original"));
        todo.apply_patch(PatchTodoInput {
            title: None,
            completed: Some(true),
            location: None,
            photo_uri: None,
        });
        assert_eq!(todo.title, "Original");
        assert!(todo.completed);
    }

    #[test]
    fn test_update_replaces_optional_fields() {
        let mut todo = Todo::new(
            "user-1",
            CreateTodoInput {
                title: "Original".to_string(),
                completed: false,
                location: Some(Location {
                    latitude: 1.0,
                    longitude: 2.0,
                }),
                photo_uri: None,
            },
        );
        todo.apply_update(UpdateTodoInput {
            title: "Replaced".to_string(),
            completed: true,
            location: None,
            photo_uri: Some("/images/u/p.jpg".to_string()),
        });
        assert_eq!(todo.title, "Replaced");
        assert!(todo.location.is_none());
        assert_eq!(todo.photo_uri.as_deref(), Some("/images/u/p.jpg"));
    }
}
