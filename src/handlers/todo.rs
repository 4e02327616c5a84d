//! Todo CRUD handlers, all scoped to the authenticated user

use log::info;
use serde::Serialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use super::{AppState, Envelope};
use crate::auth::Identity;
use crate::core::todo::{CreateTodoInput, PatchTodoInput, Todo, UpdateTodoInput};
use crate::error::FerrotaskError;

/// List envelope carries an explicit element count
#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub success: bool,
    pub data: Vec<Todo>,
    pub count: usize,
}

/// Delete envelope returns the removed todo alongside a message
#[derive(Debug, Serialize)]
pub struct TodoDeleteResponse {
    pub success: bool,
    pub data: Todo,
    pub message: String,
}

fn not_found() -> Rejection {
    warp::reject::custom(FerrotaskError::NotFound("Todo".to_string()))
}

/// GET /todos
pub async fn list_todos(
    identity: Identity,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    let todos = state
        .todos
        .list_todos(&identity.user_id)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&TodoListResponse {
        success: true,
        count: todos.len(),
        data: todos,
    }))
}

/// POST /todos
pub async fn create_todo(
    identity: Identity,
    input: CreateTodoInput,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    input.validate().map_err(warp::reject::custom)?;

    let todo = state
        .todos
        .insert_todo(Todo::new(&identity.user_id, input))
        .await
        .map_err(warp::reject::custom)?;
    info!("User {} created todo {}", identity.user_id, todo.id);

    Ok(warp::reply::with_status(
        warp::reply::json(&Envelope::new(todo)),
        StatusCode::CREATED,
    ))
}

/// GET /todos/{id}
pub async fn get_todo(
    todo_id: String,
    identity: Identity,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    let todo = state
        .todos
        .get_todo(&identity.user_id, &todo_id)
        .await
        .map_err(warp::reject::custom)?
        .ok_or_else(not_found)?;

    Ok(warp::reply::json(&Envelope::new(todo)))
}

/// PUT /todos/{id}
pub async fn update_todo(
    todo_id: String,
    identity: Identity,
    input: UpdateTodoInput,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    input.validate().map_err(warp::reject::custom)?;

    let mut todo = state
        .todos
        .get_todo(&identity.user_id, &todo_id)
        .await
        .map_err(warp::reject::custom)?
        .ok_or_else(not_found)?;

    todo.apply_update(input);
    state
        .todos
        .update_todo(todo.clone())
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&Envelope::new(todo)))
}

/// PATCH /todos/{id}
pub async fn patch_todo(
    todo_id: String,
    identity: Identity,
    patch: PatchTodoInput,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    patch.validate().map_err(warp::reject::custom)?;

    let mut todo = state
        .todos
        .get_todo(&identity.user_id, &todo_id)
        .await
        .map_err(warp::reject::custom)?
        .ok_or_else(not_found)?;

    todo.apply_patch(patch);
    state
        .todos
        .update_todo(todo.clone())
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&Envelope::new(todo)))
}

/// DELETE /todos/{id}
pub async fn delete_todo(
    todo_id: String,
    identity: Identity,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    let todo = state
        .todos
        .delete_todo(&identity.user_id, &todo_id)
        .await
        .map_err(warp::reject::custom)?
        .ok_or_else(not_found)?;
    info!("User {} deleted todo {}", identity.user_id, todo.id);

    Ok(warp::reply::json(&TodoDeleteResponse {
        success: true,
        data: todo,
        message: "Todo deleted successfully".to_string(),
    }))
}
