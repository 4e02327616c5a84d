//! HTTP route composition
//!
//! Wires every endpoint to its handler, threading shared state and the
//! auth gate through warp filters. Returned as one combined filter so the
//! binary and the integration tests serve the exact same tree.

use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

use crate::auth::require_auth;
use crate::auth::Identity;
use crate::constants::{MAX_IMAGE_UPLOAD_BYTES, MAX_JSON_BODY_BYTES};
use crate::handlers::{self, AppState};

/// Full application filter, including rejection recovery
pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    api_routes(state).recover(handlers::handle_rejection)
}

fn api_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    root()
        .or(health())
        .or(auth_routes(state.clone()))
        .or(todo_routes(state.clone()))
        .or(image_routes(state))
}

// Helper function to include shared state in a request
fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

// Size-limited JSON body extraction
fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
{
    warp::body::content_length_limit(MAX_JSON_BODY_BYTES).and(warp::body::json())
}

// Auth gate bound to this state's token issuer
fn gate(state: &Arc<AppState>) -> impl Filter<Extract = (Identity,), Error = Rejection> + Clone {
    require_auth(state.issuer.clone())
}

fn root() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "message": "Welcome to the Ferrotask API",
            "endpoints": {
                "health": "/health",
                "auth": {
                    "register": "/auth/register",
                    "login": "/auth/login",
                },
                "todos": "/todos (requires authentication)",
                "images": "/images (upload requires authentication)",
            },
        }))
    })
}

fn health() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("health").and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "ok",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
    })
}

fn auth_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let register = warp::path!("auth" / "register")
        .and(warp::post())
        .and(json_body())
        .and(with_state(state.clone()))
        .and_then(handlers::auth::register);

    let login = warp::path!("auth" / "login")
        .and(warp::post())
        .and(json_body())
        .and(with_state(state))
        .and_then(handlers::auth::login);

    register.or(login)
}

fn todo_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let list = warp::path!("todos")
        .and(warp::get())
        .and(gate(&state))
        .and(with_state(state.clone()))
        .and_then(handlers::todo::list_todos);

    let create = warp::path!("todos")
        .and(warp::post())
        .and(gate(&state))
        .and(json_body())
        .and(with_state(state.clone()))
        .and_then(handlers::todo::create_todo);

    let get = warp::path!("todos" / String)
        .and(warp::get())
        .and(gate(&state))
        .and(with_state(state.clone()))
        .and_then(handlers::todo::get_todo);

    let update = warp::path!("todos" / String)
        .and(warp::put())
        .and(gate(&state))
        .and(json_body())
        .and(with_state(state.clone()))
        .and_then(handlers::todo::update_todo);

    let patch = warp::path!("todos" / String)
        .and(warp::patch())
        .and(gate(&state))
        .and(json_body())
        .and(with_state(state.clone()))
        .and_then(handlers::todo::patch_todo);

    let delete = warp::path!("todos" / String)
        .and(warp::delete())
        .and(gate(&state))
        .and(with_state(state))
        .and_then(handlers::todo::delete_todo);

    list.or(create).or(get).or(update).or(patch).or(delete)
}

fn image_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    // The multipart limit leaves headroom over the image cap so oversized
    // uploads get the validation message rather than a bare 413
    let upload = warp::path!("images")
        .and(warp::post())
        .and(gate(&state))
        .and(warp::multipart::form().max_length((MAX_IMAGE_UPLOAD_BYTES + 64 * 1024) as u64))
        .and(with_state(state.clone()))
        .and_then(handlers::image::upload_image);

    let download = warp::path!("images" / String / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::image::get_image);

    let delete = warp::path!("images" / String / String)
        .and(warp::delete())
        .and(gate(&state))
        .and(with_state(state))
        .and_then(handlers::image::delete_image);

    upload.or(download).or(delete)
}
