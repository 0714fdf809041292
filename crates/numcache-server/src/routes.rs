use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use numcache_core::{Category, WindowSnapshot};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::error::ServerError;
use crate::state::AppState;

/// Build the axum router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/numbers/{code}", get(numbers))
        .route("/users", get(users))
        .route("/users/{id}/posts", get(user_posts))
        .route("/posts/{id}/comments", get(post_comments))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        app: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn numbers(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<WindowSnapshot>, ServerError> {
    let category = Category::from_code(&code).ok_or(ServerError::InvalidCategory(code))?;

    state.credentials.ensure_valid().await?;

    let snapshot = state.cache.update(category).await;
    if snapshot.retrieved_numbers.is_empty() {
        warn!(%category, "No numbers retrieved from upstream");
        return Err(ServerError::NumbersUnavailable);
    }
    Ok(Json(snapshot))
}

async fn users(State(state): State<AppState>) -> Result<Json<Value>, ServerError> {
    let users = read_through(&state, "users", "users", "Could not fetch users.").await?;
    Ok(Json(json!({ "users": users })))
}

async fn user_posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    check_id(&id, "User ID is required.", "Invalid user ID.")?;
    let path = format!("users/{}/posts", id);
    let posts = read_through(&state, &path, "posts", "Could not fetch posts for this user.").await?;
    Ok(Json(json!({ "posts": posts })))
}

async fn post_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    check_id(&id, "Post ID is required.", "Invalid post ID.")?;
    let path = format!("posts/{}/comments", id);
    let comments =
        read_through(&state, &path, "comments", "Could not fetch comments for this post.").await?;
    Ok(Json(json!({ "comments": comments })))
}

/// Ids are forwarded into the upstream path, so only plain tokens are accepted.
fn check_id(id: &str, missing: &'static str, invalid: &'static str) -> Result<(), ServerError> {
    if id.is_empty() {
        return Err(ServerError::BadRequest(missing));
    }
    if id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(ServerError::BadRequest(invalid))
    }
}

/// Fetch an upstream social endpoint and pull one field out of its body.
/// A missing field is passed on as `null`.
async fn read_through(
    state: &AppState,
    path: &str,
    field: &str,
    failure: &'static str,
) -> Result<Value, ServerError> {
    let token = state.credentials.ensure_valid().await.map_err(|e| {
        error!(path, error = %e, "Read-through request not authorized");
        ServerError::ReadThrough(failure)
    })?;

    let mut body = state.api.fetch_social(path, &token).await.map_err(|e| {
        error!(path, error = %e, "Read-through request failed");
        ServerError::ReadThrough(failure)
    })?;

    Ok(body.get_mut(field).map(Value::take).unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), ServerError>) -> String {
        result.map(|_| String::new()).unwrap_or_else(|e| e.to_string())
    }

    #[test]
    fn test_check_id() {
        assert!(check_id("1", "missing", "invalid").is_ok());
        assert!(check_id("user_42-a", "missing", "invalid").is_ok());

        assert_eq!(message(check_id("", "missing", "invalid")), "missing");
        assert_eq!(message(check_id("..", "missing", "invalid")), "invalid");
        assert_eq!(message(check_id("1/../../auth", "missing", "invalid")), "invalid");
        assert_eq!(message(check_id("1?x=y", "missing", "invalid")), "invalid");
    }
}
