//! User query and mutation endpoints.
//!
//! Bodies are decoded into [`UserInput`] before the actor is involved, so
//! malformed or wrongly typed input never reaches the store. An unknown id
//! answers `null` with status 200, not 404.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::domain::{User, UserInput};
use crate::gateway::{AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route("/users/:id", get(get_user).put(update_user).delete(delete_user))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<User>>, AppError> {
    Ok(Json(state.user_client.get_user(id).await?))
}

async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.user_client.get_users().await?))
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.user_client.create_user(input).await?))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UserInput>,
) -> Result<Json<Option<User>>, AppError> {
    Ok(Json(state.user_client.update_user(id, input).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<User>>, AppError> {
    Ok(Json(state.user_client.delete_user(id).await?))
}
