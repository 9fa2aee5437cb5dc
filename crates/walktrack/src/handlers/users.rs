use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use walktrack_core::records::User;

use crate::{handlers::error::AppError, state::AppState};

/// List all users (GET /api/users).
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.service.list_users().await?;
    Ok(Json(users))
}

/// Create a new user (POST /api/users).
///
/// Responds 201 with the stored user and a `Location` header.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(user) = payload?;
    let created = state.service.create_user(&user).await?;

    let location = format!("/api/users/{}", created.id.as_deref().unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// Get a single user by ID (GET /api/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    state
        .service
        .get_user(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("User", id))
}

/// Replace a user by ID (PUT /api/users/{id}).
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let Json(user) = payload?;

    state
        .service
        .update_user(&id, &user)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("User", id))
}

/// Delete a user by ID (DELETE /api/users/{id}).
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.service.delete_user(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("User", id))
    }
}
