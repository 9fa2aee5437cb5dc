use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use walktrack_core::records::Walk;

use crate::{handlers::error::AppError, state::AppState};

/// Create a new walk (POST /api/walks).
///
/// A missing or unparsable `startTime` is recorded as the current time.
pub async fn create_walk(
    State(state): State<AppState>,
    payload: Result<Json<Walk>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(walk) = payload?;
    let created = state.service.create_walk(&walk).await?;

    let location = format!("/api/walks/{}", created.id.as_deref().unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// Get a single walk by ID (GET /api/walks/{id}).
pub async fn get_walk(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Walk>, AppError> {
    state
        .service
        .get_walk(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Walk", id))
}

/// List the walks of one user (GET /api/walks/user/{user_id}).
pub async fn list_walks_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Walk>>, AppError> {
    let walks = state.service.list_walks_by_user(&user_id).await?;
    Ok(Json(walks))
}

/// Replace a walk by ID (PUT /api/walks/{id}).
pub async fn update_walk(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Walk>, JsonRejection>,
) -> Result<Json<Walk>, AppError> {
    let Json(walk) = payload?;

    state
        .service
        .update_walk(&id, &walk)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Walk", id))
}

/// Delete a walk by ID (DELETE /api/walks/{id}).
pub async fn delete_walk(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.service.delete_walk(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Walk", id))
    }
}
