//! Axum route handlers for one-off drafting and the saved drafts list.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::drafting::{draft_or_fallback, DraftRequest};
use crate::errors::AppError;
use crate::import::handlers::UserIdQuery;
use crate::models::profile::LikedProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DraftsResponse {
    pub drafts: Vec<LikedProfile>,
}

#[derive(Debug, Deserialize)]
pub struct EditDraftRequest {
    pub message: String,
}

/// POST /api/v1/messages/generate
///
/// Returns `{ message }`, or 500 with `{ error, fallback }` when drafting fails.
pub async fn handle_generate_message(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Result<Response, AppError> {
    request.validate()?;

    let outcome = draft_or_fallback(state.drafter.as_ref(), &request).await;
    if outcome.failed {
        let body = Json(json!({
            "error": "Failed to generate message",
            "fallback": outcome.message,
        }));
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, body).into_response());
    }

    Ok(Json(json!({ "message": outcome.message })).into_response())
}

/// GET /api/v1/drafts
pub async fn handle_list_drafts(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DraftsResponse>, AppError> {
    let drafts = state.persistence.load_liked(params.user_id).await?;
    Ok(Json(DraftsResponse { drafts }))
}

/// PATCH /api/v1/drafts/:profile_id
pub async fn handle_edit_draft(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<EditDraftRequest>,
) -> Result<Json<DraftsResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let updated = state
        .persistence
        .update_message(params.user_id, &profile_id, &request.message)
        .await?;
    if !updated {
        return Err(AppError::NotFound(format!("Draft {profile_id} not found")));
    }

    let drafts = state.persistence.load_liked(params.user_id).await?;
    Ok(Json(DraftsResponse { drafts }))
}

/// DELETE /api/v1/drafts/:profile_id
pub async fn handle_delete_draft(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DraftsResponse>, AppError> {
    let deleted = state
        .persistence
        .delete_liked(params.user_id, &profile_id)
        .await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Draft {profile_id} not found")));
    }

    let drafts = state.persistence.load_liked(params.user_id).await?;
    Ok(Json(DraftsResponse { drafts }))
}
