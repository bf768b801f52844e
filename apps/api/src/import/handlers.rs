//! Axum route handlers for connection import and the user's own profile.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::import::csv_parser::{category_counts, parse_connections_csv};
use crate::models::profile::{Profile, UserProfile};
use crate::state::AppState;

const NO_MATCHES_NOTICE: &str =
    "No founders or product leads found in your connections. Make sure the CSV has Position data.";

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ImportConnectionsRequest {
    pub csv_text: String,
}

#[derive(Debug, Serialize)]
pub struct ImportConnectionsResponse {
    pub profiles: Vec<Profile>,
    pub counts: BTreeMap<&'static str, usize>,
    /// Set when parsing succeeded but nothing matched a category.
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportProfileRequest {
    pub user_id: Uuid,
    pub linkedin_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    pub user_id: Uuid,
    pub profile: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<UserProfile>,
}

/// POST /api/v1/connections/import
///
/// Parses a LinkedIn connections export. Zero matches is a normal result with a notice.
pub async fn handle_import_connections(
    State(state): State<AppState>,
    Json(request): Json<ImportConnectionsRequest>,
) -> Result<Json<ImportConnectionsResponse>, AppError> {
    let profiles = parse_connections_csv(&request.csv_text, state.classifier.as_ref())?;
    let counts = category_counts(&profiles);
    let notice = profiles.is_empty().then(|| NO_MATCHES_NOTICE.to_string());

    Ok(Json(ImportConnectionsResponse {
        profiles,
        counts,
        notice,
    }))
}

/// POST /api/v1/profile/import
///
/// Fetches the user's own profile from a public URL and saves it.
pub async fn handle_import_profile(
    State(state): State<AppState>,
    Json(request): Json<ImportProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.importer.fetch(request.linkedin_url.trim()).await?;
    state
        .persistence
        .save_user_profile(request.user_id, &profile)
        .await?;

    Ok(Json(ProfileResponse {
        profile: Some(profile),
    }))
}

/// PUT /api/v1/profile
///
/// Manual entry. Overwrites any saved profile.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(request): Json<SaveProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    request
        .profile
        .validate_manual()
        .map_err(AppError::Validation)?;

    state
        .persistence
        .save_user_profile(request.user_id, &request.profile)
        .await?;

    Ok(Json(ProfileResponse {
        profile: Some(request.profile),
    }))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.persistence.load_user_profile(params.user_id).await?;
    Ok(Json(ProfileResponse { profile }))
}
