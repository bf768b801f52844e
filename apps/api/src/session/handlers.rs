//! Axum route handlers for swipe sessions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::goal::NetworkingGoal;
use crate::models::profile::{Profile, ProfileCategory, SwipeDirection};
use crate::session::machine::{SessionSnapshot, SessionStatus, SwipeOutcome, SwipeSession};
use crate::session::registry::{spawn_draft_task, SharedSession};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub user_id: Uuid,
    pub category: ProfileCategory,
    pub networking_goal: NetworkingGoal,
    /// Profiles from a connections import. When absent the bundled catalog is used.
    #[serde(default)]
    pub profiles: Option<Vec<Profile>>,
}

#[derive(Debug, Deserialize)]
pub struct SwipeRequest {
    pub direction: SwipeDirection,
}

/// POST /api/v1/sessions
///
/// Builds the queue for the chosen category. An empty queue completes immediately
/// and is never kept in the registry.
pub async fn handle_start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let queue: Vec<Profile> = match request.profiles {
        Some(imported) => imported
            .into_iter()
            .filter(|p| p.category == request.category)
            .collect(),
        None => state.catalog.profiles_by_category(request.category),
    };

    let user_profile = state.persistence.load_user_profile(request.user_id).await?;

    let session = SwipeSession::new(
        request.user_id,
        request.category,
        request.networking_goal,
        user_profile,
        queue,
    );
    info!(
        "Starting session {} for {:?} ({} profiles)",
        session.id(),
        request.category,
        session.snapshot().total
    );

    let shared = state.sessions.insert(session).await;
    let mut session = shared.lock().await;
    Ok(Json(settle(&state, &mut session).await?))
}

/// GET /api/v1/sessions/:id
///
/// Also retries the hand-off of an exhausted session whose save failed earlier.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let shared = find_session(&state, session_id).await?;
    let mut session = shared.lock().await;
    Ok(Json(settle(&state, &mut session).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(session_id).await {
        return Err(AppError::NotFound(format!("Session {session_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/grab
///
/// The top card is being dragged.
pub async fn handle_grab(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let shared = find_session(&state, session_id).await?;
    let mut session = shared.lock().await;
    session.begin_decision()?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/sessions/:id/release
pub async fn handle_release(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let shared = find_session(&state, session_id).await?;
    let mut session = shared.lock().await;
    session.abandon_decision();
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/sessions/:id/swipe
///
/// A right swipe returns at once with the draft pending; poll the session for the message.
pub async fn handle_swipe(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SwipeRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let shared = find_session(&state, session_id).await?;
    let mut session = shared.lock().await;
    if session.is_exhausted() {
        return Ok(Json(settle(&state, &mut session).await?));
    }

    if let SwipeOutcome::DraftRequested(ticket) = session.swipe(request.direction)? {
        spawn_draft_task(shared.clone(), ticket, state.drafter.clone());
    }

    Ok(Json(settle(&state, &mut session).await?))
}

/// POST /api/v1/sessions/:id/dismiss
pub async fn handle_dismiss(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let shared = find_session(&state, session_id).await?;
    let mut session = shared.lock().await;
    if session.is_exhausted() {
        return Ok(Json(settle(&state, &mut session).await?));
    }

    session.dismiss(Utc::now())?;
    Ok(Json(settle(&state, &mut session).await?))
}

/// POST /api/v1/sessions/:id/undo
pub async fn handle_undo(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let shared = find_session(&state, session_id).await?;
    let mut session = shared.lock().await;
    session.undo()?;
    Ok(Json(session.snapshot()))
}

/// Hands an exhausted session's likes to persistence and drops it from the registry.
///
/// A failed save leaves the session registered and not complete, so any later
/// request on it retries the hand-off.
async fn settle(state: &AppState, session: &mut SwipeSession) -> Result<SessionSnapshot, AppError> {
    if session.is_exhausted() {
        session.complete(&state.persistence).await?;
        if session.status() == SessionStatus::Complete && state.sessions.remove(session.id()).await {
            info!("Session {} evicted after completion", session.id());
        }
    }
    Ok(session.snapshot())
}

async fn find_session(state: &AppState, session_id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}
