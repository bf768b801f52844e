pub mod health;
pub mod options;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::drafting::handlers as drafting;
use crate::import::handlers as import;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/categories", get(options::handle_list_categories))
        .route("/api/v1/goals", get(options::handle_list_goals))
        // User profile
        .route(
            "/api/v1/profile",
            get(import::handle_get_profile).put(import::handle_save_profile),
        )
        .route("/api/v1/profile/import", post(import::handle_import_profile))
        .route(
            "/api/v1/connections/import",
            post(import::handle_import_connections),
        )
        // Drafting
        .route(
            "/api/v1/messages/generate",
            post(drafting::handle_generate_message),
        )
        .route("/api/v1/drafts", get(drafting::handle_list_drafts))
        .route(
            "/api/v1/drafts/:profile_id",
            patch(drafting::handle_edit_draft).delete(drafting::handle_delete_draft),
        )
        // Swipe sessions
        .route("/api/v1/sessions", post(session::handle_start_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/grab", post(session::handle_grab))
        .route("/api/v1/sessions/:id/release", post(session::handle_release))
        .route("/api/v1/sessions/:id/swipe", post(session::handle_swipe))
        .route("/api/v1/sessions/:id/dismiss", post(session::handle_dismiss))
        .route("/api/v1/sessions/:id/undo", post(session::handle_undo))
        .with_state(state)
}
