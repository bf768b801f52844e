//! SessionRegistry: live swipe sessions keyed by session id.
//!
//! Each session sits behind its own `Mutex`, so all mutation of one session
//! is sequential. Clone is cheap (Arc-based).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::drafting::{draft_or_fallback, DraftRequest, DraftService};
use crate::session::machine::{DraftTicket, SwipeSession};

pub type SharedSession = Arc<Mutex<SwipeSession>>;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: SwipeSession) -> SharedSession {
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        shared
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drops a session. Returns true if it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Runs the draft request for `ticket` in the background and applies the result.
///
/// The request races the ticket's cancellation token; a dismissed draft never
/// touches the session again.
pub fn spawn_draft_task(
    session: SharedSession,
    ticket: DraftTicket,
    service: Arc<dyn DraftService>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let request = DraftRequest {
            profile: ticket.profile.clone(),
            user_profile: ticket.user_profile.clone(),
            networking_goal: Some(ticket.networking_goal),
        };

        let outcome = tokio::select! {
            _ = ticket.token.cancelled() => {
                debug!("Draft #{} for {} cancelled before completion", ticket.seq, ticket.profile.id);
                return;
            }
            outcome = draft_or_fallback(service.as_ref(), &request) => outcome,
        };

        let mut session = session.lock().await;
        session.resolve_draft(ticket.seq, outcome.message, Utc::now());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::profile;
    use crate::drafting::testing::StubDraftService;
    use crate::drafting::{DraftError, FALLBACK_MESSAGE};
    use crate::models::goal::NetworkingGoal;
    use crate::models::profile::{ProfileCategory, SwipeDirection};
    use crate::session::machine::{SessionStatus, SwipeOutcome};
    use async_trait::async_trait;

    /// Never answers; only cancellation ends a request against it.
    struct HangingDraftService;

    #[async_trait]
    impl DraftService for HangingDraftService {
        async fn draft(&self, _request: &DraftRequest) -> Result<String, DraftError> {
            std::future::pending().await
        }
    }

    fn new_session() -> SwipeSession {
        SwipeSession::new(
            Uuid::new_v4(),
            ProfileCategory::Product,
            NetworkingGoal::Informational,
            None,
            vec![
                profile("p0", "Jane Doe", ProfileCategory::Product),
                profile("p1", "John Roe", ProfileCategory::Product),
            ],
        )
    }

    async fn swipe_right(shared: &SharedSession) -> DraftTicket {
        match shared.lock().await.swipe(SwipeDirection::Right).unwrap() {
            SwipeOutcome::DraftRequested(ticket) => ticket,
            other => panic!("expected draft ticket, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_registry_insert_get_remove() {
        let registry = SessionRegistry::new();
        let session = new_session();
        let id = session.id();
        registry.insert(session).await;

        assert!(registry.get(id).await.is_some());
        assert_eq!(registry.len().await, 1);
        assert!(registry.remove(id).await);
        assert!(!registry.remove(id).await);
        assert!(registry.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_draft_task_resolves_session() {
        let registry = SessionRegistry::new();
        let shared = registry.insert(new_session()).await;
        let service = Arc::new(StubDraftService::ok("Hi"));

        let ticket = swipe_right(&shared).await;
        spawn_draft_task(shared.clone(), ticket, service.clone())
            .await
            .unwrap();

        let session = shared.lock().await;
        assert_eq!(session.status(), SessionStatus::Resolved);
        assert_eq!(session.liked()[0].message, "Hi Jane Doe");
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_draft_lands_fallback_and_flow_continues() {
        let registry = SessionRegistry::new();
        let shared = registry.insert(new_session()).await;

        let ticket = swipe_right(&shared).await;
        spawn_draft_task(shared.clone(), ticket, Arc::new(StubDraftService::failing()))
            .await
            .unwrap();

        let mut session = shared.lock().await;
        assert_eq!(session.liked()[0].message, FALLBACK_MESSAGE);
        session.dismiss(Utc::now()).unwrap();
        assert_eq!(session.current_index(), 1);
    }

    #[tokio::test]
    async fn test_dismissal_cancels_in_flight_draft() {
        let registry = SessionRegistry::new();
        let shared = registry.insert(new_session()).await;

        let ticket = swipe_right(&shared).await;
        let handle = spawn_draft_task(shared.clone(), ticket, Arc::new(HangingDraftService));

        shared.lock().await.dismiss(Utc::now()).unwrap();
        handle.await.unwrap();

        let session = shared.lock().await;
        assert_eq!(session.liked().len(), 1);
        assert_eq!(session.liked()[0].message, FALLBACK_MESSAGE);
        assert_eq!(session.status(), SessionStatus::AwaitingProfile);
    }
}
