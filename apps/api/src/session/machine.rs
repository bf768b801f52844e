//! Swipe session state machine.
//!
//! Owns the queue, the current index, the liked list and the swipe history.
//! A right swipe opens a draft and hands back a `DraftTicket`; the caller runs
//! exactly one draft request for it and reports back with `resolve_draft`.
//! The index only advances past a liked card on `dismiss`.
//!
//! Invariant: every `Right` entry in `history` has exactly one matching entry
//! in `liked` once its draft view is dismissed, so undo pops one liked entry
//! per right swipe and none per left swipe.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::drafting::FALLBACK_MESSAGE;
use crate::models::goal::NetworkingGoal;
use crate::models::profile::{LikedProfile, Profile, ProfileCategory, SwipeDirection, UserProfile};
use crate::persistence::{Persistence, StoreError};

/// Cards visible in the stack at once (top card plus the two behind it).
const VISIBLE_CARDS: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Session is complete")]
    Complete,

    #[error("A drafted message is still open; dismiss it first")]
    DraftOpen,

    #[error("No drafted message is open")]
    NoDraftOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeHistoryEntry {
    pub index: usize,
    pub direction: SwipeDirection,
}

/// Externally visible state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    AwaitingProfile,
    Deciding,
    DraftPending,
    Resolved,
    Complete,
}

#[derive(Debug)]
enum CardState {
    AwaitingProfile,
    Deciding,
    DraftPending { seq: u64, token: CancellationToken },
    Resolved { message: String },
    Complete,
}

/// Handed out on a right swipe. Carries everything needed to issue the draft request.
#[derive(Debug, Clone)]
pub struct DraftTicket {
    pub seq: u64,
    pub profile: Profile,
    pub user_profile: Option<UserProfile>,
    pub networking_goal: NetworkingGoal,
    pub token: CancellationToken,
}

/// What a swipe did to the session.
#[derive(Debug)]
pub enum SwipeOutcome {
    /// Left swipe; the next card is up.
    Advanced,
    /// Left swipe on the last card; call `complete`.
    Exhausted,
    /// Right swipe; issue one draft request for the ticket.
    DraftRequested(DraftTicket),
}

/// The draft view shown over the stack after a right swipe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub profile: Profile,
    pub message: Option<String>,
    pub is_loading: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub category: ProfileCategory,
    pub networking_goal: NetworkingGoal,
    pub status: SessionStatus,
    pub current_index: usize,
    pub total: usize,
    pub remaining: usize,
    pub visible_cards: Vec<Profile>,
    pub liked: Vec<LikedProfile>,
    pub can_undo: bool,
    pub draft: Option<DraftView>,
}

#[derive(Debug)]
pub struct SwipeSession {
    id: Uuid,
    user_id: Uuid,
    category: ProfileCategory,
    networking_goal: NetworkingGoal,
    user_profile: Option<UserProfile>,
    queue: Vec<Profile>,
    index: usize,
    liked: Vec<LikedProfile>,
    history: Vec<SwipeHistoryEntry>,
    state: CardState,
    next_seq: u64,
    handed_off: bool,
}

impl SwipeSession {
    pub fn new(
        user_id: Uuid,
        category: ProfileCategory,
        networking_goal: NetworkingGoal,
        user_profile: Option<UserProfile>,
        queue: Vec<Profile>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category,
            networking_goal,
            user_profile,
            queue,
            index: 0,
            liked: Vec::new(),
            history: Vec::new(),
            state: CardState::AwaitingProfile,
            next_seq: 0,
            handed_off: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    #[cfg(test)]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    #[cfg(test)]
    pub fn liked(&self) -> &[LikedProfile] {
        &self.liked
    }

    #[cfg(test)]
    pub fn history(&self) -> &[SwipeHistoryEntry] {
        &self.history
    }

    #[cfg(test)]
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.queue.get(self.index)
    }

    /// True once the index has run off the end of the queue (immediately, for an empty queue).
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.queue.len()
    }

    pub fn status(&self) -> SessionStatus {
        match &self.state {
            CardState::Complete => SessionStatus::Complete,
            CardState::DraftPending { .. } => SessionStatus::DraftPending,
            CardState::Resolved { .. } => SessionStatus::Resolved,
            CardState::Deciding => SessionStatus::Deciding,
            CardState::AwaitingProfile => SessionStatus::AwaitingProfile,
        }
    }

    /// A drag started on the top card.
    pub fn begin_decision(&mut self) -> Result<(), SessionError> {
        self.ensure_deciding_allowed()?;
        self.state = CardState::Deciding;
        Ok(())
    }

    /// The drag was released without reaching a decision.
    pub fn abandon_decision(&mut self) {
        if matches!(self.state, CardState::Deciding) {
            self.state = CardState::AwaitingProfile;
        }
    }

    pub fn swipe(&mut self, direction: SwipeDirection) -> Result<SwipeOutcome, SessionError> {
        self.ensure_deciding_allowed()?;
        let Some(profile) = self.queue.get(self.index).cloned() else {
            return Err(SessionError::Complete);
        };

        self.history.push(SwipeHistoryEntry {
            index: self.index,
            direction,
        });

        match direction {
            SwipeDirection::Left => {
                self.index += 1;
                self.state = CardState::AwaitingProfile;
                debug!("Session {}: passed on {}", self.id, profile.id);
                if self.is_exhausted() {
                    Ok(SwipeOutcome::Exhausted)
                } else {
                    Ok(SwipeOutcome::Advanced)
                }
            }
            SwipeDirection::Right => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let token = CancellationToken::new();
                self.state = CardState::DraftPending {
                    seq,
                    token: token.clone(),
                };
                debug!("Session {}: liked {}, draft #{seq} requested", self.id, profile.id);
                Ok(SwipeOutcome::DraftRequested(DraftTicket {
                    seq,
                    profile,
                    user_profile: self.user_profile.clone(),
                    networking_goal: self.networking_goal,
                    token,
                }))
            }
        }
    }

    /// Applies a finished draft. Returns false if the result arrived late and was discarded.
    pub fn resolve_draft(&mut self, seq: u64, message: String, now: DateTime<Utc>) -> bool {
        let matches = matches!(
            &self.state,
            CardState::DraftPending { seq: pending, token } if *pending == seq && !token.is_cancelled()
        );
        if !matches {
            debug!("Session {}: discarding late draft #{seq}", self.id);
            return false;
        }

        self.record_like(message.clone(), now);
        self.state = CardState::Resolved { message };
        true
    }

    /// Closes the draft view and moves to the next card.
    ///
    /// Dismissing before the draft arrives cancels the request and records the
    /// like with the fallback message.
    pub fn dismiss(&mut self, now: DateTime<Utc>) -> Result<SwipeOutcome, SessionError> {
        let pending = match &self.state {
            CardState::DraftPending { seq, token } => Some((*seq, token.clone())),
            CardState::Resolved { .. } => None,
            CardState::Complete => return Err(SessionError::Complete),
            CardState::AwaitingProfile | CardState::Deciding => {
                return Err(SessionError::NoDraftOpen)
            }
        };

        if let Some((seq, token)) = pending {
            token.cancel();
            debug!("Session {}: draft #{seq} cancelled by dismissal", self.id);
            self.record_like(FALLBACK_MESSAGE.to_string(), now);
        }

        self.index += 1;
        self.state = CardState::AwaitingProfile;
        if self.is_exhausted() {
            Ok(SwipeOutcome::Exhausted)
        } else {
            Ok(SwipeOutcome::Advanced)
        }
    }

    /// Reverts the last swipe. No-op with an empty history.
    pub fn undo(&mut self) -> Result<Option<SwipeHistoryEntry>, SessionError> {
        match self.state {
            CardState::Complete => return Err(SessionError::Complete),
            CardState::DraftPending { .. } | CardState::Resolved { .. } => {
                return Err(SessionError::DraftOpen)
            }
            CardState::AwaitingProfile | CardState::Deciding => {}
        }

        let Some(last) = self.history.pop() else {
            return Ok(None);
        };

        self.index = last.index;
        if last.direction == SwipeDirection::Right {
            self.liked.pop();
        }
        self.state = CardState::AwaitingProfile;

        debug!(
            "Session {}: undid {:?} swipe at index {}",
            self.id, last.direction, last.index
        );
        Ok(Some(last))
    }

    /// Hands the liked list to persistence once the queue is exhausted.
    ///
    /// Idempotent: the merge happens exactly once per session.
    pub async fn complete(&mut self, persistence: &Persistence) -> Result<(), StoreError> {
        if !self.is_exhausted() || self.handed_off {
            return Ok(());
        }

        persistence.merge_liked(self.user_id, &self.liked).await?;
        self.handed_off = true;
        self.state = CardState::Complete;

        info!(
            "Session {} complete: {} of {} profiles liked",
            self.id,
            self.liked.len(),
            self.queue.len()
        );
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let draft = match &self.state {
            CardState::DraftPending { .. } => self.current_profile().map(|p| DraftView {
                profile: p.clone(),
                message: None,
                is_loading: true,
            }),
            CardState::Resolved { message } => self.current_profile().map(|p| DraftView {
                profile: p.clone(),
                message: Some(message.clone()),
                is_loading: false,
            }),
            _ => None,
        };

        let end = (self.index + VISIBLE_CARDS).min(self.queue.len());
        let visible_cards = self
            .queue
            .get(self.index..end)
            .map(<[Profile]>::to_vec)
            .unwrap_or_default();

        SessionSnapshot {
            id: self.id,
            category: self.category,
            networking_goal: self.networking_goal,
            status: self.status(),
            current_index: self.index,
            total: self.queue.len(),
            remaining: self.queue.len().saturating_sub(self.index),
            visible_cards,
            liked: self.liked.clone(),
            can_undo: !self.history.is_empty()
                && matches!(self.state, CardState::AwaitingProfile | CardState::Deciding),
            draft,
        }
    }

    fn ensure_deciding_allowed(&self) -> Result<(), SessionError> {
        match self.state {
            CardState::AwaitingProfile | CardState::Deciding if !self.is_exhausted() => Ok(()),
            CardState::AwaitingProfile | CardState::Deciding | CardState::Complete => {
                Err(SessionError::Complete)
            }
            CardState::DraftPending { .. } | CardState::Resolved { .. } => {
                Err(SessionError::DraftOpen)
            }
        }
    }

    fn record_like(&mut self, message: String, now: DateTime<Utc>) {
        if let Some(profile) = self.current_profile().cloned() {
            self.liked.push(LikedProfile {
                profile,
                message,
                liked_at: now,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::profile;
    use crate::persistence::memory::MemoryStateStore;
    use std::sync::Arc;

    fn queue(n: usize) -> Vec<Profile> {
        (0..n)
            .map(|i| profile(&format!("p{i}"), &format!("Person {i}"), ProfileCategory::Founders))
            .collect()
    }

    fn session(n: usize) -> SwipeSession {
        SwipeSession::new(
            Uuid::new_v4(),
            ProfileCategory::Founders,
            NetworkingGoal::CoffeeChat,
            None,
            queue(n),
        )
    }

    fn persistence() -> Persistence {
        Persistence::new(Arc::new(MemoryStateStore::default()))
    }

    fn like(s: &mut SwipeSession, message: &str) {
        let SwipeOutcome::DraftRequested(ticket) = s.swipe(SwipeDirection::Right).unwrap() else {
            panic!("right swipe must request a draft");
        };
        assert!(s.resolve_draft(ticket.seq, message.to_string(), Utc::now()));
        s.dismiss(Utc::now()).unwrap();
    }

    #[test]
    fn test_left_swipe_advances_without_like() {
        let mut s = session(3);
        let outcome = s.swipe(SwipeDirection::Left).unwrap();
        assert!(matches!(outcome, SwipeOutcome::Advanced));
        assert_eq!(s.current_index(), 1);
        assert!(s.liked().is_empty());
        assert_eq!(
            s.history(),
            &[SwipeHistoryEntry {
                index: 0,
                direction: SwipeDirection::Left
            }]
        );
    }

    #[test]
    fn test_right_swipe_opens_pending_draft_without_advancing() {
        let mut s = session(3);
        let outcome = s.swipe(SwipeDirection::Right).unwrap();
        let SwipeOutcome::DraftRequested(ticket) = outcome else {
            panic!("expected draft ticket");
        };
        assert_eq!(ticket.profile.id, "p0");
        assert_eq!(ticket.networking_goal, NetworkingGoal::CoffeeChat);
        assert_eq!(s.status(), SessionStatus::DraftPending);
        assert_eq!(s.current_index(), 0);

        let snap = s.snapshot();
        let draft = snap.draft.unwrap();
        assert!(draft.is_loading);
        assert!(draft.message.is_none());
    }

    #[test]
    fn test_resolve_then_dismiss_records_like_and_advances() {
        let mut s = session(3);
        let SwipeOutcome::DraftRequested(ticket) = s.swipe(SwipeDirection::Right).unwrap() else {
            panic!()
        };
        assert!(s.resolve_draft(ticket.seq, "Hi p0".to_string(), Utc::now()));
        assert_eq!(s.status(), SessionStatus::Resolved);
        assert_eq!(s.liked().len(), 1);
        assert_eq!(s.current_index(), 0);

        s.dismiss(Utc::now()).unwrap();
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.status(), SessionStatus::AwaitingProfile);
        assert_eq!(s.liked()[0].message, "Hi p0");
    }

    #[test]
    fn test_swipe_rejected_while_draft_open() {
        let mut s = session(3);
        s.swipe(SwipeDirection::Right).unwrap();
        assert_eq!(
            s.swipe(SwipeDirection::Left).unwrap_err(),
            SessionError::DraftOpen
        );
    }

    #[test]
    fn test_undo_after_right_swipe_pops_exactly_one_like() {
        let mut s = session(3);
        like(&mut s, "first");
        like(&mut s, "second");
        assert_eq!(s.current_index(), 2);

        let undone = s.undo().unwrap().unwrap();
        assert_eq!(undone.direction, SwipeDirection::Right);
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.liked().len(), 1);
        assert_eq!(s.liked()[0].message, "first");
    }

    #[test]
    fn test_undo_after_left_swipe_keeps_likes() {
        let mut s = session(3);
        like(&mut s, "first");
        s.swipe(SwipeDirection::Left).unwrap();

        s.undo().unwrap();
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.liked().len(), 1);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut s = session(2);
        assert_eq!(s.undo().unwrap(), None);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_undo_rejected_while_draft_open() {
        let mut s = session(2);
        s.swipe(SwipeDirection::Right).unwrap();
        assert_eq!(s.undo().unwrap_err(), SessionError::DraftOpen);
    }

    #[test]
    fn test_dismiss_before_resolution_cancels_and_uses_fallback() {
        let mut s = session(2);
        let SwipeOutcome::DraftRequested(ticket) = s.swipe(SwipeDirection::Right).unwrap() else {
            panic!()
        };
        s.dismiss(Utc::now()).unwrap();

        assert!(ticket.token.is_cancelled());
        assert_eq!(s.liked().len(), 1);
        assert_eq!(s.liked()[0].message, FALLBACK_MESSAGE);

        // The late result must not land.
        assert!(!s.resolve_draft(ticket.seq, "late".to_string(), Utc::now()));
        assert_eq!(s.liked().len(), 1);

        // History and likes stay paired for undo.
        s.undo().unwrap();
        assert!(s.liked().is_empty());
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_stale_sequence_is_discarded() {
        let mut s = session(3);
        let SwipeOutcome::DraftRequested(first) = s.swipe(SwipeDirection::Right).unwrap() else {
            panic!()
        };
        s.dismiss(Utc::now()).unwrap();
        let SwipeOutcome::DraftRequested(second) = s.swipe(SwipeDirection::Right).unwrap() else {
            panic!()
        };
        assert_ne!(first.seq, second.seq);
        assert!(!s.resolve_draft(first.seq, "stale".to_string(), Utc::now()));
        assert!(s.resolve_draft(second.seq, "fresh".to_string(), Utc::now()));
        assert_eq!(s.liked().last().unwrap().message, "fresh");
    }

    #[test]
    fn test_dismiss_without_draft_is_rejected() {
        let mut s = session(2);
        assert_eq!(s.dismiss(Utc::now()).unwrap_err(), SessionError::NoDraftOpen);
    }

    #[test]
    fn test_decision_states() {
        let mut s = session(2);
        s.begin_decision().unwrap();
        assert_eq!(s.status(), SessionStatus::Deciding);
        s.abandon_decision();
        assert_eq!(s.status(), SessionStatus::AwaitingProfile);

        s.begin_decision().unwrap();
        s.swipe(SwipeDirection::Left).unwrap();
        assert_eq!(s.status(), SessionStatus::AwaitingProfile);
    }

    #[tokio::test]
    async fn test_empty_queue_completes_immediately() {
        let mut s = session(0);
        assert!(s.is_exhausted());
        assert_eq!(s.swipe(SwipeDirection::Left).unwrap_err(), SessionError::Complete);

        let p = persistence();
        s.complete(&p).await.unwrap();
        assert_eq!(s.status(), SessionStatus::Complete);
        assert!(s.liked().is_empty());
        assert!(p.load_liked(s.user_id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_complete_merges_likes_once() {
        let mut s = session(2);
        let p = persistence();
        p.merge_liked(s.user_id(), &[]).await.unwrap();

        like(&mut s, "hello");
        let outcome = s.swipe(SwipeDirection::Left).unwrap();
        assert!(matches!(outcome, SwipeOutcome::Exhausted));

        s.complete(&p).await.unwrap();
        s.complete(&p).await.unwrap();

        let stored = p.load_liked(s.user_id()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].message, "hello");
        assert_eq!(s.undo().unwrap_err(), SessionError::Complete);
    }

    #[tokio::test]
    async fn test_complete_before_exhaustion_is_noop() {
        let mut s = session(2);
        let p = persistence();
        s.complete(&p).await.unwrap();
        assert_eq!(s.status(), SessionStatus::AwaitingProfile);
    }

    #[test]
    fn test_snapshot_shows_up_to_three_cards() {
        let mut s = session(5);
        assert_eq!(s.snapshot().visible_cards.len(), 3);
        for _ in 0..3 {
            s.swipe(SwipeDirection::Left).unwrap();
        }
        let snap = s.snapshot();
        assert_eq!(snap.visible_cards.len(), 2);
        assert_eq!(snap.visible_cards[0].id, "p3");
        assert_eq!(snap.remaining, 2);
        assert!(snap.can_undo);
    }
}
