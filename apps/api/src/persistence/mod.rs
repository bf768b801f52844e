//! Persistence Layer: durable per-user state behind a keyed store.
//!
//! Two keys per user: the user's own profile (overwritten wholesale) and the
//! accumulated liked list (appended on session completion, edited or pruned
//! per item from the drafts view).

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::profile::{LikedProfile, UserProfile};

pub const USER_PROFILE_KEY: &str = "swipeconnect_user_profile";
pub const LIKED_PROFILES_KEY: &str = "swipeconnect_liked_profiles";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raw keyed storage. Values are opaque JSON documents.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, user_id: Uuid, key: &str) -> Result<Option<Value>, StoreError>;
    async fn put(&self, user_id: Uuid, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Typed access to the two durable keys.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn StateStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// `None` when nothing is saved or the saved document is unreadable.
    pub async fn load_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let Some(value) = self.store.get(user_id, USER_PROFILE_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!("Stored user profile for {user_id} is unreadable, ignoring: {e}");
                Ok(None)
            }
        }
    }

    pub async fn save_user_profile(
        &self,
        user_id: Uuid,
        profile: &UserProfile,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(profile)?;
        self.store.put(user_id, USER_PROFILE_KEY, value).await
    }

    /// The persisted liked list. Unreadable data reads as empty.
    pub async fn load_liked(&self, user_id: Uuid) -> Result<Vec<LikedProfile>, StoreError> {
        Ok(self.read_liked(user_id).await?.unwrap_or_default())
    }

    /// Appends a finished session's likes to the persisted list and returns the merged list.
    ///
    /// If the existing list cannot be read, only the new batch is stored.
    pub async fn merge_liked(
        &self,
        user_id: Uuid,
        batch: &[LikedProfile],
    ) -> Result<Vec<LikedProfile>, StoreError> {
        let mut merged = self.read_liked(user_id).await?.unwrap_or_default();
        merged.extend_from_slice(batch);
        self.write_liked(user_id, &merged).await?;

        info!(
            "Merged {} liked profiles for {user_id} ({} total)",
            batch.len(),
            merged.len()
        );
        Ok(merged)
    }

    /// Replaces the message of every stored entry for `profile_id`. Returns false if none matched.
    pub async fn update_message(
        &self,
        user_id: Uuid,
        profile_id: &str,
        message: &str,
    ) -> Result<bool, StoreError> {
        let mut liked = self.load_liked(user_id).await?;
        let mut found = false;
        for entry in liked.iter_mut().filter(|l| l.profile.id == profile_id) {
            entry.message = message.to_string();
            found = true;
        }
        if found {
            self.write_liked(user_id, &liked).await?;
        }
        Ok(found)
    }

    /// Removes every stored entry for `profile_id`. Returns false if none matched.
    pub async fn delete_liked(&self, user_id: Uuid, profile_id: &str) -> Result<bool, StoreError> {
        let mut liked = self.load_liked(user_id).await?;
        let before = liked.len();
        liked.retain(|l| l.profile.id != profile_id);
        if liked.len() == before {
            return Ok(false);
        }
        self.write_liked(user_id, &liked).await?;
        Ok(true)
    }

    async fn read_liked(&self, user_id: Uuid) -> Result<Option<Vec<LikedProfile>>, StoreError> {
        let Some(value) = self.store.get(user_id, LIKED_PROFILES_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(liked) => Ok(Some(liked)),
            Err(e) => {
                warn!("Stored liked profiles for {user_id} are unreadable, ignoring: {e}");
                Ok(None)
            }
        }
    }

    async fn write_liked(&self, user_id: Uuid, liked: &[LikedProfile]) -> Result<(), StoreError> {
        let value = serde_json::to_value(liked)?;
        self.store.put(user_id, LIKED_PROFILES_KEY, value).await
    }
}
