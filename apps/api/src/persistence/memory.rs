use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::persistence::{StateStore, StoreError};

/// Process-local store. Used when no `DATABASE_URL` is configured, and in tests.
#[derive(Default)]
pub struct MemoryStateStore {
    entries: RwLock<HashMap<(Uuid, String), Value>>,
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, user_id: Uuid, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&(user_id, key.to_string())).cloned())
    }

    async fn put(&self, user_id: Uuid, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert((user_id, key.to_string()), value);
        Ok(())
    }
}
