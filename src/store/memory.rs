use super::{StateStore, StoreResult, StoredDocument};
use crate::game::GameState;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process store holding the encoded document, for tests and throwaway games
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary raw document, valid or not
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(Some(raw.into())),
        }
    }

    /// Raw document as it would sit on disk
    pub async fn raw(&self) -> Option<String> {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> GameState {
        let document = self.document.read().await;
        let Some(raw) = document.as_deref() else {
            return GameState::new();
        };
        StoredDocument::decode(raw).unwrap_or_else(|e| {
            tracing::warn!("In-memory game document is corrupt: {}. Starting fresh.", e);
            GameState::new()
        })
    }

    async fn save(&self, state: &GameState) -> StoreResult<()> {
        let raw = StoredDocument::encode(state)?;
        *self.document.write().await = Some(raw);
        Ok(())
    }

    async fn reset(&self) -> StoreResult<()> {
        *self.document.write().await = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
