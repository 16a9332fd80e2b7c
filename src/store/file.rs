use super::{StateStore, StoreError, StoreResult, StoredDocument};
use crate::game::GameState;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Game document kept as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file that receives writes before being renamed into place
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> GameState {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No game document at {}, starting fresh", self.path.display());
                return GameState::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read game document {}: {}. Starting fresh.",
                    self.path.display(),
                    e
                );
                return GameState::new();
            }
        };

        match StoredDocument::decode(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    "Game document {} is corrupt: {}. Starting fresh.",
                    self.path.display(),
                    e
                );
                GameState::new()
            }
        }
    }

    async fn save(&self, state: &GameState) -> StoreResult<()> {
        let raw = StoredDocument::encode(state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(parent, e))?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, raw)
            .await
            .map_err(|e| Self::io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Self::io_error(&self.path, e))?;
        Ok(())
    }

    async fn reset(&self) -> StoreResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("Removed game document {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&self.path, e)),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemKind, Phase};

    #[tokio::test]
    async fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("game.json"));
        assert_eq!(store.load().await, GameState::new());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/game.json"));

        let mut state = GameState::new();
        state.add_item("no phones", ItemKind::DontDo).unwrap();
        state.version = 4;
        store.save(&state).await.unwrap();

        assert!(store.path().exists());
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().await, state);
    }

    #[tokio::test]
    async fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, "{\"phase\": ").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load().await, GameState::new());
    }

    #[tokio::test]
    async fn test_partial_file_is_backfilled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(
            &path,
            r#"{"phase": "shuffle_confirm", "player_items": [{"dont_do": ["a"]}]}"#,
        )
        .unwrap();

        let state = JsonFileStore::new(&path).load().await;
        assert_eq!(state.phase, Phase::ShuffleConfirm);
        assert_eq!(state.items(0, ItemKind::DontDo), ["a"]);
        assert!(state.items(0, ItemKind::Punishment).is_empty());
        assert!(state.items(3, ItemKind::DontDo).is_empty());
    }

    #[tokio::test]
    async fn test_reset_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("game.json"));

        let mut state = GameState::new();
        state.version = 9;
        store.save(&state).await.unwrap();
        store.reset().await.unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.load().await, GameState::new());
        // already gone is fine
        store.reset().await.unwrap();
    }
}
