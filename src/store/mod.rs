//! Persistence for the single game document.
//!
//! Loading never fails: a missing or unreadable document degrades to a
//! fresh game. Writes do fail, and those errors are surfaced to callers.

mod file;
mod legacy;
mod memory;

pub use file::JsonFileStore;
pub use legacy::LegacyDocument;
pub use memory::MemoryStore;

use crate::game::GameState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Document layout version written alongside the game state
pub const SCHEMA_VERSION: u32 = 1;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode game state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The on-disk wrapper around [`GameState`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(default)]
    pub schema_version: u32,
    /// RFC 3339 timestamp of the last save
    #[serde(default)]
    pub saved_at: Option<String>,
    #[serde(flatten)]
    pub state: GameState,
}

impl StoredDocument {
    pub fn new(state: GameState) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            state,
        }
    }

    /// Decode raw document text into a fully populated game state.
    /// Documents in the flat [`LegacyDocument`] layout are migrated first.
    pub fn decode(raw: &str) -> Result<GameState, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if LegacyDocument::matches(&value) {
            tracing::info!("Migrating game document from the flat layout");
            let legacy: LegacyDocument = serde_json::from_value(value)?;
            return Ok(legacy.into_state().normalize());
        }

        let doc: StoredDocument = serde_json::from_value(value)?;
        if doc.schema_version > SCHEMA_VERSION {
            tracing::warn!(
                "Stored schema version {} is newer than supported version {}, loading what we can",
                doc.schema_version,
                SCHEMA_VERSION
            );
        }
        Ok(doc.state.normalize())
    }

    pub fn encode(state: &GameState) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&StoredDocument::new(state.clone()))
    }
}

/// Backing storage for the game document
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Current document, or a fresh game if there is none or it is unreadable
    async fn load(&self) -> GameState;

    /// Replace the stored document
    async fn save(&self, state: &GameState) -> StoreResult<()>;

    /// Drop the stored document so the next load starts over
    async fn reset(&self) -> StoreResult<()>;

    /// Human readable location, for logs
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemKind, Phase, Roster, PLAYER_COUNT};

    #[test]
    fn test_decode_partial_document() {
        let state = StoredDocument::decode(r#"{"phase": "draw", "version": 3}"#).unwrap();
        assert_eq!(state.phase, Phase::Draw);
        assert_eq!(state.version, 3);
        assert_eq!(state.player_items.len(), PLAYER_COUNT);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let state =
            StoredDocument::decode(r#"{"schema_version": 99, "future_field": [1, 2]}"#).unwrap();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_encode_carries_metadata() {
        let raw = StoredDocument::encode(&GameState::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schema_version"], SCHEMA_VERSION);
        assert!(value["saved_at"].is_string());
        assert_eq!(value["phase"], "input");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(StoredDocument::decode("{not json").is_err());
        assert!(StoredDocument::decode(r#"{"phase": "bogus"}"#).is_err());
    }

    /// A finished shuffle as the flat layout stored it: two players have
    /// already drawn
    const FLAT_DRAW_DOCUMENT: &str = r#"{
        "phase": "draw",
        "current_player_index": 3,
        "current_input_type": "punishment",
        "player_dont_do": [["d1"], ["d2"], ["d3"], ["d4"]],
        "player_punishments": [["p1"], ["p2"], ["p3"], ["p4"]],
        "player_dont_do_confirmed": [true, true, true, true],
        "player_punishment_confirmed": [true, true, true, true],
        "shuffled_dont_do": ["d3", "d1"],
        "shuffled_punishment": ["p2", "p4"],
        "shuffled_display_order_dont_do": ["d3", "d1", "d4", "d2"],
        "shuffled_display_order_punishment": ["p2", "p4", "p1", "p3"],
        "used_dont_do": ["d2", "d4"],
        "used_punishment": ["p3", "p1"],
        "assigned_punishments": {
            "HT": {"dont_do": "d2", "punishment": "p3"},
            "SJ1": {"dont_do": "d4", "punishment": "p1"}
        }
    }"#;

    #[test]
    fn test_decode_migrates_flat_layout() {
        let state = StoredDocument::decode(FLAT_DRAW_DOCUMENT).unwrap();
        assert_eq!(state.phase, Phase::Draw);
        assert_eq!(state.current_player_index, 3);
        assert_eq!(state.current_input_type, ItemKind::Punishment);
        assert_eq!(state.player_items.len(), PLAYER_COUNT);
        assert_eq!(state.items(2, ItemKind::Punishment), ["p3"]);
        assert!(state.confirmed.iter().all(|c| c.dont_do && c.punishment));
        assert_eq!(state.pool.dont_do, vec!["d3", "d1"]);
        assert_eq!(state.display_order.punishment.len(), 4);
        assert!(state.used_items.dont_do.contains("d4"));
        assert_eq!(state.assigned["SJ1"].punishment, "p1");
    }

    #[test]
    fn test_migrated_document_keeps_drawing() {
        let mut state = StoredDocument::decode(FLAT_DRAW_DOCUMENT).unwrap();
        let roster = Roster::default();

        let drawn = state.draw(&roster, "LY").unwrap();
        assert_eq!(drawn.dont_do, "d1");
        assert_eq!(drawn.punishment, "p4");
        assert!(state.draw(&roster, "HT").is_err());
        assert!(state.draw(&roster, "ZKL").is_ok());
    }

    #[test]
    fn test_migrated_document_saves_in_current_layout() {
        let state = StoredDocument::decode(FLAT_DRAW_DOCUMENT).unwrap();
        let raw = StoredDocument::encode(&state).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("player_dont_do").is_none());
        assert_eq!(value["schema_version"], SCHEMA_VERSION);
        assert_eq!(StoredDocument::decode(&raw).unwrap(), state);
    }
}
