use crate::types::*;
use serde::{Deserialize, Serialize};

// ========== Requests ==========

fn missing_index() -> i64 {
    -1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "type")]
    pub kind: ItemKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default = "missing_index")]
    pub index: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "type")]
    pub kind: ItemKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteItemRequest {
    #[serde(default = "missing_index")]
    pub index: i64,
    #[serde(default, rename = "type")]
    pub kind: ItemKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawRequest {
    #[serde(default)]
    pub player_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyAssignmentQuery {
    #[serde(default)]
    pub name: String,
}

// ========== Responses ==========

/// Turn and phase overview returned by most mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateView {
    pub phase: Phase,
    pub version: u64,
    pub current_player_index: usize,
    pub current_player_name: PlayerName,
    pub current_input_type: ItemKind,
    pub player_dont_do_confirmed: Vec<bool>,
    pub player_punishment_confirmed: Vec<bool>,
    pub players: Vec<PlayerName>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentItemsView {
    pub items: Vec<String>,
    pub player_name: PlayerName,
    pub input_type: ItemKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemsView {
    pub items: Vec<String>,
}

/// A player's own draw. The only view that carries item text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentView {
    pub player_name: PlayerName,
    pub dont_do: String,
    pub punishment: String,
}

impl AssignmentView {
    pub fn new(player_name: impl Into<PlayerName>, assignment: Assignment) -> Self {
        Self {
            player_name: player_name.into(),
            dont_do: assignment.dont_do,
            punishment: assignment.punishment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaskedItem {
    pub masked: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaskedSlot {
    pub masked: String,
    pub drawn: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSummary {
    pub player_name: PlayerName,
    pub dont_do_count: usize,
    pub punishment_count: usize,
    pub dont_do_masked: Vec<MaskedItem>,
    pub punishment_masked: Vec<MaskedItem>,
}

/// Progress overview that never exposes item text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Summary {
    /// Before the shuffle: how much each player contributed
    PerPlayer { summary: Vec<PlayerSummary> },
    /// After the shuffle: which slots of the shuffled pool are gone
    Combined {
        combined_dont_do: Vec<MaskedSlot>,
        combined_punishment: Vec<MaskedSlot>,
        total_dont_do: usize,
        total_punishment: usize,
        used_dont_do_count: usize,
        used_punishment_count: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    /// Present when a player re-requests a draw they already made
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub assignment: Option<Assignment>,
}
