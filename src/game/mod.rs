//! The game engine.
//!
//! [`GameState`] is the single persisted document. Every operation is a pure
//! method on it: callers load the document, apply one operation, and save it
//! back only when the operation succeeded.

mod draw;
mod input;
mod summary;

use crate::protocol::{CurrentItemsView, StateView};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GameState {
    pub phase: Phase,
    /// Bumped once per successful mutation
    pub version: u64,
    pub current_player_index: usize,
    pub current_input_type: ItemKind,
    /// Per player, in seat order
    pub player_items: Vec<PerKind<Vec<String>>>,
    pub confirmed: Vec<PerKind<bool>>,
    /// Draw stack, consumed from the end
    pub pool: PerKind<Vec<String>>,
    /// Shuffled snapshot of the whole pool, never consumed
    pub display_order: PerKind<Vec<String>>,
    /// Values drawn since the last shuffle. Matched by text, so identical
    /// entries from different players count as one.
    pub used_items: PerKind<BTreeSet<String>>,
    pub assigned: BTreeMap<PlayerName, Assignment>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            player_items: vec![PerKind::default(); PLAYER_COUNT],
            confirmed: vec![PerKind::default(); PLAYER_COUNT],
            ..Default::default()
        }
    }

    /// Repair a freshly deserialized document so every field has the shape
    /// the engine relies on.
    pub fn normalize(mut self) -> Self {
        self.player_items.resize_with(PLAYER_COUNT, PerKind::default);
        self.confirmed.resize_with(PLAYER_COUNT, PerKind::default);
        if self.current_player_index >= PLAYER_COUNT {
            tracing::warn!(
                "Stored player index {} out of range, clamping",
                self.current_player_index
            );
            self.current_player_index = PLAYER_COUNT - 1;
        }
        for kind in ItemKind::ALL {
            let limit = self.display_order.get(kind).len();
            let pool = self.pool.get_mut(kind);
            if pool.len() > limit {
                tracing::warn!(
                    "Stored {} pool larger than its display order, truncating",
                    kind
                );
                pool.truncate(limit);
            }
        }
        if self.is_unshuffled_draw() {
            tracing::warn!(
                "Stored document is in the draw phase with entered items but no shuffle, \
                 draws will fail until the game is reset"
            );
        }
        self
    }

    /// Draw phase reached without a shuffle snapshot while items exist.
    /// Such a document has nothing to draw from.
    pub fn is_unshuffled_draw(&self) -> bool {
        let no_snapshot = ItemKind::ALL
            .iter()
            .all(|kind| self.display_order.get(*kind).is_empty());
        let has_items = self
            .player_items
            .iter()
            .any(|lists| ItemKind::ALL.iter().any(|kind| !lists.get(*kind).is_empty()));
        self.phase == Phase::Draw && no_snapshot && has_items
    }

    /// Items of one player for one kind
    pub fn items(&self, player: usize, kind: ItemKind) -> &[String] {
        self.player_items[player].get(kind)
    }

    /// Every item of one kind, concatenated in seat order
    pub fn all_items(&self, kind: ItemKind) -> Vec<String> {
        self.player_items
            .iter()
            .flat_map(|lists| lists.get(kind).iter().cloned())
            .collect()
    }

    pub fn view(&self, roster: &Roster) -> StateView {
        StateView {
            phase: self.phase,
            version: self.version,
            current_player_index: self.current_player_index,
            current_player_name: roster.name(self.current_player_index).to_string(),
            current_input_type: self.current_input_type,
            player_dont_do_confirmed: self.confirmed.iter().map(|c| c.dont_do).collect(),
            player_punishment_confirmed: self.confirmed.iter().map(|c| c.punishment).collect(),
            players: roster.names().to_vec(),
        }
    }

    /// List the current player is filling. Outside the input phase this
    /// still points at whoever was last active.
    pub fn current_items(&self, roster: &Roster) -> CurrentItemsView {
        CurrentItemsView {
            items: self
                .items(self.current_player_index, self.current_input_type)
                .to_vec(),
            player_name: roster.name(self.current_player_index).to_string(),
            input_type: self.current_input_type,
        }
    }
}
