//! The flat document layout written before per-kind grouping.
//!
//! Older files keep one top-level key per list (`player_dont_do`,
//! `shuffled_punishment`, ...). They are read once and converted into a
//! [`GameState`]; the next save writes the current layout.

use crate::game::GameState;
use crate::types::{Assignment, ItemKind, PerKind, Phase, PlayerName};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Keys only the flat layout has
const FLAT_KEYS: [&str; 4] = [
    "player_dont_do",
    "player_punishments",
    "shuffled_dont_do",
    "assigned_punishments",
];

/// Null and missing lists both read as empty
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LegacyDocument {
    phase: Phase,
    current_player_index: usize,
    current_input_type: ItemKind,
    player_dont_do: Option<Vec<Vec<String>>>,
    player_punishments: Option<Vec<Vec<String>>>,
    player_dont_do_confirmed: Option<Vec<bool>>,
    player_punishment_confirmed: Option<Vec<bool>>,
    shuffled_dont_do: Option<Vec<String>>,
    shuffled_punishment: Option<Vec<String>>,
    shuffled_display_order_dont_do: Option<Vec<String>>,
    shuffled_display_order_punishment: Option<Vec<String>>,
    used_dont_do: Option<Vec<String>>,
    used_punishment: Option<Vec<String>>,
    assigned_punishments: Option<BTreeMap<PlayerName, Assignment>>,
}

impl LegacyDocument {
    /// Whether a parsed document uses the flat layout
    pub fn matches(value: &serde_json::Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        !object.contains_key("player_items")
            && FLAT_KEYS.iter().any(|key| object.contains_key(*key))
    }

    pub fn into_state(self) -> GameState {
        let dont_do = self.player_dont_do.unwrap_or_default();
        let punishment = self.player_punishments.unwrap_or_default();
        let seats = dont_do.len().max(punishment.len());
        let mut dont_do = dont_do.into_iter();
        let mut punishment = punishment.into_iter();
        let player_items = (0..seats)
            .map(|_| PerKind {
                dont_do: dont_do.next().unwrap_or_default(),
                punishment: punishment.next().unwrap_or_default(),
            })
            .collect();

        let dont_do_confirmed = self.player_dont_do_confirmed.unwrap_or_default();
        let punishment_confirmed = self.player_punishment_confirmed.unwrap_or_default();
        let confirmed = (0..dont_do_confirmed.len().max(punishment_confirmed.len()))
            .map(|i| PerKind {
                dont_do: dont_do_confirmed.get(i).copied().unwrap_or(false),
                punishment: punishment_confirmed.get(i).copied().unwrap_or(false),
            })
            .collect();

        GameState {
            phase: self.phase,
            version: 0,
            current_player_index: self.current_player_index,
            current_input_type: self.current_input_type,
            player_items,
            confirmed,
            pool: PerKind {
                dont_do: self.shuffled_dont_do.unwrap_or_default(),
                punishment: self.shuffled_punishment.unwrap_or_default(),
            },
            display_order: PerKind {
                dont_do: self.shuffled_display_order_dont_do.unwrap_or_default(),
                punishment: self.shuffled_display_order_punishment.unwrap_or_default(),
            },
            used_items: PerKind {
                dont_do: self.used_dont_do.unwrap_or_default().into_iter().collect(),
                punishment: self.used_punishment.unwrap_or_default().into_iter().collect(),
            },
            assigned: self.assigned_punishments.unwrap_or_default(),
        }
    }
}
