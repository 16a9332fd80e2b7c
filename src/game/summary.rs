use super::GameState;
use crate::error::{GameError, GameResult};
use crate::protocol::{MaskedItem, MaskedSlot, PlayerSummary, Summary};
use crate::types::*;

fn masked(items: &[String]) -> Vec<MaskedItem> {
    items
        .iter()
        .map(|_| MaskedItem {
            masked: MASK.to_string(),
        })
        .collect()
}

impl GameState {
    fn masked_slots(&self, kind: ItemKind) -> Vec<MaskedSlot> {
        let used = self.used_items.get(kind);
        self.display_order
            .get(kind)
            .iter()
            .map(|item| MaskedSlot {
                masked: MASK.to_string(),
                drawn: used.contains(item),
            })
            .collect()
    }

    /// Masked progress overview. Only available once input is over.
    pub fn summary(&self, roster: &Roster) -> GameResult<Summary> {
        match self.phase {
            Phase::ShuffleConfirm => Ok(Summary::PerPlayer {
                summary: roster
                    .names()
                    .iter()
                    .zip(&self.player_items)
                    .map(|(name, lists)| PlayerSummary {
                        player_name: name.clone(),
                        dont_do_count: lists.dont_do.len(),
                        punishment_count: lists.punishment.len(),
                        dont_do_masked: masked(&lists.dont_do),
                        punishment_masked: masked(&lists.punishment),
                    })
                    .collect(),
            }),
            Phase::Draw => Ok(Summary::Combined {
                combined_dont_do: self.masked_slots(ItemKind::DontDo),
                combined_punishment: self.masked_slots(ItemKind::Punishment),
                total_dont_do: self.display_order.dont_do.len(),
                total_punishment: self.display_order.punishment.len(),
                used_dont_do_count: self.used_items.dont_do.len(),
                used_punishment_count: self.used_items.punishment.len(),
            }),
            Phase::Input => Err(GameError::Phase {
                expected: Phase::Draw,
                actual: self.phase,
            }),
        }
    }
}
