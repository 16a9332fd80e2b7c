use super::GameState;
use crate::error::{GameError, GameResult};
use crate::protocol::AssignmentView;
use crate::types::*;
use rand::seq::SliceRandom;
use rand::Rng;

impl GameState {
    /// Pool every player's lists, shuffle each kind independently, and open
    /// the first draw epoch.
    pub fn confirm_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GameResult<()> {
        GameError::require_phase(Phase::ShuffleConfirm, self.phase)?;

        for kind in ItemKind::ALL {
            let mut items = self.all_items(kind);
            items.shuffle(rng);
            *self.display_order.get_mut(kind) = items.clone();
            *self.pool.get_mut(kind) = items;
            self.used_items.get_mut(kind).clear();
        }
        self.phase = Phase::Draw;
        tracing::info!(
            "Shuffled {} dont-do items and {} punishments",
            self.pool.dont_do.len(),
            self.pool.punishment.len()
        );
        Ok(())
    }

    /// Hand `player_name` one item of each kind off the top of the pool
    pub fn draw(&mut self, roster: &Roster, player_name: &str) -> GameResult<AssignmentView> {
        GameError::require_phase(Phase::Draw, self.phase)?;
        let player_name = player_name.trim();
        if !roster.contains(player_name) {
            return Err(GameError::validation(format!(
                "unknown player '{}'",
                player_name
            )));
        }
        if let Some(existing) = self.assigned.get(player_name) {
            return Err(GameError::AlreadyDrawn {
                player: player_name.to_string(),
                assignment: existing.clone(),
            });
        }
        if self.pool.dont_do.is_empty() || self.pool.punishment.is_empty() {
            return Err(GameError::EmptyPool);
        }

        let mut drawn = PerKind::<String>::default();
        for kind in ItemKind::ALL {
            let item = self.pool.get_mut(kind).pop().ok_or(GameError::EmptyPool)?;
            self.used_items.get_mut(kind).insert(item.clone());
            *drawn.get_mut(kind) = item;
        }
        let assignment = Assignment {
            dont_do: drawn.dont_do,
            punishment: drawn.punishment,
        };
        self.assigned
            .insert(player_name.to_string(), assignment.clone());

        tracing::info!(
            "{} drew ({} dont-do / {} punishments left)",
            player_name,
            self.pool.dont_do.len(),
            self.pool.punishment.len()
        );
        Ok(AssignmentView::new(player_name, assignment))
    }

    /// Items of `kind` not yet drawn in any epoch since the shuffle.
    ///
    /// Matching is by text, so when two players entered the same text,
    /// drawing one copy removes both from availability.
    fn available(&self, kind: ItemKind) -> Vec<String> {
        let used = self.used_items.get(kind);
        self.all_items(kind)
            .into_iter()
            .filter(|item| !used.contains(item))
            .collect()
    }

    /// Start a new epoch from whatever has not been drawn yet.
    ///
    /// Every player has to draw again, so each kind needs at least one
    /// remaining item per seat. Crossed-out history is kept.
    pub fn redraw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GameResult<()> {
        GameError::require_phase(Phase::Draw, self.phase)?;

        let mut available = PerKind::from_fn(|kind| self.available(kind));
        for kind in ItemKind::ALL {
            if available.get(kind).len() < PLAYER_COUNT {
                return Err(GameError::validation(format!(
                    "remaining items insufficient: fewer than {} dont-do items or punishments left, the game is over",
                    PLAYER_COUNT
                )));
            }
        }

        for kind in ItemKind::ALL {
            available.get_mut(kind).shuffle(rng);
        }
        self.pool = available;
        self.assigned.clear();
        tracing::info!(
            "Redraw: {} dont-do items and {} punishments back in play",
            self.pool.dont_do.len(),
            self.pool.punishment.len()
        );
        Ok(())
    }

    /// A player's own draw for this epoch
    pub fn assignment_for(&self, name: &str) -> GameResult<AssignmentView> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::validation("player name is required"));
        }
        self.assigned
            .get(name)
            .cloned()
            .map(|assignment| AssignmentView::new(name, assignment))
            .ok_or_else(|| GameError::NotFound(name.to_string()))
    }
}
