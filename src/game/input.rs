use super::GameState;
use crate::error::{GameError, GameResult};
use crate::types::*;

/// Trim user input, rejecting blanks
fn clean_content(text: &str) -> GameResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GameError::validation("content must not be empty"));
    }
    Ok(trimmed.to_string())
}

impl GameState {
    fn current_list_mut(&mut self, kind: ItemKind) -> &mut Vec<String> {
        self.player_items[self.current_player_index].get_mut(kind)
    }

    /// Resolve a client supplied index against the current player's list
    fn checked_index(&self, index: i64, kind: ItemKind) -> GameResult<usize> {
        let len = self.items(self.current_player_index, kind).len();
        usize::try_from(index)
            .ok()
            .filter(|i| *i < len)
            .ok_or(GameError::Index { index })
    }

    /// Append an item to the current player's list of `kind`
    pub fn add_item(&mut self, text: &str, kind: ItemKind) -> GameResult<Vec<String>> {
        GameError::require_phase(Phase::Input, self.phase)?;
        let content = clean_content(text)?;

        self.current_list_mut(kind).push(content);
        tracing::debug!(
            "Player {} added {} item #{}",
            self.current_player_index,
            kind,
            self.items(self.current_player_index, kind).len() - 1
        );
        Ok(self.items(self.current_player_index, kind).to_vec())
    }

    /// Replace an item in place
    pub fn update_item(
        &mut self,
        index: i64,
        text: &str,
        kind: ItemKind,
    ) -> GameResult<Vec<String>> {
        GameError::require_phase(Phase::Input, self.phase)?;
        let index = self.checked_index(index, kind)?;
        let content = clean_content(text)?;

        self.current_list_mut(kind)[index] = content;
        tracing::debug!(
            "Player {} updated {} item #{}",
            self.current_player_index,
            kind,
            index
        );
        Ok(self.items(self.current_player_index, kind).to_vec())
    }

    /// Remove an item; later items shift down by one
    pub fn delete_item(&mut self, index: i64, kind: ItemKind) -> GameResult<Vec<String>> {
        GameError::require_phase(Phase::Input, self.phase)?;
        let index = self.checked_index(index, kind)?;

        self.current_list_mut(kind).remove(index);
        tracing::debug!(
            "Player {} deleted {} item #{}",
            self.current_player_index,
            kind,
            index
        );
        Ok(self.items(self.current_player_index, kind).to_vec())
    }

    /// Lock the list the current player is filling.
    ///
    /// Each player confirms twice: the dont-do list first, which keeps the
    /// turn, then the punishment list, which hands the turn to the next seat.
    /// The last seat's second confirm ends the input phase.
    pub fn confirm(&mut self) -> GameResult<()> {
        GameError::require_phase(Phase::Input, self.phase)?;
        let player = self.current_player_index;
        let kind = self.current_input_type;

        if self.items(player, kind).is_empty() {
            return Err(GameError::validation(match kind {
                ItemKind::DontDo => "add at least one dont-do item before confirming",
                ItemKind::Punishment => "add at least one punishment before confirming",
            }));
        }

        *self.confirmed[player].get_mut(kind) = true;
        match kind {
            ItemKind::DontDo => {
                self.current_input_type = ItemKind::Punishment;
            }
            ItemKind::Punishment => {
                self.current_input_type = ItemKind::DontDo;
                if player + 1 < PLAYER_COUNT {
                    self.current_player_index = player + 1;
                    tracing::info!("Player {} finished input, turn passes on", player);
                } else {
                    self.phase = Phase::ShuffleConfirm;
                    tracing::info!("All players confirmed, waiting for shuffle");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_trims_and_appends() {
        let mut state = GameState::new();
        state.add_item("  first ", ItemKind::DontDo).unwrap();
        let items = state.add_item("second", ItemKind::DontDo).unwrap();
        assert_eq!(items, vec!["first", "second"]);
        assert!(state.items(0, ItemKind::Punishment).is_empty());
    }

    #[test]
    fn test_add_item_allows_duplicate_text() {
        let mut state = GameState::new();
        state.add_item("same", ItemKind::Punishment).unwrap();
        let items = state.add_item("same", ItemKind::Punishment).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_add_item_rejects_blank() {
        let mut state = GameState::new();
        let result = state.add_item("   ", ItemKind::DontDo);
        assert!(matches!(result, Err(GameError::Validation(_))));
        assert!(state.items(0, ItemKind::DontDo).is_empty());
    }

    #[test]
    fn test_add_item_uses_requested_kind_not_input_type() {
        let mut state = GameState::new();
        assert_eq!(state.current_input_type, ItemKind::DontDo);
        state.add_item("p", ItemKind::Punishment).unwrap();
        assert_eq!(state.items(0, ItemKind::Punishment), ["p"]);
    }

    #[test]
    fn test_update_item() {
        let mut state = GameState::new();
        state.add_item("a", ItemKind::DontDo).unwrap();
        state.add_item("b", ItemKind::DontDo).unwrap();

        let items = state.update_item(1, " c ", ItemKind::DontDo).unwrap();
        assert_eq!(items, vec!["a", "c"]);
    }

    #[test]
    fn test_update_item_checks_index_before_content() {
        let mut state = GameState::new();
        state.add_item("a", ItemKind::DontDo).unwrap();

        let result = state.update_item(5, "", ItemKind::DontDo);
        assert!(matches!(result, Err(GameError::Index { index: 5 })));
        let result = state.update_item(-1, "x", ItemKind::DontDo);
        assert!(matches!(result, Err(GameError::Index { index: -1 })));
        let result = state.update_item(0, " ", ItemKind::DontDo);
        assert!(matches!(result, Err(GameError::Validation(_))));
        assert_eq!(state.items(0, ItemKind::DontDo), ["a"]);
    }

    #[test]
    fn test_delete_item_shifts_indices() {
        let mut state = GameState::new();
        for text in ["a", "b", "c"] {
            state.add_item(text, ItemKind::Punishment).unwrap();
        }

        let items = state.delete_item(0, ItemKind::Punishment).unwrap();
        assert_eq!(items, vec!["b", "c"]);
        let items = state.delete_item(1, ItemKind::Punishment).unwrap();
        assert_eq!(items, vec!["b"]);
        assert!(matches!(
            state.delete_item(1, ItemKind::Punishment),
            Err(GameError::Index { .. })
        ));
    }

    #[test]
    fn test_edits_only_in_input_phase() {
        let mut state = super::super::tests::filled_state();
        assert_eq!(state.phase, Phase::ShuffleConfirm);

        assert!(matches!(
            state.add_item("late", ItemKind::DontDo),
            Err(GameError::Phase {
                expected: Phase::Input,
                actual: Phase::ShuffleConfirm
            })
        ));
        assert!(matches!(
            state.update_item(0, "late", ItemKind::DontDo),
            Err(GameError::Phase { .. })
        ));
        assert!(matches!(
            state.delete_item(0, ItemKind::DontDo),
            Err(GameError::Phase { .. })
        ));
        assert!(matches!(state.confirm(), Err(GameError::Phase { .. })));
    }

    #[test]
    fn test_confirm_requires_items() {
        let mut state = GameState::new();
        assert!(matches!(state.confirm(), Err(GameError::Validation(_))));

        state.add_item("a", ItemKind::DontDo).unwrap();
        state.confirm().unwrap();
        // punishment list still empty
        assert!(matches!(state.confirm(), Err(GameError::Validation(_))));
        assert_eq!(state.current_player_index, 0);
        assert_eq!(state.current_input_type, ItemKind::Punishment);
    }

    #[test]
    fn test_confirm_two_steps_per_player() {
        let mut state = GameState::new();
        state.add_item("d", ItemKind::DontDo).unwrap();
        state.add_item("p", ItemKind::Punishment).unwrap();

        state.confirm().unwrap();
        assert_eq!(state.current_player_index, 0);
        assert_eq!(state.current_input_type, ItemKind::Punishment);
        assert!(state.confirmed[0].dont_do);
        assert!(!state.confirmed[0].punishment);

        state.confirm().unwrap();
        assert_eq!(state.current_player_index, 1);
        assert_eq!(state.current_input_type, ItemKind::DontDo);
        assert!(state.confirmed[0].punishment);
        assert_eq!(state.phase, Phase::Input);
    }

    #[test]
    fn test_last_player_confirm_ends_input() {
        let state = super::super::tests::filled_state();
        assert_eq!(state.phase, Phase::ShuffleConfirm);
        assert_eq!(state.current_player_index, PLAYER_COUNT - 1);
        assert!(state.confirmed.iter().all(|c| c.dont_do && c.punishment));
    }
}
