use crate::error::GameResult;
use crate::game::GameState;
use crate::protocol::*;
use crate::store::StateStore;
use crate::types::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state
///
/// Every operation runs load, apply, save under one lock, so concurrent
/// requests see each other's writes and the draw pool is never handed out
/// twice.
pub struct AppState {
    store: Arc<dyn StateStore>,
    roster: Roster,
    op_lock: Mutex<()>,
}

impl AppState {
    pub fn new(store: Arc<dyn StateStore>, roster: Roster) -> Self {
        Self {
            store,
            roster,
            op_lock: Mutex::new(()),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Run a read-only projection against the stored document
    async fn read<T>(
        &self,
        op: impl FnOnce(&GameState, &Roster) -> GameResult<T>,
    ) -> GameResult<T> {
        let _guard = self.op_lock.lock().await;
        let state = self.store.load().await;
        op(&state, &self.roster)
    }

    /// Apply one mutation and persist it. Nothing is written when `op` fails.
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut GameState, &Roster) -> GameResult<T>,
    ) -> GameResult<T> {
        let _guard = self.op_lock.lock().await;
        let mut state = self.store.load().await;
        state.version += 1;
        let result = op(&mut state, &self.roster)?;
        self.store.save(&state).await?;
        Ok(result)
    }

    pub async fn get_state(&self) -> GameResult<StateView> {
        self.read(|state, roster| Ok(state.view(roster))).await
    }

    pub async fn current_items(&self) -> GameResult<CurrentItemsView> {
        self.read(|state, roster| Ok(state.current_items(roster))).await
    }

    pub async fn add_item(&self, text: &str, kind: ItemKind) -> GameResult<ItemsView> {
        self.mutate(|state, _| {
            let items = state.add_item(text, kind)?;
            Ok(ItemsView { items })
        })
        .await
    }

    pub async fn update_item(
        &self,
        index: i64,
        text: &str,
        kind: ItemKind,
    ) -> GameResult<ItemsView> {
        self.mutate(|state, _| {
            let items = state.update_item(index, text, kind)?;
            Ok(ItemsView { items })
        })
        .await
    }

    pub async fn delete_item(&self, index: i64, kind: ItemKind) -> GameResult<ItemsView> {
        self.mutate(|state, _| {
            let items = state.delete_item(index, kind)?;
            Ok(ItemsView { items })
        })
        .await
    }

    pub async fn confirm(&self) -> GameResult<StateView> {
        self.mutate(|state, roster| {
            state.confirm()?;
            Ok(state.view(roster))
        })
        .await
    }

    pub async fn confirm_shuffle(&self) -> GameResult<StateView> {
        self.mutate(|state, roster| {
            state.confirm_shuffle(&mut rand::rng())?;
            Ok(state.view(roster))
        })
        .await
    }

    pub async fn draw(&self, player_name: &str) -> GameResult<AssignmentView> {
        self.mutate(|state, roster| state.draw(roster, player_name)).await
    }

    pub async fn redraw(&self) -> GameResult<StateView> {
        self.mutate(|state, roster| {
            state.redraw(&mut rand::rng())?;
            Ok(state.view(roster))
        })
        .await
    }

    pub async fn summary(&self) -> GameResult<Summary> {
        self.read(|state, roster| state.summary(roster)).await
    }

    pub async fn my_assignment(&self, name: &str) -> GameResult<AssignmentView> {
        self.read(|state, _| state.assignment_for(name)).await
    }

    /// Throw the stored game away, whatever phase it is in
    pub async fn reset(&self) -> GameResult<StateView> {
        let _guard = self.op_lock.lock().await;
        self.store.reset().await?;
        tracing::info!("Game reset ({})", self.store.describe());
        Ok(GameState::new().view(&self.roster))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::store::MemoryStore;

    fn app() -> (Arc<MemoryStore>, AppState) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), Roster::default());
        (store, state)
    }

    #[tokio::test]
    async fn test_mutation_bumps_version() {
        let (_store, state) = app();
        assert_eq!(state.get_state().await.unwrap().version, 0);

        state.add_item("a", ItemKind::DontDo).await.unwrap();
        state.add_item("b", ItemKind::DontDo).await.unwrap();
        assert_eq!(state.get_state().await.unwrap().version, 2);
    }

    #[tokio::test]
    async fn test_failed_operation_does_not_save() {
        let (store, state) = app();
        state.add_item("a", ItemKind::DontDo).await.unwrap();
        let before = store.raw().await;

        let result = state.update_item(3, "b", ItemKind::DontDo).await;
        assert!(matches!(result, Err(GameError::Index { index: 3 })));
        assert_eq!(store.raw().await, before);
    }

    #[tokio::test]
    async fn test_reads_do_not_create_document() {
        let (store, state) = app();
        state.get_state().await.unwrap();
        state.current_items().await.unwrap();
        assert!(state.summary().await.is_err());
        assert!(store.raw().await.is_none());
    }

    #[tokio::test]
    async fn test_reset_returns_defaults() {
        let (store, state) = app();
        state.add_item("a", ItemKind::DontDo).await.unwrap();
        state.confirm().await.unwrap();

        let view = state.reset().await.unwrap();
        assert_eq!(view.phase, Phase::Input);
        assert_eq!(view.current_player_index, 0);
        assert_eq!(view.version, 0);
        assert!(store.raw().await.is_none());
    }
}
