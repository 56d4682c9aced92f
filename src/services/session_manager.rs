// src/services/session_manager.rs - many games side by side, one writer per game

use crate::dictionary::Dictionary;
use crate::game::player::PlayerSetup;
use crate::services::game_manager::{GameResult, GameSession};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// A game that callers lock before touching. Holding the lock is what keeps
/// two commits on the same game from interleaving.
pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Default)]
pub struct SessionStoreState {
    pub sessions: HashMap<String, SharedSession>,
}

// ============================================================================
// SESSION MANAGER
// ============================================================================

#[derive(Clone, Default)]
pub struct SessionManager {
    store: Arc<RwLock<SessionStoreState>>,
}

pub fn new_session_manager() -> SessionManager {
    SessionManager::default()
}

impl SessionManager {
    /// Starts a game and files it under a fresh id.
    pub async fn create_game(
        &self,
        setups: &[PlayerSetup],
        dictionary: Arc<dyn Dictionary>,
        seed: u64,
    ) -> GameResult<String> {
        let session = GameSession::new(setups, dictionary, seed)?;
        let game_id = Uuid::new_v4().to_string();

        let mut store = self.store.write().await;
        store
            .sessions
            .insert(game_id.clone(), Arc::new(Mutex::new(session)));
        log::info!("Game {} created ({} active)", game_id, store.sessions.len());
        Ok(game_id)
    }

    pub async fn get(&self, game_id: &str) -> Option<SharedSession> {
        self.store.read().await.sessions.get(game_id).cloned()
    }

    /// Runs `action` with exclusive access to one game. The index lock is
    /// released first, so other games are not held up.
    pub async fn with_game<T>(&self, game_id: &str, action: impl FnOnce(&mut GameSession) -> T) -> Option<T> {
        let session = self.get(game_id).await?;
        let mut guard = session.lock().await;
        Some(action(&mut guard))
    }

    pub async fn remove(&self, game_id: &str) -> bool {
        let removed = self.store.write().await.sessions.remove(game_id).is_some();
        if removed {
            log::info!("Game {} removed", game_id);
        }
        removed
    }

    pub async fn game_ids(&self) -> Vec<String> {
        self.store.read().await.sessions.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::game::game_state::GamePhase;
    use crate::services::game_manager::{GameError, StateError};
    use assert_matches::assert_matches;

    fn dictionary() -> Arc<dyn Dictionary> {
        Arc::new(WordList::from_words(["AT", "TA"]))
    }

    fn seats() -> Vec<PlayerSetup> {
        vec![PlayerSetup::human("a", "Ann"), PlayerSetup::human("b", "Bo")]
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let manager = new_session_manager();
        assert!(manager.is_empty().await);

        let first = manager.create_game(&seats(), dictionary(), 1).await.unwrap();
        let second = manager.create_game(&seats(), dictionary(), 2).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(manager.len().await, 2);
        assert!(manager.get(&first).await.is_some());
        assert!(manager.get("missing").await.is_none());

        assert!(manager.remove(&first).await);
        assert!(!manager.remove(&first).await);
        assert_eq!(manager.game_ids().await, vec![second]);
    }

    #[tokio::test]
    async fn test_games_are_independent() {
        let manager = new_session_manager();
        let first = manager.create_game(&seats(), dictionary(), 1).await.unwrap();
        let second = manager.create_game(&seats(), dictionary(), 1).await.unwrap();

        let passed = manager
            .with_game(&first, |game| game.pass_turn("a").map(|s| s.move_history.len()))
            .await;
        assert_eq!(passed, Some(Ok(1)));

        let untouched = manager
            .with_game(&second, |game| game.state().move_history.len())
            .await;
        assert_eq!(untouched, Some(0));
    }

    #[tokio::test]
    async fn test_concurrent_passes_serialize() {
        let manager = new_session_manager();
        let game_id = manager.create_game(&seats(), dictionary(), 5).await.unwrap();

        // both tasks try to pass for "a"; exactly one can be first
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let manager = manager.clone();
                let game_id = game_id.clone();
                tokio::spawn(async move {
                    manager
                        .with_game(&game_id, |game| game.pass_turn("a").map(|_| ()))
                        .await
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap().unwrap());
        }
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(GameError::State(StateError::NotYourTurn)))));

        let phase = manager.with_game(&game_id, |game| game.state().phase).await;
        assert_matches!(phase, Some(GamePhase::Playing));
    }
}
