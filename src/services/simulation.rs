// src/services/simulation.rs - AI against AI, one game or a parallel batch

use crate::dictionary::Dictionary;
use crate::game::game_state::{EndReason, GameState};
use crate::game::player::PlayerSetup;
use crate::game::turn_manager::winner;
use crate::services::game_manager::{GameResult, GameSession};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Turns after which a self-play game is abandoned.
pub const MAX_SIMULATION_TURNS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub seed: u64,
    pub turns: usize,
    /// False when the turn cap was hit before the game ended.
    pub completed: bool,
    pub final_scores: Vec<(String, i32)>,
    pub winner: Option<String>,
    pub end_reason: Option<EndReason>,
    pub state: GameState,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub games: usize,
    pub completed: usize,
    pub wins: BTreeMap<String, usize>,
    pub average_scores: BTreeMap<String, f64>,
    pub average_turns: f64,
}

/// Plays one seeded game to the end with every seat driven by the AI.
/// Any human seat makes the first turn fail with `NotAnAiPlayer`.
pub fn simulate_game(
    setups: &[PlayerSetup],
    dictionary: Arc<dyn Dictionary>,
    seed: u64,
) -> GameResult<SimulationResult> {
    let mut session = GameSession::new(setups, dictionary, seed)?;
    let mut turns = 0;

    while !session.state().is_over() && turns < MAX_SIMULATION_TURNS {
        session.play_ai_turn()?;
        turns += 1;
    }

    let state = session.state().clone();
    let completed = state.is_over();
    if !completed {
        log::warn!("⏱️ seed {} stopped after {} turns without an ending", seed, turns);
    }

    let final_scores = state.players.iter().map(|p| (p.id.clone(), p.score)).collect();
    let winner = winner(&state.players).map(|p| p.id.clone());
    log::info!(
        "🏁 seed {} finished in {} turns, winner {:?}",
        seed,
        turns,
        winner
    );

    Ok(SimulationResult {
        seed,
        turns,
        completed,
        final_scores,
        winner,
        end_reason: state.end_reason.clone(),
        state,
    })
}

/// Runs one game per seed across the rayon pool. Results come back in seed
/// order.
pub fn simulate_batch(
    setups: &[PlayerSetup],
    dictionary: Arc<dyn Dictionary>,
    seeds: &[u64],
) -> Vec<GameResult<SimulationResult>> {
    log::info!("🎲 simulating {} games", seeds.len());
    seeds
        .par_iter()
        .map(|&seed| simulate_game(setups, Arc::clone(&dictionary), seed))
        .collect()
}

pub fn summarize(results: &[SimulationResult]) -> BatchSummary {
    let games = results.len();
    if games == 0 {
        return BatchSummary::default();
    }

    let mut wins = BTreeMap::new();
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for result in results {
        if let Some(id) = &result.winner {
            *wins.entry(id.clone()).or_insert(0) += 1;
        }
        for (id, score) in &result.final_scores {
            *totals.entry(id.clone()).or_insert(0) += i64::from(*score);
        }
    }

    BatchSummary {
        games,
        completed: results.iter().filter(|r| r.completed).count(),
        wins,
        average_scores: totals
            .into_iter()
            .map(|(id, total)| (id, total as f64 / games as f64))
            .collect(),
        average_turns: results.iter().map(|r| r.turns).sum::<usize>() as f64 / games as f64,
    }
}
