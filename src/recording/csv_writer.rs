//! Move history as CSV, one row per move.
//!
//! Columns: index, player, kind, words, score, timestamp. Words of one play
//! are joined with `|`.

use crate::game::game_state::{GameState, Move};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRow {
    pub index: usize,
    pub player: String,
    pub kind: String,
    pub words: String,
    pub score: i32,
    pub timestamp: String,
}

impl MoveRow {
    fn from_move(index: usize, game_move: &Move, state: &GameState) -> Self {
        let player = state
            .player(&game_move.player_id)
            .map_or_else(|| game_move.player_id.clone(), |p| p.name.clone());
        let words: Vec<&str> = game_move.words_formed.iter().map(|w| w.word.as_str()).collect();
        Self {
            index,
            player,
            kind: game_move.kind.to_string(),
            words: words.join("|"),
            score: game_move.score,
            timestamp: game_move.timestamp.to_rfc3339(),
        }
    }
}

pub fn move_rows(state: &GameState) -> Vec<MoveRow> {
    state
        .move_history
        .iter()
        .enumerate()
        .map(|(i, m)| MoveRow::from_move(i + 1, m, state))
        .collect()
}

pub fn write_move_history<W: Write>(writer: W, state: &GameState) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in move_rows(state) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_move_history_csv<P: AsRef<Path>>(path: P, state: &GameState) -> Result<()> {
    let mut csv_writer = csv::Writer::from_path(path.as_ref())?;
    for row in move_rows(state) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    log::info!(
        "📝 {} moves written to {}",
        state.move_history.len(),
        path.as_ref().display()
    );
    Ok(())
}

pub fn read_move_history_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MoveRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: MoveRow = row?;
        rows.push(row);
    }
    Ok(rows)
}
