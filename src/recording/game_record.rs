//! Saved games.
//!
//! A save is the whole `GameState` wrapped with a format version and the time
//! it was written, as pretty-printed JSON.

use crate::game::game_state::GameState;
use crate::{Result, TilewordsError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Bumped whenever the saved layout changes incompatibly.
pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub state: GameState,
}

impl SavedGame {
    pub fn new(state: &GameState) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            saved_at: Utc::now(),
            state: state.clone(),
        }
    }
}

pub fn write_game<W: Write>(writer: W, state: &GameState) -> Result<()> {
    serde_json::to_writer_pretty(writer, &SavedGame::new(state))?;
    Ok(())
}

pub fn read_game<R: Read>(reader: R) -> Result<SavedGame> {
    let saved: SavedGame = serde_json::from_reader(reader)?;
    if saved.version != SAVE_FORMAT_VERSION {
        return Err(TilewordsError::UnsupportedSaveVersion(saved.version));
    }
    Ok(saved)
}

pub fn save_game<P: AsRef<Path>>(path: P, state: &GameState) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_game(&mut writer, state)?;
    writer.flush()?;
    log::info!("💾 game saved to {}", path.as_ref().display());
    Ok(())
}

pub fn load_game<P: AsRef<Path>>(path: P) -> Result<GameState> {
    let saved = read_game(BufReader::new(File::open(path.as_ref())?))?;
    log::info!(
        "📂 loaded game saved at {} from {}",
        saved.saved_at.format("%Y-%m-%d %H:%M:%S"),
        path.as_ref().display()
    );
    Ok(saved.state)
}
