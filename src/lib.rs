//! # Tilewords
//!
//! Rules and scoring engine for a crossword tile game on a 15×15 board, with
//! an exhaustive AI move finder.
//!
//! ## Features
//!
//! - **Game Engine**: board, tile bag, move validation, turn order and endgame
//! - **Scoring**: premium squares, cross words and the seven-tile bonus
//! - **AI**: anchor and cross-check move generation with easy/medium/hard play
//! - **Services**: pure game transitions, turn drafts, a multi-game store and
//!   self-play simulation
//! - **Recording**: JSON saves and CSV move history
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use tilewords::{Difficulty, GameSession, PlayerSetup, WordList};
//!
//! let words = Arc::new(WordList::from_words(["AT", "TA", "CAT"]));
//! let seats = [
//!     PlayerSetup::ai("a", "Ann", Difficulty::Hard),
//!     PlayerSetup::ai("b", "Bo", Difficulty::Easy),
//! ];
//! let mut session = GameSession::new(&seats, words, 42).unwrap();
//! session.play_ai_turn().unwrap();
//! assert_eq!(session.state().move_history.len(), 1);
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game logic and rules
pub mod game;

/// Word and move scoring
pub mod scoring;

/// Word lists
pub mod dictionary;

/// Move generation and difficulty tiers
pub mod ai;

/// Game transitions, sessions and simulation
pub mod services;

/// Save files and CSV export
pub mod recording;

/// Log file setup
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use ai::{find_all_moves, select_move, AiMove};
pub use dictionary::{Dictionary, WordList};
pub use game::board::{Board, PlacedTile};
pub use game::game_state::{EndReason, FoundWord, GamePhase, GameState, Move, MoveKind};
pub use game::move_validator::{validate_move, ValidationError};
pub use game::player::{Difficulty, Player, PlayerSetup};
pub use game::position::{Direction, Position};
pub use game::tile::{Tile, TileId};
pub use scoring::{calculate_move_score, MoveScore};
pub use services::game_manager::{GameError, GameResult, GameSession, StateError};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the tilewords library
#[derive(Debug, thiserror::Error)]
pub enum TilewordsError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Unsupported save format version {0}")]
    UnsupportedSaveVersion(u32),

    #[error("Dictionary {0} has no words")]
    EmptyDictionary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TilewordsError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
