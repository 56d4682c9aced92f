//! Getting games in and out of files.
//!
//! # Components
//!
//! - `game_record`: versioned JSON saves for resuming a game
//! - `csv_writer`: move history export

pub mod csv_writer;
pub mod game_record;

pub use csv_writer::{move_rows, read_move_history_csv, write_move_history, write_move_history_csv, MoveRow};
pub use game_record::{load_game, read_game, save_game, write_game, SavedGame, SAVE_FORMAT_VERSION};
