//! Computer opponent: move generation and per-tier move choice.

pub mod cross_checks;
pub mod difficulty;
pub mod move_finder;

pub use cross_checks::{find_anchors, CrossChecks, LetterSet};
pub use difficulty::select_move;
pub use move_finder::{find_all_moves, AiMove};
