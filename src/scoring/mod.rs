pub mod scoring;

pub use scoring::{calculate_move_score, score_word, MoveScore};
