use crate::game::board::{Board, PlacedTile};
use crate::game::distribution::{BINGO_BONUS, RACK_SIZE};
use crate::game::game_state::FoundWord;
use crate::game::position::Position;
use crate::game::words::FormedWord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scored words of one play and their sum, bingo included.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveScore {
    pub words_formed: Vec<FoundWord>,
    pub total_score: i32,
}

/// Score of the word spelled by `positions` on `board_after`.
///
/// Premiums only count under tiles in `new_positions`; tiles already on the
/// board give their face value. Blanks are always worth zero.
pub fn score_word(board_after: &Board, positions: &[Position], new_positions: &HashSet<Position>) -> i32 {
    let mut letter_total = 0;
    let mut word_multiplier = 1;

    for &pos in positions {
        let Some(tile) = board_after.tile_at(pos) else {
            continue;
        };
        let points = if tile.is_blank { 0 } else { tile.points };

        if new_positions.contains(&pos) {
            let premium = board_after.premium(pos);
            letter_total += points * premium.letter_multiplier();
            word_multiplier *= premium.word_multiplier();
        } else {
            letter_total += points;
        }
    }

    letter_total * word_multiplier
}

/// Scores every formed word and adds the bingo bonus when the whole rack
/// went down.
pub fn calculate_move_score(board_after: &Board, words: &[FormedWord], placed: &[PlacedTile]) -> MoveScore {
    let new_positions: HashSet<Position> = placed.iter().map(|p| p.position).collect();

    let words_formed: Vec<FoundWord> = words
        .iter()
        .map(|w| FoundWord {
            word: w.word.clone(),
            positions: w.positions.clone(),
            score: score_word(board_after, &w.positions, &new_positions),
        })
        .collect();

    let mut total_score: i32 = words_formed.iter().map(|w| w.score).sum();
    if placed.len() == RACK_SIZE {
        total_score += BINGO_BONUS;
    }

    MoveScore {
        words_formed,
        total_score,
    }
}
