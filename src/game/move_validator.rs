//! Move legality.
//!
//! Checks run in a fixed order and stop at the first failure: bounds,
//! occupancy, linearity, contiguity, connectivity, word extraction and finally
//! the dictionary. A rejected move touches nothing.

use crate::dictionary::Dictionary;
use crate::game::board::{Board, PlacedTile};
use crate::game::position::{Direction, Position};
use crate::game::words::{alignment, find_formed_words, Alignment, FormedWord};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No tiles placed")]
    NoTilesPlaced,
    #[error("Tile placed out of bounds at {0}")]
    OutOfBounds(Position),
    #[error("Cannot place tile on an occupied cell at {0}")]
    Occupied(Position),
    #[error("Tiles must be placed in a single row or column")]
    NotLinear,
    #[error("Tiles must form a contiguous line (no gaps)")]
    NotContiguous,
    #[error("First word must cover the center square")]
    CenterNotCovered,
    #[error("New tiles must connect to existing tiles")]
    NotConnected,
    #[error("No words formed")]
    NoWordsFormed,
    #[error("\"{0}\" is not a valid word")]
    InvalidWord(String),
}

/// A placement that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMove {
    /// Board with the new tiles on it.
    pub board: Board,
    pub words: Vec<FormedWord>,
}

/// Runs the whole pipeline for `placements` against the board as it was
/// before they were put down.
pub fn validate_move(
    board_before: &Board,
    placements: &[PlacedTile],
    dictionary: &dyn Dictionary,
) -> Result<ValidatedMove, ValidationError> {
    if placements.is_empty() {
        return Err(ValidationError::NoTilesPlaced);
    }

    check_bounds(placements)?;
    check_occupancy(board_before, placements)?;
    let alignment = alignment(placements).ok_or(ValidationError::NotLinear)?;

    let board_after = board_before.place_tiles(placements);
    if let Alignment::Line(direction) = alignment {
        check_contiguity(&board_after, placements, direction)?;
    }
    check_connectivity(board_before, placements)?;

    let words = find_formed_words(&board_after, placements, alignment);
    if words.is_empty() {
        return Err(ValidationError::NoWordsFormed);
    }
    if let Some(bad) = words.iter().find(|w| !dictionary.contains(&w.word)) {
        return Err(ValidationError::InvalidWord(bad.word.clone()));
    }

    Ok(ValidatedMove {
        board: board_after,
        words,
    })
}

fn check_bounds(placements: &[PlacedTile]) -> Result<(), ValidationError> {
    match placements.iter().find(|p| !p.position.is_in_bounds()) {
        Some(p) => Err(ValidationError::OutOfBounds(p.position)),
        None => Ok(()),
    }
}

// Two tiles aimed at the same cell count as an occupied target.
fn check_occupancy(board: &Board, placements: &[PlacedTile]) -> Result<(), ValidationError> {
    let mut targets = HashSet::with_capacity(placements.len());
    for p in placements {
        if board.is_occupied(p.position) || !targets.insert(p.position) {
            return Err(ValidationError::Occupied(p.position));
        }
    }
    Ok(())
}

fn check_contiguity(
    board_after: &Board,
    placements: &[PlacedTile],
    direction: Direction,
) -> Result<(), ValidationError> {
    let along: Vec<usize> = placements.iter().map(|p| p.position.along(direction)).collect();
    let (Some(&lo), Some(&hi)) = (along.iter().min(), along.iter().max()) else {
        return Ok(());
    };
    let fixed = placements[0].position;
    let gap = (lo..=hi).any(|i| {
        let pos = match direction {
            Direction::Horizontal => Position::new(fixed.row, i),
            Direction::Vertical => Position::new(i, fixed.col),
        };
        !board_after.is_occupied(pos)
    });
    if gap {
        Err(ValidationError::NotContiguous)
    } else {
        Ok(())
    }
}

fn check_connectivity(board_before: &Board, placements: &[PlacedTile]) -> Result<(), ValidationError> {
    if board_before.is_empty() {
        return if placements.iter().any(|p| p.position == Position::center()) {
            Ok(())
        } else {
            Err(ValidationError::CenterNotCovered)
        };
    }
    let touches_existing = placements
        .iter()
        .any(|p| p.position.neighbors().any(|n| board_before.is_occupied(n)));
    if touches_existing {
        Ok(())
    } else {
        Err(ValidationError::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::game::tile::{Tile, TileId};
    use assert_matches::assert_matches;

    fn placed(id: u32, letter: char, row: usize, col: usize) -> PlacedTile {
        PlacedTile::new(Tile::lettered(TileId(id), letter), Position::new(row, col))
    }

    fn dictionary() -> WordList {
        WordList::from_words(["CAT", "CATS", "AT", "TA", "ACT", "SCAT", "TAT", "AS"])
    }

    fn board_with_cat() -> Board {
        Board::new().place_tiles(&[
            placed(100, 'C', 7, 6),
            placed(101, 'A', 7, 7),
            placed(102, 'T', 7, 8),
        ])
    }

    #[test]
    fn test_first_move_through_center() {
        let moves = [placed(0, 'C', 7, 6), placed(1, 'A', 7, 7), placed(2, 'T', 7, 8)];
        let validated = validate_move(&Board::new(), &moves, &dictionary()).unwrap();
        assert_eq!(validated.words.len(), 1);
        assert_eq!(validated.words[0].word, "CAT");
        assert_eq!(validated.board.tile_count(), 3);
    }

    #[test]
    fn test_rejects_empty_placement() {
        assert_matches!(
            validate_move(&Board::new(), &[], &dictionary()),
            Err(ValidationError::NoTilesPlaced)
        );
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let moves = [placed(0, 'A', 7, 14), placed(1, 'T', 7, 15)];
        assert_matches!(
            validate_move(&board_with_cat(), &moves, &dictionary()),
            Err(ValidationError::OutOfBounds(pos)) if pos == Position::new(7, 15)
        );
    }

    #[test]
    fn test_out_of_bounds_wins_over_dictionary() {
        // nonsense word, diagonal and off the board: bounds is reported first
        let moves = [placed(0, 'Q', 20, 20), placed(1, 'X', 3, 4)];
        assert_matches!(
            validate_move(&Board::new(), &moves, &dictionary()),
            Err(ValidationError::OutOfBounds(_))
        );
    }

    #[test]
    fn test_rejects_occupied_cell() {
        let moves = [placed(0, 'S', 7, 8)];
        assert_matches!(
            validate_move(&board_with_cat(), &moves, &dictionary()),
            Err(ValidationError::Occupied(pos)) if pos == Position::new(7, 8)
        );
    }

    #[test]
    fn test_rejects_duplicate_target() {
        let moves = [placed(0, 'S', 7, 9), placed(1, 'S', 7, 9)];
        assert_matches!(
            validate_move(&board_with_cat(), &moves, &dictionary()),
            Err(ValidationError::Occupied(_))
        );
    }

    #[test]
    fn test_rejects_non_linear() {
        let moves = [placed(0, 'A', 6, 6), placed(1, 'T', 8, 9)];
        assert_matches!(
            validate_move(&board_with_cat(), &moves, &dictionary()),
            Err(ValidationError::NotLinear)
        );
    }

    #[test]
    fn test_rejects_gap() {
        let moves = [placed(0, 'A', 6, 6), placed(1, 'T', 6, 9)];
        assert_matches!(
            validate_move(&board_with_cat(), &moves, &dictionary()),
            Err(ValidationError::NotContiguous)
        );
    }

    #[test]
    fn test_existing_tiles_fill_gaps() {
        // CAT bridges the two new tiles; SCATS is not in the list
        let moves = [placed(0, 'S', 7, 5), placed(1, 'S', 7, 9)];
        assert_matches!(
            validate_move(&board_with_cat(), &moves, &dictionary()),
            Err(ValidationError::InvalidWord(word)) if word == "SCATS"
        );
    }

    #[test]
    fn test_first_move_must_cover_center() {
        let moves = [placed(0, 'A', 3, 3), placed(1, 'T', 3, 4)];
        assert_matches!(
            validate_move(&Board::new(), &moves, &dictionary()),
            Err(ValidationError::CenterNotCovered)
        );
    }

    #[test]
    fn test_rejects_disconnected_move() {
        let moves = [placed(0, 'A', 2, 2), placed(1, 'T', 2, 3)];
        assert_matches!(
            validate_move(&board_with_cat(), &moves, &dictionary()),
            Err(ValidationError::NotConnected)
        );
    }

    #[test]
    fn test_single_tile_on_empty_board_forms_no_word() {
        let moves = [placed(0, 'A', 7, 7)];
        assert_matches!(
            validate_move(&Board::new(), &moves, &dictionary()),
            Err(ValidationError::NoWordsFormed)
        );
    }

    #[test]
    fn test_cross_word_must_be_valid_too() {
        // S under the A reads AS downward and nothing across
        let ok = [placed(0, 'S', 8, 7)];
        let validated = validate_move(&board_with_cat(), &ok, &dictionary()).unwrap();
        assert_eq!(validated.words.iter().map(|w| w.word.as_str()).collect::<Vec<_>>(), vec!["AS"]);

        // an X under the T makes TX, which is not a word
        let bad = [placed(1, 'X', 8, 8)];
        assert_matches!(
            validate_move(&board_with_cat(), &bad, &dictionary()),
            Err(ValidationError::InvalidWord(word)) if word == "TX"
        );
    }

    #[test]
    fn test_all_or_nothing_on_partial_validity() {
        // CATS is fine along the row, but the S also forms SX downward
        let board = board_with_cat().place_tiles(&[placed(103, 'X', 8, 9)]);
        let moves = [placed(0, 'S', 7, 9)];
        assert_matches!(
            validate_move(&board, &moves, &dictionary()),
            Err(ValidationError::InvalidWord(word)) if word == "SX"
        );
    }

    #[test]
    fn test_extension_reports_full_word() {
        let moves = [placed(0, 'S', 7, 9)];
        let validated = validate_move(&board_with_cat(), &moves, &dictionary()).unwrap();
        assert_eq!(validated.words.len(), 1);
        assert_eq!(validated.words[0].word, "CATS");
        assert_eq!(validated.words[0].positions.len(), 4);
    }
}
