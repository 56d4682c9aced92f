//! Reading words off the board.
//!
//! The validator, the scorer and the AI all go through these helpers, so a
//! placement always yields the same words in the same order no matter who
//! asks.

use crate::game::board::{Board, PlacedTile};
use crate::game::position::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A run of two or more tiles and the string it spells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormedWord {
    pub positions: Vec<Position>,
    pub word: String,
}

/// Shape of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Single,
    Line(Direction),
}

/// `None` when the placements share neither a row nor a column (or are empty).
pub fn alignment(placements: &[PlacedTile]) -> Option<Alignment> {
    let first = placements.first()?.position;
    if placements.len() == 1 {
        return Some(Alignment::Single);
    }
    if placements.iter().all(|p| p.position.row == first.row) {
        Some(Alignment::Line(Direction::Horizontal))
    } else if placements.iter().all(|p| p.position.col == first.col) {
        Some(Alignment::Line(Direction::Vertical))
    } else {
        None
    }
}

/// Full contiguous run of occupied cells through `start` along `direction`.
/// Empty if `start` itself is empty.
pub fn word_positions(board: &Board, start: Position, direction: Direction) -> Vec<Position> {
    if !board.is_occupied(start) {
        return Vec::new();
    }
    let mut first = start;
    while let Some(prev) = first.prev(direction).filter(|p| board.is_occupied(*p)) {
        first = prev;
    }
    let mut positions = vec![first];
    let mut cursor = first;
    while let Some(next) = cursor.next(direction).filter(|p| board.is_occupied(*p)) {
        positions.push(next);
        cursor = next;
    }
    positions
}

/// Letters at `positions`. An undesignated blank reads as `?`, which no
/// dictionary contains.
pub fn word_string(board: &Board, positions: &[Position]) -> String {
    positions
        .iter()
        .map(|&pos| board.letter_at(pos).unwrap_or('?'))
        .collect()
}

/// Main word first, then the cross word of every new tile, skipping runs
/// shorter than two and spans already collected.
pub fn find_formed_words(
    board_after: &Board,
    placements: &[PlacedTile],
    alignment: Alignment,
) -> Vec<FormedWord> {
    let Some(first) = placements.first() else {
        return Vec::new();
    };

    let (main_direction, cross_direction) = match alignment {
        Alignment::Line(direction) => (direction, direction.perpendicular()),
        // a lone tile may extend either way; both axes are read below
        Alignment::Single => (Direction::Horizontal, Direction::Vertical),
    };

    let mut spans: Vec<Vec<Position>> = vec![word_positions(board_after, first.position, main_direction)];
    spans.extend(
        placements
            .iter()
            .map(|p| word_positions(board_after, p.position, cross_direction)),
    );

    let mut seen: HashSet<Vec<Position>> = HashSet::new();
    spans
        .into_iter()
        .filter(|span| span.len() > 1)
        .filter(|span| seen.insert(span.clone()))
        .map(|positions| FormedWord {
            word: word_string(board_after, &positions),
            positions,
        })
        .collect()
}
