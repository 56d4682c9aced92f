//! Per-cell letter constraints and anchor squares.

use crate::dictionary::Dictionary;
use crate::game::board::Board;
use crate::game::position::{Direction, Position, BOARD_SIZE};
use crate::game::words::{word_positions, word_string};

/// Subset of A-Z as a bit set, bit 0 = A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LetterSet(u32);

impl LetterSet {
    pub const EMPTY: LetterSet = LetterSet(0);
    pub const ALL: LetterSet = LetterSet((1 << 26) - 1);

    fn bit(letter: char) -> Option<u32> {
        letter
            .is_ascii_uppercase()
            .then(|| 1 << (letter as u32 - 'A' as u32))
    }

    pub fn contains(self, letter: char) -> bool {
        Self::bit(letter).is_some_and(|b| self.0 & b != 0)
    }

    pub fn insert(&mut self, letter: char) {
        if let Some(b) = Self::bit(letter) {
            self.0 |= b;
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Letters in alphabetical order.
    pub fn iter(self) -> impl Iterator<Item = char> {
        ('A'..='Z').filter(move |&c| self.contains(c))
    }
}

impl FromIterator<char> for LetterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = LetterSet::EMPTY;
        for c in iter {
            set.insert(c);
        }
        set
    }
}

/// Letters allowed in each empty cell, for a word running horizontally and
/// for one running vertically. Occupied cells allow nothing.
#[derive(Debug, Clone)]
pub struct CrossChecks {
    horizontal: Vec<LetterSet>,
    vertical: Vec<LetterSet>,
}

impl CrossChecks {
    pub fn compute(board: &Board, dictionary: &dyn Dictionary) -> Self {
        let mut horizontal = vec![LetterSet::EMPTY; BOARD_SIZE * BOARD_SIZE];
        let mut vertical = vec![LetterSet::EMPTY; BOARD_SIZE * BOARD_SIZE];

        for pos in Position::all().filter(|p| !board.is_occupied(*p)) {
            // a horizontal play is constrained by the column through the cell
            horizontal[pos.index()] = allowed_letters(board, pos, Direction::Vertical, dictionary);
            vertical[pos.index()] = allowed_letters(board, pos, Direction::Horizontal, dictionary);
        }

        Self { horizontal, vertical }
    }

    /// Letters that may go at `pos` when the main word runs along `direction`.
    pub fn get(&self, pos: Position, direction: Direction) -> LetterSet {
        if !pos.is_in_bounds() {
            return LetterSet::EMPTY;
        }
        match direction {
            Direction::Horizontal => self.horizontal[pos.index()],
            Direction::Vertical => self.vertical[pos.index()],
        }
    }
}

/// Letters for the empty cell `pos` that keep the run along `axis` a word.
fn allowed_letters(board: &Board, pos: Position, axis: Direction, dictionary: &dyn Dictionary) -> LetterSet {
    let before = pos
        .prev(axis)
        .map(|p| word_string(board, &word_positions(board, p, axis)))
        .unwrap_or_default();
    let after = pos
        .next(axis)
        .map(|p| word_string(board, &word_positions(board, p, axis)))
        .unwrap_or_default();

    if before.is_empty() && after.is_empty() {
        return LetterSet::ALL;
    }

    ('A'..='Z')
        .filter(|&c| dictionary.contains(&format!("{}{}{}", before, c, after)))
        .collect()
}

/// Empty cells with at least one occupied 4-neighbour.
pub fn find_anchors(board: &Board) -> Vec<Position> {
    Position::all()
        .filter(|pos| !board.is_occupied(*pos) && pos.neighbors().any(|n| board.is_occupied(n)))
        .collect()
}
