use serde::{Deserialize, Serialize};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 15;

/// Row and column of the center star.
pub const CENTER: usize = 7;

/// A cell coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn center() -> Self {
        Self::new(CENTER, CENTER)
    }

    pub fn is_in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major index into a flat board. Only meaningful for in-bounds positions.
    pub(crate) fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Coordinate that changes when walking along `direction`.
    pub fn along(&self, direction: Direction) -> usize {
        match direction {
            Direction::Horizontal => self.col,
            Direction::Vertical => self.row,
        }
    }

    /// Neighbouring cell one step forward along `direction`, if it is on the board.
    pub fn next(&self, direction: Direction) -> Option<Position> {
        let (row, col) = match direction {
            Direction::Horizontal => (self.row, self.col + 1),
            Direction::Vertical => (self.row + 1, self.col),
        };
        let pos = Position::new(row, col);
        pos.is_in_bounds().then_some(pos)
    }

    /// Neighbouring cell one step backward along `direction`, if it is on the board.
    pub fn prev(&self, direction: Direction) -> Option<Position> {
        let pos = match direction {
            Direction::Horizontal => Position::new(self.row, self.col.checked_sub(1)?),
            Direction::Vertical => Position::new(self.row.checked_sub(1)?, self.col),
        };
        pos.is_in_bounds().then_some(pos)
    }

    /// The 4-neighbourhood of this cell, clipped to the board.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> {
        let here = *self;
        [
            here.prev(Direction::Vertical),
            here.next(Direction::Vertical),
            here.prev(Direction::Horizontal),
            here.next(Direction::Horizontal),
        ]
        .into_iter()
        .flatten()
    }

    /// Iterates every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Axis along which a word is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Position::new(0, 0).is_in_bounds());
        assert!(Position::new(14, 14).is_in_bounds());
        assert!(!Position::new(15, 0).is_in_bounds());
        assert!(!Position::new(3, 15).is_in_bounds());
    }

    #[test]
    fn test_steps_stop_at_edges() {
        let corner = Position::new(0, 14);
        assert_eq!(corner.prev(Direction::Vertical), None);
        assert_eq!(corner.next(Direction::Horizontal), None);
        assert_eq!(corner.next(Direction::Vertical), Some(Position::new(1, 14)));
        assert_eq!(corner.prev(Direction::Horizontal), Some(Position::new(0, 13)));
    }

    #[test]
    fn test_neighbors() {
        assert_eq!(Position::new(0, 0).neighbors().count(), 2);
        assert_eq!(Position::new(0, 5).neighbors().count(), 3);
        assert_eq!(Position::center().neighbors().count(), 4);
    }

    #[test]
    fn test_all_covers_board() {
        let cells: Vec<Position> = Position::all().collect();
        assert_eq!(cells.len(), BOARD_SIZE * BOARD_SIZE);
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[cells.len() - 1].index(), BOARD_SIZE * BOARD_SIZE - 1);
    }
}
