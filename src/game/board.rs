use crate::game::position::{Position, BOARD_SIZE};
use crate::game::premium::{premium_at, Premium};
use crate::game::tile::Tile;
use serde::{Deserialize, Serialize};

/// A tile together with the cell it goes to (pending turn or history record).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    pub tile: Tile,
    pub position: Position,
}

impl PlacedTile {
    pub fn new(tile: Tile, position: Position) -> Self {
        Self { tile, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    pub position: Position,
    pub tile: Option<Tile>,
    pub premium: Premium,
}

/// 15×15 grid in row-major order. Every operation returns a new board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<BoardCell>,
}

impl Board {
    /// Empty board with the fixed premium layout.
    pub fn new() -> Self {
        let cells = Position::all()
            .map(|position| BoardCell {
                position,
                tile: None,
                premium: premium_at(position),
            })
            .collect();
        Self { cells }
    }

    pub fn cells(&self) -> &[BoardCell] {
        &self.cells
    }

    pub fn cell(&self, pos: Position) -> Option<&BoardCell> {
        if !pos.is_in_bounds() {
            return None;
        }
        self.cells.get(pos.index())
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.cell(pos).and_then(|cell| cell.tile.as_ref())
    }

    /// Letter spelled at `pos`, if the cell holds a lettered or designated tile.
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        self.tile_at(pos).and_then(Tile::effective_letter)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some()
    }

    pub fn premium(&self, pos: Position) -> Premium {
        self.cell(pos).map_or(Premium::None, |cell| cell.premium)
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.tile.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.tile.is_none())
    }

    /// Places every tile. Callers check bounds and occupancy first; an
    /// out-of-bounds placement is skipped and an occupied cell is overwritten.
    pub fn place_tiles(&self, placements: &[PlacedTile]) -> Board {
        let mut board = self.clone();
        for placement in placements {
            if let Some(cell) = board.cell_mut(placement.position) {
                cell.tile = Some(placement.tile.clone());
            }
        }
        board
    }

    /// Clears the given cells and hands back the tiles that were on them.
    pub fn remove_tiles(&self, positions: &[Position]) -> (Board, Vec<Tile>) {
        let mut board = self.clone();
        let mut removed = Vec::new();
        for &pos in positions {
            if let Some(tile) = board.cell_mut(pos).and_then(|cell| cell.tile.take()) {
                removed.push(tile);
            }
        }
        (board, removed)
    }

    /// Every tile on the board, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().filter_map(|cell| cell.tile.as_ref())
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut BoardCell> {
        if !pos.is_in_bounds() {
            return None;
        }
        self.cells.get_mut(pos.index())
    }

    /// Rows of letters, `.` for empty cells. Handy for logs and the CLI.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                let symbol = match self.tile_at(pos) {
                    None => '.',
                    Some(tile) if tile.is_blank => tile
                        .designated_letter
                        .map_or('?', |c| c.to_ascii_lowercase()),
                    Some(tile) => tile.letter.unwrap_or('?'),
                };
                out.push(symbol);
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
