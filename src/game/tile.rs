use crate::game::distribution::letter_points;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a physical tile, unique within one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

/// Sequential id source. Each session owns one, so ids are stable and
/// collision-free inside a game without any process-wide counter.
#[derive(Debug, Clone, Default)]
pub struct TileIdGenerator {
    next: u32,
}

impl TileIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// A letter tile. Blanks carry no letter and score zero; their played letter
/// lives in `designated_letter`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub letter: Option<char>,
    pub points: i32,
    pub is_blank: bool,
    pub designated_letter: Option<char>,
}

impl Tile {
    pub fn lettered(id: TileId, letter: char) -> Self {
        let letter = letter.to_ascii_uppercase();
        Self {
            id,
            letter: Some(letter),
            points: letter_points(letter),
            is_blank: false,
            designated_letter: None,
        }
    }

    pub fn blank(id: TileId) -> Self {
        Self {
            id,
            letter: None,
            points: 0,
            is_blank: true,
            designated_letter: None,
        }
    }

    /// The letter this tile spells on the board.
    pub fn effective_letter(&self) -> Option<char> {
        if self.is_blank {
            self.designated_letter
        } else {
            self.letter
        }
    }

    /// Copy of a blank with its letter chosen. Lettered tiles come back unchanged.
    pub fn designated(&self, letter: char) -> Tile {
        if !self.is_blank {
            return self.clone();
        }
        Tile {
            designated_letter: Some(letter.to_ascii_uppercase()),
            ..self.clone()
        }
    }

    /// Copy with any blank designation cleared, as when a tile goes back to the bag.
    pub fn undesignated(&self) -> Tile {
        Tile {
            designated_letter: None,
            ..self.clone()
        }
    }
}

/// True for the 26 letters a blank may stand for.
pub fn is_playable_letter(letter: char) -> bool {
    letter.is_ascii_uppercase()
}
