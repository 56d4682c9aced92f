use crate::game::position::{Position, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// Score multiplier attached to a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Premium {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    /// The center cell; scores as a double word.
    CenterStar,
}

impl Premium {
    pub fn letter_multiplier(self) -> i32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> i32 {
        match self {
            Premium::DoubleWord | Premium::CenterStar => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }

    fn from_layout_char(c: u8) -> Self {
        match c {
            b'd' => Premium::DoubleLetter,
            b't' => Premium::TripleLetter,
            b'D' => Premium::DoubleWord,
            b'T' => Premium::TripleWord,
            b'*' => Premium::CenterStar,
            _ => Premium::None,
        }
    }
}

// d = double letter, t = triple letter, D = double word, T = triple word, * = star
const LAYOUT: [&[u8; BOARD_SIZE]; BOARD_SIZE] = [
    b"T..d...T...d..T",
    b".D...t...t...D.",
    b"..D...d.d...D..",
    b"d..D...d...D..d",
    b"....D.....D....",
    b".t...t...t...t.",
    b"..d...d.d...d..",
    b"T..d...*...d..T",
    b"..d...d.d...d..",
    b".t...t...t...t.",
    b"....D.....D....",
    b"d..D...d...D..d",
    b"..D...d.d...D..",
    b".D...t...t...D.",
    b"T..d...T...d..T",
];

/// Premium of the fixed layout at `pos`; `Premium::None` outside the board.
pub fn premium_at(pos: Position) -> Premium {
    if !pos.is_in_bounds() {
        return Premium::None;
    }
    Premium::from_layout_char(LAYOUT[pos.row][pos.col])
}
