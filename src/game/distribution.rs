//! The fixed 100-tile letter set.

/// Tiles a player holds between turns.
pub const RACK_SIZE: usize = 7;

/// Flat bonus for placing a full rack in one move.
pub const BINGO_BONUS: i32 = 50;

/// Number of blank tiles in a set.
pub const BLANK_COUNT: usize = 2;

/// `(letter, count, points)` for every lettered tile.
pub const TILE_DISTRIBUTION: [(char, usize, i32); 26] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
];

/// Total number of tiles in a full set, blanks included.
pub const TOTAL_TILES: usize = 100;

/// Face value of a lettered tile. Unknown letters (and blanks) are worth nothing.
pub fn letter_points(letter: char) -> i32 {
    TILE_DISTRIBUTION
        .iter()
        .find(|(l, _, _)| *l == letter)
        .map_or(0, |(_, _, points)| *points)
}

/// How many tiles of `letter` a full set contains; `None` counts blanks.
pub fn letter_count(letter: Option<char>) -> usize {
    match letter {
        None => BLANK_COUNT,
        Some(letter) => TILE_DISTRIBUTION
            .iter()
            .find(|(l, _, _)| *l == letter)
            .map_or(0, |(_, count, _)| *count),
    }
}
