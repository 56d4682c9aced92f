//! Exhaustive move generation.
//!
//! Every word has to cover an anchor: an empty cell next to a tile already on
//! the board (or the center on the first turn). For each anchor and direction
//! the search starts a few cells before it, walks forward through existing
//! tiles and branches over the rack on empty cells, pruned by the cross-checks
//! and the dictionary's prefix hint. Finished candidates go through the same
//! validator and scorer as a human move.

use crate::ai::cross_checks::{find_anchors, CrossChecks, LetterSet};
use crate::dictionary::Dictionary;
use crate::game::board::{Board, PlacedTile};
use crate::game::move_validator::validate_move;
use crate::game::position::{Direction, Position};
use crate::game::tile::Tile;
use crate::scoring::calculate_move_score;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rack slots the availability mask can track.
const MAX_RACK_SLOTS: usize = 16;

/// A legal play found for a rack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    pub placements: Vec<PlacedTile>,
    pub score: i32,
    /// Main word first, then cross words.
    pub words: Vec<String>,
}

impl AiMove {
    pub fn tile_count(&self) -> usize {
        self.placements.len()
    }
}

/// Canonical identity of a move: the sorted (cell, letter, blank) triples.
type Signature = Vec<(Position, char, bool)>;

fn signature(placed: &[PlacedTile]) -> Signature {
    let mut sig: Signature = placed
        .iter()
        .map(|p| {
            (
                p.position,
                p.tile.effective_letter().unwrap_or('?'),
                p.tile.is_blank,
            )
        })
        .collect();
    sig.sort_unstable();
    sig
}

/// All distinct legal plays for `rack` on `board`. Deterministic for a given
/// board, rack and dictionary.
pub fn find_all_moves(board: &Board, rack: &[Tile], dictionary: &dyn Dictionary) -> Vec<AiMove> {
    let rack = &rack[..rack.len().min(MAX_RACK_SLOTS)];
    if rack.is_empty() {
        return Vec::new();
    }

    let checks = CrossChecks::compute(board, dictionary);
    let mut search = Search {
        board,
        rack,
        dictionary,
        checks: &checks,
        seen: HashSet::new(),
        moves: Vec::new(),
    };

    let anchors = if board.is_empty() {
        vec![Position::center()]
    } else {
        find_anchors(board)
    };

    for anchor in &anchors {
        for direction in Direction::BOTH {
            search.from_anchor(*anchor, direction);
        }
    }

    log::debug!(
        "move search: {} anchors, {} candidates for a rack of {}",
        anchors.len(),
        search.moves.len(),
        rack.len()
    );
    search.moves
}

struct Search<'a> {
    board: &'a Board,
    rack: &'a [Tile],
    dictionary: &'a dyn Dictionary,
    checks: &'a CrossChecks,
    seen: HashSet<Signature>,
    moves: Vec<AiMove>,
}

impl Search<'_> {
    fn full_mask(&self) -> u16 {
        ((1u32 << self.rack.len()) - 1) as u16
    }

    fn from_anchor(&mut self, anchor: Position, direction: Direction) {
        let mask = self.full_mask();

        // existing tiles right before the anchor are a fixed prefix
        if let Some(before) = anchor.prev(direction).filter(|p| self.board.is_occupied(*p)) {
            let mut start = before;
            while let Some(p) = start.prev(direction).filter(|p| self.board.is_occupied(*p)) {
                start = p;
            }
            self.extend(Some(start), anchor, direction, String::new(), Vec::new(), mask);
            return;
        }

        // otherwise try every number of rack tiles placed before the anchor,
        // staying clear of any tile run further back
        let mut empty_run = Vec::new();
        let mut cursor = anchor.prev(direction);
        while let Some(p) = cursor {
            if self.board.is_occupied(p) {
                empty_run.pop();
                break;
            }
            empty_run.push(p);
            cursor = p.prev(direction);
        }
        let limit = empty_run.len().min(self.rack.len() - 1);

        self.extend(Some(anchor), anchor, direction, String::new(), Vec::new(), mask);
        for start in empty_run.into_iter().take(limit) {
            self.extend(Some(start), anchor, direction, String::new(), Vec::new(), mask);
        }
    }

    fn extend(
        &mut self,
        pos: Option<Position>,
        anchor: Position,
        direction: Direction,
        partial: String,
        placed: Vec<PlacedTile>,
        available: u16,
    ) {
        let Some(pos) = pos else {
            self.try_record(&partial, &placed);
            return;
        };

        if let Some(letter) = self.board.letter_at(pos) {
            let mut word = partial;
            word.push(letter);
            if self.dictionary.has_prefix(&word) {
                self.extend(pos.next(direction), anchor, direction, word, placed, available);
            }
            return;
        }
        if self.board.is_occupied(pos) {
            // undesignated blank on the board; nothing can read through it
            return;
        }

        if pos.along(direction) > anchor.along(direction) {
            self.try_record(&partial, &placed);
        }
        if available == 0 {
            return;
        }

        let allowed = self.checks.get(pos, direction);
        let mut tried = LetterSet::EMPTY;
        let mut tried_pinned = LetterSet::EMPTY;
        let mut tried_blank = false;

        let rack = self.rack;
        for (slot, tile) in rack.iter().enumerate() {
            if available & (1 << slot) == 0 {
                continue;
            }
            let remaining = available & !(1 << slot);

            if tile.is_blank {
                // a blank whose letter is already chosen plays only as that letter
                if let Some(letter) = tile.designated_letter {
                    if tried_pinned.contains(letter) || !allowed.contains(letter) {
                        continue;
                    }
                    tried_pinned.insert(letter);
                    self.branch(pos, anchor, direction, &partial, &placed, tile.clone(), letter, remaining);
                    continue;
                }
                if tried_blank {
                    continue;
                }
                tried_blank = true;
                for letter in allowed.iter() {
                    self.branch(pos, anchor, direction, &partial, &placed, tile.designated(letter), letter, remaining);
                }
            } else if let Some(letter) = tile.letter {
                if tried.contains(letter) || !allowed.contains(letter) {
                    continue;
                }
                tried.insert(letter);
                self.branch(pos, anchor, direction, &partial, &placed, tile.clone(), letter, remaining);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn branch(
        &mut self,
        pos: Position,
        anchor: Position,
        direction: Direction,
        partial: &str,
        placed: &[PlacedTile],
        tile: Tile,
        letter: char,
        remaining: u16,
    ) {
        let mut word = partial.to_string();
        word.push(letter);
        if !self.dictionary.has_prefix(&word) {
            return;
        }
        let mut placed = placed.to_vec();
        placed.push(PlacedTile::new(tile, pos));
        self.extend(pos.next(direction), anchor, direction, word, placed, remaining);
    }

    fn try_record(&mut self, word: &str, placed: &[PlacedTile]) {
        if placed.is_empty() || word.len() < 2 || !self.dictionary.contains(word) {
            return;
        }
        if !self.seen.insert(signature(placed)) {
            return;
        }
        let Ok(validated) = validate_move(self.board, placed, self.dictionary) else {
            return;
        };
        let score = calculate_move_score(&validated.board, &validated.words, placed);
        self.moves.push(AiMove {
            placements: placed.to_vec(),
            score: score.total_score,
            words: validated.words.into_iter().map(|w| w.word).collect(),
        });
    }
}
