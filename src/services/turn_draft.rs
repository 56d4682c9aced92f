//! Tiles laid out on the board but not yet committed.
//!
//! A draft starts from a player's rack and the current board. Each edit
//! returns a new draft; `recall` goes back to the starting rack order and
//! board exactly.

use crate::dictionary::Dictionary;
use crate::game::board::{Board, PlacedTile};
use crate::game::move_validator::{validate_move, ValidationError};
use crate::game::position::Position;
use crate::game::tile::{is_playable_letter, Tile, TileId};
use crate::scoring::{calculate_move_score, MoveScore};
use rand::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Tile not in your rack: {0}")]
    TileNotInRack(TileId),
    #[error("Position {0} is off the board")]
    OutOfBounds(Position),
    #[error("Cell {0} is already taken")]
    Occupied(Position),
    #[error("No pending tile at {0}")]
    NothingPending(Position),
    #[error("Tile {0} is not a blank")]
    NotABlank(TileId),
    #[error("Blank tile {0} already stands for {1}")]
    BlankAlreadyDesignated(TileId, char),
    #[error("Invalid letter {0:?}")]
    InvalidLetter(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnDraft {
    base_board: Board,
    base_rack: Vec<Tile>,
    board: Board,
    rack: Vec<Tile>,
    pending: Vec<PlacedTile>,
}

impl TurnDraft {
    pub fn new(board: &Board, rack: &[Tile]) -> Self {
        Self {
            base_board: board.clone(),
            base_rack: rack.to_vec(),
            board: board.clone(),
            rack: rack.to_vec(),
            pending: Vec::new(),
        }
    }

    /// Board with the pending tiles on it.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tiles still on the rack.
    pub fn rack(&self) -> &[Tile] {
        &self.rack
    }

    /// Pending tiles in the order they were put down, ready for commit.
    pub fn pending(&self) -> &[PlacedTile] {
        &self.pending
    }

    pub fn place(&self, tile_id: TileId, position: Position) -> Result<Self, DraftError> {
        if !position.is_in_bounds() {
            return Err(DraftError::OutOfBounds(position));
        }
        if self.board.is_occupied(position) {
            return Err(DraftError::Occupied(position));
        }
        let slot = self
            .rack
            .iter()
            .position(|t| t.id == tile_id)
            .ok_or(DraftError::TileNotInRack(tile_id))?;

        let mut next = self.clone();
        let tile = next.rack.remove(slot);
        let placement = PlacedTile::new(tile, position);
        next.board = next.board.place_tiles(std::slice::from_ref(&placement));
        next.pending.push(placement);
        Ok(next)
    }

    /// Sends the pending tile at `position` back to the end of the rack.
    pub fn remove(&self, position: Position) -> Result<Self, DraftError> {
        let index = self.pending_index(position)?;
        let mut next = self.clone();
        let placement = next.pending.remove(index);
        let (board, _) = next.board.remove_tiles(&[position]);
        next.board = board;
        next.rack.push(placement.tile);
        Ok(next)
    }

    pub fn move_tile(&self, from: Position, to: Position) -> Result<Self, DraftError> {
        let index = self.pending_index(from)?;
        if from == to {
            return Ok(self.clone());
        }
        if !to.is_in_bounds() {
            return Err(DraftError::OutOfBounds(to));
        }
        if self.board.is_occupied(to) {
            return Err(DraftError::Occupied(to));
        }

        let mut next = self.clone();
        let (board, _) = next.board.remove_tiles(&[from]);
        next.pending[index].position = to;
        next.board = board.place_tiles(std::slice::from_ref(&next.pending[index]));
        Ok(next)
    }

    /// Picks the letter for a blank, on the rack or already on the board.
    /// A blank left undesignated in the committed rack may be renamed freely
    /// here; one that already has a letter there keeps it.
    pub fn set_blank_letter(&self, tile_id: TileId, letter: char) -> Result<Self, DraftError> {
        let letter = letter.to_ascii_uppercase();
        if !is_playable_letter(letter) {
            return Err(DraftError::InvalidLetter(letter));
        }
        if let Some(existing) = self
            .base_rack
            .iter()
            .find(|t| t.id == tile_id && t.is_blank)
            .and_then(|t| t.designated_letter)
        {
            if existing != letter {
                return Err(DraftError::BlankAlreadyDesignated(tile_id, existing));
            }
        }
        let mut next = self.clone();

        if let Some(tile) = next.rack.iter_mut().find(|t| t.id == tile_id) {
            if !tile.is_blank {
                return Err(DraftError::NotABlank(tile_id));
            }
            *tile = tile.undesignated().designated(letter);
            return Ok(next);
        }

        let placement = next
            .pending
            .iter_mut()
            .find(|p| p.tile.id == tile_id)
            .ok_or(DraftError::TileNotInRack(tile_id))?;
        if !placement.tile.is_blank {
            return Err(DraftError::NotABlank(tile_id));
        }
        placement.tile = placement.tile.undesignated().designated(letter);
        let updated = placement.clone();
        next.board = next.board.place_tiles(&[updated]);
        Ok(next)
    }

    /// Everything back on the rack, in the starting order.
    pub fn recall(&self) -> Self {
        Self {
            base_board: self.base_board.clone(),
            base_rack: self.base_rack.clone(),
            board: self.base_board.clone(),
            rack: self.restored_rack(),
            pending: Vec::new(),
        }
    }

    /// Reorders the rack. The new order becomes the one `recall` restores to,
    /// with pending tiles after it.
    pub fn shuffle<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut next = self.clone();
        next.rack.shuffle(rng);
        next.base_rack = next.rack.clone();
        next.base_rack.extend(self.pending.iter().map(|p| p.tile.clone()));
        next
    }

    /// Validation and score of the pending tiles as they stand.
    pub fn preview(&self, dictionary: &dyn Dictionary) -> Result<MoveScore, ValidationError> {
        let validated = validate_move(&self.base_board, &self.pending, dictionary)?;
        Ok(calculate_move_score(&validated.board, &validated.words, &self.pending))
    }

    fn pending_index(&self, position: Position) -> Result<usize, DraftError> {
        self.pending
            .iter()
            .position(|p| p.position == position)
            .ok_or(DraftError::NothingPending(position))
    }

    // Starting rack, keeping any blank letters chosen since.
    fn restored_rack(&self) -> Vec<Tile> {
        let current = self.rack.iter().chain(self.pending.iter().map(|p| &p.tile));
        let letters: Vec<(TileId, Option<char>)> = current.map(|t| (t.id, t.designated_letter)).collect();
        self.base_rack
            .iter()
            .map(|tile| {
                match letters.iter().find(|(id, _)| *id == tile.id) {
                    Some((_, Some(letter))) => tile.designated(*letter),
                    _ => tile.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rack(letters: &str) -> Vec<Tile> {
        letters
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if c == '?' {
                    Tile::blank(TileId(i as u32))
                } else {
                    Tile::lettered(TileId(i as u32), c)
                }
            })
            .collect()
    }

    fn start() -> TurnDraft {
        TurnDraft::new(&Board::new(), &rack("CATSE?R"))
    }

    #[test]
    fn test_place_moves_tile_from_rack_to_board() {
        let draft = start().place(TileId(0), Position::new(7, 7)).unwrap();
        assert_eq!(draft.rack().len(), 6);
        assert_eq!(draft.pending().len(), 1);
        assert_eq!(draft.board().letter_at(Position::new(7, 7)), Some('C'));

        assert_matches!(
            draft.place(TileId(1), Position::new(7, 7)),
            Err(DraftError::Occupied(_))
        );
        assert_matches!(
            draft.place(TileId(0), Position::new(7, 8)),
            Err(DraftError::TileNotInRack(_))
        );
        assert_matches!(
            draft.place(TileId(1), Position::new(15, 0)),
            Err(DraftError::OutOfBounds(_))
        );
    }

    #[test]
    fn test_recall_restores_everything() {
        let draft = start();
        let edited = draft
            .place(TileId(3), Position::new(7, 7))
            .and_then(|d| d.place(TileId(0), Position::new(7, 8)))
            .and_then(|d| d.remove(Position::new(7, 7)))
            .and_then(|d| d.place(TileId(1), Position::new(6, 8)))
            .unwrap();
        // S went back to the end of the rack
        assert_eq!(edited.rack().last().map(|t| t.id), Some(TileId(3)));

        let recalled = edited.recall();
        assert_eq!(recalled, draft);
        assert_eq!(recalled.recall(), draft);
    }

    #[test]
    fn test_move_tile() {
        let draft = start().place(TileId(0), Position::new(7, 7)).unwrap();
        let moved = draft.move_tile(Position::new(7, 7), Position::new(7, 6)).unwrap();
        assert!(!moved.board().is_occupied(Position::new(7, 7)));
        assert_eq!(moved.board().letter_at(Position::new(7, 6)), Some('C'));
        assert_eq!(moved.pending()[0].position, Position::new(7, 6));
        assert_matches!(
            draft.move_tile(Position::new(1, 1), Position::new(2, 2)),
            Err(DraftError::NothingPending(_))
        );
    }

    #[test]
    fn test_blank_letter_on_pending_tile_updates_board() {
        let draft = start()
            .place(TileId(5), Position::new(7, 7))
            .and_then(|d| d.set_blank_letter(TileId(5), 'o'))
            .unwrap();
        assert_eq!(draft.board().letter_at(Position::new(7, 7)), Some('O'));
        let renamed = draft.set_blank_letter(TileId(5), 'U').unwrap();
        assert_eq!(renamed.board().letter_at(Position::new(7, 7)), Some('U'));
        assert_matches!(draft.set_blank_letter(TileId(0), 'U'), Err(DraftError::NotABlank(_)));
    }

    #[test]
    fn test_committed_blank_letter_cannot_be_renamed() {
        let mut tiles = rack("CATSE?R");
        tiles[5] = tiles[5].designated('O');
        let draft = TurnDraft::new(&Board::new(), &tiles);

        assert_matches!(
            draft.set_blank_letter(TileId(5), 'U'),
            Err(DraftError::BlankAlreadyDesignated(_, 'O'))
        );
        let placed = draft.place(TileId(5), Position::new(7, 7)).unwrap();
        assert_matches!(
            placed.set_blank_letter(TileId(5), 'U'),
            Err(DraftError::BlankAlreadyDesignated(_, 'O'))
        );
        assert_eq!(placed.board().letter_at(Position::new(7, 7)), Some('O'));
        // repeating the same letter is fine
        assert!(placed.set_blank_letter(TileId(5), 'o').is_ok());
    }

    #[test]
    fn test_shuffle_keeps_tiles() {
        let mut rng = StdRng::seed_from_u64(3);
        let draft = start().place(TileId(0), Position::new(7, 7)).unwrap();
        let shuffled = draft.shuffle(&mut rng);
        let mut before: Vec<TileId> = draft.rack().iter().map(|t| t.id).collect();
        let mut after: Vec<TileId> = shuffled.rack().iter().map(|t| t.id).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(shuffled.recall().rack().len(), 7);
        assert_eq!(shuffled.recall().rack().last().map(|t| t.id), Some(TileId(0)));
    }

    #[test]
    fn test_preview_scores_without_committing() {
        let dict = WordList::from_words(["CATS", "CAT"]);
        let draft = start()
            .place(TileId(0), Position::new(7, 6))
            .and_then(|d| d.place(TileId(1), Position::new(7, 7)))
            .and_then(|d| d.place(TileId(2), Position::new(7, 8)))
            .unwrap();
        assert_eq!(draft.preview(&dict).unwrap().total_score, 10);
        assert_matches!(start().preview(&dict), Err(ValidationError::NoTilesPlaced));

        let bad = draft.move_tile(Position::new(7, 8), Position::new(7, 9)).unwrap();
        assert_matches!(bad.preview(&dict), Err(ValidationError::NotContiguous));
    }
}
