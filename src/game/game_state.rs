use crate::game::bag::TileBag;
use crate::game::board::{Board, PlacedTile};
use crate::game::player::Player;
use crate::game::position::Position;
use crate::game::tile::{Tile, TileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A scored word from one play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundWord {
    pub word: String,
    pub positions: Vec<Position>,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Play,
    Pass,
    Exchange,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveKind::Play => "play",
            MoveKind::Pass => "pass",
            MoveKind::Exchange => "exchange",
        })
    }
}

/// One entry of the move history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub player_id: String,
    pub kind: MoveKind,
    /// Empty for passes and exchanges.
    pub placements: Vec<PlacedTile>,
    pub words_formed: Vec<FoundWord>,
    pub score: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Playing,
    Ended,
}

/// Why a game finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndReason {
    /// Bag empty and this player has played every tile.
    WentOut { player_id: String, name: String },
    TooManyScorelessTurns,
    /// Everyone else was eliminated. `None` when nobody is left at all.
    Elimination { survivor: Option<String> },
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::WentOut { name, .. } => write!(f, "{} used all their tiles!", name),
            EndReason::TooManyScorelessTurns => {
                f.write_str("Game ended: too many consecutive passes/zero-score turns")
            }
            EndReason::Elimination { survivor } => {
                write!(f, "{} wins by elimination!", survivor.as_deref().unwrap_or("No one"))
            }
        }
    }
}

/// Everything needed to resume a game. Transitions never mutate a state in
/// place; they build the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    /// Turn order is array order.
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub bag: TileBag,
    pub move_history: Vec<Move>,
    pub consecutive_scoreless_turns: u32,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_index(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Every tile in the game: bag, racks in seat order, then the board.
    pub fn all_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.bag
            .tiles()
            .iter()
            .chain(self.players.iter().flat_map(|p| p.rack.iter()))
            .chain(self.board.tiles())
    }

    /// Tiles in the bag, on every rack and on the board.
    pub fn tile_total(&self) -> usize {
        self.all_tiles().count()
    }

    /// Face counts over every tile. Blanks count under `None` whatever letter
    /// they stand for.
    pub fn letter_counts(&self) -> BTreeMap<Option<char>, usize> {
        let mut counts = BTreeMap::new();
        for tile in self.all_tiles() {
            let face = if tile.is_blank { None } else { tile.letter };
            *counts.entry(face).or_insert(0) += 1;
        }
        counts
    }

    pub fn has_unique_tile_ids(&self) -> bool {
        let mut seen: HashSet<TileId> = HashSet::new();
        self.all_tiles().all(|t| seen.insert(t.id))
    }
}

/// Checks that a state still holds exactly one full tile set.
#[cfg(test)]
pub(crate) fn assert_tiles_conserved(state: &GameState) {
    use crate::game::distribution::{letter_count, TILE_DISTRIBUTION};

    let counts = state.letter_counts();
    let faces = std::iter::once(None).chain(TILE_DISTRIBUTION.iter().map(|(l, _, _)| Some(*l)));
    let mut expected_faces = 0;
    for face in faces {
        expected_faces += 1;
        assert_eq!(
            counts.get(&face).copied().unwrap_or(0),
            letter_count(face),
            "wrong number of {:?} tiles",
            face
        );
    }
    assert_eq!(counts.len(), expected_faces, "unexpected faces: {:?}", counts);
    assert!(state.has_unique_tile_ids(), "a tile id appears twice");
}
