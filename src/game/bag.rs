use crate::game::distribution::{BLANK_COUNT, TILE_DISTRIBUTION};
use crate::game::tile::{Tile, TileIdGenerator};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// The shuffled pool of undrawn tiles. Drawing takes from the front.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TileBag {
    pub(crate) tiles: Vec<Tile>,
}

impl TileBag {
    /// Builds the full 100-tile set with fresh ids from `ids` and shuffles it.
    pub fn create<R: Rng + ?Sized>(ids: &mut TileIdGenerator, rng: &mut R) -> Self {
        let mut tiles = Vec::with_capacity(crate::game::distribution::TOTAL_TILES);
        for (letter, count, _) in TILE_DISTRIBUTION {
            for _ in 0..count {
                tiles.push(Tile::lettered(ids.next_id(), letter));
            }
        }
        for _ in 0..BLANK_COUNT {
            tiles.push(Tile::blank(ids.next_id()));
        }
        tiles.shuffle(rng);
        Self { tiles }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Get a reference to the tiles in the bag
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Takes up to `count` tiles from the front. Asking for more than the bag
    /// holds returns whatever is left.
    pub fn draw(&self, count: usize) -> (Vec<Tile>, TileBag) {
        let split = count.min(self.tiles.len());
        let drawn = self.tiles[..split].to_vec();
        let remaining = TileBag {
            tiles: self.tiles[split..].to_vec(),
        };
        (drawn, remaining)
    }

    /// Puts `returned` back and reshuffles the whole bag. Blanks lose any
    /// designated letter on the way in.
    pub fn return_tiles<R: Rng + ?Sized>(&self, returned: &[Tile], rng: &mut R) -> TileBag {
        let mut tiles = self.tiles.clone();
        tiles.extend(returned.iter().map(Tile::undesignated));
        tiles.shuffle(rng);
        TileBag { tiles }
    }
}
