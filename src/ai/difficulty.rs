use crate::ai::move_finder::AiMove;
use crate::game::player::Difficulty;
use rand::prelude::*;

/// Most tiles an easy opponent likes to put down at once.
const EASY_MAX_TILES: usize = 4;

/// Picks one candidate for the given tier, or `None` when there is nothing to
/// pick from.
///
/// - easy: a uniform pick among the lowest 40% by score, preferring plays of
///   at most four tiles
/// - medium: the upper half, weighted by score
/// - hard: the best score
/// - anything else: uniform over all candidates
pub fn select_move<'a, R: Rng + ?Sized>(
    moves: &'a [AiMove],
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<&'a AiMove> {
    if moves.is_empty() {
        return None;
    }

    let mut sorted: Vec<&AiMove> = moves.iter().collect();
    sorted.sort_by_key(|m| m.score);

    match difficulty {
        Difficulty::Easy => {
            let simple: Vec<&AiMove> = sorted
                .iter()
                .copied()
                .filter(|m| m.tile_count() <= EASY_MAX_TILES)
                .collect();
            let pool = if simple.is_empty() { sorted } else { simple };
            // ceil(40%), at least one
            let cutoff = ((pool.len() * 2).div_ceil(5)).max(1);
            pool[..cutoff].choose(rng).copied()
        }
        Difficulty::Medium => {
            let upper = &sorted[sorted.len() / 2..];
            upper
                .choose_weighted(rng, |m| m.score.max(0) as u32)
                .ok()
                .copied()
                .or_else(|| upper.choose(rng).copied())
        }
        Difficulty::Hard => sorted.last().copied(),
        Difficulty::Unrecognized => moves.choose(rng),
    }
}
