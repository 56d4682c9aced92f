//! Turn order and end-of-game rules.

use crate::game::bag::TileBag;
use crate::game::game_state::EndReason;
use crate::game::player::Player;

/// Passes, exchanges and zero-point plays in a row, counted across all
/// players, that end the game.
pub const MAX_SCORELESS_TURNS: u32 = 6;

/// Next player after `current`, skipping eliminated ones. The scan covers at
/// most one full cycle; if everyone is eliminated it returns the last seat it
/// looked at, which is `current + 1`.
pub fn next_player_index(players: &[Player], current: usize) -> usize {
    let count = players.len();
    if count == 0 {
        return current;
    }
    let mut next = (current + 1) % count;
    let mut attempts = 0;
    while players[next].is_eliminated && attempts < count {
        next = (next + 1) % count;
        attempts += 1;
    }
    next
}

pub fn active_players(players: &[Player]) -> impl Iterator<Item = &Player> {
    players.iter().filter(|p| !p.is_eliminated)
}

/// End conditions, checked in order: someone went out on an empty bag, too
/// many scoreless turns, only one player left standing.
pub fn should_end(players: &[Player], bag: &TileBag, consecutive_scoreless_turns: u32) -> Option<EndReason> {
    if bag.is_empty() {
        if let Some(out) = active_players(players).find(|p| p.rack.is_empty()) {
            return Some(EndReason::WentOut {
                player_id: out.id.clone(),
                name: out.name.clone(),
            });
        }
    }

    if consecutive_scoreless_turns >= MAX_SCORELESS_TURNS {
        return Some(EndReason::TooManyScorelessTurns);
    }

    let mut active = active_players(players);
    let first = active.next();
    if active.next().is_none() && players.len() > 1 {
        return Some(EndReason::Elimination {
            survivor: first.map(|p| p.name.clone()),
        });
    }

    None
}

/// Deducts each remaining rack from its owner. A player who went out collects
/// everything the others lost.
pub fn finalize_scores(players: &[Player]) -> Vec<Player> {
    let went_out = active_players(players).find(|p| p.rack.is_empty()).map(|p| p.id.clone());

    let mut remaining_total = 0;
    let mut adjusted: Vec<Player> = players
        .iter()
        .map(|player| {
            if player.is_eliminated {
                return player.clone();
            }
            let rack_value = player.rack_value();
            remaining_total += rack_value;
            Player {
                score: player.score - rack_value,
                ..player.clone()
            }
        })
        .collect();

    if let Some(id) = went_out {
        if let Some(player) = adjusted.iter_mut().find(|p| p.id == id) {
            player.score += remaining_total;
        }
    }
    adjusted
}

/// Highest score among players still in the game; the earliest seat wins ties.
pub fn winner(players: &[Player]) -> Option<&Player> {
    active_players(players).fold(None, |best: Option<&Player>, p| match best {
        Some(b) if b.score >= p.score => Some(b),
        _ => Some(p),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game_state::EndReason;
    use crate::game::player::PlayerSetup;
    use crate::game::tile::{Tile, TileId};
    use assert_matches::assert_matches;

    fn player(id: &str, score: i32, letters: &str) -> Player {
        let rack = letters
            .chars()
            .enumerate()
            .map(|(i, c)| Tile::lettered(TileId(i as u32), c))
            .collect();
        Player {
            score,
            ..Player::from_setup(&PlayerSetup::human(id, id.to_uppercase()), rack)
        }
    }

    fn eliminated(mut p: Player) -> Player {
        p.is_eliminated = true;
        p
    }

    fn bag_with(n: usize) -> TileBag {
        TileBag::from_tiles((0..n).map(|i| Tile::lettered(TileId(100 + i as u32), 'E')).collect())
    }

    #[test]
    fn test_next_player_wraps_and_skips_eliminated() {
        let players = vec![player("a", 0, "A"), eliminated(player("b", 0, "B")), player("c", 0, "C")];
        assert_eq!(next_player_index(&players, 0), 2);
        assert_eq!(next_player_index(&players, 2), 0);
    }

    #[test]
    fn test_next_player_when_everyone_is_out() {
        let players = vec![eliminated(player("a", 0, "A")), eliminated(player("b", 0, "B")), eliminated(player("c", 0, "C"))];
        assert_eq!(next_player_index(&players, 1), 2);
        assert_eq!(next_player_index(&[], 3), 3);
    }

    #[test]
    fn test_went_out_requires_empty_bag() {
        let players = vec![player("a", 10, ""), player("b", 4, "QZ")];
        assert_eq!(should_end(&players, &bag_with(3), 0), None);
        assert_matches!(
            should_end(&players, &TileBag::default(), 0),
            Some(EndReason::WentOut { player_id, .. }) if player_id == "a"
        );
    }

    #[test]
    fn test_scoreless_threshold_is_combined() {
        let players = vec![player("a", 0, "A"), player("b", 0, "B")];
        assert_eq!(should_end(&players, &bag_with(20), MAX_SCORELESS_TURNS - 1), None);
        assert_eq!(
            should_end(&players, &bag_with(20), MAX_SCORELESS_TURNS),
            Some(EndReason::TooManyScorelessTurns)
        );
    }

    #[test]
    fn test_elimination_names_survivor() {
        let players = vec![eliminated(player("a", 0, "A")), player("b", 0, "B")];
        assert_eq!(
            should_end(&players, &bag_with(20), 0),
            Some(EndReason::Elimination {
                survivor: Some("B".to_string())
            })
        );
        // a solo game never ends by elimination
        assert_eq!(should_end(&[player("a", 0, "A")], &bag_with(20), 0), None);
    }

    #[test]
    fn test_went_out_takes_precedence() {
        let players = vec![player("a", 0, ""), eliminated(player("b", 0, "B"))];
        assert_matches!(
            should_end(&players, &TileBag::default(), MAX_SCORELESS_TURNS),
            Some(EndReason::WentOut { .. })
        );
    }

    #[test]
    fn test_go_out_transfer() {
        // D = 2, A = 1 -> 5 for "DDA"; "AAA" -> 3
        let players = vec![player("x", 40, ""), player("y", 30, "DDA"), player("z", 20, "AAA")];
        let final_players = finalize_scores(&players);
        assert_eq!(final_players[0].score, 48);
        assert_eq!(final_players[1].score, 25);
        assert_eq!(final_players[2].score, 17);
    }

    #[test]
    fn test_deductions_without_go_out() {
        let players = vec![player("x", 40, "E"), player("y", 30, "K"), eliminated(player("z", 20, "QQ"))];
        let final_players = finalize_scores(&players);
        assert_eq!(final_players[0].score, 39);
        assert_eq!(final_players[1].score, 25);
        assert_eq!(final_players[2].score, 20);
    }

    #[test]
    fn test_winner_ignores_eliminated() {
        let players = vec![player("a", 10, ""), eliminated(player("b", 99, "")), player("c", 12, "")];
        assert_eq!(winner(&players).map(|p| p.id.as_str()), Some("c"));
        assert!(winner(&[eliminated(player("a", 1, ""))]).is_none());
    }
}
