// src/services/game_manager.rs - game transitions on top of the rules engine

use crate::ai::{find_all_moves, select_move};
use crate::dictionary::Dictionary;
use crate::game::bag::TileBag;
use crate::game::board::{Board, PlacedTile};
use crate::game::distribution::RACK_SIZE;
use crate::game::game_state::{EndReason, GamePhase, GameState, Move, MoveKind};
use crate::game::move_validator::{validate_move, ValidationError};
use crate::game::player::{Difficulty, Player, PlayerSetup};
use crate::game::tile::{is_playable_letter, Tile, TileId, TileIdGenerator};
use crate::game::turn_manager::{finalize_scores, next_player_index, should_end};
use crate::scoring::calculate_move_score;
use crate::services::turn_draft::TurnDraft;
use chrono::{DateTime, Utc};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// An AI with nothing to play only exchanges when the bag holds at least
/// this many tiles; otherwise it passes.
pub const AI_EXCHANGE_MIN_BAG: usize = 7;

/// Where a session gets move timestamps from.
pub type Clock = fn() -> DateTime<Utc>;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Game not in progress")]
    GameNotInProgress,
    #[error("A game needs at least one player")]
    NoPlayers,
    #[error("Player not in game: {0}")]
    PlayerNotFound(String),
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Player {0} is not an AI")]
    NotAnAiPlayer(String),
    #[error("Tile not in your rack: {0}")]
    TileNotInRack(TileId),
    #[error("Tile {0} listed more than once")]
    DuplicateTile(TileId),
    #[error("Blank tile {0} has no letter")]
    BlankLetterNotSet(TileId),
    #[error("Tile {0} is not a blank")]
    NotABlank(TileId),
    #[error("Blank tile {0} already stands for {1}")]
    BlankAlreadyDesignated(TileId, char),
    #[error("Invalid letter {0:?}")]
    InvalidLetter(char),
    #[error("No tiles selected for exchange")]
    NothingToExchange,
    #[error("Not enough tiles in bag: {available} left, {requested} requested")]
    InsufficientBag { requested: usize, available: usize },
    #[error("AI plan no longer matches the game")]
    StalePlan,
}

/// Why a transition was refused. The input state is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    State(#[from] StateError),
}

pub type GameResult<T> = Result<T, GameError>;

// ============================================================================
// PURE TRANSITIONS
// ============================================================================

/// Fresh game: new ids, a shuffled bag and seven tiles per seat, dealt in
/// seat order.
pub fn start_game<R: Rng + ?Sized>(
    setups: &[PlayerSetup],
    ids: &mut TileIdGenerator,
    rng: &mut R,
) -> GameResult<GameState> {
    if setups.is_empty() {
        return Err(StateError::NoPlayers.into());
    }
    ids.reset();
    let mut bag = TileBag::create(ids, rng);

    let mut players = Vec::with_capacity(setups.len());
    for setup in setups {
        let (rack, rest) = bag.draw(RACK_SIZE);
        bag = rest;
        players.push(Player::from_setup(setup, rack));
    }

    log::info!(
        "🎲 New game with {} players: {}",
        players.len(),
        players.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
    );

    Ok(GameState {
        board: Board::new(),
        players,
        current_player_index: 0,
        bag,
        move_history: Vec::new(),
        consecutive_scoreless_turns: 0,
        phase: GamePhase::Playing,
        end_reason: None,
    })
}

/// Plays `placements` for `player_id`. Tiles are looked up in the rack by id;
/// only a blank's letter is read from the request. `at` is recorded on the
/// history entry.
pub fn commit_move(
    state: &GameState,
    player_id: &str,
    placements: &[PlacedTile],
    dictionary: &dyn Dictionary,
    at: DateTime<Utc>,
) -> GameResult<GameState> {
    let index = check_turn(state, player_id)?;
    if placements.is_empty() {
        return Err(ValidationError::NoTilesPlaced.into());
    }

    let placed = resolve_placements(&state.players[index], placements)?;
    let validated = validate_move(&state.board, &placed, dictionary)?;
    let score = calculate_move_score(&validated.board, &validated.words, &placed);
    let (drawn, bag) = state.bag.draw(placed.len());

    let placed_ids: HashSet<TileId> = placed.iter().map(|p| p.tile.id).collect();
    let mut next = state.clone();
    let player = &mut next.players[index];
    player.score += score.total_score;
    player.rack.retain(|t| !placed_ids.contains(&t.id));
    player.rack.extend(drawn);
    player.consecutive_passes = 0;

    log::info!(
        "{} played {} for {} points",
        player.name,
        score.words_formed.iter().map(|w| w.word.as_str()).collect::<Vec<_>>().join(", "),
        score.total_score
    );

    next.board = validated.board;
    next.bag = bag;
    next.consecutive_scoreless_turns = if score.total_score == 0 {
        state.consecutive_scoreless_turns + 1
    } else {
        0
    };
    next.move_history.push(Move {
        player_id: player_id.to_string(),
        kind: MoveKind::Play,
        placements: placed,
        words_formed: score.words_formed,
        score: score.total_score,
        timestamp: at,
    });

    Ok(finish_turn(next, index))
}

pub fn pass_turn(state: &GameState, player_id: &str, at: DateTime<Utc>) -> GameResult<GameState> {
    let index = check_turn(state, player_id)?;

    let mut next = state.clone();
    next.players[index].consecutive_passes += 1;
    next.consecutive_scoreless_turns += 1;
    next.move_history.push(scoreless_move(player_id, MoveKind::Pass, at));

    log::info!("{} passed", next.players[index].name);
    Ok(finish_turn(next, index))
}

/// Swaps the listed rack tiles for fresh ones. The bag must hold at least as
/// many tiles as are being exchanged.
pub fn exchange_tiles<R: Rng + ?Sized>(
    state: &GameState,
    player_id: &str,
    tile_ids: &[TileId],
    rng: &mut R,
    at: DateTime<Utc>,
) -> GameResult<GameState> {
    let index = check_turn(state, player_id)?;
    if tile_ids.is_empty() {
        return Err(StateError::NothingToExchange.into());
    }

    let player = &state.players[index];
    let mut selected = HashSet::with_capacity(tile_ids.len());
    for &id in tile_ids {
        if !selected.insert(id) {
            return Err(StateError::DuplicateTile(id).into());
        }
        if !player.rack.iter().any(|t| t.id == id) {
            return Err(StateError::TileNotInRack(id).into());
        }
    }
    if state.bag.len() < tile_ids.len() {
        return Err(StateError::InsufficientBag {
            requested: tile_ids.len(),
            available: state.bag.len(),
        }
        .into());
    }

    let (returned, kept): (Vec<Tile>, Vec<Tile>) =
        player.rack.iter().cloned().partition(|t| selected.contains(&t.id));
    let (drawn, remaining) = state.bag.draw(returned.len());
    let bag = remaining.return_tiles(&returned, rng);

    let mut next = state.clone();
    let player = &mut next.players[index];
    player.rack = kept;
    player.rack.extend(drawn);
    player.consecutive_passes = 0;
    log::info!("{} exchanged {} tiles", player.name, returned.len());

    next.bag = bag;
    next.consecutive_scoreless_turns += 1;
    next.move_history.push(scoreless_move(player_id, MoveKind::Exchange, at));

    Ok(finish_turn(next, index))
}

/// Chooses the letter a blank on the player's rack stands for. Once chosen it
/// cannot change; repeating the same letter is accepted.
pub fn set_blank_letter(state: &GameState, player_id: &str, tile_id: TileId, letter: char) -> GameResult<GameState> {
    if state.phase != GamePhase::Playing {
        return Err(StateError::GameNotInProgress.into());
    }
    let index = state
        .player_index(player_id)
        .ok_or_else(|| StateError::PlayerNotFound(player_id.to_string()))?;

    let letter = letter.to_ascii_uppercase();
    if !is_playable_letter(letter) {
        return Err(StateError::InvalidLetter(letter).into());
    }

    let slot = state.players[index]
        .rack
        .iter()
        .position(|t| t.id == tile_id)
        .ok_or(StateError::TileNotInRack(tile_id))?;
    let tile = &state.players[index].rack[slot];
    if !tile.is_blank {
        return Err(StateError::NotABlank(tile_id).into());
    }
    match tile.designated_letter {
        Some(existing) if existing == letter => return Ok(state.clone()),
        Some(existing) => return Err(StateError::BlankAlreadyDesignated(tile_id, existing).into()),
        None => {}
    }

    let mut next = state.clone();
    next.players[index].rack[slot] = tile.designated(letter);
    Ok(next)
}

/// Takes a player out of the game (timeouts, forfeits). Their rack stays
/// with them and is not deducted at the end.
pub fn eliminate_player(state: &GameState, player_id: &str) -> GameResult<GameState> {
    if state.phase != GamePhase::Playing {
        return Err(StateError::GameNotInProgress.into());
    }
    let index = state
        .player_index(player_id)
        .ok_or_else(|| StateError::PlayerNotFound(player_id.to_string()))?;
    if state.players[index].is_eliminated {
        return Ok(state.clone());
    }

    let mut next = state.clone();
    next.players[index].is_eliminated = true;
    log::warn!("{} was eliminated", next.players[index].name);

    if index == next.current_player_index {
        return Ok(finish_turn(next, index));
    }
    if let Some(reason) = should_end(&next.players, &next.bag, next.consecutive_scoreless_turns) {
        end_game(&mut next, reason);
    }
    Ok(next)
}

fn check_turn(state: &GameState, player_id: &str) -> Result<usize, StateError> {
    if state.phase != GamePhase::Playing {
        return Err(StateError::GameNotInProgress);
    }
    let index = state
        .player_index(player_id)
        .ok_or_else(|| StateError::PlayerNotFound(player_id.to_string()))?;
    if index != state.current_player_index {
        return Err(StateError::NotYourTurn);
    }
    Ok(index)
}

/// Swaps each requested tile for the rack's own copy of it.
fn resolve_placements(player: &Player, requested: &[PlacedTile]) -> Result<Vec<PlacedTile>, StateError> {
    let mut seen = HashSet::with_capacity(requested.len());
    let mut resolved = Vec::with_capacity(requested.len());

    for request in requested {
        let id = request.tile.id;
        if !seen.insert(id) {
            return Err(StateError::DuplicateTile(id));
        }
        let owned = player
            .rack
            .iter()
            .find(|t| t.id == id)
            .ok_or(StateError::TileNotInRack(id))?;

        let tile = if owned.is_blank {
            let letter = match (owned.designated_letter, request.tile.designated_letter) {
                (Some(letter), _) => letter,
                (None, Some(asked)) => {
                    let asked = asked.to_ascii_uppercase();
                    if !is_playable_letter(asked) {
                        return Err(StateError::InvalidLetter(asked));
                    }
                    asked
                }
                (None, None) => return Err(StateError::BlankLetterNotSet(id)),
            };
            owned.designated(letter)
        } else {
            owned.clone()
        };
        resolved.push(PlacedTile::new(tile, request.position));
    }
    Ok(resolved)
}

fn scoreless_move(player_id: &str, kind: MoveKind, at: DateTime<Utc>) -> Move {
    Move {
        player_id: player_id.to_string(),
        kind,
        placements: Vec::new(),
        words_formed: Vec::new(),
        score: 0,
        timestamp: at,
    }
}

/// Ends the game if a condition is met, otherwise hands the turn on.
fn finish_turn(mut state: GameState, index: usize) -> GameState {
    match should_end(&state.players, &state.bag, state.consecutive_scoreless_turns) {
        Some(reason) => end_game(&mut state, reason),
        None => state.current_player_index = next_player_index(&state.players, index),
    }
    state
}

fn end_game(state: &mut GameState, reason: EndReason) {
    state.players = finalize_scores(&state.players);
    state.phase = GamePhase::Ended;
    log::info!(
        "🏁 {} Final scores: {}",
        reason,
        state
            .players
            .iter()
            .map(|p| format!("{}={}", p.name, p.score))
            .collect::<Vec<_>>()
            .join(", ")
    );
    state.end_reason = Some(reason);
}

// ============================================================================
// SANITIZED VIEW
// ============================================================================

/// What everyone may know about a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPlayer {
    pub id: String,
    pub name: String,
    pub score: i32,
    pub rack_count: usize,
    pub is_eliminated: bool,
    pub consecutive_passes: u32,
    pub ai_difficulty: Option<Difficulty>,
}

impl From<&Player> for PublicPlayer {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            score: p.score,
            rack_count: p.rack.len(),
            is_eliminated: p.is_eliminated,
            consecutive_passes: p.consecutive_passes,
            ai_difficulty: p.ai_difficulty,
        }
    }
}

/// One player's snapshot of the game: their own rack, counts for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub board: Board,
    pub players: Vec<PublicPlayer>,
    pub current_player_index: usize,
    pub my_player_index: usize,
    pub my_rack: Vec<Tile>,
    pub bag_count: usize,
    pub move_history: Vec<Move>,
    pub consecutive_scoreless_turns: u32,
    pub phase: GamePhase,
    pub end_reason: Option<EndReason>,
}

pub fn get_sanitized_view(state: &GameState, player_id: &str) -> Option<PlayerView> {
    let my_player_index = state.player_index(player_id)?;
    Some(PlayerView {
        board: state.board.clone(),
        players: state.players.iter().map(PublicPlayer::from).collect(),
        current_player_index: state.current_player_index,
        my_player_index,
        my_rack: state.players[my_player_index].rack.clone(),
        bag_count: state.bag.len(),
        move_history: state.move_history.clone(),
        consecutive_scoreless_turns: state.consecutive_scoreless_turns,
        phase: state.phase,
        end_reason: state.end_reason.clone(),
    })
}

// ============================================================================
// AI TURNS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AiAction {
    Play {
        placements: Vec<PlacedTile>,
        score: i32,
        words: Vec<String>,
    },
    Exchange {
        tile_ids: Vec<TileId>,
    },
    Pass,
}

/// A decision for the current AI seat, tied to the history length it was
/// computed against so it can be dropped if the game moved on meanwhile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiPlan {
    pub player_id: String,
    pub history_len: usize,
    pub action: AiAction,
}

/// Searches every move for the current AI player and picks one for its tier.
/// With no candidate it exchanges its first tiles, or passes if the bag is
/// too low. Only reads `state`.
pub fn plan_ai_turn<R: Rng + ?Sized>(
    state: &GameState,
    dictionary: &dyn Dictionary,
    rng: &mut R,
) -> GameResult<AiPlan> {
    if state.phase != GamePhase::Playing {
        return Err(StateError::GameNotInProgress.into());
    }
    let player = state.current_player().ok_or(StateError::NoPlayers)?;
    let Some(difficulty) = player.ai_difficulty else {
        return Err(StateError::NotAnAiPlayer(player.id.clone()).into());
    };

    let moves = find_all_moves(&state.board, &player.rack, dictionary);
    let action = match select_move(&moves, difficulty, rng) {
        Some(chosen) => AiAction::Play {
            placements: chosen.placements.clone(),
            score: chosen.score,
            words: chosen.words.clone(),
        },
        None if state.bag.len() >= AI_EXCHANGE_MIN_BAG && !player.rack.is_empty() => {
            log::warn!("{} found no move, exchanging", player.name);
            AiAction::Exchange {
                tile_ids: player.rack.iter().take(RACK_SIZE).map(|t| t.id).collect(),
            }
        }
        None => {
            log::warn!("{} found no move, passing", player.name);
            AiAction::Pass
        }
    };
    log::debug!("{} ({}) chose {:?} out of {} candidates", player.name, difficulty, action, moves.len());

    Ok(AiPlan {
        player_id: player.id.clone(),
        history_len: state.move_history.len(),
        action,
    })
}

/// Commits a plan through the same transitions a human uses. Rejects plans
/// computed against an earlier state.
pub fn apply_ai_plan<R: Rng + ?Sized>(
    state: &GameState,
    plan: &AiPlan,
    dictionary: &dyn Dictionary,
    rng: &mut R,
    at: DateTime<Utc>,
) -> GameResult<GameState> {
    let current_matches = state.current_player().is_some_and(|p| p.id == plan.player_id);
    if state.phase != GamePhase::Playing || !current_matches || state.move_history.len() != plan.history_len {
        return Err(StateError::StalePlan.into());
    }

    match &plan.action {
        AiAction::Play { placements, .. } => commit_move(state, &plan.player_id, placements, dictionary, at),
        AiAction::Exchange { tile_ids } => exchange_tiles(state, &plan.player_id, tile_ids, rng, at),
        AiAction::Pass => pass_turn(state, &plan.player_id, at),
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// One game with its injected collaborators: the dictionary, a seeded random
/// source, the tile id sequence and the clock. Nothing here is shared between
/// sessions.
pub struct GameSession {
    state: GameState,
    dictionary: Arc<dyn Dictionary>,
    rng: StdRng,
    ids: TileIdGenerator,
    clock: Clock,
}

impl GameSession {
    pub fn new(setups: &[PlayerSetup], dictionary: Arc<dyn Dictionary>, seed: u64) -> GameResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ids = TileIdGenerator::new();
        let state = start_game(setups, &mut ids, &mut rng)?;
        Ok(Self {
            state,
            dictionary,
            rng,
            ids,
            clock: Utc::now,
        })
    }

    /// Picks up a saved game.
    pub fn resume(state: GameState, dictionary: Arc<dyn Dictionary>, seed: u64) -> Self {
        Self {
            state,
            dictionary,
            rng: StdRng::seed_from_u64(seed),
            ids: TileIdGenerator::new(),
            clock: Utc::now,
        }
    }

    /// Replaces the wall clock used for move timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Starts over with new seats; tile ids begin again from zero.
    pub fn restart(&mut self, setups: &[PlayerSetup]) -> GameResult<&GameState> {
        self.state = start_game(setups, &mut self.ids, &mut self.rng)?;
        Ok(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn dictionary(&self) -> &dyn Dictionary {
        self.dictionary.as_ref()
    }

    pub fn commit_move(&mut self, player_id: &str, placements: &[PlacedTile]) -> GameResult<&GameState> {
        self.state = commit_move(&self.state, player_id, placements, self.dictionary.as_ref(), (self.clock)())?;
        Ok(&self.state)
    }

    pub fn pass_turn(&mut self, player_id: &str) -> GameResult<&GameState> {
        self.state = pass_turn(&self.state, player_id, (self.clock)())?;
        Ok(&self.state)
    }

    pub fn exchange_tiles(&mut self, player_id: &str, tile_ids: &[TileId]) -> GameResult<&GameState> {
        self.state = exchange_tiles(&self.state, player_id, tile_ids, &mut self.rng, (self.clock)())?;
        Ok(&self.state)
    }

    pub fn set_blank_letter(&mut self, player_id: &str, tile_id: TileId, letter: char) -> GameResult<&GameState> {
        self.state = set_blank_letter(&self.state, player_id, tile_id, letter)?;
        Ok(&self.state)
    }

    pub fn eliminate_player(&mut self, player_id: &str) -> GameResult<&GameState> {
        self.state = eliminate_player(&self.state, player_id)?;
        Ok(&self.state)
    }

    pub fn view(&self, player_id: &str) -> Option<PlayerView> {
        get_sanitized_view(&self.state, player_id)
    }

    /// Editable copy of the player's rack against the current board.
    pub fn draft(&self, player_id: &str) -> Option<TurnDraft> {
        self.state
            .player(player_id)
            .map(|p| TurnDraft::new(&self.state.board, &p.rack))
    }

    pub fn plan_ai_turn(&mut self) -> GameResult<AiPlan> {
        plan_ai_turn(&self.state, self.dictionary.as_ref(), &mut self.rng)
    }

    pub fn apply_ai_plan(&mut self, plan: &AiPlan) -> GameResult<&GameState> {
        let at = (self.clock)();
        self.state = apply_ai_plan(&self.state, plan, self.dictionary.as_ref(), &mut self.rng, at)?;
        Ok(&self.state)
    }

    /// Plans and applies in one go.
    pub fn play_ai_turn(&mut self) -> GameResult<&GameState> {
        let plan = self.plan_ai_turn()?;
        self.apply_ai_plan(&plan)
    }
}
