pub mod bag;
pub mod board;
pub mod distribution;
pub mod game_state;
pub mod move_validator;
pub mod player;
pub mod position;
pub mod premium;
pub mod tile;
pub mod turn_manager;
pub mod words;
