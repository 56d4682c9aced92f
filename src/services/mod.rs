pub mod game_manager;
pub mod session_manager;
pub mod simulation;
pub mod turn_draft;
