use crate::game::tile::Tile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// AI strength tier. Anything the selector does not know falls back to a
/// uniform pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[serde(other)]
    Unrecognized,
}

impl From<&str> for Difficulty {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unrecognized,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}

/// Who sits at the table, before any tiles are dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub id: String,
    pub name: String,
    /// `Some` for computer players.
    pub ai_difficulty: Option<Difficulty>,
}

impl PlayerSetup {
    pub fn human(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ai_difficulty: None,
        }
    }

    pub fn ai(id: impl Into<String>, name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ai_difficulty: Some(difficulty),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub score: i32,
    pub rack: Vec<Tile>,
    pub is_eliminated: bool,
    pub consecutive_passes: u32,
    pub ai_difficulty: Option<Difficulty>,
}

impl Player {
    pub fn from_setup(setup: &PlayerSetup, rack: Vec<Tile>) -> Self {
        Self {
            id: setup.id.clone(),
            name: setup.name.clone(),
            score: 0,
            rack,
            is_eliminated: false,
            consecutive_passes: 0,
            ai_difficulty: setup.ai_difficulty,
        }
    }

    pub fn is_ai(&self) -> bool {
        self.ai_difficulty.is_some()
    }

    /// Face value of the tiles still on the rack.
    pub fn rack_value(&self) -> i32 {
        self.rack.iter().map(|t| t.points).sum()
    }
}
