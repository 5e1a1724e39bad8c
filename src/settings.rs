//! Difficulty and game configuration
//!
//! The configuration is an explicit value handed to the game manager at
//! construction and passed down to whatever needs it.

use serde::{Deserialize, Serialize};

use crate::consts::{BANNER_TICKS, EXPLOSION_FRAME_TICKS};
use crate::error::GameError;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Standard,
}

impl Difficulty {
    /// Canonical name, also the persisted form
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Standard => "Standard",
        }
    }

    /// Parse the canonical name (exact match)
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "Easy" => Some(Difficulty::Easy),
            "Standard" => Some(Difficulty::Standard),
            _ => None,
        }
    }

    /// The other difficulty
    pub fn toggled(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Standard,
            Difficulty::Standard => Difficulty::Easy,
        }
    }

    /// Lives at the start of a new game
    pub fn starting_lives(&self) -> u32 {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Standard => 10,
        }
    }

    /// Horizontal drift speed of ships, helicopters and jets (pixels/tick)
    pub fn enemy_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Standard => 2.0,
        }
    }

    /// Chance (percent) that a ship or helicopter drifts at all
    pub fn enemy_activation_percent(&self) -> u32 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Standard => 90,
        }
    }

    /// Scripted descent jets replay every tick
    pub fn jet_pattern(&self) -> &'static str {
        match self {
            Difficulty::Easy => "down",
            Difficulty::Standard => "dive",
        }
    }
}

/// Game configuration, fixed for the duration of one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub starting_lives: u32,
    pub enemy_speed: f32,
    pub enemy_activation_percent: u32,
    pub jet_pattern: String,
    /// Seed for the level-init RNG (drift directions, activation)
    pub seed: u64,
    /// Duration of the level complete / game over banners
    #[serde(default = "default_banner_ticks")]
    pub banner_ticks: u64,
    /// Ticks between explosion frames
    #[serde(default = "default_explosion_frame_ticks")]
    pub explosion_frame_ticks: u64,
}

fn default_banner_ticks() -> u64 {
    BANNER_TICKS
}

fn default_explosion_frame_ticks() -> u64 {
    EXPLOSION_FRAME_TICKS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

impl GameConfig {
    /// Create a config from a difficulty (applies its table values)
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            starting_lives: difficulty.starting_lives(),
            enemy_speed: difficulty.enemy_speed(),
            enemy_activation_percent: difficulty.enemy_activation_percent(),
            jet_pattern: difficulty.jet_pattern().to_string(),
            seed: 0x5EED_0001,
            banner_ticks: BANNER_TICKS,
            explosion_frame_ticks: EXPLOSION_FRAME_TICKS,
        }
    }

    /// Switch difficulty, keeping seed and timings
    pub fn with_difficulty(&self, difficulty: Difficulty) -> Self {
        Self {
            seed: self.seed,
            banner_ticks: self.banner_ticks,
            explosion_frame_ticks: self.explosion_frame_ticks,
            ..Self::for_difficulty(difficulty)
        }
    }

    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        log::info!(
            "Loaded config: {} ({} lives)",
            config.difficulty.as_str(),
            config.starting_lives
        );
        Ok(config)
    }
}
