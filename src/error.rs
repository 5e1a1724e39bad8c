//! Error types
//!
//! Only two failure families exist: broken invariants (programmer errors)
//! and environment failures around the difficulty file.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// Tried to advance past the last level
    NoNextLevel { current: usize },
    /// A level registry needs at least one level
    EmptyLevelRegistry,
    /// Level index outside the registry
    LevelOutOfRange { index: usize, len: usize },
    /// Malformed level definition
    InvalidLevel { name: String, reason: String },
    /// Difficulty file could not be written
    Persistence(std::io::Error),
    /// Config or level JSON could not be parsed
    Config(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoNextLevel { current } => {
                write!(f, "no level after level index {current}")
            }
            Self::EmptyLevelRegistry => write!(f, "level registry is empty"),
            Self::LevelOutOfRange { index, len } => {
                write!(f, "level index {index} out of range (have {len})")
            }
            Self::InvalidLevel { name, reason } => write!(f, "invalid level '{name}': {reason}"),
            Self::Persistence(err) => write!(f, "difficulty store: {err}"),
            Self::Config(err) => write!(f, "config: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}
