//! Difficulty persistence
//!
//! The only thing that survives a restart is the difficulty, stored as a
//! single line holding its canonical name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GameError;
use crate::settings::Difficulty;

/// Directory under the user's home holding game files
const STORE_DIR: &str = ".river-raid";
/// File holding the difficulty name
const STORE_FILE: &str = "difficulty.txt";

/// File-backed difficulty store
#[derive(Debug, Clone)]
pub struct DifficultyStore {
    path: PathBuf,
}

impl DifficultyStore {
    /// Store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.river-raid/difficulty.txt`, or the current directory when no
    /// home is set
    pub fn default_location() -> Self {
        let base = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(STORE_DIR).join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored difficulty. Missing or corrupt files yield `Standard`.
    pub fn read_difficulty(&self) -> Difficulty {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match Difficulty::from_name(contents.trim()) {
                Some(difficulty) => {
                    log::info!("Loaded difficulty {}", difficulty.as_str());
                    difficulty
                }
                None => {
                    log::warn!(
                        "Unrecognized difficulty {:?} in {}, using Standard",
                        contents.trim(),
                        self.path.display()
                    );
                    Difficulty::Standard
                }
            },
            Err(err) => {
                log::warn!(
                    "Could not read {} ({}), using Standard",
                    self.path.display(),
                    err
                );
                Difficulty::Standard
            }
        }
    }

    /// Write the difficulty, creating the directory if needed
    pub fn write_difficulty(&self, difficulty: Difficulty) -> Result<(), GameError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, format!("{}\n", difficulty.as_str()))?;
        log::info!(
            "Difficulty {} saved to {}",
            difficulty.as_str(),
            self.path.display()
        );
        Ok(())
    }
}
