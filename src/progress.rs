//! Cross-match progress: one "cleared" flag per difficulty.
//!
//! Lives outside the simulation; the host records a win here and reads it
//! back to decide whether Grandmaster is unlocked.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::Difficulty;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("failed to access progress file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("progress file {path} is corrupt: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub easy: bool,
    #[serde(default)]
    pub medium: bool,
    #[serde(default)]
    pub hard: bool,
    #[serde(default)]
    pub grandmaster: bool,
}

impl Progress {
    pub fn is_cleared(&self, difficulty: Difficulty) -> bool {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Grandmaster => self.grandmaster,
        }
    }

    pub fn record_win(&mut self, difficulty: Difficulty) {
        let flag = match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
            Difficulty::Grandmaster => &mut self.grandmaster,
        };
        *flag = true;
    }

    /// Grandmaster opens once the three regular difficulties are cleared.
    pub fn grandmaster_unlocked(&self) -> bool {
        self.easy && self.medium && self.hard
    }

    pub fn is_available(&self, difficulty: Difficulty) -> bool {
        difficulty != Difficulty::Grandmaster || self.grandmaster_unlocked()
    }

    /// Load from `path`. A missing file is a fresh profile.
    pub fn load(path: &Path) -> Result<Self, ProgressError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Progress::default()),
            Err(source) => {
                return Err(ProgressError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&contents).map_err(|source| ProgressError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ProgressError> {
        let io_err = |source| ProgressError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ProgressError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }
}

/// `~/.ink_duel_progress.json`, falling back to the working directory.
pub fn default_progress_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".ink_duel_progress.json")
}
