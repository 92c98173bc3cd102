//! Tuning tables and the presentation-level match configuration.
//!
//! Difficulty profiles are fixed code tables. `MatchConfig` holds the knobs a
//! host may want to change without touching gameplay, and can be loaded from
//! a JSON file where every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{Difficulty, ScarfColor};

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Everything that differs between difficulties. Only the AI controller and
/// match setup read this.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyProfile {
    pub name: &'static str,
    pub color: ScarfColor,
    /// Multiplier on the enemy's max HP.
    pub hp_mod: f32,
    /// Heal potions granted to the player.
    pub potions: u32,
    /// Probability that a decision roll comes out aggressive.
    pub ai_aggression: f32,
    /// Frames the AI must spend in a state before it decides again.
    pub ai_reaction: u32,
    pub allow_skills: bool,
    pub skill_rate: f32,
}

impl Difficulty {
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                name: "Easy",
                color: ScarfColor::Silver,
                hp_mod: 0.8,
                potions: 3,
                ai_aggression: 0.35,
                ai_reaction: 40,
                allow_skills: false,
                skill_rate: 0.0,
            },
            Difficulty::Medium => DifficultyProfile {
                name: "Medium",
                color: ScarfColor::Azure,
                hp_mod: 1.0,
                potions: 2,
                ai_aggression: 0.5,
                ai_reaction: 30,
                allow_skills: true,
                skill_rate: 0.25,
            },
            Difficulty::Hard => DifficultyProfile {
                name: "Hard",
                color: ScarfColor::Crimson,
                hp_mod: 1.0,
                potions: 1,
                ai_aggression: 0.7,
                ai_reaction: 20,
                allow_skills: true,
                skill_rate: 0.45,
            },
            Difficulty::Grandmaster => DifficultyProfile {
                name: "Grandmaster",
                color: ScarfColor::GoldCape,
                hp_mod: 1.2,
                potions: 0,
                ai_aggression: 0.9,
                ai_reaction: 10,
                allow_skills: true,
                skill_rate: 0.65,
            },
        }
    }

    /// Parse a difficulty name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Difficulty> {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "grandmaster" | "gm" => Some(Difficulty::Grandmaster),
            _ => None,
        }
    }
}

// ── Match configuration ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Presentation parameters of a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Length of the match clock.
    #[serde(default = "default_match_seconds")]
    pub match_seconds: u32,
    /// Game speed applied when the enemy is knocked out.
    #[serde(default = "default_enemy_ko_slow_motion")]
    pub enemy_ko_slow_motion: f32,
    /// Game speed applied when the player is knocked out.
    #[serde(default = "default_player_ko_slow_motion")]
    pub player_ko_slow_motion: f32,
    /// Simulated ticks of slow motion after a KO before the match freezes.
    #[serde(default = "default_ko_linger_ticks")]
    pub ko_linger_ticks: u32,
}

fn default_match_seconds() -> u32 {
    60
}

fn default_enemy_ko_slow_motion() -> f32 {
    0.1
}

fn default_player_ko_slow_motion() -> f32 {
    0.2
}

fn default_ko_linger_ticks() -> u32 {
    12
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            match_seconds: default_match_seconds(),
            enemy_ko_slow_motion: default_enemy_ko_slow_motion(),
            player_ko_slow_motion: default_player_ko_slow_motion(),
            ko_linger_ticks: default_ko_linger_ticks(),
        }
    }
}

impl MatchConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.match_seconds == 0 {
            return Err(ConfigError::Invalid(
                "match_seconds must be at least 1".to_string(),
            ));
        }
        for (name, speed) in [
            ("enemy_ko_slow_motion", self.enemy_ko_slow_motion),
            ("player_ko_slow_motion", self.player_ko_slow_motion),
        ] {
            if !(speed > 0.0 && speed <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be in (0, 1], got {}",
                    name, speed
                )));
            }
        }
        Ok(())
    }
}
