use std::path::PathBuf;

use ink_duel::config::{ConfigError, MatchConfig};
use ink_duel::entities::{Difficulty, ScarfColor};
use ink_duel::progress::{Progress, ProgressError};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("ink_duel_test_{}", std::process::id()))
        .join(name)
}

// ── Difficulty profiles ───────────────────────────────────────────────────────

#[test]
fn difficulty_table() {
    let easy = Difficulty::Easy.profile();
    assert_eq!(easy.hp_mod, 0.8);
    assert_eq!(easy.potions, 3);
    assert_eq!(easy.ai_reaction, 40);
    assert!(!easy.allow_skills);
    assert_eq!(easy.color, ScarfColor::Silver);

    let medium = Difficulty::Medium.profile();
    assert_eq!(medium.ai_aggression, 0.5);
    assert_eq!(medium.skill_rate, 0.25);

    let hard = Difficulty::Hard.profile();
    assert_eq!(hard.potions, 1);
    assert_eq!(hard.ai_reaction, 20);

    let gm = Difficulty::Grandmaster.profile();
    assert_eq!(gm.hp_mod, 1.2);
    assert_eq!(gm.potions, 0);
    assert_eq!(gm.ai_aggression, 0.9);
    assert_eq!(gm.ai_reaction, 10);
    assert_eq!(gm.skill_rate, 0.65);
}

#[test]
fn difficulty_names() {
    assert_eq!(Difficulty::from_name("Hard"), Some(Difficulty::Hard));
    assert_eq!(Difficulty::from_name("gm"), Some(Difficulty::Grandmaster));
    assert_eq!(Difficulty::from_name("nightmare"), None);
}

// ── MatchConfig ───────────────────────────────────────────────────────────────

#[test]
fn empty_json_gives_defaults() {
    let config = MatchConfig::from_json("{}").unwrap();
    assert_eq!(config, MatchConfig::default());
    assert_eq!(config.match_seconds, 60);
    assert_eq!(config.enemy_ko_slow_motion, 0.1);
    assert_eq!(config.player_ko_slow_motion, 0.2);
}

#[test]
fn partial_json_overrides_fields() {
    let config = MatchConfig::from_json(r#"{ "match_seconds": 90, "ko_linger_ticks": 30 }"#).unwrap();
    assert_eq!(config.match_seconds, 90);
    assert_eq!(config.ko_linger_ticks, 30);
    assert_eq!(config.enemy_ko_slow_motion, 0.1);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(
        MatchConfig::from_json(r#"{ "match_seconds": 0 }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        MatchConfig::from_json(r#"{ "enemy_ko_slow_motion": 0.0 }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        MatchConfig::from_json(r#"{ "player_ko_slow_motion": 1.5 }"#),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        MatchConfig::from_json("{ match_seconds: "),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn missing_config_file_is_io_error() {
    let path = scratch_path("no_such_config.json");
    assert!(matches!(
        MatchConfig::load_from_file(&path),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn config_loads_from_file() {
    let path = scratch_path("config.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{ "match_seconds": 45 }"#).unwrap();
    let config = MatchConfig::load_from_file(&path).unwrap();
    assert_eq!(config.match_seconds, 45);
    let _ = std::fs::remove_file(&path);
}

// ── Progress ──────────────────────────────────────────────────────────────────

#[test]
fn grandmaster_unlocks_after_three_clears() {
    let mut progress = Progress::default();
    assert!(!progress.grandmaster_unlocked());
    assert!(!progress.is_available(Difficulty::Grandmaster));
    assert!(progress.is_available(Difficulty::Hard));

    progress.record_win(Difficulty::Easy);
    progress.record_win(Difficulty::Medium);
    assert!(!progress.grandmaster_unlocked());
    progress.record_win(Difficulty::Hard);
    assert!(progress.grandmaster_unlocked());
    assert!(progress.is_available(Difficulty::Grandmaster));
    assert!(!progress.is_cleared(Difficulty::Grandmaster));
}

#[test]
fn missing_progress_file_is_fresh() {
    let progress = Progress::load(&scratch_path("never_written.json")).unwrap();
    assert_eq!(progress, Progress::default());
}

#[test]
fn progress_survives_save_and_load() {
    let path = scratch_path("nested/progress.json");
    let mut progress = Progress::default();
    progress.record_win(Difficulty::Medium);
    progress.save(&path).unwrap();

    let loaded = Progress::load(&path).unwrap();
    assert_eq!(loaded, progress);
    assert!(loaded.is_cleared(Difficulty::Medium));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_progress_is_reported() {
    let path = scratch_path("corrupt.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        Progress::load(&path),
        Err(ProgressError::Parse { .. })
    ));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn progress_fields_default_individually() {
    let path = scratch_path("partial.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{ "easy": true }"#).unwrap();
    let progress = Progress::load(&path).unwrap();
    assert!(progress.is_cleared(Difficulty::Easy));
    assert!(!progress.is_cleared(Difficulty::Hard));
    let _ = std::fs::remove_file(&path);
}
