use ink_duel::telemetry;

#[test]
fn second_init_reports_error() {
    let dir = std::env::temp_dir().join(format!("ink_duel_log_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let log = dir.join("duel.log");

    telemetry::init(&log).unwrap();
    tracing::info!("first subscriber installed");
    assert!(log.exists());

    let err = telemetry::init(&log).unwrap_err();
    assert!(err.to_string().contains("tracing subscriber"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unwritable_log_path_is_an_error() {
    let missing = std::env::temp_dir()
        .join(format!("ink_duel_no_dir_{}", std::process::id()))
        .join("nested")
        .join("duel.log");
    let err = telemetry::init(&missing).unwrap_err();
    assert!(err.to_string().contains("creating log file"));
}
