//! File logging from the `logging` config section.
//!
//! Kept in its own test binary: the global subscriber can only be
//! installed once per process.

use std::fs;

use danceflow_common::init_from_config;
use danceflow_config::LoggingConfig;

#[test]
fn directory_gets_a_rolling_file_and_bad_level_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        level: "chatty".to_string(),
        directory: Some(dir.path().display().to_string()),
        file_prefix: "danceflow.log".to_string(),
    };

    let guard = init_from_config(&config);
    assert!(guard.is_some());

    tracing::warn!("Studio booking window closed");
    drop(guard);

    let files: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("danceflow.log"), "{name}");

    let contents = fs::read_to_string(&files[0]).unwrap();
    assert!(contents.contains("Logging initialized at level: INFO"));
    assert!(contents.contains("Unknown log level, using info"));
    assert!(contents.contains("Studio booking window closed"));
}
