use std::io::Write;

use duelist::config::{load_and_validate, load_or_default};
use duelist::errors::DuelistError;
use duelist::fs::mock::MockFileSystem;
use duelist::fs::RealFileSystem;
use duelist::storage::Storage;
use duelist::task::TaskStore;
use duelist::types::StoreFormat;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn malformed_json_records_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(
        &path,
        r#"{"tasks": [
            {"id": 1, "name": "good", "user_due_date": "2026-10-20"},
            {"id": 2, "name": "bad date", "user_due_date": "someday"},
            {"id": 3, "name": ""},
            {"id": 4, "name": "also good"}
        ]}"#,
    )
    .unwrap();

    let store = Storage::new(RealFileSystem, &path, StoreFormat::Json).load().unwrap();
    let names: Vec<_> = store.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["good", "also good"]);
}

#[test]
fn malformed_legacy_lines_are_skipped() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "/data/tasks",
        "2\nT 20261020 - fine\nT 2026-10-20 - wrong date shape\nX what is this\nC\nT - - also fine\n",
    );
    let store = Storage::new(fs, "/data/tasks", StoreFormat::Legacy).load().unwrap();
    let names: Vec<_> = store.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["fine", "also fine"]);
    // The stray `C` followed a rejected line and must not complete anything.
    assert!(store.iter().all(|t| !t.complete));
}

#[test]
fn unreadable_json_document_is_an_error_not_an_empty_store() {
    let fs = MockFileSystem::new();
    fs.add_file("/data/tasks.json", "{\"tasks\": [ {\"name\": \"half");
    let result = Storage::new(fs, "/data/tasks.json", StoreFormat::Json).load();
    assert!(matches!(result, Err(DuelistError::ParseError(_))));
}

#[test]
fn store_indices_are_bounds_checked() {
    let mut store = TaskStore::new();
    match store.get_mut(0) {
        Err(DuelistError::IndexOutOfRange { index: 0, len: 0 }) => {}
        other => panic!("Expected IndexOutOfRange, got: {:?}", other),
    }
}

#[test]
fn unknown_config_keys_are_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[storage]
path = "/tmp/tasks.json"

[colors]
accent = "blue"
"#
    )
    .unwrap();

    match load_and_validate(file.path()) {
        Err(DuelistError::TomlError(msg)) => assert!(msg.to_string().contains("colors")),
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn invalid_values_are_config_errors() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[logging]
level = "loud"
"#
    )
    .unwrap();

    match load_and_validate(file.path()) {
        Err(DuelistError::ConfigError(msg)) => assert!(msg.contains("loud")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_or_default(Some(missing.as_path())),
        Err(DuelistError::ConfigError(_))
    ));
}

#[test]
fn full_config_file_is_accepted() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[storage]
path = "/tmp/duelist-tasks"
format = "legacy"

[picker]
command = ["rofi", "-dmenu", "-i", "-p", "{{prompt}}", "-mesg", "{{message}}"]

[display]
date_format = "%Y-%m-%d"

[open]
command = "firefox"

[logging]
level = "debug"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.storage.format, StoreFormat::Legacy);
    assert_eq!(cfg.storage.resolved_path(), std::path::PathBuf::from("/tmp/duelist-tasks"));
    assert_eq!(cfg.picker.command[4], "{prompt}");
    assert_eq!(cfg.display.date_format, "%Y-%m-%d");
    assert_eq!(cfg.open.command, "firefox");
    assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
}
