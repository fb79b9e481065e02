//! End-to-end runs against the on-disk state file and settings document.

use serde_json::{json, Value};
use std::path::Path;
use treefocus::app::{handle_command, Command, Outcome};
use treefocus::{initialize, Config};

fn config_in(dir: &Path) -> Config {
    Config {
        state_file: Some(dir.join(".state").join("treefocus.json")),
        ..Default::default()
    }
}

fn read_settings(dir: &Path) -> Value {
    let path = dir.join(".vscode").join("settings.json");
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn commands_rewrite_settings_and_keep_user_entries() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for d in ["build", "src/core", "docs"] {
        std::fs::create_dir_all(root.join(d)).unwrap();
    }
    std::fs::create_dir_all(root.join(".vscode")).unwrap();
    std::fs::write(
        root.join(".vscode").join("settings.json"),
        r#"{"editor.rulers": [100], "files.exclude": {"**/.git": true}}"#,
    )
    .unwrap();

    let config = config_in(root);
    let mut state = initialize(&config, root).unwrap();

    for (id, path) in [
        ("treefocus.toggleHideItem", Some(root.join("build"))),
        ("treefocus.enableHideMode", None),
    ] {
        let command = Command::parse(id, path).unwrap();
        assert_eq!(handle_command(&mut state, &command).unwrap(), Outcome::Applied);
    }

    let settings = read_settings(root);
    assert_eq!(settings["editor.rulers"], json!([100]));
    assert_eq!(settings["files.exclude"], json!({"**/.git": true, "build": true}));

    handle_command(&mut state, &Command::DisableHideMode).unwrap();
    assert_eq!(read_settings(root)["files.exclude"], json!({"**/.git": true}));
}

#[test]
fn state_is_restored_by_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("src/core")).unwrap();
    std::fs::create_dir_all(root.join("docs")).unwrap();
    let config = config_in(root);

    {
        let mut state = initialize(&config, root).unwrap();
        handle_command(&mut state, &Command::ToggleFocus(Some(root.join("src/core")))).unwrap();
        handle_command(&mut state, &Command::EnableFocusMode).unwrap();
    }

    let mut state = initialize(&config, root).unwrap();
    assert!(state.focus_mode());
    assert_eq!(state.focused(), vec!["src/core"]);

    // Excluded entries from the first session are still recognised as managed.
    std::fs::remove_dir_all(root.join("docs")).unwrap();
    handle_command(&mut state, &Command::Refresh).unwrap();
    let exclude = read_settings(root)["files.exclude"].clone();
    assert!(exclude.get("docs").is_none());
    assert_eq!(exclude.get(".state"), Some(&json!(true)));
}

#[test]
fn commands_without_a_target_do_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut state = initialize(&config, dir.path()).unwrap();

    for id in ["treefocus.toggleHideItem", "treefocus.toggleFocusItem", "treefocus.resetItem"] {
        let command = Command::parse(id, None).unwrap();
        assert_eq!(handle_command(&mut state, &command).unwrap(), Outcome::Unchanged);
    }
    assert!(!dir.path().join(".vscode").exists());
}

#[test]
fn configured_exclude_key_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir(root.join("target")).unwrap();
    let config = Config {
        exclude_key: "search.exclude".to_string(),
        ..config_in(root)
    };

    let mut state = initialize(&config, root).unwrap();
    handle_command(&mut state, &Command::ToggleHide(Some(root.join("target")))).unwrap();
    handle_command(&mut state, &Command::EnableHideMode).unwrap();

    let settings = read_settings(root);
    assert_eq!(settings["search.exclude"], json!({"target": true}));
    assert!(settings.get("files.exclude").is_none());
}
