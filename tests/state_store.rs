mod common;

use common::{at, excluded, sorted, state_for, state_with, tree, user_entries};
use serde_json::json;
use treefocus::app::{Notification, Outcome};
use treefocus::storage::{keys, KeyValueStore, MemorySettings, MemoryStore};
use treefocus::infrastructure::Workspace;
use treefocus::{Mark, StateStore, TreeFocusError};

#[test]
fn marks_are_mutually_exclusive() {
    let dir = tree(&["src/core/"]);
    let root = dir.path();
    let mut state = state_for(root);
    let core = at(root, "src/core");

    state.toggle_hide(&core).unwrap();
    assert_eq!(state.hidden(), vec!["src/core"]);

    state.toggle_focus(&core).unwrap();
    assert_eq!(state.focused(), vec!["src/core"]);
    assert!(state.hidden().is_empty());

    state.toggle_hide(&core).unwrap();
    assert_eq!(state.hidden(), vec!["src/core"]);
    assert!(state.focused().is_empty());
}

#[test]
fn toggling_twice_restores_membership() {
    let dir = tree(&["a/", "b/"]);
    let root = dir.path();
    let mut state = state_for(root);

    state.toggle_focus(&at(root, "b")).unwrap();
    state.toggle_hide(&at(root, "a")).unwrap();
    state.toggle_hide(&at(root, "a")).unwrap();
    assert!(state.hidden().is_empty());
    assert_eq!(state.focused(), vec!["b"]);

    state.toggle_focus(&at(root, "b")).unwrap();
    state.toggle_focus(&at(root, "b")).unwrap();
    assert_eq!(state.focused(), vec!["b"]);
}

#[test]
fn reset_clears_either_mark_and_is_idempotent() {
    let dir = tree(&["a/", "b/"]);
    let root = dir.path();
    let mut state = state_for(root);

    state.toggle_hide(&at(root, "a")).unwrap();
    state.toggle_focus(&at(root, "b")).unwrap();

    assert_eq!(state.reset(&at(root, "a")).unwrap(), Outcome::Applied);
    assert_eq!(state.reset(&at(root, "b")).unwrap(), Outcome::Applied);
    assert!(state.hidden().is_empty());
    assert!(state.focused().is_empty());

    assert_eq!(state.reset(&at(root, "a")).unwrap(), Outcome::Unchanged);
}

#[test]
fn paths_outside_roots_are_ignored() {
    let dir = tree(&["a/"]);
    let other = tree(&["x/"]);
    let mut state = state_for(dir.path());

    assert_eq!(state.toggle_hide(&other.path().join("x")).unwrap(), Outcome::Unchanged);
    assert_eq!(state.toggle_focus(dir.path()).unwrap(), Outcome::Unchanged);
    assert_eq!(state.reset(&other.path().join("x")).unwrap(), Outcome::Unchanged);
    assert!(state.hidden().is_empty());
    assert!(state.focused().is_empty());
}

#[test]
fn pure_hide_mode_excludes_exactly_hidden_items() {
    let dir = tree(&["build/", "dist/", "src/"]);
    let root = dir.path();
    let mut state = state_for(root);

    state.toggle_hide(&at(root, "build")).unwrap();
    state.toggle_hide(&at(root, "dist")).unwrap();
    let result = state.set_hide_mode(true).map(|_| state.managed_exclusions()).unwrap();

    assert_eq!(result, vec!["build", "dist"]);
    assert_eq!(
        state.settings().entries(),
        &user_entries(&[("build", json!(true)), ("dist", json!(true))])
    );
}

#[test]
fn focus_mode_keeps_only_the_focused_branch() {
    let dir = tree(&[
        "README.md",
        "docs/guide.md",
        "src/core/a.txt",
        "src/core/deep/b.txt",
        "src/util/c.txt",
        "src/lib.rs",
        "src2/",
    ]);
    let root = dir.path();
    let mut state = state_for(root);

    state.toggle_focus(&at(root, "src/core")).unwrap();
    state.set_focus_mode(true).unwrap();

    assert_eq!(
        excluded(&state),
        vec!["README.md", "docs", "src/lib.rs", "src/util", "src2"]
    );
    let managed = state.managed_exclusions();
    for kept in ["src", "src/core", "src/core/a.txt", "src/core/deep"] {
        assert!(!managed.contains(&kept.to_string()), "{kept} must stay visible");
    }
}

#[test]
fn hidden_ancestor_of_focused_item_is_not_excluded() {
    let dir = tree(&["src/core/a.txt", "src/core/b.txt", "src/other.txt", "build/"]);
    let root = dir.path();
    let mut state = state_for(root);

    state.toggle_hide(&at(root, "src/core")).unwrap();
    state.toggle_hide(&at(root, "build")).unwrap();
    state.toggle_focus(&at(root, "src/core/a.txt")).unwrap();
    state.set_hide_mode(true).unwrap();
    state.set_focus_mode(true).unwrap();

    let excluded = excluded(&state);
    assert!(!excluded.contains(&"src/core".to_string()));
    assert_eq!(excluded, vec!["build", "src/core/b.txt", "src/other.txt"]);
}

#[test]
fn focus_mode_without_focused_items_applies_hide_mode() {
    let dir = tree(&["build/", "src/"]);
    let root = dir.path();
    let mut state = state_for(root);

    state.toggle_hide(&at(root, "build")).unwrap();
    state.set_focus_mode(true).unwrap();
    assert!(excluded(&state).is_empty());

    state.set_hide_mode(true).unwrap();
    assert_eq!(excluded(&state), vec!["build"]);
}

#[test]
fn turning_modes_off_retracts_managed_keys_only() {
    let dir = tree(&["build/", "src/core/", "docs/"]);
    let root = dir.path();
    let settings = MemorySettings::with_entries(user_entries(&[
        ("**/.git", json!(true)),
        ("**/*.tmp", json!(false)),
        ("*.log", json!({ "when": "$(basename).txt" })),
    ]));
    let mut state = state_with(root, settings);

    state.toggle_hide(&at(root, "build")).unwrap();
    state.toggle_focus(&at(root, "src/core")).unwrap();
    state.set_hide_mode(true).unwrap();
    state.set_focus_mode(true).unwrap();
    assert!(!state.managed_exclusions().is_empty());

    state.set_focus_mode(false).unwrap();
    state.set_hide_mode(false).unwrap();

    assert!(state.managed_exclusions().is_empty());
    assert_eq!(
        state.settings().entries(),
        &user_entries(&[
            ("**/.git", json!(true)),
            ("**/*.tmp", json!(false)),
            ("*.log", json!({ "when": "$(basename).txt" })),
        ])
    );
}

#[test]
fn user_entries_survive_every_recomputation() {
    let dir = tree(&["a/", "b/", "c/"]);
    let root = dir.path();
    let settings = MemorySettings::with_entries(user_entries(&[("node_modules", json!(true))]));
    let mut state = state_with(root, settings);

    state.set_hide_mode(true).unwrap();
    for item in ["a", "b", "a", "c"] {
        state.toggle_hide(&at(root, item)).unwrap();
        assert_eq!(
            state.settings().entries().get("node_modules"),
            Some(&json!(true))
        );
    }
    assert_eq!(sorted(excluded(&state)), vec!["b", "c", "node_modules"]);
}

#[test]
fn toggles_only_recompute_when_a_mode_is_on() {
    let dir = tree(&["a/"]);
    let root = dir.path();
    let mut state = state_for(root);

    state.toggle_hide(&at(root, "a")).unwrap();
    assert_eq!(state.settings().writes(), 0);

    state.set_hide_mode(true).unwrap();
    let writes = state.settings().writes();
    state.toggle_hide(&at(root, "a")).unwrap();
    assert_eq!(state.settings().writes(), writes + 1);
    assert!(excluded(&state).is_empty());
}

#[test]
fn deleted_items_do_not_abort_recomputation() {
    let dir = tree(&["src/core/a.txt", "src/gone/", "other/"]);
    let root = dir.path();
    let mut state = state_for(root);

    state.toggle_focus(&at(root, "src/gone/inner")).unwrap();
    state.toggle_focus(&at(root, "src/core")).unwrap();
    std::fs::remove_dir_all(at(root, "src/gone")).unwrap();

    state.set_focus_mode(true).unwrap();
    assert_eq!(excluded(&state), vec!["other"]);
}

#[test]
fn modes_and_marks_persist_across_instances() {
    let dir = tree(&["build/"]);
    let root = dir.path();
    let mut state = state_for(root);
    state.toggle_hide(&at(root, "build")).unwrap();
    state.set_hide_mode(true).unwrap();

    let store = state.store().clone();
    assert_eq!(store.get(keys::HIDE_MODE), Some(json!(true)));
    assert_eq!(store.get(keys::MANAGED_EXCLUSIONS), Some(json!(["build"])));

    let reopened = StateStore::new(store, MemorySettings::new(), Workspace::new([root.to_path_buf()]));
    assert!(reopened.hide_mode());
    assert!(!reopened.focus_mode());
    assert_eq!(reopened.mark_of("build"), Some(Mark::Hidden));
}

#[test]
fn persistence_failures_propagate() {
    let dir = tree(&["a/"]);
    let root = dir.path();

    let mut store = MemoryStore::new();
    store.fail_writes(true);
    let mut state = StateStore::new(store, MemorySettings::new(), Workspace::new([root.to_path_buf()]));
    assert!(matches!(
        state.toggle_hide(&at(root, "a")),
        Err(TreeFocusError::Storage(_))
    ));

    let mut settings = MemorySettings::new();
    settings.fail_writes(true);
    let mut state = state_with(root, settings);
    assert!(matches!(state.set_hide_mode(true), Err(TreeFocusError::Settings(_))));
}

#[test]
fn interrupted_toggle_never_marks_an_item_twice() {
    let dir = tree(&["a/"]);
    let root = dir.path();

    for failing_write in 1..=2 {
        let mut state = state_for(root);
        state.toggle_focus(&at(root, "a")).unwrap();

        state.store_mut().fail_nth_write(failing_write);
        assert!(matches!(
            state.toggle_hide(&at(root, "a")),
            Err(TreeFocusError::Storage(_))
        ));

        let hidden = state.hidden();
        let focused = state.focused();
        assert!(
            !(hidden.contains(&"a".to_string()) && focused.contains(&"a".to_string())),
            "write {failing_write}: hidden={hidden:?} focused={focused:?}"
        );
        assert!(hidden.is_empty());
    }
}

#[test]
fn failed_settings_write_keeps_keys_managed() {
    let dir = tree(&["build/", "dist/"]);
    let root = dir.path();
    let settings = MemorySettings::with_entries(user_entries(&[("**/.git", json!(true))]));
    let mut state = state_with(root, settings);

    state.toggle_hide(&at(root, "build")).unwrap();
    state.set_hide_mode(true).unwrap();
    assert_eq!(excluded(&state), vec!["**/.git", "build"]);

    state.settings_mut().fail_writes(true);
    assert!(matches!(
        state.toggle_hide(&at(root, "dist")),
        Err(TreeFocusError::Settings(_))
    ));
    assert!(matches!(
        state.set_hide_mode(false),
        Err(TreeFocusError::Settings(_))
    ));
    assert_eq!(sorted(state.managed_exclusions()), vec!["build", "dist"]);

    state.settings_mut().fail_writes(false);
    state.set_hide_mode(false).unwrap();

    assert!(state.managed_exclusions().is_empty());
    assert_eq!(
        state.settings().entries(),
        &user_entries(&[("**/.git", json!(true))])
    );
}

#[test]
fn failed_mode_write_keeps_the_previous_mode() {
    let dir = tree(&["a/"]);
    let mut state = state_for(dir.path());

    state.store_mut().fail_writes(true);
    assert!(state.set_focus_mode(true).is_err());
    assert!(!state.focus_mode());
}

#[test]
fn mode_changes_publish_context_flags() {
    let dir = tree(&["a/"]);
    let mut state = state_for(dir.path());
    let rx = state.subscribe();

    state.sync_context();
    state.set_focus_mode(true).unwrap();

    let received: Vec<Notification> = rx.try_iter().collect();
    assert_eq!(
        received,
        vec![
            Notification::ContextChanged { key: "treefocus.hideMode", value: false },
            Notification::ContextChanged { key: "treefocus.focusMode", value: false },
            Notification::ContextChanged { key: "treefocus.focusMode", value: true },
        ]
    );
    assert_eq!(
        state.context_flags(),
        [("treefocus.hideMode", false), ("treefocus.focusMode", true)]
    );
}

#[test]
fn marks_notify_with_the_changed_path() {
    let dir = tree(&["a/"]);
    let root = dir.path();
    let mut state = state_for(root);
    let rx = state.subscribe();

    state.toggle_hide(&at(root, "a")).unwrap();
    state.reset(&at(root, "missing")).unwrap();

    let received: Vec<Notification> = rx.try_iter().collect();
    assert_eq!(received, vec![Notification::DecorationsChanged(Some(at(root, "a")))]);
}

#[test]
fn refresh_picks_up_new_entries() {
    let dir = tree(&["src/core/", "docs/"]);
    let root = dir.path();
    let mut state = state_for(root);
    state.toggle_focus(&at(root, "src/core")).unwrap();
    state.set_focus_mode(true).unwrap();
    assert_eq!(excluded(&state), vec!["docs"]);

    assert_eq!(state.refresh().unwrap(), Outcome::Unchanged);

    std::fs::create_dir(at(root, "scripts")).unwrap();
    assert_eq!(state.refresh().unwrap(), Outcome::Applied);
    assert_eq!(excluded(&state), vec!["docs", "scripts"]);
}
