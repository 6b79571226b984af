#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppState` construction and config loading.

use zonekeeper_app::{AppConfig, AppState};
use zonekeeper_core::types::{ChatEvent, MenuAction, Reply, Selection};
use zonekeeper_core::messages;

#[tokio::test]
async fn app_state_wires_a_working_engine() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database_path: tmp.path().join("app.db"),
        ..AppConfig::default()
    };
    let state = AppState::new(config).await.expect("failed to build AppState");

    // An unknown chat gets the registration prompt, proving engine,
    // store, and factory are wired end to end.
    let replies = state
        .engine
        .handle_event(ChatEvent::select(
            1,
            Selection::Menu(MenuAction::AddAccount),
        ))
        .await;
    assert_eq!(replies, vec![Reply::text(messages::NOT_REGISTERED)]);
}

#[tokio::test]
async fn config_load_falls_back_to_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope.toml");
    let config = AppConfig::load(&missing).unwrap();
    assert_eq!(config.session_timeout_secs, 600);

    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "session_timeout_secs = 120\n").unwrap();
    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.session_timeout_secs, 120);
    assert_eq!(config.max_retries, 3);
}

#[tokio::test]
async fn app_state_creates_parent_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database_path: tmp.path().join("nested/dir/app.db"),
        ..AppConfig::default()
    };
    let state = AppState::new(config).await.unwrap();
    assert!(state.config.database_path.exists());
}
