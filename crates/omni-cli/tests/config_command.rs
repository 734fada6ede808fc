#![allow(missing_docs)]

mod common;

use common::{StateDir, omni_cmd};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn set_get_and_list_share_the_state_file() {
    let state = StateDir::new();

    omni_cmd(&state.path())
        .args(["config", "set", "jira_url", "https://jira.example.com"])
        .assert()
        .success();
    omni_cmd(&state.path())
        .args(["config", "set", "trello_list_id", "l1"])
        .assert()
        .success();

    omni_cmd(&state.path())
        .args(["config", "get", "jira_url"])
        .assert()
        .success()
        .stdout("https://jira.example.com\n");

    omni_cmd(&state.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout("jira_url = https://jira.example.com\ntrello_list_id = l1\n");

    assert_eq!(state.read()["trello_list_id"], json!("l1"));
}

#[test]
fn list_hides_cache_records() {
    let state = StateDir::new();
    state.write(&json!({
        "jive_url": "https://jive.example.com",
        "cache_my_jive_activities": { "fetched_at": "2024-01-01T00:00:00Z", "data": [] },
        "called_trello_create_card": "2024-01-01T00:00:00Z"
    }));

    omni_cmd(&state.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout("jive_url = https://jive.example.com\n");
}

#[test]
fn unknown_key_is_not_found() {
    let state = StateDir::new();
    omni_cmd(&state.path())
        .args(["config", "get", "jira_url"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());
}

#[test]
fn corrupt_state_file_is_reinitialized() {
    let state = StateDir::new();
    std::fs::write(state.path(), "{ not json").unwrap();

    omni_cmd(&state.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(state.read(), json!({}));
}
