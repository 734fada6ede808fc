#![allow(missing_docs)]

mod common;

use common::{StateDir, omni_cmd};
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn alfred_items(stdout: &[u8]) -> Vec<Value> {
    let parsed: Value = serde_json::from_slice(stdout).expect("alfred json");
    parsed["items"].as_array().cloned().expect("items array")
}

#[tokio::test]
async fn emoji_listing_is_filtered_and_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emojis"))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tada": "https://e/tada.png",
            "smile": "https://e/smile.png",
            "+1": "https://e/plus1.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = StateDir::new();
    state.write(&json!({ "github_api_url": server.uri() }));

    let output = omni_cmd(&state.path())
        .env("OMNI_OMNIAPI_GITHUB_TOKEN", "ghp_test")
        .args(["github", "--emoji", "--query", "tada"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let items = alfred_items(&output);
    assert_eq!(items[0]["title"], "tada");
    assert_eq!(items[0]["arg"], "https://e/tada.png");
    assert_eq!(items[0]["valid"], true);

    // served from the cache record, without credentials
    let output = omni_cmd(&state.path())
        .args(["github", "--emoji"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let titles: Vec<_> = alfred_items(&output)
        .iter()
        .map(|item| item["title"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(titles, vec!["+1", "smile", "tada"]);
    assert!(state.read()["cache_github_emoji"]["fetched_at"].is_string());
}

#[tokio::test]
async fn backend_failure_exits_with_network_code_and_no_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let state = StateDir::new();
    state.write(&json!({ "github_api_url": server.uri() }));

    omni_cmd(&state.path())
        .env("OMNI_OMNIAPI_GITHUB_TOKEN", "ghp_test")
        .args(["github", "--prs", "--repo", "acme/web"])
        .assert()
        .code(5)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("500"));

    assert!(state.read().get("cache_acme_web_prs").is_none());
}

#[tokio::test]
async fn missing_credential_exits_with_config_code() {
    let server = MockServer::start().await;
    let state = StateDir::new();
    state.write(&json!({ "github_api_url": server.uri() }));

    omni_cmd(&state.path())
        .args(["github", "--emoji"])
        .assert()
        .code(6)
        .stdout(predicate::str::is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn trello_boards_resolve_and_remember_the_member() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m1",
            "username": "ada"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/members/m1/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b1", "name": "Roadmap", "shortUrl": "https://trello.com/b/b1" }
        ])))
        .mount(&server)
        .await;

    let state = StateDir::new();
    state.write(&json!({ "trello_api_url": server.uri() }));

    let output = omni_cmd(&state.path())
        .env("OMNI_OMNIAPI_TRELLO_API_KEY", "k")
        .env("OMNI_OMNIAPI_TRELLO_TOKEN", "t")
        .args(["trello", "--boards"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let items = alfred_items(&output);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Roadmap");
    assert_eq!(items[0]["arg"], "https://trello.com/b/b1");
    assert_eq!(state.read()["trello_member_id"], json!("m1"));
    assert!(state.read()["cache_trello_boards_m1"]["data"].is_array());
}

#[tokio::test]
async fn createcard_posts_once_and_reports_the_card() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "name": "Call the bank",
            "shortUrl": "https://trello.com/c/c1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = StateDir::new();
    state.write(&json!({
        "trello_api_url": server.uri(),
        "trello_list_id": "l1"
    }));

    let output = omni_cmd(&state.path())
        .env("OMNI_OMNIAPI_TRELLO_API_KEY", "k")
        .env("OMNI_OMNIAPI_TRELLO_TOKEN", "t")
        .args(["trello", "--createcard", "--query", "Call the bank"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let items = alfred_items(&output);
    assert_eq!(items[0]["title"], "Created card: Call the bank");
    assert_eq!(items[0]["arg"], "https://trello.com/c/c1");
    assert!(state.read()["called_trello_create_card"].is_string());
}

#[test]
fn text_format_prints_one_line_per_row() {
    let state = StateDir::new();
    state.write(&json!({
        "cache_github_emoji": {
            "fetched_at": chrono::Utc::now().to_rfc3339(),
            "data": [
                { "name": "smile", "url": "https://e/smile.png" },
                { "name": "tada", "url": "https://e/tada.png" }
            ]
        }
    }));

    omni_cmd(&state.path())
        .args(["--format", "text", "github", "--emoji"])
        .assert()
        .success()
        .stdout(predicate::str::contains("smile").and(predicate::str::contains("tada")));
}
