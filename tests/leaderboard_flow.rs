//! Leaderboard flow over a file-backed store

use serde_json::{Value, json};

use grid_snake::SubmitError;
use grid_snake::leaderboard::{
    JsonFileStore, Leaderboard, LeaderboardConfig, ScoreStore, SubmissionClient,
};

fn board(path: &std::path::Path, seed: u64) -> Leaderboard<JsonFileStore> {
    Leaderboard::with_seed(JsonFileStore::new(path), LeaderboardConfig::default(), seed)
}

#[test]
fn test_claims_survive_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scores.json");

    let token = {
        let mut lb = board(&path, 1);
        let reply = lb.handle("POST", "/claimNick", &json!({ "nick": "ada" }));
        assert_eq!(reply.status, 201);
        reply.body["token"].as_str().expect("token").to_string()
    };

    // New process, same file
    let mut lb = board(&path, 2);
    let reply = lb.handle("POST", "/claimNick", &json!({ "nick": "ada" }));
    assert_eq!(reply.status, 409);

    let reply = lb.handle(
        "POST",
        "/saveScore",
        &json!({ "nick": "ada", "score": 77, "token": token }),
    );
    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.body,
        json!({ "success": true, "currentScore": 77, "newHighScore": true })
    );

    let stored = JsonFileStore::new(&path).get("ada").expect("read");
    assert_eq!(stored.map(|r| r.score()), Some(77));
}

#[test]
fn test_legacy_file_rejects_saves() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scores.json");
    std::fs::write(&path, r#"{ "veteran": 1200, "rookie": 15 }"#).expect("seed file");

    let mut lb = board(&path, 3);
    let reply = lb.handle(
        "POST",
        "/saveScore",
        &json!({ "nick": "veteran", "score": 5000, "token": "ABCDEF" }),
    );
    assert_eq!(reply.status, 403);

    let reply = lb.handle("GET", "/getTopPlayers", &Value::Null);
    assert_eq!(
        reply.body,
        json!([{ "nick": "veteran", "score": 1200 }, { "nick": "rookie", "score": 15 }])
    );
}

#[test]
fn test_client_session_over_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scores.json");

    let mut client = SubmissionClient::new(board(&path, 4), 3);
    let first = client.submit("snek", 12).expect("saved");
    assert!(first.new_high_score);
    let token = client.token_for("snek").expect("token").to_string();

    // Another device without the token
    let mut other = SubmissionClient::new(board(&path, 5), 3);
    assert!(matches!(other.submit("snek", 99), Err(SubmitError::NickTaken(_))));
    other.provide_token("snek", token);
    let receipt = other.submit("snek", 99).expect("saved");
    assert_eq!(receipt.current_score, 99);

    let top = other.top_players().expect("top");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].score, 99);
}

#[test]
fn test_unwritable_store_is_500() {
    let dir = tempfile::tempdir().expect("tempdir");
    // The store path is a directory, so reads fail
    let mut lb = board(dir.path(), 6);
    let reply = lb.handle("POST", "/claimNick", &json!({ "nick": "ada" }));
    assert_eq!(reply.status, 500);
    assert_eq!(reply.body["success"], false);
}
