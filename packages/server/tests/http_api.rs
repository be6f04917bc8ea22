//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, message ingestion, history, stats).

mod fixtures;

use std::time::Duration;

use fixtures::TestServer;
use serde_json::{Value, json};

async fn post_message(client: &reqwest::Client, server: &TestServer, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/message", server.base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

async fn get_json(client: &reqwest::Client, url: String) -> Value {
    let response = client.get(url).send().await.expect("Failed to send request");
    assert_eq!(response.status(), 200);
    response.json().await.expect("Failed to parse JSON")
}

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let body = get_json(&client, format!("{}/health", server.base_url())).await;

    // then (期待する結果):
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_post_message_returns_increasing_ids() {
    // テスト項目: POST /message は success と単調増加する messageId を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let mut ids = Vec::new();
    for text in ["hello", "how are you?", "great!"] {
        let response = post_message(&client, &server, json!({"userId": "alice", "text": text})).await;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["success"], true);
        ids.push(body["messageId"].as_u64().expect("messageId should be a number"));
    }

    // then (期待する結果):
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_post_message_missing_fields() {
    // テスト項目: userId または text が無い・空の場合は 400 とエラーメッセージを返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    for body in [
        json!({"text": "hi"}),
        json!({"userId": "alice"}),
        json!({"userId": "", "text": "hi"}),
        json!({"userId": "alice", "text": ""}),
        json!({}),
    ] {
        // when (操作):
        let response = post_message(&client, &server, body.clone()).await;

        // then (期待する結果):
        assert_eq!(response.status(), 400, "body: {body}");
        let error: Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(error["error"], "userId and text are required");
    }

    // 何も保存されていない
    let messages = get_json(&client, format!("{}/messages", server.base_url())).await;
    assert_eq!(messages.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_post_message_invalid_json() {
    // テスト項目: JSON として解釈できないボディは 400 になる
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/message", server.base_url()))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let error: Value = response.json().await.expect("Failed to parse JSON");
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn test_post_message_too_long_user_id() {
    // テスト項目: 長すぎる userId は 400 になる
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = post_message(
        &client,
        &server,
        json!({"userId": "a".repeat(101), "text": "hi"}),
    )
    .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_messages_are_enriched_after_delay() {
    // テスト項目: 直後は pending、遅延後は分析結果付きで GET /messages に現れる
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    post_message(&client, &server, json!({"userId": "alice", "text": "I love this!"})).await;

    // when (操作): 直後
    let messages = get_json(&client, format!("{}/messages", server.base_url())).await;

    // then (期待する結果):
    let message = &messages[0];
    assert_eq!(message["id"], 1);
    assert_eq!(message["userId"], "alice");
    assert_eq!(message["text"], "I love this!");
    assert_eq!(message["sentiment"], "pending");
    assert_eq!(message["wordCount"], 3);
    assert_eq!(message["hasEmoji"], false);
    assert!(message.get("mood").is_none());

    // when (操作): 遅延後
    tokio::time::sleep(Duration::from_millis(200)).await;
    let messages = get_json(&client, format!("{}/messages", server.base_url())).await;

    // then (期待する結果):
    let message = &messages[0];
    assert_eq!(message["sentiment"], "positive");
    assert_eq!(message["mood"], "excited");
    assert_eq!(message["emotions"], json!(["joy"]));
}

#[tokio::test]
async fn test_stats_endpoint() {
    // テスト項目: GET /stats が集計結果を返し、内訳の合計が総数と一致する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    for (user, text) in [
        ("alice", "I love this!"),
        ("bob", "this is terrible"),
        ("carol", "what time is it?"),
        ("dave", "ok 😀"),
    ] {
        post_message(&client, &server, json!({"userId": user, "text": text})).await;
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    // when (操作):
    let stats = get_json(&client, format!("{}/stats", server.base_url())).await;

    // then (期待する結果):
    assert_eq!(stats["totalMessages"], 4);
    assert_eq!(stats["activeUsers"], 0);
    assert_eq!(stats["averageWordsPerMessage"], 3);
    assert_eq!(stats["messagesWithEmoji"], 1);
    let breakdown = &stats["sentimentBreakdown"];
    assert_eq!(breakdown["positive"], 1);
    assert_eq!(breakdown["negative"], 1);
    assert_eq!(breakdown["neutral"], 2);
    assert_eq!(breakdown["pending"], 0);
}

#[tokio::test]
async fn test_users_endpoint_without_presence() {
    // テスト項目: 誰も参加していなければ GET /users は空
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let users = get_json(&client, format!("{}/users", server.base_url())).await;

    assert_eq!(users["count"], 0);
    assert_eq!(users["users"], json!([]));
}
