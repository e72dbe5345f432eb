use crate::gateway_harness::{GatewayTestServer, completion_body};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tweetly::config::StoreBackend;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn get_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn health_reports_store_backend() {
    let provider = MockServer::start().await;
    let server = GatewayTestServer::start(&provider.uri()).await;

    let (status, body) = get_json(&server.url("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "store": "sqlite"}));
}

#[tokio::test]
async fn history_lists_generated_tweets_newest_first() {
    let provider = MockServer::start().await;
    for (progress, tweet) in [("first update", "tweet one"), ("second update", "tweet two")] {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains(progress))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(tweet)))
            .mount(&provider)
            .await;
    }
    let server = GatewayTestServer::start(&provider.uri()).await;

    server
        .generate(&json!({"userId": "u1", "progress": "first update", "tone": "Funny"}))
        .await;
    server
        .generate(&json!({"userId": "u1", "progress": "second update"}))
        .await;
    server
        .generate(&json!({"userId": "u2", "progress": "first update"}))
        .await;
    server.generate(&json!({"progress": "second update"})).await;

    let (status, body) = get_json(&server.url("/tweets?userId=u1")).await;

    assert_eq!(status, StatusCode::OK);
    let tweets = body.as_array().unwrap();
    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0]["tweet"], "tweet two");
    assert_eq!(tweets[0]["tone"], "Professional");
    assert_eq!(tweets[1]["tweet"], "tweet one");
    assert_eq!(tweets[1]["tone"], "Funny");
    assert_eq!(tweets[1]["length"], "Short");
    assert!(tweets[0]["id"].as_str().is_some());
    assert!(tweets[0]["created_at"].as_str().is_some());
}

#[tokio::test]
async fn failed_generations_are_recorded_too() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&provider)
        .await;
    let server = GatewayTestServer::start(&provider.uri()).await;

    server
        .generate(&json!({"userId": "u1", "progress": "x"}))
        .await;

    let (_, body) = get_json(&server.url("/tweets?userId=u1")).await;
    assert_eq!(body[0]["tweet"], "Failed to generate tweet.");
}

#[tokio::test]
async fn missing_user_id_is_rejected() {
    let provider = MockServer::start().await;
    let server = GatewayTestServer::start(&provider.uri()).await;

    for url in [server.url("/tweets"), server.url("/tweets?userId=")] {
        let (status, body) = get_json(&url).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing userId"}));
    }
}

#[tokio::test]
async fn none_backend_serves_without_history() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hi")))
        .mount(&provider)
        .await;
    let server = GatewayTestServer::start_with(&provider.uri(), |config| {
        config.store.backend = StoreBackend::None;
    })
    .await;

    let (status, body) = server
        .generate(&json!({"userId": "u1", "progress": "x"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"], "hi");

    let (_, health) = get_json(&server.url("/health")).await;
    assert_eq!(health["store"], "none");

    let (status, tweets) = get_json(&server.url("/tweets?userId=u1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tweets, json!([]));
}
