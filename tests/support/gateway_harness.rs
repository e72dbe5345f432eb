#![allow(dead_code)]

use reqwest::StatusCode;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tweetly::config::{Config, StoreBackend};
use tweetly::gateway::run_gateway_with_listener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "sk-or-v1-test-key";
pub const TEST_MODEL: &str = "meta-llama/llama-3-70b-instruct";

pub struct GatewayTestServer {
    port: u16,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
    pub db_path: PathBuf,
    _workspace: TempDir,
}

impl GatewayTestServer {
    /// Gateway with a sqlite store in a temp dir, talking to `provider_url`.
    pub async fn start(provider_url: &str) -> Self {
        Self::start_with(provider_url, |_| {}).await
    }

    #[allow(clippy::field_reassign_with_default)]
    pub async fn start_with(provider_url: &str, customize: impl FnOnce(&mut Config)) -> Self {
        let workspace = TempDir::new().expect("temp workspace should be created");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let db_path = workspace.path().join("tweetly.db");
        let mut config = Config::default();
        config.data_dir = workspace.path().to_path_buf();
        config.config_path = workspace.path().join("config.toml");
        config.provider.api_key = Some(TEST_API_KEY.to_string());
        config.provider.base_url = provider_url.to_string();
        config.provider.model = TEST_MODEL.to_string();
        config.provider.timeout_secs = 5;
        config.gateway.request_timeout_secs = 10;
        config.store.backend = StoreBackend::Sqlite;
        config.store.sqlite_path = Some(db_path.clone());
        config.store.timeout_secs = 2;
        customize(&mut config);
        config
            .validate()
            .expect("test gateway config should validate");

        let config = Arc::new(config);
        let host = "127.0.0.1".to_string();
        let handle =
            tokio::spawn(async move { run_gateway_with_listener(&host, listener, config).await });

        wait_until_gateway_ready(port).await;

        Self {
            port,
            handle,
            db_path,
            _workspace: workspace,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }

    pub async fn generate(&self, body: &Value) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(self.url("/generate-tweet"))
            .json(body)
            .send()
            .await
            .expect("generate request should complete");
        let status = response.status();
        let body = response.json().await.expect("response should be json");
        (status, body)
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_gateway_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..200 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(resp) if resp.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("gateway did not become ready on port {port}");
}

/// OpenRouter-shaped success body.
pub fn completion_body(text: &str) -> Value {
    json!({
        "id": "gen-test",
        "model": TEST_MODEL,
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": text}}
        ]
    })
}

/// Mount a completions mock that always answers with `text`.
pub async fn mount_completion(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(text)))
        .mount(server)
        .await;
}

/// Parsed JSON bodies of every request the provider mock received.
pub async fn provider_request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("request recording should be enabled")
        .iter()
        .map(|r| serde_json::from_slice(&r.body).expect("provider request should be json"))
        .collect()
}

/// The rendered user prompt of a provider request body.
pub fn user_prompt(body: &Value) -> &str {
    body["messages"]
        .as_array()
        .and_then(|m| m.iter().find(|msg| msg["role"] == "user"))
        .and_then(|msg| msg["content"].as_str())
        .expect("request should carry a user message")
}
