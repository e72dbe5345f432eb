use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::providers::http_client::build_client_with_timeout;
use crate::providers::{api_error, traits::CompletionProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const PROVIDER_NAME: &str = "OpenRouter";

pub struct OpenRouterProvider {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    completions_url: String,
    referer: Option<String>,
    title: Option<String>,
    timeout_secs: u64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenRouterProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            cached_auth_header: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {k}")),
            completions_url: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            referer: config.referer.clone(),
            title: config.title.clone(),
            timeout_secs: config.timeout_secs,
            client: build_client_with_timeout(config.timeout_secs),
        }
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }

    fn build_request<'a>(
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system_prompt {
            messages.push(Message {
                role: "system",
                content: sys,
            });
        }
        messages.push(Message {
            role: "user",
            content: message,
        });

        ChatRequest {
            model,
            messages,
            temperature,
        }
    }

    fn parse_response(body: &str) -> Result<ChatResponse, ProviderError> {
        serde_json::from_str(body).map_err(|e| ProviderError::Decode {
            provider: PROVIDER_NAME.to_string(),
            message: e.to_string(),
        })
    }

    /// First choice's content; absent or empty text counts as no completion.
    fn extract_text(chat_response: ChatResponse) -> Result<String, ProviderError> {
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ProviderError::EmptyCompletion {
                provider: PROVIDER_NAME.to_string(),
            })
    }

    fn transport_error(&self, error: &reqwest::Error) -> ProviderError {
        let message = if error.is_timeout() {
            format!("timed out after {}s", self.timeout_secs)
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };
        ProviderError::Transport {
            provider: PROVIDER_NAME.to_string(),
            message,
        }
    }

    async fn call_api(&self, request: &ChatRequest<'_>) -> Result<String, ProviderError> {
        let auth_header =
            self.cached_auth_header
                .as_ref()
                .ok_or_else(|| ProviderError::MissingApiKey {
                    provider: PROVIDER_NAME.to_string(),
                })?;

        let mut builder = self
            .client
            .post(&self.completions_url)
            .header("Authorization", auth_header)
            .json(request);
        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.title {
            builder = builder.header("X-Title", title);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !response.status().is_success() {
            return Err(api_error(PROVIDER_NAME, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;
        Self::extract_text(Self::parse_response(&body)?)
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn chat_with_system(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> Result<String, ProviderError> {
        let request = Self::build_request(system_prompt, message, model, temperature);
        self.call_api(&request).await
    }
}
