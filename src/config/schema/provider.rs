use serde::{Deserialize, Serialize};

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3-70b-instruct";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// OpenRouter chat-completion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Bearer key; usually supplied through `OPENROUTER_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Upper bound on a single completion call, connect included
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sent as `HTTP-Referer` for OpenRouter app attribution
    #[serde(default)]
    pub referer: Option<String>,
    /// Sent as `X-Title` for OpenRouter app attribution
    #[serde(default)]
    pub title: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_OPENROUTER_BASE_URL.into()
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            referer: None,
            title: None,
        }
    }
}
