use super::prompt::RenderedPrompt;
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::providers::{CompletionProvider, OpenRouterProvider};
use std::sync::Arc;

/// Returned when the provider call fails for any transport or provider reason.
pub const FAILED_SENTINEL: &str = "Failed to generate tweet.";
/// Returned when the provider answered properly but produced no text.
pub const EMPTY_SENTINEL: &str = "No tweet generated.";

pub const SYSTEM_PROMPT: &str = "You are TweetlyBot. Only generate tweet-style content based on project updates. Never answer unrelated questions.";

/// Result of one completion call. Always has display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Generated(String),
    Empty,
    Failed,
}

impl CompletionOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::Empty => EMPTY_SENTINEL,
            Self::Failed => FAILED_SENTINEL,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) => text,
            other => other.text().to_string(),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Sends rendered prompts to the provider and absorbs every failure.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    temperature: f64,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: &str, temperature: f64) -> Self {
        Self {
            provider,
            model: model.to_string(),
            temperature,
        }
    }

    /// OpenRouter-backed client built from config.
    pub fn from_config(config: &ProviderConfig) -> Self {
        if config
            .api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            tracing::warn!("OpenRouter API key not set; every generation will fail");
        }
        Self::new(
            Arc::new(OpenRouterProvider::new(config)),
            &config.model,
            config.temperature,
        )
    }

    pub async fn complete(&self, prompt: RenderedPrompt) -> CompletionOutcome {
        let prompt_chars = prompt.as_str().chars().count();
        tracing::debug!(
            provider = self.provider.name(),
            model = %self.model,
            prompt_chars,
            "requesting completion"
        );

        match self
            .provider
            .chat_with_system(
                Some(SYSTEM_PROMPT),
                prompt.as_str(),
                &self.model,
                self.temperature,
            )
            .await
        {
            Ok(text) => CompletionOutcome::Generated(text),
            Err(error) => self.absorb(&error, prompt_chars),
        }
    }

    fn absorb(&self, error: &ProviderError, prompt_chars: usize) -> CompletionOutcome {
        if error.is_empty_completion() {
            tracing::warn!(
                provider = self.provider.name(),
                model = %self.model,
                prompt_chars,
                "provider returned no completion"
            );
            return CompletionOutcome::Empty;
        }

        tracing::error!(
            provider = self.provider.name(),
            model = %self.model,
            prompt_chars,
            error = %error,
            "completion request failed"
        );
        CompletionOutcome::Failed
    }
}
