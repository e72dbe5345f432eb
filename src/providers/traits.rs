use crate::error::ProviderError;
use async_trait::async_trait;

/// A chat-style text completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short label used in logs and error messages.
    fn name(&self) -> &str;

    async fn chat(
        &self,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> Result<String, ProviderError> {
        self.chat_with_system(None, message, model, temperature)
            .await
    }

    /// Send one user turn, optionally preceded by a system instruction, and
    /// return the first completion's text unmodified.
    async fn chat_with_system(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> Result<String, ProviderError>;
}
