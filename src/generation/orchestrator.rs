use super::completion::CompletionClient;
use super::preferences::{DEFAULT_STORE_TIMEOUT, PreferenceResolver};
use super::prompt::build_prompt;
use super::request::GenerationRequest;
use crate::error::InputError;
use crate::store::{GenerationRecord, HistoryStore, PreferenceStore};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Response body for a generation: `{ "tweet": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedTweet {
    pub tweet: String,
}

/// Runs resolve → prompt → complete → persist for one request.
#[derive(Clone)]
pub struct TweetGenerator {
    resolver: PreferenceResolver,
    completion: CompletionClient,
    history: Arc<dyn HistoryStore>,
    store_timeout: Duration,
}

impl TweetGenerator {
    pub fn new(
        preferences: Arc<dyn PreferenceStore>,
        history: Arc<dyn HistoryStore>,
        completion: CompletionClient,
    ) -> Self {
        Self {
            resolver: PreferenceResolver::new(preferences),
            completion,
            history,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Bound both the preference read and the wait for the history write.
    #[must_use]
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.resolver = self.resolver.with_timeout(timeout);
        self.store_timeout = timeout;
        self
    }

    /// Validate a raw JSON body, then generate. Invalid input does no I/O.
    pub async fn generate_from_json(&self, body: &Value) -> Result<GeneratedTweet, InputError> {
        let request = GenerationRequest::from_json(body)?;
        Ok(self.generate(request).await)
    }

    pub async fn generate(&self, request: GenerationRequest) -> GeneratedTweet {
        let GenerationRequest {
            requester_id,
            progress_text,
            tone,
            length,
        } = request;

        let params = self
            .resolver
            .resolve(requester_id.as_deref(), tone.as_deref(), length.as_deref())
            .await;

        let prompt = build_prompt(&progress_text, &params);
        let outcome = self.completion.complete(prompt).await;
        let generated = outcome.is_generated();
        let tweet = outcome.into_text();

        let record = GenerationRecord {
            requester_id,
            source_text: progress_text,
            generated_text: tweet.clone(),
            tone: params.tone,
            length: params.length,
            created_at: Utc::now(),
        };

        tracing::info!(
            user_id = record.requester_id.as_deref().unwrap_or("<none>"),
            tone = %record.tone,
            length = %record.length,
            generated,
            "tweet generation finished"
        );

        self.persist(record).await;
        GeneratedTweet { tweet }
    }

    /// Write `record` on its own task and wait at most `store_timeout` for it.
    /// A slow write keeps running after the caller has its tweet.
    async fn persist(&self, record: GenerationRecord) {
        let history = Arc::clone(&self.history);
        let write = tokio::spawn(async move {
            if let Err(e) = history.append(&record).await {
                tracing::error!(
                    user_id = record.requester_id.as_deref().unwrap_or("<none>"),
                    error = %e,
                    "failed to persist generated tweet"
                );
            }
        });

        match tokio::time::timeout(self.store_timeout, write).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "history write task failed"),
            Err(_) => tracing::warn!(
                timeout = ?self.store_timeout,
                "history write still pending, responding without it"
            ),
        }
    }
}
