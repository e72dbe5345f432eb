use crate::error::{ProviderError, StoreError};
use crate::providers::CompletionProvider;
use crate::store::{GenerationRecord, HistoryStore, PreferenceStore, StoredTweet, UserPreferences};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn store_down() -> StoreError {
    StoreError::Remote {
        backend: "fake".into(),
        message: "store unreachable".into(),
    }
}

pub(crate) struct FakePreferenceStore {
    prefs: Option<UserPreferences>,
    fail: bool,
    delay: Option<Duration>,
    pub(crate) calls: AtomicUsize,
}

impl FakePreferenceStore {
    pub(crate) fn empty() -> Self {
        Self {
            prefs: None,
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answers with `prefs`, but only after `delay`.
    pub(crate) fn slow(prefs: UserPreferences, delay: Duration) -> Self {
        Self {
            prefs: Some(prefs),
            delay: Some(delay),
            ..Self::empty()
        }
    }

    pub(crate) fn with(prefs: UserPreferences) -> Self {
        Self {
            prefs: Some(prefs),
            ..Self::empty()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }
}

#[async_trait]
impl PreferenceStore for FakePreferenceStore {
    async fn load_preferences(
        &self,
        _user_id: &str,
    ) -> Result<Option<UserPreferences>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(store_down());
        }
        Ok(self.prefs.clone())
    }
}

pub(crate) struct FakeHistoryStore {
    fail: bool,
    delay: Option<Duration>,
    pub(crate) records: Mutex<Vec<GenerationRecord>>,
    pub(crate) calls: AtomicUsize,
}

impl FakeHistoryStore {
    pub(crate) fn new() -> Self {
        Self {
            fail: false,
            delay: None,
            records: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Stores each record only after `delay`.
    pub(crate) fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub(crate) fn recorded(&self) -> Vec<GenerationRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryStore for FakeHistoryStore {
    async fn append(&self, record: &GenerationRecord) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(store_down());
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<StoredTweet>, StoreError> {
        if self.fail {
            return Err(store_down());
        }
        Ok(self
            .recorded()
            .into_iter()
            .rev()
            .filter(|r| r.requester_id.as_deref() == Some(user_id))
            .enumerate()
            .map(|(i, r)| StoredTweet {
                id: i.to_string(),
                tweet: r.generated_text,
                tone: r.tone,
                length: r.length,
                created_at: r.created_at,
            })
            .collect())
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ScriptedReply {
    Text(String),
    Empty,
    Status(u16),
    Transport,
}

/// What the provider was last asked.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeenCall {
    pub(crate) system_prompt: Option<String>,
    pub(crate) message: String,
    pub(crate) model: String,
    pub(crate) temperature: f64,
}

pub(crate) struct ScriptedProvider {
    reply: ScriptedReply,
    pub(crate) calls: AtomicUsize,
    pub(crate) last: Mutex<Option<SeenCall>>,
}

impl ScriptedProvider {
    pub(crate) fn new(reply: ScriptedReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self::new(ScriptedReply::Text(text.to_string()))
    }

    pub(crate) fn last_call(&self) -> Option<SeenCall> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat_with_system(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(SeenCall {
            system_prompt: system_prompt.map(str::to_string),
            message: message.to_string(),
            model: model.to_string(),
            temperature,
        });

        let provider = "scripted".to_string();
        match &self.reply {
            ScriptedReply::Text(text) => Ok(text.clone()),
            ScriptedReply::Empty => Err(ProviderError::EmptyCompletion { provider }),
            ScriptedReply::Status(status) => Err(ProviderError::Status {
                provider,
                status: *status,
                body: "upstream error".into(),
            }),
            ScriptedReply::Transport => Err(ProviderError::Transport {
                provider,
                message: "connection refused".into(),
            }),
        }
    }
}
