use crate::store::{PreferenceStore, UserPreferences};
use std::sync::Arc;
use std::time::Duration;

pub const FALLBACK_TONE: &str = "Professional";
pub const FALLBACK_LENGTH: &str = "Short";
pub const FALLBACK_EMOJI_STYLE: &str = "Minimal";

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Tone, length and emoji style after precedence is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameters {
    pub tone: String,
    pub length: String,
    pub emoji_style: String,
}

fn pick(explicit: Option<&str>, stored: Option<&str>, fallback: &str) -> String {
    explicit
        .filter(|s| !s.is_empty())
        .or_else(|| stored.filter(|s| !s.is_empty()))
        .unwrap_or(fallback)
        .to_string()
}

impl ResolvedParameters {
    /// explicit > stored > fallback, independently per field.
    pub fn resolve(
        explicit_tone: Option<&str>,
        explicit_length: Option<&str>,
        stored: Option<&UserPreferences>,
    ) -> Self {
        Self {
            tone: pick(
                explicit_tone,
                stored.and_then(|p| p.default_tone.as_deref()),
                FALLBACK_TONE,
            ),
            length: pick(
                explicit_length,
                stored.and_then(|p| p.default_length.as_deref()),
                FALLBACK_LENGTH,
            ),
            emoji_style: pick(
                None,
                stored.and_then(|p| p.emoji_style.as_deref()),
                FALLBACK_EMOJI_STYLE,
            ),
        }
    }
}

/// Looks up stored defaults; never fails.
#[derive(Clone)]
pub struct PreferenceResolver {
    store: Arc<dyn PreferenceStore>,
    timeout: Duration,
}

impl PreferenceResolver {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// A lookup slower than `timeout` is abandoned and fallbacks apply.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn resolve(
        &self,
        requester_id: Option<&str>,
        explicit_tone: Option<&str>,
        explicit_length: Option<&str>,
    ) -> ResolvedParameters {
        let stored = match requester_id {
            None => {
                tracing::debug!("no requester id, skipping preference lookup");
                None
            }
            Some(user_id) => {
                match tokio::time::timeout(self.timeout, self.store.load_preferences(user_id))
                    .await
                {
                    Ok(Ok(Some(prefs))) => Some(prefs),
                    Ok(Ok(None)) => {
                        tracing::info!(user_id, "no stored preferences, using fallbacks");
                        None
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(user_id, error = %e, "preference lookup failed, using fallbacks");
                        None
                    }
                    Err(_) => {
                        tracing::warn!(
                            user_id,
                            timeout = ?self.timeout,
                            "preference lookup timed out, using fallbacks"
                        );
                        None
                    }
                }
            }
        };

        ResolvedParameters::resolve(explicit_tone, explicit_length, stored.as_ref())
    }
}
