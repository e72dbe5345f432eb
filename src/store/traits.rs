use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored defaults for one user (`user_profiles` row).
///
/// Every field is optional; an empty string is treated the same as a
/// missing value by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub default_tone: Option<String>,
    #[serde(default)]
    pub default_length: Option<String>,
    #[serde(default)]
    pub emoji_style: Option<String>,
}

/// One generated tweet, written once and never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub requester_id: Option<String>,
    pub source_text: String,
    pub generated_text: String,
    pub tone: String,
    pub length: String,
    pub created_at: DateTime<Utc>,
}

/// A history row as returned to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTweet {
    pub id: String,
    pub tweet: String,
    pub tone: String,
    pub length: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// At most one row for `user_id`; `Ok(None)` when the user has no profile.
    async fn load_preferences(&self, user_id: &str)
    -> Result<Option<UserPreferences>, StoreError>;
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, record: &GenerationRecord) -> Result<(), StoreError>;

    /// The user's tweets, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<StoredTweet>, StoreError>;
}
