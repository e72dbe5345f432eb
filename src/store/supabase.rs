use super::traits::{GenerationRecord, HistoryStore, PreferenceStore, StoredTweet, UserPreferences};
use crate::error::StoreError;
use crate::providers::http_client::build_client_with_timeout;
use crate::providers::sanitize_api_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const BACKEND: &str = "supabase";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Talks to the Supabase PostgREST API for the `user_profiles` and
/// `generated_tweets` tables.
pub struct SupabaseStore {
    rest_url: String,
    service_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct NewTweetRow<'a> {
    user_id: Option<&'a str>,
    prompt: &'a str,
    tweet: &'a str,
    tone: &'a str,
    length: &'a str,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TweetRow {
    id: Value,
    tweet: String,
    #[serde(default)]
    tone: Option<String>,
    #[serde(default)]
    length: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<TweetRow> for StoredTweet {
    fn from(row: TweetRow) -> Self {
        // Supabase ids may be uuid strings or bigint identities.
        let id = match row.id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Self {
            id,
            tweet: row.tweet,
            tone: row.tone.unwrap_or_default(),
            length: row.length.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

impl SupabaseStore {
    pub fn new(project_url: &str, service_key: &str) -> Self {
        Self {
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            service_key: service_key.to_string(),
            client: build_client_with_timeout(REQUEST_TIMEOUT_SECS),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    fn remote_error(message: impl Into<String>) -> StoreError {
        StoreError::Remote {
            backend: BACKEND.to_string(),
            message: message.into(),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| Self::remote_error(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::remote_error(format!(
            "HTTP {status}: {}",
            sanitize_api_error(&body)
        )))
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .send(self.client.get(self.table_url(table)).query(query))
            .await?;
        response.json().await.map_err(|e| StoreError::Decode {
            backend: BACKEND.to_string(),
            message: format!("{table}: {e}"),
        })
    }
}

#[async_trait]
impl PreferenceStore for SupabaseStore {
    async fn load_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<UserPreferences>, StoreError> {
        let filter = format!("eq.{user_id}");
        let rows: Vec<UserPreferences> = self
            .fetch_rows(
                "user_profiles",
                &[
                    ("id", filter.as_str()),
                    ("select", "default_tone,default_length,emoji_style"),
                    ("limit", "1"),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl HistoryStore for SupabaseStore {
    async fn append(&self, record: &GenerationRecord) -> Result<(), StoreError> {
        let rows = [NewTweetRow {
            user_id: record.requester_id.as_deref(),
            prompt: &record.source_text,
            tweet: &record.generated_text,
            tone: &record.tone,
            length: &record.length,
            created_at: record.created_at,
        }];

        self.send(
            self.client
                .post(self.table_url("generated_tweets"))
                .header("Prefer", "return=minimal")
                .json(&rows),
        )
        .await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<StoredTweet>, StoreError> {
        let filter = format!("eq.{user_id}");
        let rows: Vec<TweetRow> = self
            .fetch_rows(
                "generated_tweets",
                &[
                    ("user_id", filter.as_str()),
                    ("select", "id,tweet,tone,length,created_at"),
                    ("order", "created_at.desc"),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(StoredTweet::from).collect())
    }
}
