use super::traits::{GenerationRecord, HistoryStore, PreferenceStore, StoredTweet, UserPreferences};
use crate::error::StoreError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use std::path::Path;
use uuid::Uuid;

const BACKEND: &str = "sqlite";

/// Local profile + history store using a sqlx pool.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file and ensure the schema.
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create store directory: {}", parent.display()))?;
        }

        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&url)
            .await
            .with_context(|| format!("Failed to open store DB: {}", db_path.display()))?;

        Self::new(pool).await
    }

    /// Wrap an existing pool and run migrations.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert or merge a profile. `None` fields keep the stored value.
    pub async fn upsert_preferences(
        &self,
        user_id: &str,
        preferences: &UserPreferences,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO user_profiles (id, default_tone, default_length, emoji_style, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 default_tone   = COALESCE(excluded.default_tone, user_profiles.default_tone),
                 default_length = COALESCE(excluded.default_length, user_profiles.default_length),
                 emoji_style    = COALESCE(excluded.emoji_style, user_profiles.emoji_style),
                 updated_at     = excluded.updated_at",
        )
        .bind(user_id)
        .bind(preferences.default_tone.as_deref())
        .bind(preferences.default_length.as_deref())
        .bind(preferences.emoji_style.as_deref())
        .bind(timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_profiles (
            id             TEXT PRIMARY KEY,
            default_tone   TEXT,
            default_length TEXT,
            emoji_style    TEXT,
            updated_at     TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create user_profiles table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS generated_tweets (
            id         TEXT PRIMARY KEY,
            user_id    TEXT,
            prompt     TEXT NOT NULL,
            tweet      TEXT NOT NULL,
            tone       TEXT NOT NULL,
            length     TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create generated_tweets table")?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_generated_tweets_user
             ON generated_tweets(user_id, created_at)",
    )
    .execute(pool)
    .await
    .context("Failed to create generated_tweets index")?;

    Ok(())
}

/// Fixed-width RFC 3339 so lexical order matches time order.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn row_to_stored_tweet(row: &SqliteRow) -> Result<StoredTweet, StoreError> {
    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| StoreError::Decode {
            backend: BACKEND.to_string(),
            message: format!("created_at '{created_at}': {e}"),
        })?
        .with_timezone(&Utc);

    Ok(StoredTweet {
        id: row.try_get("id")?,
        tweet: row.try_get("tweet")?,
        tone: row.try_get("tone")?,
        length: row.try_get("length")?,
        created_at,
    })
}

#[async_trait]
impl PreferenceStore for SqliteStore {
    async fn load_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<UserPreferences>, StoreError> {
        let row = sqlx::query(
            "SELECT default_tone, default_length, emoji_style
             FROM user_profiles WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| -> Result<UserPreferences, StoreError> {
            Ok(UserPreferences {
                default_tone: row.try_get("default_tone")?,
                default_length: row.try_get("default_length")?,
                emoji_style: row.try_get("emoji_style")?,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl HistoryStore for SqliteStore {
    async fn append(&self, record: &GenerationRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO generated_tweets (id, user_id, prompt, tweet, tone, length, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(record.requester_id.as_deref())
        .bind(&record.source_text)
        .bind(&record.generated_text)
        .bind(&record.tone)
        .bind(&record.length)
        .bind(timestamp(record.created_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<StoredTweet>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, tweet, tone, length, created_at
             FROM generated_tweets
             WHERE user_id = ?
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_stored_tweet).collect()
    }
}
