use chrono::Utc;
use sqlx::Row;
use tempfile::TempDir;
use tweetly::store::{GenerationRecord, HistoryStore, PreferenceStore, SqliteStore};

async fn column_names(store: &SqliteStore, table: &str) -> Vec<String> {
    sqlx::query(&format!("PRAGMA table_info({table})"))
        .fetch_all(store.pool())
        .await
        .unwrap()
        .iter()
        .map(|row| row.get::<String, _>("name"))
        .collect()
}

#[tokio::test]
async fn creates_profile_and_history_tables() {
    let tmp = TempDir::new().unwrap();
    let store = SqliteStore::open(&tmp.path().join("tweetly.db")).await.unwrap();

    let tables: Vec<String> = sqlx::query(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .fetch_all(store.pool())
    .await
    .unwrap()
    .iter()
    .map(|row| row.get("name"))
    .collect();
    assert_eq!(tables, ["generated_tweets", "user_profiles"]);

    assert_eq!(
        column_names(&store, "user_profiles").await,
        ["id", "default_tone", "default_length", "emoji_style", "updated_at"]
    );
    assert_eq!(
        column_names(&store, "generated_tweets").await,
        ["id", "user_id", "prompt", "tweet", "tone", "length", "created_at"]
    );
}

#[tokio::test]
async fn anonymous_records_store_null_user_id() {
    let tmp = TempDir::new().unwrap();
    let store = SqliteStore::open(&tmp.path().join("tweetly.db")).await.unwrap();

    store
        .append(&GenerationRecord {
            requester_id: None,
            source_text: "Shipped login page".into(),
            generated_text: "No tweet generated.".into(),
            tone: "Professional".into(),
            length: "Short".into(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    let row = sqlx::query("SELECT user_id, prompt, tweet FROM generated_tweets")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(row.get::<Option<String>, _>("user_id"), None);
    assert_eq!(row.get::<String, _>("prompt"), "Shipped login page");
    assert_eq!(row.get::<String, _>("tweet"), "No tweet generated.");
}

#[tokio::test]
async fn rows_written_by_hand_are_readable() {
    let tmp = TempDir::new().unwrap();
    let store = SqliteStore::open(&tmp.path().join("tweetly.db")).await.unwrap();

    sqlx::query(
        "INSERT INTO user_profiles (id, default_tone, default_length, emoji_style, updated_at)
         VALUES ('u1', 'Motivational', NULL, 'None', '2025-01-01T00:00:00.000000Z')",
    )
    .execute(store.pool())
    .await
    .unwrap();

    let prefs = store.load_preferences("u1").await.unwrap().unwrap();
    assert_eq!(prefs.default_tone.as_deref(), Some("Motivational"));
    assert_eq!(prefs.default_length, None);
    assert_eq!(prefs.emoji_style.as_deref(), Some("None"));
}
