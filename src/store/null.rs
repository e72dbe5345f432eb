use super::traits::{GenerationRecord, HistoryStore, PreferenceStore, StoredTweet, UserPreferences};
use crate::error::StoreError;
use async_trait::async_trait;

/// Backend for `store.backend = "none"`: no profiles, history discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

#[async_trait]
impl PreferenceStore for NullStore {
    async fn load_preferences(
        &self,
        _user_id: &str,
    ) -> Result<Option<UserPreferences>, StoreError> {
        Ok(None)
    }
}

#[async_trait]
impl HistoryStore for NullStore {
    async fn append(&self, record: &GenerationRecord) -> Result<(), StoreError> {
        tracing::debug!(
            user_id = record.requester_id.as_deref().unwrap_or("<none>"),
            "history store disabled, dropping generation record"
        );
        Ok(())
    }

    async fn list_for_user(&self, _user_id: &str) -> Result<Vec<StoredTweet>, StoreError> {
        Ok(Vec::new())
    }
}
