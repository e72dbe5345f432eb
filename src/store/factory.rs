use super::{HistoryStore, NullStore, PreferenceStore, SqliteStore, SupabaseStore};
use crate::config::{Config, StoreBackend};
use crate::error::{ConfigError, Result};
use std::sync::Arc;

/// The two store handles the gateway needs, backed by the same backend.
#[derive(Clone)]
pub struct Stores {
    pub backend: StoreBackend,
    pub preferences: Arc<dyn PreferenceStore>,
    pub history: Arc<dyn HistoryStore>,
}

impl Stores {
    pub fn from_shared<S>(backend: StoreBackend, store: Arc<S>) -> Self
    where
        S: PreferenceStore + HistoryStore + 'static,
    {
        Self {
            backend,
            preferences: store.clone(),
            history: store,
        }
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::Validation(format!("{field} is not set")).into())
}

pub async fn create_stores(config: &Config) -> Result<Stores> {
    let stores = match config.store.backend {
        StoreBackend::Sqlite => {
            let path = config.sqlite_path();
            let store = SqliteStore::open(&path).await?;
            tracing::info!(path = %path.display(), "using sqlite store");
            Stores::from_shared(StoreBackend::Sqlite, Arc::new(store))
        }
        StoreBackend::Supabase => {
            let url = required(config.store.supabase_url.as_deref(), "store.supabase_url")?;
            let key = required(config.store.supabase_key.as_deref(), "store.supabase_key")?;
            tracing::info!(url, "using supabase store");
            Stores::from_shared(StoreBackend::Supabase, Arc::new(SupabaseStore::new(url, key)))
        }
        StoreBackend::None => {
            tracing::warn!("store backend is 'none'; profiles and history are disabled");
            Stores::from_shared(StoreBackend::None, Arc::new(NullStore))
        }
    };
    Ok(stores)
}
