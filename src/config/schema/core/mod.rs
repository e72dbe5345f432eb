mod env_overrides;
mod loader;

use super::{GatewayConfig, ProviderConfig, StoreBackend, StoreConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Directory for local state - computed from home, not serialized
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Config {
    /// Resolved SQLite database file for the `sqlite` backend.
    pub fn sqlite_path(&self) -> PathBuf {
        self.store
            .sqlite_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("tweetly.db"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let provider = &self.provider;
        if !(0.0..=2.0).contains(&provider.temperature) {
            return Err(ConfigError::Validation(format!(
                "provider.temperature must be within 0.0..=2.0 (got {})",
                provider.temperature
            )));
        }
        if provider.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "provider.timeout_secs must be greater than zero".into(),
            ));
        }
        if provider.model.trim().is_empty() {
            return Err(ConfigError::Validation("provider.model is empty".into()));
        }
        parse_http_url("provider.base_url", &provider.base_url)?;

        if self.store.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "store.timeout_secs must be greater than zero".into(),
            ));
        }

        // One preference read, one completion and one history write per request.
        let worst_case = provider
            .timeout_secs
            .saturating_add(self.store.timeout_secs.saturating_mul(2));
        if self.gateway.request_timeout_secs <= worst_case {
            return Err(ConfigError::Validation(format!(
                "gateway.request_timeout_secs ({}) must exceed provider.timeout_secs ({}) plus twice store.timeout_secs ({})",
                self.gateway.request_timeout_secs, provider.timeout_secs, self.store.timeout_secs
            )));
        }

        if self.store.backend == StoreBackend::Supabase {
            let url = self.store.supabase_url.as_deref().ok_or_else(|| {
                ConfigError::Validation(
                    "store.supabase_url is required for the supabase backend".into(),
                )
            })?;
            parse_http_url("store.supabase_url", url)?;
            if self
                .store
                .supabase_key
                .as_deref()
                .is_none_or(|key| key.trim().is_empty())
            {
                return Err(ConfigError::Validation(
                    "store.supabase_key is required for the supabase backend".into(),
                ));
            }
        }

        Ok(())
    }
}

fn parse_http_url(field: &str, raw: &str) -> Result<url::Url, ConfigError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::Validation(format!("{field} is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{field} must use http or https (got {})",
            parsed.scheme()
        )));
    }
    Ok(parsed)
}
