use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) =
            std::env::var("TWEETLY_API_KEY").or_else(|_| std::env::var("OPENROUTER_API_KEY"))
            && !key.is_empty()
        {
            self.provider.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("TWEETLY_MODEL")
            && !model.is_empty()
        {
            self.provider.model = model;
        }

        if let Ok(base_url) = std::env::var("TWEETLY_PROVIDER_URL")
            && !base_url.is_empty()
        {
            self.provider.base_url = base_url;
        }

        if let Ok(temp_str) = std::env::var("TWEETLY_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.provider.temperature = temp;
        }

        if let Ok(backend) = std::env::var("TWEETLY_STORE")
            && !backend.is_empty()
        {
            match backend.parse() {
                Ok(parsed) => self.store.backend = parsed,
                Err(e) => tracing::warn!("ignoring TWEETLY_STORE: {e}"),
            }
        }

        if let Ok(path) = std::env::var("TWEETLY_DB_PATH")
            && !path.is_empty()
        {
            self.store.sqlite_path = Some(PathBuf::from(path));
        }

        if let Ok(url) = std::env::var("SUPABASE_URL")
            && !url.is_empty()
        {
            self.store.supabase_url = Some(url);
        }

        if let Ok(key) = std::env::var("SUPABASE_SERVICE_KEY")
            .or_else(|_| std::env::var("SUPABASE_SERVICE_ROLE_KEY"))
            && !key.is_empty()
        {
            self.store.supabase_key = Some(key);
        }

        if let Ok(port_str) = std::env::var("TWEETLY_PORT").or_else(|_| std::env::var("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Ok(host) = std::env::var("TWEETLY_HOST").or_else(|_| std::env::var("HOST"))
            && !host.is_empty()
        {
            self.gateway.host = host;
        }
    }
}
