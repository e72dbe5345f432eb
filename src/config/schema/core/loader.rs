use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Load `config.toml`, apply environment overrides and validate.
    ///
    /// An explicit path must exist. Without one, `~/.tweetly/config.toml` is
    /// read when present and defaults are used otherwise.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let data_dir = tweetly_dir()?;
        let config_path = explicit_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read config file {}", config_path.display())
            })?;
            Self::from_toml_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?
        } else if explicit_path.is_some() {
            anyhow::bail!("Config file not found: {}", config_path.display());
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "no config file found, using defaults"
            );
            Self::default()
        };

        config.config_path = config_path;
        config.data_dir = data_dir;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid config TOML")
    }
}

fn tweetly_dir() -> Result<PathBuf> {
    let home = UserDirs::new()
        .map(|u| u.home_dir().to_path_buf())
        .context("Could not find home directory")?;
    Ok(home.join(".tweetly"))
}
