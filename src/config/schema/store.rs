use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where user profiles and generated tweets live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Supabase,
    None,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Supabase => "supabase",
            Self::None => "none",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "supabase" => Ok(Self::Supabase),
            "none" => Ok(Self::None),
            other => Err(format!(
                "Unknown store backend '{other}'. Supported: sqlite, supabase, none"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// SQLite file; defaults to `<data dir>/tweetly.db`
    #[serde(default)]
    pub sqlite_path: Option<PathBuf>,
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub supabase_url: Option<String>,
    /// Service-role key used for both `apikey` and bearer auth
    #[serde(default)]
    pub supabase_key: Option<String>,
    /// Upper bound on each preference read and history write
    #[serde(default = "default_store_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_store_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            sqlite_path: None,
            supabase_url: None,
            supabase_key: None,
            timeout_secs: default_store_timeout_secs(),
        }
    }
}
