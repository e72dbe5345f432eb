use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Tweetly.
///
/// Each subsystem defines its own error variant. The generation pipeline
/// never lets these reach the HTTP caller (except `Input`); they exist so
/// the logged-only error channel carries something structured.
#[derive(Debug, Error)]
pub enum TweetlyError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Completion provider ─────────────────────────────────────────────
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    // ── Profile / history stores ────────────────────────────────────────
    #[error("store: {0}")]
    Store(#[from] StoreError),

    // ── Client input ────────────────────────────────────────────────────
    #[error("input: {0}")]
    Input(#[from] InputError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Completion provider errors ─────────────────────────────────────────────

/// Why a completion call produced no usable text.
///
/// `EmptyCompletion` is the only variant for a response that was well formed;
/// every other variant is a transport or provider failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} API key not set")]
    MissingApiKey { provider: String },

    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },

    #[error("{provider} API error ({status}): {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an unreadable body: {message}")]
    Decode { provider: String, message: String },

    #[error("{provider} returned no completion")]
    EmptyCompletion { provider: String },
}

impl ProviderError {
    pub fn is_empty_completion(&self) -> bool {
        matches!(self, Self::EmptyCompletion { .. })
    }
}

// ─── Store errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{backend} request failed: {message}")]
    Remote { backend: String, message: String },

    #[error("{backend} returned an unreadable row: {message}")]
    Decode { backend: String, message: String },
}

// ─── Client input errors ────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Missing or invalid progress input")]
    InvalidProgress,

    #[error("Missing userId")]
    MissingUserId,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, TweetlyError>;
