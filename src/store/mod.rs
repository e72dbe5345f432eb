//! Profile and history persistence.
//!
//! The generation pipeline reads one [`UserPreferences`] row and appends one
//! [`GenerationRecord`] per request. Listing history back to the user is a
//! separate read path that the pipeline never touches.

pub mod factory;
pub mod null;
pub mod sqlite;
pub mod supabase;
pub mod traits;

pub use factory::{Stores, create_stores};
pub use null::NullStore;
pub use sqlite::SqliteStore;
pub use supabase::SupabaseStore;
pub use traits::{GenerationRecord, HistoryStore, PreferenceStore, StoredTweet, UserPreferences};
