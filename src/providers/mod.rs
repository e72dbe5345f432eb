pub mod http_client;
pub mod openrouter;
pub mod scrub;
pub mod traits;

pub use openrouter::OpenRouterProvider;
pub use scrub::{api_error, sanitize_api_error};
pub use traits::CompletionProvider;
