//! The tweet-generation pipeline.
//!
//! Request flow is strictly linear: [`GenerationRequest`] validation →
//! [`PreferenceResolver`] → [`build_prompt`] → [`CompletionClient`] →
//! history write → [`GeneratedTweet`].

pub mod completion;
pub mod orchestrator;
pub mod preferences;
pub mod prompt;
pub mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use completion::{
    CompletionClient, CompletionOutcome, EMPTY_SENTINEL, FAILED_SENTINEL, SYSTEM_PROMPT,
};
pub use orchestrator::{GeneratedTweet, TweetGenerator};
pub use preferences::{
    FALLBACK_EMOJI_STYLE, FALLBACK_LENGTH, FALLBACK_TONE, PreferenceResolver, ResolvedParameters,
};
pub use prompt::{RenderedPrompt, build_prompt};
pub use request::GenerationRequest;
