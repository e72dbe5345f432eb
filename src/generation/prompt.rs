use super::preferences::ResolvedParameters;
use std::fmt;

/// The instruction sent as the user turn. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt(String);

impl RenderedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the generation instruction. Pure: same inputs, same bytes.
///
/// The hashtag rule is only stated here; enforcing it is left to the model.
pub fn build_prompt(progress_text: &str, params: &ResolvedParameters) -> RenderedPrompt {
    RenderedPrompt(format!(
        "
You are TweetlyBot, an AI that only generates tweet-worthy progress updates.

User progress: {progress_text}
Tone: {tone}
Length: {length}
Emoji Style: {emoji_style}

Your response should be a tweet, written in the user's preferred tone and length. \
Do not include hashtags unless the tone allows it. Never respond to off-topic input.
",
        tone = params.tone,
        length = params.length,
        emoji_style = params.emoji_style,
    ))
}
