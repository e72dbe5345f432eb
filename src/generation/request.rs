use crate::error::InputError;
use serde_json::Value;

/// A validated generation request.
///
/// `progress_text` is never empty. Empty optional strings are normalized to
/// `None` so they fall through to stored or fallback values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub requester_id: Option<String>,
    pub progress_text: String,
    pub tone: Option<String>,
    pub length: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl GenerationRequest {
    pub fn new(progress_text: impl Into<String>) -> Result<Self, InputError> {
        let progress_text = progress_text.into();
        if progress_text.is_empty() {
            return Err(InputError::InvalidProgress);
        }
        Ok(Self {
            requester_id: None,
            progress_text,
            tone: None,
            length: None,
        })
    }

    pub fn with_requester(mut self, requester_id: Option<String>) -> Self {
        self.requester_id = non_empty(requester_id);
        self
    }

    pub fn with_tone(mut self, tone: Option<String>) -> Self {
        self.tone = non_empty(tone);
        self
    }

    pub fn with_length(mut self, length: Option<String>) -> Self {
        self.length = non_empty(length);
        self
    }

    /// Validate a `POST /generate-tweet` body.
    ///
    /// Only `progress` is checked strictly. A non-string `userId`, `tone` or
    /// `length` is ignored rather than rejected.
    pub fn from_json(body: &Value) -> Result<Self, InputError> {
        let progress = body
            .get("progress")
            .and_then(Value::as_str)
            .ok_or(InputError::InvalidProgress)?;

        Ok(Self::new(progress)?
            .with_requester(string_field(body, "userId"))
            .with_tone(string_field(body, "tone"))
            .with_length(string_field(body, "length")))
    }
}
