use crate::error::ProviderError;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Markers whose trailing token is a credential. Order matters: longer
/// prefixes must come before the prefixes they extend.
const SECRET_MARKERS: [&str; 10] = [
    "sk-or-v1-",
    "sk-",
    "eyJ",
    "Bearer ",
    "bearer ",
    "apikey=",
    "api_key=",
    "\"apikey\":\"",
    "\"api_key\":\"",
    "\"access_token\":\"",
];

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn redact_marker(text: &mut String, marker: &str) {
    let mut cursor = 0;
    while let Some(offset) = text[cursor..].find(marker) {
        let start = cursor + offset;
        let token_start = start + marker.len();
        let token_len: usize = text[token_start..]
            .chars()
            .take_while(|c| is_token_char(*c))
            .map(char::len_utf8)
            .sum();

        if token_len == 0 {
            cursor = token_start;
            continue;
        }

        text.replace_range(start..token_start + token_len, REDACTED);
        cursor = start + REDACTED.len();
    }
}

/// Redact API keys, JWTs and bearer tokens from provider output.
pub fn scrub_secrets(input: &str) -> String {
    let mut scrubbed = input.to_string();
    for marker in SECRET_MARKERS {
        if scrubbed.contains(marker) {
            redact_marker(&mut scrubbed, marker);
        }
    }
    scrubbed
}

/// Scrub secrets, then cap the length so error bodies stay log-sized.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secrets(input);
    match scrubbed.char_indices().nth(MAX_API_ERROR_CHARS) {
        Some((cut, _)) => format!("{}...", &scrubbed[..cut]),
        None => scrubbed,
    }
}

/// Build a [`ProviderError::Status`] from a non-2xx response.
pub async fn api_error(provider: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    ProviderError::Status {
        provider: provider.to_string(),
        status,
        body: sanitize_api_error(&body),
    }
}
