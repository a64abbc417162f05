//! Scrubs API keys and bearer tokens from strings before they are logged or
//! shown to a user.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[A-Za-z0-9_\-]{16,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_keys_and_bearer_tokens() {
        let raw = "Incorrect API key provided: sk-proj-abcDEF1234567890_xyz. \
                   Header was Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("sk-proj-abcDEF1234567890_xyz"));
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
        assert!(clean.starts_with("Incorrect API key provided: [REDACTED_TOKEN]"));
    }

    #[test]
    fn leaves_plain_text_alone() {
        let raw = "model API returned 500: upstream overloaded";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
