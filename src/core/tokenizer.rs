// File: src/core/tokenizer.rs
use regex::Regex;
use std::sync::OnceLock;

/// Letters, optionally joined by one hyphen and/or one apostrophe.
const TOKEN_PATTERN: &str = r"[a-zA-Z]+-?'?[a-zA-Z]*";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Splits raw text into lower-cased word tokens, dropping digits and punctuation.
pub fn tokenize(text: &str) -> Vec<String> {
    token_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
