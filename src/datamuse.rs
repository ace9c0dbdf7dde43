// File: src/datamuse.rs
use crate::config::ServiceConfig;
use crate::core::source::WordSource;
use crate::core::types::Candidate;
use crate::error::{PoetError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// One entry of a Datamuse `/words` response.
#[derive(Debug, Deserialize)]
struct DatamuseWord {
    word: String,
    #[serde(default)]
    score: Option<u64>,
}

/// Free-mode word source backed by the Datamuse word-finding API.
///
/// Chains start from words meaning like the configured topic (`ml=`) and
/// continue with frequent followers of the previous word (`rel_bga=`).
pub struct DatamuseSource {
    client: Client,
    base_url: String,
    seed_topic: String,
    max_results: usize,
}

impl DatamuseSource {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            seed_topic: config.seed_topic.clone(),
            max_results: config.max_results,
        })
    }

    fn query(&self, relation: &str, word: &str) -> Result<Vec<Candidate>> {
        let url = format!("{}/words", self.base_url);
        let max = self.max_results.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[(relation, word), ("max", max.as_str())])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PoetError::Service(format!(
                "{relation}={word} answered with {status}"
            )));
        }
        let body = response.text()?;
        let candidates = parse_words(&body)?;
        debug!(relation, word, candidates = candidates.len(), "word service query");
        Ok(candidates)
    }
}

/// Decodes a `/words` response, keeping single words only.
pub fn parse_words(body: &str) -> Result<Vec<Candidate>> {
    let entries: Vec<DatamuseWord> = serde_json::from_str(body)
        .map_err(|e| PoetError::Service(format!("malformed response: {e}")))?;
    Ok(entries
        .into_iter()
        .filter(|entry| !entry.word.is_empty() && !entry.word.contains(char::is_whitespace))
        .map(|entry| Candidate::new(entry.word, entry.score.unwrap_or(1).max(1)))
        .collect())
}

impl WordSource for DatamuseSource {
    fn starting_words(&mut self) -> Result<Vec<Candidate>> {
        self.query("ml", &self.seed_topic)
    }

    fn next_words(&mut self, previous: &str) -> Result<Vec<Candidate>> {
        self.query("rel_bga", previous)
    }
}
