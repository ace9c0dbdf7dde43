// File: src/config.rs
//! Configuration loaded from a JSON file.
//!
//! Every field has a default, so an empty object `{}` is a valid config.

use crate::error::{PoetError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoetConfig {
    pub generation: GenerationConfig,
    pub service: ServiceConfig,
}

/// Knobs for line and stanza assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Times a line is retried from scratch before giving up.
    pub max_attempts: usize,
    /// Smallest syllable target allowed in a meter.
    pub min_line_syllables: usize,
    /// Fixed RNG seed; random when absent.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 32,
            min_line_syllables: 4,
            seed: None,
        }
    }
}

/// Settings for the free-mode word service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Topic the first word of a free-mode poem is drawn from.
    pub seed_topic: String,
    pub max_results: usize,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.datamuse.com".to_string(),
            seed_topic: "poetry".to_string(),
            max_results: 50,
            timeout_secs: 10,
        }
    }
}

impl PoetConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PoetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PoetError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.generation.validate()?;
        self.service.validate()
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(PoetError::Config(
                "generation.max_attempts must be at least 1".into(),
            ));
        }
        if self.min_line_syllables == 0 {
            return Err(PoetError::Config(
                "generation.min_line_syllables must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(PoetError::Config(
                "service.max_results must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
