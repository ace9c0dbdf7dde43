// File: src/core/context.rs
use crate::core::source::WordSource;
use crate::core::types::{Candidate, WordEntry, WordId};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Word adjacency learned from source texts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextModel {
    words: Vec<WordEntry>,
    index: HashMap<String, WordId>,
    /// Maps prev_word_id -> (next_word_id -> frequency)
    bigrams: HashMap<WordId, BTreeMap<WordId, u64>>,
    /// Last word of the document currently being learned.
    #[serde(skip)]
    previous: Option<WordId>,
}

impl ContextModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_or_create(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.index.get(word) {
            return id;
        }
        let id = self.words.len();
        self.words.push(WordEntry {
            text: word.to_string(),
            frequency: 0,
        });
        self.index.insert(word.to_string(), id);
        id
    }

    /// Adds the next token of the current document and updates bigram counts.
    /// O(1) amortized complexity.
    pub fn add_word(&mut self, word: &str) {
        let word_id = self.get_or_create(word);
        self.words[word_id].frequency += 1;

        if let Some(prev_word_id) = self.previous {
            *self
                .bigrams
                .entry(prev_word_id)
                .or_default()
                .entry(word_id)
                .or_insert(0) += 1;
        }
        self.previous = Some(word_id);
    }

    /// Ends the current document; the next word starts a fresh chain.
    pub fn end_document(&mut self) {
        self.previous = None;
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of tokens learned.
    pub fn word_count(&self) -> u64 {
        self.words.iter().map(|w| w.frequency).sum()
    }

    /// Number of distinct words.
    pub fn vocabulary_len(&self) -> usize {
        self.words.len()
    }

    pub fn frequency(&self, word: &str) -> u64 {
        self.index
            .get(word)
            .map(|&id| self.words[id].frequency)
            .unwrap_or(0)
    }

    /// Words seen directly after `word`, with how often, in vocabulary order.
    pub fn successors(&self, word: &str) -> Vec<(String, u64)> {
        let Some(&word_id) = self.index.get(word) else {
            return vec![];
        };
        self.bigrams
            .get(&word_id)
            .map(|next| {
                next.iter()
                    .map(|(&id, &count)| (self.words[id].text.clone(), count))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checks that every stored id points into the vocabulary and that the
    /// index agrees with it. Models read from disk must pass before use.
    pub fn check_consistency(&self) -> std::result::Result<(), String> {
        let len = self.words.len();
        if self.index.len() != len {
            return Err(format!(
                "index has {} entries for {} words",
                self.index.len(),
                len
            ));
        }
        for (text, &id) in &self.index {
            if self.words.get(id).map(|w| &w.text) != Some(text) {
                return Err(format!("index entry {text:?} points at word {id}"));
            }
        }
        for (&prev, next) in &self.bigrams {
            if prev >= len {
                return Err(format!("bigram source {prev} out of range ({len} words)"));
            }
            if let Some(&id) = next.keys().find(|&&id| id >= len) {
                return Err(format!("bigram target {id} out of range ({len} words)"));
            }
        }
        Ok(())
    }
}

impl WordSource for ContextModel {
    fn starting_words(&mut self) -> Result<Vec<Candidate>> {
        Ok(self
            .words
            .iter()
            .map(|w| Candidate::new(w.text.clone(), w.frequency))
            .collect())
    }

    fn next_words(&mut self, previous: &str) -> Result<Vec<Candidate>> {
        Ok(self
            .successors(previous)
            .into_iter()
            .map(|(word, count)| Candidate::new(word, count))
            .collect())
    }
}
