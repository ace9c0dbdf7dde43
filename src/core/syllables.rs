// File: src/core/syllables.rs
use std::collections::HashMap;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Estimates the number of syllables in an English word from its spelling alone.
///
/// Only alphabetic characters are considered (lower-cased); digits and
/// punctuation are ignored. Each transition out of a vowel run counts as one
/// syllable, a trailing vowel other than `e` adds one, and a trailing `e`
/// adds one only when at least one letter separates it from the last counted
/// boundary. Any word containing a letter has at least one syllable.
///
/// ```
/// use poet_core::count_syllables;
///
/// assert_eq!(count_syllables("syllable"), 3);
/// assert_eq!(count_syllables("clone"), 1);
/// assert_eq!(count_syllables("42"), 0);
/// ```
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
        .collect();

    match letters.len() {
        0 => return 0,
        1 | 2 => return 1,
        _ => {}
    }

    let last = letters.len() - 1;
    let mut count = 0;
    let mut last_syllable_index = 0;
    for (i, &letter) in letters.iter().enumerate() {
        if !is_vowel(letter) {
            if i > 0 && is_vowel(letters[i - 1]) {
                count += 1;
                last_syllable_index = i;
            }
        } else if i == last && (letter != 'e' || i - last_syllable_index >= 2) {
            count += 1;
        }
    }

    count.max(1)
}

/// Per-session memo of syllable estimates, owned by whoever drives generation.
#[derive(Debug, Clone, Default)]
pub struct SyllableCache {
    counts: HashMap<String, usize>,
}

impl SyllableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the estimate for `word`, computing and storing it on first use.
    pub fn count(&mut self, word: &str) -> usize {
        if let Some(&count) = self.counts.get(word) {
            return count;
        }
        let count = count_syllables(word);
        self.counts.insert(word.to_string(), count);
        count
    }

    /// Looks up a previously computed estimate without inserting.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
