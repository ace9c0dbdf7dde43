// File: src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a distinct word inside a context model's vocabulary.
pub type WordId = usize;

/// A distinct word seen in a source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub text: String,
    /// Number of times the word occurred across all learned documents.
    pub frequency: u64,
}

/// A word offered by a word source, with its selection weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub word: String,
    pub weight: u64,
}

impl Candidate {
    pub fn new(word: impl Into<String>, weight: u64) -> Self {
        Self { word: word.into(), weight }
    }
}

/// Where the poet draws its words from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Word adjacency learned from a source text.
    Contextual,
    /// An external word-association service.
    Free,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Contextual => f.write_str("contextual"),
            Mode::Free => f.write_str("free"),
        }
    }
}

/// The layout of every stanza in a poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StanzaShape {
    /// A fixed number of lines, each with a fixed number of words.
    Words {
        lines_per_stanza: usize,
        words_per_line: usize,
    },
    /// One syllable target per line, e.g. `[5, 7, 5]` for a haiku.
    Meter(Vec<usize>),
}

/// What a single line must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTarget {
    Words(usize),
    Syllables(usize),
}

impl fmt::Display for LineTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineTarget::Words(n) => write!(f, "{n} words"),
            LineTarget::Syllables(n) => write!(f, "{n} syllables"),
        }
    }
}

impl StanzaShape {
    /// Line targets of one stanza, in order.
    pub fn line_targets(&self) -> Vec<LineTarget> {
        match self {
            StanzaShape::Words {
                lines_per_stanza,
                words_per_line,
            } => vec![LineTarget::Words(*words_per_line); *lines_per_stanza],
            StanzaShape::Meter(meter) => meter.iter().map(|&s| LineTarget::Syllables(s)).collect(),
        }
    }
}

/// A generated poem: stanzas of lines of words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub stanzas: Vec<Stanza>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stanza {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub words: Vec<String>,
}

impl Poem {
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.stanzas.iter().flat_map(|s| s.lines.iter())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

impl fmt::Display for Stanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Poem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stanza) in self.stanzas.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{stanza}")?;
        }
        Ok(())
    }
}
