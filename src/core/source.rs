// File: src/core/source.rs
use crate::core::types::Candidate;
use crate::error::Result;

/// Supplies candidate words for chaining lines together.
///
/// Implemented by the learned [`ContextModel`](crate::core::context::ContextModel)
/// and by the remote word service used in free mode. An empty list is a valid
/// answer; the engine handles dead ends.
pub trait WordSource {
    /// Words a fresh chain may begin with.
    fn starting_words(&mut self) -> Result<Vec<Candidate>>;

    /// Words that may follow `previous`.
    fn next_words(&mut self, previous: &str) -> Result<Vec<Candidate>>;
}
