// File: src/learning.rs
use crate::core::{context::ContextModel, tokenizer::tokenize};
use crate::error::Result;
use std::path::Path;
use tracing::{debug, info};

/// Feeds source texts into a context model, one document at a time.
#[derive(Debug, Default)]
pub struct Learner;

impl Learner {
    pub fn new() -> Self {
        Self
    }

    /// Tokenizes `text` and learns it as one document. Returns the tokens added.
    pub fn learn_text(&self, model: &mut ContextModel, text: &str) -> usize {
        let tokens = tokenize(text);
        for token in &tokens {
            model.add_word(token);
        }
        model.end_document();
        debug!(tokens = tokens.len(), "learned document");
        tokens.len()
    }

    /// Learns an already tokenized document. Tokens are normalized the same way
    /// raw text is, so punctuation tokens vanish and contractions are lower-cased.
    pub fn learn_tokens<I, S>(&self, model: &mut ContextModel, tokens: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for token in tokens {
            for word in tokenize(token.as_ref()) {
                model.add_word(&word);
                added += 1;
            }
        }
        model.end_document();
        debug!(tokens = added, "learned token stream");
        added
    }

    pub fn learn_file(&self, model: &mut ContextModel, path: &Path) -> Result<usize> {
        let text = std::fs::read_to_string(path)?;
        let added = self.learn_text(model, &text);
        info!(path = %path.display(), tokens = added, "learned file");
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn learns_text_as_one_document() {
        let mut model = ContextModel::new();
        let added = Learner::new().learn_text(&mut model, "Winter, winter! Snow falls.");

        assert_eq!(added, 4);
        assert_eq!(model.frequency("winter"), 2);
        assert_eq!(
            model.successors("winter"),
            vec![("winter".to_string(), 1), ("snow".to_string(), 1)]
        );
    }

    #[test]
    fn token_streams_drop_punctuation_tokens() {
        let mut model = ContextModel::new();
        let added = Learner::new().learn_tokens(&mut model, ["The", ",", "Sea", "'s", "edge", "."]);

        assert_eq!(added, 4);
        assert_eq!(model.successors("the"), vec![("sea".to_string(), 1)]);
        assert_eq!(model.successors("sea"), vec![("s".to_string(), 1)]);
    }

    #[test]
    fn learns_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a quiet night\nthe quiet sea").unwrap();

        let mut model = ContextModel::new();
        let added = Learner::new().learn_file(&mut model, file.path()).unwrap();

        assert_eq!(added, 6);
        assert_eq!(model.frequency("quiet"), 2);
        assert_eq!(model.successors("night"), vec![("the".to_string(), 1)]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut model = ContextModel::new();
        let err = Learner::new()
            .learn_file(&mut model, Path::new("/nonexistent/corpus.txt"))
            .unwrap_err();
        assert!(matches!(err, crate::error::PoetError::Io(_)));
    }
}
