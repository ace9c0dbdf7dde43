// File: src/core/mod.rs

pub mod context;
pub mod engine;
pub mod source;
pub mod syllables;
pub mod tokenizer;
pub mod types;
