// File: src/lib.rs

pub mod config;
pub mod core;
pub mod datamuse;
pub mod error;
pub mod learning;
pub mod persistence;

pub use crate::core::engine::{ComposeRequest, Poet};
pub use crate::core::syllables::{count_syllables, SyllableCache};
pub use crate::error::{PoetError, Result};
