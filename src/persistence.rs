// File: src/persistence.rs
use crate::core::context::ContextModel;
use crate::error::{PoetError, Result};
use bincode::Options;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

const FORMAT_VERSION: u32 = 1;

/// The serializable state of a learned model.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableState {
    version: u32,
    context_model: ContextModel,
}

#[derive(serde::Serialize)]
struct SerializableStateRef<'a> {
    version: u32,
    context_model: &'a ContextModel,
}

/// Writes `model` to `path` atomically: a temp file in the same directory is
/// persisted over the destination only once fully written.
pub fn save_to_disk(model: &ContextModel, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let state = SerializableStateRef {
        version: FORMAT_VERSION,
        context_model: model,
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(&temp_file);
    bincode::serialize_into(&mut writer, &state)?;
    writer.flush()?;
    drop(writer);

    temp_file
        .persist(path)
        .map_err(|e| PoetError::Persistence(format!("cannot replace {}: {}", path.display(), e)))?;
    info!(path = %path.display(), words = model.vocabulary_len(), "model saved");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<ContextModel> {
    let file = File::open(path)?;
    // No length prefix may claim more bytes than the file holds.
    let limit = file.metadata()?.len();
    let reader = BufReader::new(file);
    let state: SerializableState = bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(limit)
        .deserialize_from(reader)?;
    if state.version != FORMAT_VERSION {
        return Err(PoetError::Persistence(format!(
            "{} has format version {}, expected {}",
            path.display(),
            state.version,
            FORMAT_VERSION
        )));
    }
    state
        .context_model
        .check_consistency()
        .map_err(|e| PoetError::Persistence(format!("{} is inconsistent: {}", path.display(), e)))?;
    debug!(path = %path.display(), words = state.context_model.vocabulary_len(), "model loaded");
    Ok(state.context_model)
}

/// Loads the model at `path`, or starts an empty one if the file does not exist.
pub fn load_or_new(path: &Path) -> Result<ContextModel> {
    match load_from_disk(path) {
        Ok(model) => Ok(model),
        Err(PoetError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved model, starting empty");
            Ok(ContextModel::new())
        }
        Err(e) => Err(e),
    }
}
