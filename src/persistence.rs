// File: src/persistence.rs
use crate::error::Result;
use crate::fuzzy::symspell::TermIndex;
use crate::scoring::TrainedScorer;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Writes `value` as bincode next to `path`, then renames it into place so a
/// reader never sees a half-written file.
fn save_snapshot<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, value)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn load_snapshot<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(bincode::deserialize_from(reader)?)
}

pub fn save_index(index: &TermIndex, path: &Path) -> Result<()> {
    save_snapshot(index, path)?;
    info!(path = %path.display(), terms = index.len(), "saved index");
    Ok(())
}

/// The measurer pool is not part of the snapshot; a fresh one is sized to
/// the machine that loads it.
pub fn load_index(path: &Path) -> Result<TermIndex> {
    let index: TermIndex = load_snapshot(path)?;
    index.config().validate()?;
    info!(path = %path.display(), terms = index.len(), "loaded index");
    Ok(index)
}

pub fn save_scorer(scorer: &TrainedScorer, path: &Path) -> Result<()> {
    save_snapshot(scorer, path)?;
    info!(path = %path.display(), kind = scorer.kind(), "saved scorer");
    Ok(())
}

pub fn load_scorer(path: &Path) -> Result<TrainedScorer> {
    let scorer: TrainedScorer = load_snapshot(path)?;
    info!(path = %path.display(), kind = scorer.kind(), "loaded scorer");
    Ok(scorer)
}
