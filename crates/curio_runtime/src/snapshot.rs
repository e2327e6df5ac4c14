//! Snapshot serialization and deserialization using JSON.
//!
//! The on-disk format is a single JSON object with `dbEntities` and
//! `dbEntityTypes` keys. JSON keeps snapshots human-inspectable, which
//! matters more here than encoding size; a snapshot is a few kilobytes of
//! record data, not a bulk archive.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use curio_foundation::{Error, Result};
use curio_storage::Snapshot;
use tracing::warn;

/// Serializes a snapshot to a JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string(snapshot).map_err(|e| Error::serialization(e.to_string()))
}

/// Deserializes a snapshot from a JSON string.
///
/// # Errors
///
/// Returns an error if the input is not a valid snapshot document.
pub fn from_json(json: &str) -> Result<Snapshot> {
    serde_json::from_str(json).map_err(|e| Error::serialization(e.to_string()))
}

/// Saves a snapshot to a file as JSON.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| {
        Error::io(format!(
            "failed to create file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    let mut writer = BufWriter::new(file);
    let json = to_json(snapshot)?;

    writer.write_all(json.as_bytes()).map_err(|e| {
        Error::io(format!(
            "failed to write to file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    writer.flush().map_err(|e| {
        Error::io(format!(
            "failed to flush file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    Ok(())
}

/// Loads a snapshot from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let file = File::open(path.as_ref()).map_err(|e| {
        Error::io(format!(
            "failed to open file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    let mut reader = BufReader::new(file);
    let mut json = String::new();

    reader.read_to_string(&mut json).map_err(|e| {
        Error::io(format!(
            "failed to read file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    from_json(&json)
}

/// Loads a snapshot, falling back to an empty one.
///
/// A missing file is the normal first-run case and yields an empty
/// snapshot quietly. An unreadable or unparseable file also yields an
/// empty snapshot, but logs a warning first; the next flush will replace
/// the bad file.
#[must_use]
pub fn load_or_create<P: AsRef<Path>>(path: P) -> Snapshot {
    let path = path.as_ref();
    if !path.exists() {
        return Snapshot::default();
    }
    match load_from_file(path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("discarding unreadable snapshot '{}': {e}", path.display());
            Snapshot::default()
        }
    }
}
