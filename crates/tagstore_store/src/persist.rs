//! Reading and writing the backing file.
//!
//! Every write is a whole-file rewrite: create (truncating), write, flush.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tagstore_foundation::{Error, Result};

/// Creates the backing file if it does not exist.
///
/// Returns true if the file was created.
///
/// # Errors
///
/// Returns `MissingBackingFile` if the file is absent and cannot be created.
pub fn ensure_exists(path: &Path) -> Result<bool> {
    if path.is_file() {
        return Ok(false);
    }
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| Error::missing_backing_file(path, e))?;
    tracing::warn!(path = %path.display(), "backing file did not exist, created it");
    Ok(true)
}

/// Reads the whole backing file as text.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or is not UTF-8.
pub fn read_document(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| Error::io("open", path, &e))?;
    let mut reader = BufReader::new(file);
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io("read", path, &e))?;
    Ok(text)
}

/// Overwrites the backing file with `text`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io("write to", path, &e))?;
    writer.flush().map_err(|e| Error::io("flush", path, &e))?;
    Ok(())
}
