//! Whole-file read and write helpers used by the file-level operations.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{MagicError, Result};

/// Reads the entire file into memory. Zero-length files are rejected.
pub fn read_whole_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| MagicError::io(path, e))?;
    if data.is_empty() {
        return Err(MagicError::EmptyInput(path.display().to_string()));
    }
    debug!(path = %path.display(), size = data.len(), "file read");
    Ok(data)
}

/// Writes `data` to `path`, replacing any existing file.
pub fn write_whole_file(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, data).map_err(|source| MagicError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), size = data.len(), "file written");
    Ok(())
}
