//! File I/O for the command-line tool.
//!
//! Output is written to a temporary file next to the destination and only
//! renamed over it once every byte is on disk. A failed run therefore leaves
//! either the previous file or nothing, never a partial one.

use std::fs;
use std::io::Write;
use std::path::Path;

use huffpack_core::{Error, Result};
use tempfile::NamedTempFile;

/// Read a whole file into memory.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Write `bytes` to `path` atomically.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
