//! File I/O utilities with atomic writes
//!
//! Provides file operations that won't corrupt data on failure. Every helper
//! opens its file, does one job and drops the handle before returning.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::LedgerError;

/// Path of the temp file used while rewriting `path`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("ledger"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn ensure_parent(path: &Path) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Replace the contents of `path` atomically (write to temp, sync, then rename)
///
/// The file is either completely rewritten or not modified at all.
pub fn write_atomic<P, F>(path: P, write: F) -> Result<(), LedgerError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), LedgerError>,
{
    let path = path.as_ref();
    ensure_parent(path)?;

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let result = (|| {
        let file = File::create(&temp_path)
            .map_err(|e| LedgerError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        write(&mut writer)?;

        writer
            .flush()
            .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, path)
            .map_err(|e| LedgerError::Storage(format!("Failed to rename temp file: {}", e)))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Append to `path`, creating it if needed, and sync before returning
///
/// If the existing content does not end with a newline one is inserted first
/// so the appended data starts on its own line.
pub fn append_to<P, F>(path: P, write: F) -> Result<(), LedgerError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> Result<(), LedgerError>,
{
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    if !ends_with_newline(&mut file)? {
        file.write_all(b"\n")
            .map_err(|e| LedgerError::Storage(format!("Failed to write: {}", e)))?;
    }

    write(&mut file)?;

    file.flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e)))?;
    file.sync_all()
        .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

/// True for empty files and files whose last byte is `\n`
fn ends_with_newline(file: &mut File) -> Result<bool, LedgerError> {
    let len = file
        .metadata()
        .map_err(|e| LedgerError::Storage(format!("Failed to stat file: {}", e)))?
        .len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))
        .and_then(|_| file.read_exact(&mut last))
        .map_err(|e| LedgerError::Storage(format!("Failed to read file: {}", e)))?;

    Ok(last[0] == b'\n')
}
