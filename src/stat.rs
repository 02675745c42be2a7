//! File metadata queries

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Size and modification time of a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// File size in bytes
    pub size: u64,

    /// Modification time as whole seconds since the Unix epoch
    /// (negative for pre-epoch timestamps)
    pub mtime: i64,
}

/// Query size and modification time of the regular file at `path`.
///
/// # Errors
///
/// `NotFound` if the path does not resolve to a regular file,
/// `PermissionDenied` or `Io` per the underlying platform error.
pub fn file_stats(path: &Path) -> Result<FileStats> {
    let metadata = std::fs::metadata(path).map_err(|e| Error::open(path, e))?;
    if !metadata.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    let modified = metadata
        .modified()
        .map_err(|e| Error::io("reading modification time", e))?;
    let mtime = match modified.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    };

    Ok(FileStats {
        size: metadata.len(),
        mtime,
    })
}
