//! Buffered file-range reads
//!
//! The non-mmap twin of [`crate::region::map_region`]: an ordinary
//! seek-and-read into a caller-owned buffer, for callers that prefer to skip
//! mapping setup on small ranges. Validation (zero-length policy, range
//! bounds, error taxonomy) is identical to the mapped path, so the two are
//! interchangeable and directly comparable in tests.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Read `length` bytes of `path` starting at byte `offset` into a new buffer.
///
/// # Errors
///
/// Same taxonomy as [`crate::region::map_region`]: `NotFound`,
/// `PermissionDenied`, `OutOfRange`, `Io`.
pub fn read_range(path: &Path, offset: u64, length: usize) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| Error::open(path, e))?;

    let metadata = file
        .metadata()
        .map_err(|e| Error::io("reading file metadata", e))?;
    if !metadata.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    if length == 0 {
        return Ok(Vec::new());
    }

    let file_size = metadata.len();
    let end = offset.checked_add(length as u64).unwrap_or(u64::MAX);
    if end > file_size {
        return Err(Error::OutOfRange {
            path: path.to_path_buf(),
            offset,
            length: length as u64,
            file_size,
        });
    }

    file.seek(SeekFrom::Start(offset))
        .map_err(|e| Error::io("seeking to range start", e))?;

    let mut buffer = vec![0u8; length];
    file.read_exact(&mut buffer)
        .map_err(|e| Error::io("reading range", e))?;

    Ok(buffer)
}
