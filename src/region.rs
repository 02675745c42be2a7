//! Alignment-aware memory-mapped file region access
//!
//! This module maps an arbitrary byte range of a file into memory and hands
//! out a reference-counted view of exactly the requested bytes. Mapping
//! primitives require the starting file offset to be a multiple of the
//! platform allocation granularity, so an unaligned request is satisfied by
//! mapping a larger aligned window and slicing the caller's range out of it.
//!
//! A shared (read) lock is held across the validate-and-map window so that
//! cooperating processes cannot truncate the file between the size check and
//! the map call. The lock is released together with the file descriptor as
//! soon as the mapping is established; the mapping itself keeps the data
//! available independent of the descriptor.

use crate::error::{Error, Result};
#[allow(unused_imports)]
use fs2::FileExt; // Provides lock_shared() on File
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::ops::Deref;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Platform allocation granularity: the minimum alignment for the starting
/// offset of a memory mapping. Queried once from the OS and cached; never
/// hard-coded, since it varies by platform (4096 on most Unixes, 65536 on
/// Windows).
pub fn allocation_granularity() -> u64 {
    static GRANULARITY: OnceLock<u64> = OnceLock::new();
    *GRANULARITY.get_or_init(query_granularity)
}

#[cfg(unix)]
fn query_granularity() -> u64 {
    // Safety: sysconf has no memory-safety preconditions. It only returns -1
    // for unknown names, and _SC_PAGESIZE is defined on every Unix.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as u64
    } else {
        4096
    }
}

#[cfg(windows)]
fn query_granularity() -> u64 {
    use windows_sys::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};

    let mut info: SYSTEM_INFO = unsafe { std::mem::zeroed() };
    // Safety: GetSystemInfo writes a plain struct and cannot fail.
    unsafe { GetSystemInfo(&mut info) };
    info.dwAllocationGranularity as u64
}

/// Aligned mapping window for a requested `(offset, length)` range.
///
/// `aligned_offset` is the largest granularity multiple at or below the
/// requested offset, `padding` the distance back to the requested offset
/// (always in `[0, granularity)`), and `mapped_len` the window size that
/// covers the full requested span from the aligned start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MapWindow {
    pub aligned_offset: u64,
    pub padding: usize,
    pub mapped_len: usize,
}

impl MapWindow {
    /// Returns `None` if the window size overflows `usize`.
    pub(crate) fn for_range(offset: u64, length: usize, granularity: u64) -> Option<Self> {
        let aligned_offset = (offset / granularity) * granularity;
        let padding = (offset - aligned_offset) as usize;
        let mapped_len = length.checked_add(padding)?;
        Some(Self {
            aligned_offset,
            padding,
            mapped_len,
        })
    }
}

/// An owned, reference-counted view into a memory-mapped file region.
///
/// Dereferences to exactly the bytes the caller requested. Clones share the
/// underlying mapping; the mapping (the full aligned window, not the visible
/// sub-range) is unmapped exactly once, when the last clone is dropped.
///
/// Zero-length views carry no mapping at all.
#[derive(Debug, Clone)]
pub struct MappedRegion {
    mmap: Option<Arc<Mmap>>,
    start: usize,
    len: usize,
}

impl MappedRegion {
    /// An empty view backed by no mapping.
    pub fn empty() -> Self {
        Self {
            mmap: None,
            start: 0,
            len: 0,
        }
    }

    /// Length of the view in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The view as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => &mmap[self.start..self.start + self.len],
            None => &[],
        }
    }
}

impl Deref for MappedRegion {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for MappedRegion {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Map `length` bytes of `path` starting at byte `offset`.
///
/// The returned view holds exactly the requested bytes, zero-copy, backed by
/// a private read-only mapping of the covering aligned window. The file
/// descriptor is released before this function returns; the mapping lives
/// until the last clone of the view is dropped.
///
/// A `length` of 0 returns an empty view for any offset, including offsets
/// beyond the end of the file. The path is still opened and validated, so a
/// nonexistent path fails with `NotFound` regardless of `length`.
///
/// # Errors
///
/// - `NotFound` / `PermissionDenied` if the file cannot be opened or is not
///   a regular file
/// - `OutOfRange` if `offset + length` exceeds the file size
/// - `MappingFailed` if the mapping primitive reports failure
pub fn map_region(path: &Path, offset: u64, length: usize) -> Result<MappedRegion> {
    let file = File::open(path).map_err(|e| Error::open(path, e))?;

    // Shared lock across the size check and the map call, so a cooperating
    // writer cannot truncate the range out from under us in between. Released
    // with the descriptor once the mapping exists.
    file.lock_shared()
        .map_err(|e| Error::io("acquiring shared file lock", e))?;

    let metadata = file
        .metadata()
        .map_err(|e| Error::io("reading file metadata", e))?;
    if !metadata.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    if length == 0 {
        return Ok(MappedRegion::empty());
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

    let window = MapWindow::for_range(offset, length, allocation_granularity()).ok_or(
        Error::OutOfRange {
            path: path.to_path_buf(),
            offset,
            length: length as u64,
            file_size,
        },
    )?;

    // Safety: read-only private (copy-on-write) mapping of a regular file we
    // hold a shared lock on. The window stays within the file: its end equals
    // offset + length, which was just validated against the file size.
    let mmap = unsafe {
        MmapOptions::new()
            .offset(window.aligned_offset)
            .len(window.mapped_len)
            .map_copy_read_only(&file)
    }
    .map_err(|e| Error::mapping(format!("mapping {}", path.display()), e))?;

    // Descriptor (and lock) released here; the mapping keeps the data alive.
    drop(file);

    Ok(MappedRegion {
        mmap: Some(Arc::new(mmap)),
        start: window.padding,
        len: length,
    })
}
