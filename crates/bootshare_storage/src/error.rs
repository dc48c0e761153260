//! Error types for region operations.

use std::io;
use thiserror::Error;

/// Result type for region operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during region operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The access does not fit inside the region.
    #[error("access out of bounds: offset {offset}, len {len}, capacity {capacity}")]
    OutOfBounds {
        /// The requested offset.
        offset: usize,
        /// The requested length.
        len: usize,
        /// The fixed capacity of the region.
        capacity: usize,
    },

    /// The region is no longer usable.
    #[error("region is closed")]
    Closed,
}

/// Checks that `offset..offset + len` lies within `capacity`.
pub(crate) fn check_bounds(offset: usize, len: usize, capacity: usize) -> StorageResult<()> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(StorageError::OutOfBounds {
            offset,
            len,
            capacity,
        }),
    }
}
