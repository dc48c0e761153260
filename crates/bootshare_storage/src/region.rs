//! Retained region trait definition.

use crate::error::StorageResult;

/// A fixed-size memory region that is retained across a reset.
///
/// Regions are **opaque byte stores**. The shared-data area owns the layout
/// written into them; a region only moves bytes.
///
/// # Invariants
///
/// - `capacity` never changes for the lifetime of the region
/// - `read` returns exactly the bytes last written at that range
/// - `clear` leaves every byte of the region zeroed
/// - An access that does not fit inside `capacity` fails and modifies nothing
///
/// # Implementors
///
/// - [`super::InMemoryRegion`] - For testing and RAM-backed retention
/// - [`super::FileRegion`] - For retention across process restarts
pub trait RetainedRegion: Send + Sync {
    /// Wipes the region to a known-empty (all zero) state.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be written.
    fn clear(&mut self) -> StorageResult<()>;

    /// Returns the fixed size of the region in bytes.
    fn capacity(&self) -> usize;

    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `offset + len` exceeds the capacity
    /// - An I/O error occurs
    fn read(&self, offset: usize, len: usize) -> StorageResult<Vec<u8>>;

    /// Writes `data` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `offset + data.len()` exceeds the capacity
    /// - An I/O error occurs
    fn write(&mut self, offset: usize, data: &[u8]) -> StorageResult<()>;
}

impl<R: RetainedRegion + ?Sized> RetainedRegion for &mut R {
    fn clear(&mut self) -> StorageResult<()> {
        (**self).clear()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&self, offset: usize, len: usize) -> StorageResult<Vec<u8>> {
        (**self).read(offset, len)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> StorageResult<()> {
        (**self).write(offset, data)
    }
}

impl<R: RetainedRegion + ?Sized> RetainedRegion for Box<R> {
    fn clear(&mut self) -> StorageResult<()> {
        (**self).clear()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&self, offset: usize, len: usize) -> StorageResult<Vec<u8>> {
        (**self).read(offset, len)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> StorageResult<()> {
        (**self).write(offset, data)
    }
}
