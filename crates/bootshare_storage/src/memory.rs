//! In-memory retained region.

use crate::error::{check_bounds, StorageResult};
use crate::region::RetainedRegion;
use parking_lot::RwLock;

/// A fixed-size region held in memory.
///
/// This region is suitable for:
/// - Unit and integration tests
/// - Targets where the retained area is plain RAM mapped by the caller
///
/// A fresh region is zero-filled.
///
/// # Example
///
/// ```rust
/// use bootshare_storage::{InMemoryRegion, RetainedRegion};
///
/// let mut region = InMemoryRegion::new(16);
/// region.write(0, &[1, 2, 3]).unwrap();
/// assert_eq!(region.read(0, 4).unwrap(), vec![1, 2, 3, 0]);
/// ```
#[derive(Debug)]
pub struct InMemoryRegion {
    data: RwLock<Vec<u8>>,
}

impl InMemoryRegion {
    /// Creates a zero-filled region of `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            data: RwLock::new(vec![0; capacity]),
        }
    }

    /// Creates a region holding pre-existing contents.
    ///
    /// The capacity is the length of `data`. Useful for simulating the
    /// leftovers of a previous boot cycle.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Returns a copy of the whole region.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }
}

impl RetainedRegion for InMemoryRegion {
    fn clear(&mut self) -> StorageResult<()> {
        self.data.write().fill(0);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.read().len()
    }

    fn read(&self, offset: usize, len: usize) -> StorageResult<Vec<u8>> {
        let data = self.data.read();
        check_bounds(offset, len, data.len())?;
        Ok(data[offset..offset + len].to_vec())
    }

    fn write(&mut self, offset: usize, bytes: &[u8]) -> StorageResult<()> {
        let mut data = self.data.write();
        check_bounds(offset, bytes.len(), data.len())?;
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}
