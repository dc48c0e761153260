//! Test fixtures for regions and areas.

use bootshare_core::tlv::{decode_area, Entry};
use bootshare_core::SharedArea;
use bootshare_storage::{FileRegion, InMemoryRegion, RetainedRegion};
use std::path::PathBuf;
use tempfile::TempDir;

/// A file-backed region in a temporary directory.
pub struct TempRegion {
    /// The region.
    pub region: FileRegion,
    /// Kept alive to prevent cleanup.
    _temp_dir: TempDir,
}

impl TempRegion {
    /// Creates a region file of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("retained.bin");
        let region = FileRegion::open(&path, capacity).expect("Failed to create region file");
        Self {
            region,
            _temp_dir: temp_dir,
        }
    }

    /// Path of the region file.
    pub fn path(&self) -> PathBuf {
        self.region.path().to_path_buf()
    }
}

/// Creates a fresh area over a zeroed in-memory region.
pub fn memory_area(capacity: usize) -> SharedArea<InMemoryRegion> {
    SharedArea::new(InMemoryRegion::new(capacity))
}

/// Reads the whole region and decodes its entries.
///
/// Panics if the region does not hold a valid area.
pub fn decoded_entries<R: RetainedRegion>(region: &R) -> Vec<Entry> {
    let data = region
        .read(0, region.capacity())
        .expect("Failed to read region");
    decode_area(&data).expect("Region does not hold a valid area")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_region_has_capacity() {
        let temp = TempRegion::new(32);
        assert_eq!(temp.region.capacity(), 32);
        assert!(temp.path().exists());
    }

    #[test]
    fn decoded_entries_after_append() {
        let mut area = memory_area(32);
        area.append_raw(1, 2, &[3]).unwrap();
        let entries = decoded_entries(area.region());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].payload, vec![3]);
    }
}
