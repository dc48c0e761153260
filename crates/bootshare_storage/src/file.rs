//! File-backed retained region.

use crate::error::{check_bounds, StorageResult};
use crate::region::RetainedRegion;
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Chunk size used when zero-filling the file.
const CLEAR_CHUNK: usize = 4096;

/// A fixed-size region stored in a file.
///
/// This stands in for retained RAM on hosts: bytes written in one process
/// are visible to the next process that opens the same file, the way a
/// bootloader's writes are visible to the application after a reset.
///
/// # Durability
///
/// - `write()` pushes bytes to the OS
/// - `sync()` calls `File::sync_all()` to ensure data is on disk
///
/// # Example
///
/// ```no_run
/// use bootshare_storage::{FileRegion, RetainedRegion};
/// use std::path::Path;
///
/// let mut region = FileRegion::open(Path::new("retained.bin"), 256).unwrap();
/// region.write(0, b"boot").unwrap();
/// region.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FileRegion {
    path: PathBuf,
    file: RwLock<File>,
    capacity: usize,
}

impl FileRegion {
    /// Opens or creates a region file of `capacity` bytes.
    ///
    /// A shorter existing file is zero-extended to `capacity`. A longer one
    /// keeps its length on disk but only the first `capacity` bytes are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, created or resized.
    pub fn open(path: &Path, capacity: usize) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let len = file.metadata()?.len();
        if len < capacity as u64 {
            file.set_len(capacity as u64)?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            capacity,
        })
    }

    /// Opens an existing region file, taking its capacity from the file length.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open_existing(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let capacity = usize::try_from(file.metadata()?.len()).map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "region file larger than addressable memory",
            )
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            capacity,
        })
    }

    /// Opens or creates a region file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot be opened.
    pub fn open_with_create_dirs(path: &Path, capacity: usize) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::open(path, capacity)
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Syncs all data and metadata to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    pub fn sync(&self) -> StorageResult<()> {
        self.file.write().sync_all()?;
        Ok(())
    }
}

impl RetainedRegion for FileRegion {
    fn clear(&mut self) -> StorageResult<()> {
        let mut file = self.file.write();
        file.seek(SeekFrom::Start(0))?;

        let zeros = [0u8; CLEAR_CHUNK];
        let mut remaining = self.capacity;
        while remaining > 0 {
            let n = remaining.min(CLEAR_CHUNK);
            file.write_all(&zeros[..n])?;
            remaining -= n;
        }
        file.flush()?;
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn read(&self, offset: usize, len: usize) -> StorageResult<Vec<u8>> {
        check_bounds(offset, len, self.capacity)?;

        if len == 0 {
            return Ok(Vec::new());
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset as u64))?;

        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> StorageResult<()> {
        check_bounds(offset, data.len(), self.capacity)?;

        if data.is_empty() {
            return Ok(());
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset as u64))?;
        file.write_all(data)?;
        file.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use tempfile::tempdir;

    #[test]
    fn file_create_new_is_zeroed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("region.bin");

        let region = FileRegion::open(&path, 64).unwrap();
        assert_eq!(region.capacity(), 64);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 64);
        assert_eq!(region.read(0, 64).unwrap(), vec![0; 64]);
    }

    #[test]
    fn file_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("region.bin");

        let mut region = FileRegion::open(&path, 32).unwrap();
        region.write(10, b"slot").unwrap();

        assert_eq!(region.read(10, 4).unwrap(), b"slot");
        assert_eq!(region.read(8, 2).unwrap(), vec![0, 0]);
    }

    #[test]
    fn file_write_past_end_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("region.bin");

        let mut region = FileRegion::open(&path, 8).unwrap();
        let result = region.write(6, b"xyz");
        assert!(matches!(result, Err(StorageError::OutOfBounds { .. })));
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 8);
    }

    #[test]
    fn file_persistence_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("region.bin");

        {
            let mut region = FileRegion::open(&path, 16).unwrap();
            region.write(0, b"retained").unwrap();
            region.sync().unwrap();
        }

        {
            let region = FileRegion::open_existing(&path).unwrap();
            assert_eq!(region.capacity(), 16);
            assert_eq!(region.read(0, 8).unwrap(), b"retained");
        }
    }

    #[test]
    fn file_clear_zeroes_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("region.bin");

        let mut region = FileRegion::open(&path, 5000).unwrap();
        region.write(4990, &[0xFF; 10]).unwrap();
        region.clear().unwrap();

        assert_eq!(region.read(4990, 10).unwrap(), vec![0; 10]);
        assert_eq!(region.capacity(), 5000);
    }

    #[test]
    fn file_open_existing_missing_fails() {
        let dir = tempdir().unwrap();
        let result = FileRegion::open_existing(&dir.path().join("missing.bin"));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn file_create_with_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("path").join("region.bin");

        let region = FileRegion::open_with_create_dirs(&path, 8).unwrap();
        assert_eq!(region.capacity(), 8);
        assert!(path.exists());
        assert_eq!(region.path(), path);
    }
}
