//! Fault injection for retained regions.
//!
//! [`FaultyRegion`] wraps any [`RetainedRegion`] and can be told to fail
//! the n-th read or write. It also counts `clear()` and `capacity()` calls
//! and records the range of every successful write, so tests can assert
//! which bytes an operation touched.

use bootshare_storage::{RetainedRegion, StorageError, StorageResult};
use parking_lot::Mutex;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A region wrapper that can simulate store failures.
#[derive(Debug)]
pub struct FaultyRegion<R> {
    inner: R,
    clears: AtomicUsize,
    capacity_calls: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_read_at: AtomicUsize,
    fail_write_at: AtomicUsize,
    fail_clear: AtomicBool,
    written: Mutex<Vec<Range<usize>>>,
}

impl<R: RetainedRegion> FaultyRegion<R> {
    /// Wraps `inner` with no faults armed.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            clears: AtomicUsize::new(0),
            capacity_calls: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            fail_read_at: AtomicUsize::new(usize::MAX),
            fail_write_at: AtomicUsize::new(usize::MAX),
            fail_clear: AtomicBool::new(false),
            written: Mutex::new(Vec::new()),
        }
    }

    /// Makes the `n`-th read from now (0-based) fail.
    pub fn fail_read_at(&self, n: usize) {
        let base = self.reads.load(Ordering::SeqCst);
        self.fail_read_at.store(base + n, Ordering::SeqCst);
    }

    /// Makes the `n`-th write from now (0-based) fail.
    pub fn fail_write_at(&self, n: usize) {
        let base = self.writes.load(Ordering::SeqCst);
        self.fail_write_at.store(base + n, Ordering::SeqCst);
    }

    /// Sets whether `clear()` fails.
    pub fn set_fail_clear(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    /// Disarms every fault. Counters are kept.
    pub fn reset_faults(&self) {
        self.fail_read_at.store(usize::MAX, Ordering::SeqCst);
        self.fail_write_at.store(usize::MAX, Ordering::SeqCst);
        self.fail_clear.store(false, Ordering::SeqCst);
    }

    /// Number of `clear()` calls that reached the region.
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    /// Number of `capacity()` queries.
    pub fn capacity_count(&self) -> usize {
        self.capacity_calls.load(Ordering::SeqCst)
    }

    /// Number of write attempts, failed ones included.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Byte ranges of every successful write, in order.
    pub fn written_ranges(&self) -> Vec<Range<usize>> {
        self.written.lock().clone()
    }

    /// Highest offset touched by a successful write, if any.
    pub fn high_water_mark(&self) -> Option<usize> {
        self.written.lock().iter().map(|r| r.end).max()
    }

    /// Returns the wrapped region.
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

fn injected(what: &str) -> StorageError {
    StorageError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("injected {what} failure"),
    ))
}

impl<R: RetainedRegion> RetainedRegion for FaultyRegion<R> {
    fn clear(&mut self) -> StorageResult<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(injected("clear"));
        }
        self.inner.clear()
    }

    fn capacity(&self) -> usize {
        self.capacity_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.capacity()
    }

    fn read(&self, offset: usize, len: usize) -> StorageResult<Vec<u8>> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        if n == self.fail_read_at.load(Ordering::SeqCst) {
            return Err(injected("read"));
        }
        self.inner.read(offset, len)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> StorageResult<()> {
        let n = self.writes.fetch_add(1, Ordering::SeqCst);
        if n == self.fail_write_at.load(Ordering::SeqCst) {
            return Err(injected("write"));
        }
        self.inner.write(offset, data)?;
        self.written.lock().push(offset..offset + data.len());
        Ok(())
    }
}
