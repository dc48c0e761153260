//! The shared-data area: an append-only TLV store in a retained region.

use crate::error::{ShareError, ShareResult};
use crate::tlv::{entry_size, AreaHeader, EntryHeader, AREA_HEADER_SIZE, ENTRY_HEADER_SIZE};
use crate::types::TlvType;
use bootshare_storage::RetainedRegion;
use tracing::{debug, error, trace, warn};

/// Append-only, duplicate-free TLV area for one boot cycle.
///
/// A `SharedArea` is created fresh at the start of each boot cycle and
/// owns the region for the duration of the boot sequence. Creating it
/// performs no I/O. The first [`append`](Self::append) clears the region
/// and caches its capacity; later appends reuse that state.
///
/// # Invariants
///
/// - `written_size` never decreases and never exceeds the capacity
/// - No two entries share the same [`TlvType`]
/// - After every successful append the on-disk header's total length
///   equals `written_size`
///
/// # Example
///
/// ```rust
/// use bootshare_core::{SharedArea, TlvType};
/// use bootshare_storage::InMemoryRegion;
///
/// let mut area = SharedArea::new(InMemoryRegion::new(64));
/// area.append(TlvType::new(1, 1), &[0x02]).unwrap();
/// assert_eq!(area.written_size(), 11);
///
/// assert!(area.append(TlvType::new(1, 1), &[0x09]).is_err());
/// assert_eq!(area.written_size(), 11);
/// ```
#[derive(Debug)]
pub struct SharedArea<R: RetainedRegion> {
    region: R,
    initialized: bool,
    written_size: u16,
    max_size: usize,
}

impl<R: RetainedRegion> SharedArea<R> {
    /// Creates an area over `region` for a new boot cycle.
    pub fn new(region: R) -> Self {
        Self {
            region,
            initialized: false,
            written_size: AREA_HEADER_SIZE as u16,
            max_size: 0,
        }
    }

    /// Appends an entry tagged `major:minor`.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn append_raw(&mut self, major: u8, minor: u8, payload: &[u8]) -> ShareResult<()> {
        self.append(TlvType::new(major, minor), payload)
    }

    /// Appends one entry to the area.
    ///
    /// # Errors
    ///
    /// - [`ShareError::InvalidArgument`] if `payload` is empty
    /// - [`ShareError::ReadError`] if the duplicate scan cannot read the region
    /// - [`ShareError::DuplicateEntry`] if `tlv_type` was already written
    /// - [`ShareError::SizeOverflow`] if the area size would exceed `u16::MAX`
    /// - [`ShareError::AreaFull`] if the entry does not fit in the region
    /// - [`ShareError::WriteError`] if clearing or writing the region fails
    ///
    /// Nothing is written on any error other than `WriteError`. A
    /// `WriteError` from the final header write leaves `written_size`
    /// advanced while the on-disk header still holds the previous length.
    pub fn append(&mut self, tlv_type: TlvType, payload: &[u8]) -> ShareResult<()> {
        if payload.is_empty() {
            return Err(ShareError::invalid_argument("payload must not be empty"));
        }

        self.ensure_initialized()?;

        if self.contains(tlv_type)? {
            warn!(tag = %tlv_type, "shared data entry already present");
            return Err(ShareError::DuplicateEntry {
                major: tlv_type.major,
                minor: tlv_type.minor,
            });
        }

        let new_size = entry_size(payload.len())
            .and_then(|size| self.written_size.checked_add(size))
            .ok_or(ShareError::SizeOverflow {
                written: self.written_size,
                payload: payload.len(),
            })?;

        if usize::from(new_size) > self.max_size {
            warn!(
                tag = %tlv_type,
                required = new_size,
                capacity = self.max_size,
                "shared data area full"
            );
            return Err(ShareError::AreaFull {
                required: usize::from(new_size),
                capacity: self.max_size,
            });
        }

        // Bounded by `new_size` above, so the cast cannot truncate.
        let header = EntryHeader::new(tlv_type, payload.len() as u16);
        let offset = usize::from(self.written_size);

        self.write_at(offset, &header.encode())
            .inspect_err(|e| error!(error = %e, "shared data TLV header write failed"))?;
        self.write_at(offset + ENTRY_HEADER_SIZE, payload)
            .inspect_err(|e| error!(error = %e, "shared data TLV data write failed"))?;

        self.written_size = new_size;
        self.write_at(0, &AreaHeader::new(self.written_size).encode())
            .inspect_err(|e| error!(error = %e, "shared data area header write failed"))?;

        trace!(tag = %tlv_type, len = payload.len(), written = self.written_size, "appended shared data entry");
        Ok(())
    }

    /// Returns the number of bytes in use, including the area header.
    #[must_use]
    pub fn written_size(&self) -> u16 {
        self.written_size
    }

    /// Returns the region capacity, or `None` before the first append.
    #[must_use]
    pub fn max_size(&self) -> Option<usize> {
        self.initialized.then_some(self.max_size)
    }

    /// Returns whether the region has been cleared this boot cycle.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the underlying region.
    #[must_use]
    pub fn region(&self) -> &R {
        &self.region
    }

    /// Ends the boot cycle and hands the region back.
    pub fn into_region(self) -> R {
        self.region
    }

    fn ensure_initialized(&mut self) -> ShareResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.region
            .clear()
            .map_err(|source| ShareError::WriteError { offset: 0, source })?;
        self.max_size = self.region.capacity();
        self.initialized = true;

        debug!(capacity = self.max_size, "initialized shared data area");
        Ok(())
    }

    /// Walks the entry headers written so far looking for `tlv_type`.
    fn contains(&self, tlv_type: TlvType) -> ShareResult<bool> {
        let end = usize::from(self.written_size);
        let mut offset = AREA_HEADER_SIZE;

        while offset < end {
            let bytes = self
                .region
                .read(offset, ENTRY_HEADER_SIZE)
                .map_err(|source| ShareError::ReadError { offset, source })?;
            let header = EntryHeader::decode(&bytes)?;

            if header.tlv_type == tlv_type {
                return Ok(true);
            }
            offset += header.entry_size();
        }

        Ok(false)
    }

    fn write_at(&mut self, offset: usize, data: &[u8]) -> ShareResult<()> {
        self.region
            .write(offset, data)
            .map_err(|source| ShareError::WriteError { offset, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::tlv::{decode_area, AREA_MAGIC};
    use bootshare_storage::InMemoryRegion;

    fn area(capacity: usize) -> SharedArea<InMemoryRegion> {
        SharedArea::new(InMemoryRegion::new(capacity))
    }

    #[test]
    fn new_area_does_no_io() {
        let region = InMemoryRegion::with_data(vec![0xAA; 16]);
        let area = SharedArea::new(region);
        assert!(!area.is_initialized());
        assert_eq!(area.max_size(), None);
        assert_eq!(area.written_size(), AREA_HEADER_SIZE as u16);
        assert_eq!(area.region().data(), vec![0xAA; 16]);
    }

    #[test]
    fn first_append_clears_stale_contents() {
        let mut area = SharedArea::new(InMemoryRegion::with_data(vec![0xAA; 32]));
        area.append_raw(1, 1, &[0x02]).unwrap();

        let data = area.region().data();
        assert_eq!(&data[11..], &[0u8; 21][..]);
        assert_eq!(area.max_size(), Some(32));
    }

    #[test]
    fn append_writes_header_and_entry() {
        let mut area = area(32);
        area.append_raw(1, 1, &[0x02]).unwrap();

        let data = area.region().data();
        assert_eq!(&data[0..4], &AREA_MAGIC.to_le_bytes());
        assert_eq!(&data[4..6], &11u16.to_le_bytes());
        assert_eq!(&data[6..11], &[0x01, 0x01, 0x01, 0x00, 0x02]);
    }

    #[test]
    fn empty_payload_rejected() {
        let mut area = area(32);
        let err = area.append_raw(1, 1, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(!area.is_initialized());
    }

    #[test]
    fn duplicate_leaves_area_untouched() {
        let mut area = area(32);
        area.append_raw(3, 0, &[1]).unwrap();
        let before = area.region().data();

        let err = area.append_raw(3, 0, &[2]).unwrap_err();
        assert!(matches!(err, ShareError::DuplicateEntry { major: 3, minor: 0 }));
        assert_eq!(area.written_size(), 11);
        assert_eq!(area.region().data(), before);
    }

    #[test]
    fn same_minor_different_major_is_distinct() {
        let mut area = area(32);
        area.append_raw(1, 5, &[1]).unwrap();
        area.append_raw(2, 5, &[1]).unwrap();
        assert_eq!(area.written_size(), 16);
    }

    #[test]
    fn exact_fit_then_full() {
        let mut area = area(16);
        // 6 + 4 + 6 = 16
        area.append_raw(1, 0, &[0; 6]).unwrap();
        assert_eq!(area.written_size(), 16);

        let err = area.append_raw(1, 1, &[0]).unwrap_err();
        assert!(matches!(
            err,
            ShareError::AreaFull {
                required: 21,
                capacity: 16
            }
        ));
        assert_eq!(area.written_size(), 16);
    }

    #[test]
    fn oversized_payload_is_size_overflow() {
        let mut area = area(64);
        let payload = vec![0u8; usize::from(u16::MAX)];
        let err = area.append_raw(1, 0, &payload).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeOverflow);
        assert_eq!(area.written_size(), AREA_HEADER_SIZE as u16);
    }

    #[test]
    fn accumulated_size_overflow() {
        let mut area = area(usize::from(u16::MAX) + 64);
        let big = vec![0u8; 60_000];
        area.append_raw(1, 0, &big).unwrap();

        let err = area.append_raw(1, 1, &vec![0u8; 5_600]).unwrap_err();
        assert!(matches!(err, ShareError::SizeOverflow { written: 60_010, payload: 5_600 }));
    }

    #[test]
    fn decoded_entries_match_appends() {
        let mut area = area(64);
        area.append_raw(3, 0, &[1]).unwrap();
        area.append_raw(3, 4, &[1, 0, 2, 0, 0, 0, 0, 0]).unwrap();

        let entries = decode_area(&area.region().data()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].tlv_type, TlvType::new(3, 4));
        assert_eq!(entries[1].payload, vec![1, 0, 2, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn into_region_keeps_written_bytes() {
        let mut area = area(16);
        area.append_raw(1, 1, &[9]).unwrap();
        let region = area.into_region();
        assert_eq!(region.data()[10], 9);
    }
}
