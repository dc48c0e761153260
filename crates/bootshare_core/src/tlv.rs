//! On-disk TLV layout of the shared-data area.
//!
//! ```text
//! offset 0:        AreaHeader  { magic: u32, total_length: u16 }
//! offset 6:        EntryHeader { type: u16, length: u16 } | payload[length]
//! offset 6 + e0:   EntryHeader | payload
//! ...
//! ```
//!
//! All fields are little-endian and packed with no padding. Headers are
//! encoded into and decoded from byte slices; nothing here depends on the
//! memory layout of a Rust struct.

use crate::error::LayoutError;
use crate::types::TlvType;

/// Magic identifying a valid shared-data area.
pub const AREA_MAGIC: u32 = 0x0000_2016;

/// Size of the area header: magic (4) + total length (2).
pub const AREA_HEADER_SIZE: usize = 6;

/// Size of an entry header: type (2) + length (2).
pub const ENTRY_HEADER_SIZE: usize = 4;

/// Returns the full size of an entry with a `payload_len` byte payload,
/// or `None` if it does not fit the 16-bit length domain.
#[must_use]
pub fn entry_size(payload_len: usize) -> Option<u16> {
    let payload = u16::try_from(payload_len).ok()?;
    payload.checked_add(ENTRY_HEADER_SIZE as u16)
}

/// Header at offset 0 of the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaHeader {
    /// Always [`AREA_MAGIC`] for a valid area.
    pub magic: u32,
    /// Offset one past the last valid entry.
    pub total_length: u16,
}

impl AreaHeader {
    /// Creates a header with the standard magic.
    #[must_use]
    pub const fn new(total_length: u16) -> Self {
        Self {
            magic: AREA_MAGIC,
            total_length,
        }
    }

    /// Encodes the header.
    #[must_use]
    pub fn encode(&self) -> [u8; AREA_HEADER_SIZE] {
        let mut buf = [0u8; AREA_HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.magic.to_le_bytes());
        buf[4..6].copy_from_slice(&self.total_length.to_le_bytes());
        buf
    }

    /// Decodes a header from the start of `data`.
    ///
    /// The magic is not validated here; see [`decode_area`].
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Truncated`] if `data` is too short.
    pub fn decode(data: &[u8]) -> Result<Self, LayoutError> {
        let buf = take::<AREA_HEADER_SIZE>(data, "area header")?;
        Ok(Self {
            magic: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            total_length: u16::from_le_bytes([buf[4], buf[5]]),
        })
    }
}

/// Header preceding every entry payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader {
    /// Tag of the entry.
    pub tlv_type: TlvType,
    /// Payload length in bytes.
    pub length: u16,
}

impl EntryHeader {
    /// Creates a new entry header.
    #[must_use]
    pub const fn new(tlv_type: TlvType, length: u16) -> Self {
        Self { tlv_type, length }
    }

    /// Size of the entry including this header.
    #[must_use]
    pub const fn entry_size(&self) -> usize {
        ENTRY_HEADER_SIZE + self.length as usize
    }

    /// Encodes the header.
    #[must_use]
    pub fn encode(&self) -> [u8; ENTRY_HEADER_SIZE] {
        let mut buf = [0u8; ENTRY_HEADER_SIZE];
        buf[0..2].copy_from_slice(&self.tlv_type.pack().to_le_bytes());
        buf[2..4].copy_from_slice(&self.length.to_le_bytes());
        buf
    }

    /// Decodes a header from the start of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Truncated`] if `data` is too short.
    pub fn decode(data: &[u8]) -> Result<Self, LayoutError> {
        let buf = take::<ENTRY_HEADER_SIZE>(data, "entry header")?;
        Ok(Self {
            tlv_type: TlvType::unpack(u16::from_le_bytes([buf[0], buf[1]])),
            length: u16::from_le_bytes([buf[2], buf[3]]),
        })
    }
}

/// A decoded entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Offset of the entry header within the area.
    pub offset: usize,
    /// Tag of the entry.
    pub tlv_type: TlvType,
    /// Entry payload.
    pub payload: Vec<u8>,
}

/// Decodes every entry of a persisted area image.
///
/// This is the read side used by inspection tools; the append path only
/// walks entry headers for its duplicate scan.
///
/// # Errors
///
/// Returns an error if the magic is wrong, the total length does not fit the
/// buffer, or an entry overruns the total length.
pub fn decode_area(data: &[u8]) -> Result<Vec<Entry>, LayoutError> {
    let header = AreaHeader::decode(data)?;
    if header.magic != AREA_MAGIC {
        return Err(LayoutError::BadMagic {
            expected: AREA_MAGIC,
            found: header.magic,
        });
    }

    let end = usize::from(header.total_length);
    if end < AREA_HEADER_SIZE || end > data.len() {
        return Err(LayoutError::BadTotalLength {
            total_length: header.total_length,
            min: AREA_HEADER_SIZE,
            max: data.len(),
        });
    }

    let mut entries = Vec::new();
    let mut offset = AREA_HEADER_SIZE;
    while offset < end {
        let overrun = move || LayoutError::EntryOverrun {
            offset,
            total_length: header.total_length,
        };
        if offset + ENTRY_HEADER_SIZE > end {
            return Err(overrun());
        }

        let entry = EntryHeader::decode(&data[offset..end])?;
        let payload_start = offset + ENTRY_HEADER_SIZE;
        let payload_end = payload_start + usize::from(entry.length);
        if payload_end > end {
            return Err(overrun());
        }

        entries.push(Entry {
            offset,
            tlv_type: entry.tlv_type,
            payload: data[payload_start..payload_end].to_vec(),
        });
        offset = payload_end;
    }

    Ok(entries)
}

fn take<const N: usize>(data: &[u8], what: &'static str) -> Result<[u8; N], LayoutError> {
    data.get(..N)
        .and_then(|s| <[u8; N]>::try_from(s).ok())
        .ok_or(LayoutError::Truncated {
            what,
            needed: N,
            available: data.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(entries: &[(TlvType, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (tag, payload) in entries {
            body.extend_from_slice(&EntryHeader::new(*tag, payload.len() as u16).encode());
            body.extend_from_slice(payload);
        }
        let total = (AREA_HEADER_SIZE + body.len()) as u16;
        let mut data = AreaHeader::new(total).encode().to_vec();
        data.extend_from_slice(&body);
        data
    }

    #[test]
    fn area_header_layout() {
        let bytes = AreaHeader::new(0x0011).encode();
        assert_eq!(bytes, [0x16, 0x20, 0x00, 0x00, 0x11, 0x00]);
        assert_eq!(AreaHeader::decode(&bytes).unwrap(), AreaHeader::new(0x11));
    }

    #[test]
    fn entry_header_layout() {
        let bytes = EntryHeader::new(TlvType::new(0x03, 0x04), 8).encode();
        assert_eq!(bytes, [0x04, 0x03, 0x08, 0x00]);
    }

    #[test]
    fn entry_header_decode_truncated() {
        let err = EntryHeader::decode(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Truncated {
                what: "entry header",
                needed: 4,
                available: 3
            }
        );
    }

    #[test]
    fn entry_size_limits() {
        assert_eq!(entry_size(1), Some(5));
        assert_eq!(entry_size(usize::from(u16::MAX) - 4), Some(u16::MAX));
        assert_eq!(entry_size(usize::from(u16::MAX) - 3), None);
        assert_eq!(entry_size(100_000), None);
    }

    #[test]
    fn decode_empty_area() {
        let data = image(&[]);
        assert!(decode_area(&data).unwrap().is_empty());
    }

    #[test]
    fn decode_entries_in_order() {
        let a = TlvType::new(3, 0);
        let b = TlvType::new(3, 1);
        let mut data = image(&[(a, &[7]), (b, &[1, 2, 3])]);
        data.resize(64, 0);

        let entries = decode_area(&data).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].offset, AREA_HEADER_SIZE);
        assert_eq!(entries[0].tlv_type, a);
        assert_eq!(entries[0].payload, vec![7]);
        assert_eq!(entries[1].offset, AREA_HEADER_SIZE + ENTRY_HEADER_SIZE + 1);
        assert_eq!(entries[1].payload, vec![1, 2, 3]);
    }

    #[test]
    fn decode_zeroed_region_is_bad_magic() {
        let err = decode_area(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, LayoutError::BadMagic { found: 0, .. }));
    }

    #[test]
    fn decode_total_length_past_buffer() {
        let mut data = image(&[(TlvType::new(1, 1), &[0; 4])]);
        data.truncate(data.len() - 1);
        assert!(matches!(
            decode_area(&data),
            Err(LayoutError::BadTotalLength { .. })
        ));
    }

    #[test]
    fn decode_entry_overrun() {
        let mut data = image(&[(TlvType::new(1, 1), &[0; 4])]);
        // Claim a longer payload than the total length allows.
        data[AREA_HEADER_SIZE + 2] = 9;
        assert!(matches!(
            decode_area(&data),
            Err(LayoutError::EntryOverrun { offset: 6, .. })
        ));
    }

    #[test]
    fn decode_partial_entry_header_reports_its_offset() {
        let mut data = image(&[(TlvType::new(1, 1), &[5])]);
        // Two stray bytes inside the total length, too few for a header.
        data.extend_from_slice(&[0xAA, 0xBB]);
        let total = data.len() as u16;
        data[4..6].copy_from_slice(&total.to_le_bytes());

        assert_eq!(
            decode_area(&data),
            Err(LayoutError::EntryOverrun {
                offset: AREA_HEADER_SIZE + ENTRY_HEADER_SIZE + 1,
                total_length: total,
            })
        );
    }
}
