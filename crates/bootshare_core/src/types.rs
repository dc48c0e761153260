//! Core type definitions for bootshare.

use std::fmt;

/// Tag identifying one field in the shared-data area.
///
/// `major` names the domain a field belongs to and `minor` the field within
/// that domain. On disk the pair is packed into a `u16` with `major` in the
/// high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TlvType {
    /// Domain of the field.
    pub major: u8,
    /// Field within the domain.
    pub minor: u8,
}

impl TlvType {
    /// Creates a new tag.
    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Packs the tag into its on-disk form.
    #[must_use]
    pub const fn pack(self) -> u16 {
        ((self.major as u16) << 8) | self.minor as u16
    }

    /// Unpacks a tag from its on-disk form.
    #[must_use]
    pub const fn unpack(raw: u16) -> Self {
        Self {
            major: (raw >> 8) as u8,
            minor: (raw & 0xFF) as u8,
        }
    }
}

impl fmt::Display for TlvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}:{:#04x}", self.major, self.minor)
    }
}
