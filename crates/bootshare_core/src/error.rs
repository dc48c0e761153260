//! Error types for the shared-data area.

use bootshare_storage::StorageError;
use thiserror::Error;

/// Result type for shared-data operations.
pub type ShareResult<T> = Result<T, ShareError>;

/// Errors that can occur while writing the shared-data area.
///
/// None of these are retried internally. Recovering from any of them means
/// starting a fresh [`SharedArea`](crate::SharedArea) for a new boot cycle.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The caller passed an unusable argument.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// The region could not be read during the duplicate scan.
    #[error("shared area read failed at offset {offset}: {source}")]
    ReadError {
        /// Offset of the failed read.
        offset: usize,
        /// The underlying region error.
        #[source]
        source: StorageError,
    },

    /// The region could not be cleared or written.
    #[error("shared area write failed at offset {offset}: {source}")]
    WriteError {
        /// Offset of the failed write.
        offset: usize,
        /// The underlying region error.
        #[source]
        source: StorageError,
    },

    /// An entry with the same tag was already written this boot cycle.
    #[error("duplicate entry {major:#04x}:{minor:#04x}")]
    DuplicateEntry {
        /// Major (domain) part of the tag.
        major: u8,
        /// Minor (field) part of the tag.
        minor: u8,
    },

    /// The new area size does not fit the 16-bit length field.
    #[error("size overflow: {written} bytes written, payload of {payload} bytes")]
    SizeOverflow {
        /// Bytes already in the area.
        written: u16,
        /// Length of the rejected payload.
        payload: usize,
    },

    /// The entry does not fit in the region.
    #[error("shared area full: {required} bytes required, capacity {capacity}")]
    AreaFull {
        /// Area size the append would have produced.
        required: usize,
        /// Capacity of the region.
        capacity: usize,
    },

    /// Persisted bytes do not form a valid area.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Boot configuration could not be loaded.
    #[error("config error: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },

    /// A record writer was run again after one of its facts failed.
    #[error("boot record aborted at fact {index}: {kind:?}")]
    RecordAborted {
        /// Position of the fact that failed.
        index: usize,
        /// Kind of the original failure.
        kind: ErrorKind,
    },
}

/// Fieldless classification of [`ShareError`], handy for matching in callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ShareError::InvalidArgument`].
    InvalidArgument,
    /// See [`ShareError::ReadError`].
    ReadError,
    /// See [`ShareError::WriteError`].
    WriteError,
    /// See [`ShareError::DuplicateEntry`].
    DuplicateEntry,
    /// See [`ShareError::SizeOverflow`].
    SizeOverflow,
    /// See [`ShareError::AreaFull`].
    AreaFull,
    /// See [`ShareError::Layout`].
    Layout,
    /// See [`ShareError::Config`].
    Config,
    /// See [`ShareError::RecordAborted`].
    RecordAborted,
}

impl ShareError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::ReadError { .. } => ErrorKind::ReadError,
            Self::WriteError { .. } => ErrorKind::WriteError,
            Self::DuplicateEntry { .. } => ErrorKind::DuplicateEntry,
            Self::SizeOverflow { .. } => ErrorKind::SizeOverflow,
            Self::AreaFull { .. } => ErrorKind::AreaFull,
            Self::Layout(_) => ErrorKind::Layout,
            Self::Config { .. } => ErrorKind::Config,
            Self::RecordAborted { .. } => ErrorKind::RecordAborted,
        }
    }
}

/// Errors found while decoding a persisted area.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The area header does not carry the expected magic.
    #[error("bad magic: expected {expected:#010x}, found {found:#010x}")]
    BadMagic {
        /// Expected magic.
        expected: u32,
        /// Magic found in the header.
        found: u32,
    },

    /// A buffer is shorter than the structure it should hold.
    #[error("truncated {what}: need {needed} bytes, have {available}")]
    Truncated {
        /// The structure being decoded.
        what: &'static str,
        /// Bytes required.
        needed: usize,
        /// Bytes available.
        available: usize,
    },

    /// The header's total length is impossible for this buffer.
    #[error("total length {total_length} outside {min}..={max}")]
    BadTotalLength {
        /// The recorded total length.
        total_length: u16,
        /// Smallest valid value.
        min: usize,
        /// Largest valid value.
        max: usize,
    },

    /// An entry runs past the recorded total length.
    #[error("entry at offset {offset} overruns total length {total_length}")]
    EntryOverrun {
        /// Offset of the offending entry header.
        offset: usize,
        /// The recorded total length.
        total_length: u16,
    },
}
