//! Benchmark utilities.

#![warn(missing_docs)]

use bootshare_core::TlvType;

/// Generate deterministic payload data of the specified size.
pub fn payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Generate `count` distinct tags spread over several majors.
pub fn distinct_tags(count: usize) -> Vec<TlvType> {
    (0..count)
        .map(|i| TlvType::new((i / 256) as u8, (i % 256) as u8))
        .collect()
}
