//! # bootshare storage
//!
//! Retained-region trait and implementations for bootshare.
//!
//! This crate provides the lowest-level storage abstraction for the boot
//! shared-data area. A region is a **fixed-size, byte-addressable store**
//! that survives a reset. Regions do not interpret the bytes they hold.
//!
//! ## Design Principles
//!
//! - Regions are simple byte stores (clear, capacity, read, write)
//! - Capacity is fixed for the lifetime of a region
//! - No knowledge of the TLV layout written on top of them
//! - Must be `Send + Sync`
//!
//! ## Available Regions
//!
//! - [`InMemoryRegion`] - For testing and RAM-backed retention
//! - [`FileRegion`] - A fixed-size file that survives process restarts
//!
//! ## Example
//!
//! ```rust
//! use bootshare_storage::{InMemoryRegion, RetainedRegion};
//!
//! let mut region = InMemoryRegion::new(32);
//! region.write(4, b"boot").unwrap();
//! assert_eq!(region.read(4, 4).unwrap(), b"boot");
//! assert_eq!(region.capacity(), 32);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod region;

pub use error::{StorageError, StorageResult};
pub use file::FileRegion;
pub use memory::InMemoryRegion;
pub use region::RetainedRegion;
