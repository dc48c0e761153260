//! # bootshare testkit
//!
//! Test utilities for bootshare.
//!
//! This crate provides:
//! - [`FaultyRegion`], a region wrapper that injects read/write failures
//!   and records every access
//! - Property-based test generators using proptest
//! - Fixtures for file-backed regions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bootshare_testkit::prelude::*;
//!
//! let region = FaultyRegion::new(InMemoryRegion::new(64));
//! region.fail_write_at(2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use bootshare_storage::{InMemoryRegion, RetainedRegion};
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
