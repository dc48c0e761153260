//! # bootshare core
//!
//! Boot shared-data area for handing metadata from a bootloader to the
//! application it boots.
//!
//! This crate provides:
//! - The packed TLV layout of the area ([`tlv`])
//! - [`SharedArea`], the append-only, duplicate-free, capacity-bounded writer
//! - [`RecordWriter`], which records the bootloader information facts in a
//!   fixed order and stops at the first failure
//! - [`BootConfig`], the platform facts resolved at startup
//!
//! ## Example
//!
//! ```rust
//! use bootshare_core::{save_boot_info, BootConfig, SharedArea};
//! use bootshare_storage::InMemoryRegion;
//!
//! let mut area = SharedArea::new(InMemoryRegion::new(128));
//! save_boot_info(&mut area, &BootConfig::default(), 0).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod area;
mod config;
mod error;
pub mod record;
pub mod tlv;
mod types;

pub use area::SharedArea;
pub use config::BootConfig;
pub use error::{ErrorKind, LayoutError, ShareError, ShareResult};
pub use record::{
    save_boot_info, BootFact, ImageVersion, OperatingMode, RecordWriter, RecoveryMode,
    SignatureType, WriterState,
};
pub use types::TlvType;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
