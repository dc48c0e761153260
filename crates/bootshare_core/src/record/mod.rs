//! Boot record: which facts the bootloader hands to the application.
//!
//! Every fact lives under the [`TLV_MAJOR_BLINFO`] domain with a fixed
//! minor tag. Tags are stable across releases so applications can look
//! them up by number.

mod fact;
mod writer;

pub use fact::{
    BootFact, ImageVersion, OperatingMode, RecoveryMode, SignatureType,
    BLINFO_BOOTLOADER_VERSION, BLINFO_MAX_APPLICATION_SIZE, BLINFO_MODE, BLINFO_RECOVERY,
    BLINFO_RUNNING_SLOT, BLINFO_SIGNATURE_TYPE, TLV_MAJOR_BLINFO,
};
pub use writer::{save_boot_info, RecordWriter, WriterState};
