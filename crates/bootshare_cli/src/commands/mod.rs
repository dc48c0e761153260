//! CLI command implementations.

pub mod dump;
pub mod verify;
pub mod write;

use bootshare_core::tlv::{decode_area, Entry};
use bootshare_storage::{FileRegion, RetainedRegion};
use std::path::Path;

/// Reads the whole region file and decodes its entries.
pub(crate) fn load_entries(path: &Path) -> Result<Vec<Entry>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("region file not found: {}", path.display()).into());
    }

    let region = FileRegion::open_existing(path)?;
    let data = region.read(0, region.capacity())?;
    Ok(decode_area(&data)?)
}
