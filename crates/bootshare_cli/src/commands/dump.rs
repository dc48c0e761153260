//! Dump command implementation.

use crate::commands::load_entries;
use bootshare_core::record::{
    BLINFO_BOOTLOADER_VERSION, BLINFO_MAX_APPLICATION_SIZE, BLINFO_MODE, BLINFO_RECOVERY,
    BLINFO_RUNNING_SLOT, BLINFO_SIGNATURE_TYPE, TLV_MAJOR_BLINFO,
};
use bootshare_core::tlv::Entry;
use serde::Serialize;
use std::path::Path;

/// Entry representation for output.
#[derive(Debug, Serialize)]
pub struct EntryInfo {
    /// Offset of the entry header in the region.
    pub offset: usize,
    /// Major tag.
    pub major: u8,
    /// Minor tag.
    pub minor: u8,
    /// Field name, if the tag is a known one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    /// Payload, hex-encoded.
    pub payload: String,
}

impl From<&Entry> for EntryInfo {
    fn from(entry: &Entry) -> Self {
        Self {
            offset: entry.offset,
            major: entry.tlv_type.major,
            minor: entry.tlv_type.minor,
            name: field_name(entry.tlv_type.major, entry.tlv_type.minor),
            payload: hex_encode(&entry.payload),
        }
    }
}

/// Runs the dump command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let entries = load_entries(path)?;
    let infos: Vec<EntryInfo> = entries.iter().map(EntryInfo::from).collect();

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&infos)?);
        }
        _ => {
            print_text_output(&infos);
        }
    }

    Ok(())
}

fn field_name(major: u8, minor: u8) -> Option<&'static str> {
    if major != TLV_MAJOR_BLINFO {
        return None;
    }
    match minor {
        BLINFO_MODE => Some("mode"),
        BLINFO_SIGNATURE_TYPE => Some("signature_type"),
        BLINFO_RECOVERY => Some("recovery"),
        BLINFO_RUNNING_SLOT => Some("running_slot"),
        BLINFO_BOOTLOADER_VERSION => Some("bootloader_version"),
        BLINFO_MAX_APPLICATION_SIZE => Some("max_application_size"),
        _ => None,
    }
}

fn print_text_output(entries: &[EntryInfo]) {
    println!("Shared data entries ({} total)", entries.len());
    println!("==========================");
    println!();

    for entry in entries {
        print!(
            "[{:04}] {:#04x}:{:#04x}",
            entry.offset, entry.major, entry.minor
        );
        if let Some(name) = entry.name {
            print!(" {:22}", name);
        }
        println!(" {}", entry.payload);
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
