//! Verify command implementation.

use crate::commands::load_entries;
use std::collections::HashSet;
use std::path::Path;

/// Runs the verify command.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying region at {:?}", path);
    println!();

    match check(path) {
        Ok(count) => {
            println!("✓ Region verification passed ({} entries)", count);
            Ok(())
        }
        Err(e) => {
            println!("✗ Region verification failed: {}", e);
            Err("Verification failed".into())
        }
    }
}

/// Decodes the area and checks that no tag appears twice.
fn check(path: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    let entries = load_entries(path)?;

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.tlv_type) {
            return Err(format!(
                "duplicate entry {} at offset {}",
                entry.tlv_type, entry.offset
            )
            .into());
        }
    }

    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootshare_core::tlv::{AreaHeader, EntryHeader};
    use bootshare_core::TlvType;
    use tempfile::tempdir;

    #[test]
    fn written_region_verifies() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("retained.bin");
        crate::commands::write::run(&path, None, 0, 128).unwrap();

        assert_eq!(check(&path).unwrap(), 6);
    }

    #[test]
    fn zeroed_region_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("retained.bin");
        std::fs::write(&path, [0u8; 32]).unwrap();

        assert!(run(&path).is_err());
    }

    #[test]
    fn duplicate_tag_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("retained.bin");

        let tag = TlvType::new(3, 0);
        let mut data = AreaHeader::new(16).encode().to_vec();
        data.extend_from_slice(&EntryHeader::new(tag, 1).encode());
        data.push(1);
        data.extend_from_slice(&EntryHeader::new(tag, 1).encode());
        data.push(2);
        std::fs::write(&path, &data).unwrap();

        let err = check(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate entry"));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(check(&dir.path().join("missing.bin")).is_err());
    }
}
