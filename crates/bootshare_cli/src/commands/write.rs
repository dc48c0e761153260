//! Write command implementation.

use bootshare_core::{save_boot_info, BootConfig, SharedArea};
use bootshare_storage::FileRegion;
use std::path::Path;
use tracing::info;

/// Runs the write command.
pub fn run(
    path: &Path,
    config_path: Option<&Path>,
    slot: u32,
    capacity: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(p) => BootConfig::from_json(&std::fs::read_to_string(p)?)?,
        None => BootConfig::default(),
    };

    let region = FileRegion::open_with_create_dirs(path, capacity)?;
    let mut area = SharedArea::new(region);
    save_boot_info(&mut area, &config, slot)?;

    let written = area.written_size();
    area.into_region().sync()?;

    info!(path = %path.display(), slot, written, "boot record written");
    println!("Wrote {} bytes to {}", written, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load_entries;
    use tempfile::tempdir;

    #[test]
    fn write_creates_readable_region() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("retained.bin");

        run(&path, None, 1, 128).unwrap();

        let entries = load_entries(&path).unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[3].payload, vec![1, 0, 0, 0]);
    }

    #[test]
    fn write_uses_config_file() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("boot.json");
        std::fs::write(&config, r#"{ "mode": "ram_load", "max_image_size": 4096 }"#).unwrap();
        let path = dir.path().join("retained.bin");

        run(&path, Some(&config), 0, 128).unwrap();

        let entries = load_entries(&path).unwrap();
        assert_eq!(entries[0].payload, vec![6]);
        assert_eq!(entries[5].payload, 4096u32.to_le_bytes().to_vec());
    }

    #[test]
    fn write_into_small_region_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("retained.bin");
        assert!(run(&path, None, 0, 16).is_err());
    }
}
