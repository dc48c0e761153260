//! Boot configuration.

use crate::error::{ShareError, ShareResult};
use crate::record::{ImageVersion, OperatingMode, RecoveryMode, SignatureType};
use serde::{Deserialize, Serialize};

/// Platform facts recorded for the booted application.
///
/// Resolved once at startup. The running slot is not part of the config
/// because it is only known once an image has been chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// How the bootloader manages slots.
    pub mode: OperatingMode,

    /// Signature scheme images are verified with.
    pub signature_type: SignatureType,

    /// Recovery mechanism available.
    pub recovery: RecoveryMode,

    /// Version of the bootloader.
    pub bootloader_version: ImageVersion,

    /// Largest application image accepted, in bytes.
    ///
    /// Supplied by the platform; this crate does not derive it.
    pub max_image_size: u32,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            mode: OperatingMode::SwapUsingScratch,
            signature_type: SignatureType::None,
            recovery: RecoveryMode::None,
            bootloader_version: ImageVersion::new(0, 1, 0, 0),
            max_image_size: 0,
        }
    }
}

impl BootConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Config`] if the JSON is malformed or holds an
    /// unknown enum value.
    pub fn from_json(json: &str) -> ShareResult<Self> {
        serde_json::from_str(json).map_err(|e| ShareError::config(e.to_string()))
    }

    /// Sets the operating mode.
    #[must_use]
    pub const fn mode(mut self, mode: OperatingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the signature type.
    #[must_use]
    pub const fn signature_type(mut self, signature_type: SignatureType) -> Self {
        self.signature_type = signature_type;
        self
    }

    /// Sets the recovery mode.
    #[must_use]
    pub const fn recovery(mut self, recovery: RecoveryMode) -> Self {
        self.recovery = recovery;
        self
    }

    /// Sets the bootloader version.
    #[must_use]
    pub const fn bootloader_version(mut self, version: ImageVersion) -> Self {
        self.bootloader_version = version;
        self
    }

    /// Sets the maximum image size.
    #[must_use]
    pub const fn max_image_size(mut self, size: u32) -> Self {
        self.max_image_size = size;
        self
    }
}
