//! Boot facts and their payload encodings.

use crate::types::TlvType;
use serde::{Deserialize, Serialize};

/// Major tag of the bootloader information domain.
pub const TLV_MAJOR_BLINFO: u8 = 0x03;

/// Operating mode of the bootloader.
pub const BLINFO_MODE: u8 = 0x00;
/// Image signature scheme.
pub const BLINFO_SIGNATURE_TYPE: u8 = 0x01;
/// Recovery mechanism compiled into the bootloader.
pub const BLINFO_RECOVERY: u8 = 0x02;
/// Slot the application was booted from.
pub const BLINFO_RUNNING_SLOT: u8 = 0x03;
/// Version of the bootloader itself.
pub const BLINFO_BOOTLOADER_VERSION: u8 = 0x04;
/// Largest application image the bootloader accepts.
pub const BLINFO_MAX_APPLICATION_SIZE: u8 = 0x05;

/// How the bootloader manages image slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum OperatingMode {
    /// One slot, no upgrades through swap.
    SingleSlot = 0,
    /// Swap through a scratch area.
    #[default]
    SwapUsingScratch = 1,
    /// Overwrite the primary slot, no revert.
    UpgradeOnly = 2,
    /// Swap by moving sectors.
    SwapUsingMove = 3,
    /// Execute in place from either slot.
    DirectXip = 4,
    /// Direct XIP with revert support.
    DirectXipWithRevert = 5,
    /// Copy the image to RAM before running.
    RamLoad = 6,
    /// Dedicated firmware loader image.
    FirmwareLoader = 7,
}

/// Signature scheme images are verified with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SignatureType {
    /// Images are not signed.
    #[default]
    None = 0,
    /// RSA signatures.
    Rsa = 1,
    /// ECDSA over P-256.
    EcdsaP256 = 2,
    /// Ed25519 signatures.
    Ed25519 = 3,
}

/// Recovery mechanism available to the bootloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RecoveryMode {
    /// No recovery.
    #[default]
    None = 0,
    /// Serial recovery (SMP over UART).
    SerialRecovery = 1,
    /// USB DFU.
    Dfu = 2,
}

impl RecoveryMode {
    /// Resolves the recovery mode from platform switches.
    ///
    /// Serial recovery takes precedence over USB DFU.
    #[must_use]
    pub const fn from_features(serial: bool, usb_dfu: bool) -> Self {
        if serial {
            Self::SerialRecovery
        } else if usb_dfu {
            Self::Dfu
        } else {
            Self::None
        }
    }
}

/// Version of the bootloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageVersion {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
    /// Revision (patch level).
    #[serde(default)]
    pub revision: u16,
    /// Build number.
    #[serde(default)]
    pub build_num: u32,
}

impl ImageVersion {
    /// Encoded size: major (1) + minor (1) + revision (2) + build (4).
    pub const ENCODED_SIZE: usize = 8;

    /// Creates a new version.
    #[must_use]
    pub const fn new(major: u8, minor: u8, revision: u16, build_num: u32) -> Self {
        Self {
            major,
            minor,
            revision,
            build_num,
        }
    }

    /// Encodes the version as little-endian bytes.
    #[must_use]
    pub fn encode(&self) -> [u8; Self::ENCODED_SIZE] {
        let mut buf = [0u8; Self::ENCODED_SIZE];
        buf[0] = self.major;
        buf[1] = self.minor;
        buf[2..4].copy_from_slice(&self.revision.to_le_bytes());
        buf[4..8].copy_from_slice(&self.build_num.to_le_bytes());
        buf
    }
}

/// One fact recorded for the booted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootFact {
    /// Operating mode.
    Mode(OperatingMode),
    /// Signature scheme.
    SignatureType(SignatureType),
    /// Recovery mechanism.
    Recovery(RecoveryMode),
    /// Index of the slot being booted.
    RunningSlot(u32),
    /// Bootloader version.
    BootloaderVersion(ImageVersion),
    /// Maximum application image size in bytes.
    MaxApplicationSize(u32),
}

impl BootFact {
    /// Returns the tag this fact is stored under.
    #[must_use]
    pub const fn tlv_type(&self) -> TlvType {
        let minor = match self {
            Self::Mode(_) => BLINFO_MODE,
            Self::SignatureType(_) => BLINFO_SIGNATURE_TYPE,
            Self::Recovery(_) => BLINFO_RECOVERY,
            Self::RunningSlot(_) => BLINFO_RUNNING_SLOT,
            Self::BootloaderVersion(_) => BLINFO_BOOTLOADER_VERSION,
            Self::MaxApplicationSize(_) => BLINFO_MAX_APPLICATION_SIZE,
        };
        TlvType::new(TLV_MAJOR_BLINFO, minor)
    }

    /// Encodes the fact's payload.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Mode(mode) => vec![*mode as u8],
            Self::SignatureType(sig) => vec![*sig as u8],
            Self::Recovery(recovery) => vec![*recovery as u8],
            Self::RunningSlot(slot) => slot.to_le_bytes().to_vec(),
            Self::BootloaderVersion(version) => version.encode().to_vec(),
            Self::MaxApplicationSize(size) => size.to_le_bytes().to_vec(),
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mode(_) => "mode",
            Self::SignatureType(_) => "signature_type",
            Self::Recovery(_) => "recovery",
            Self::RunningSlot(_) => "running_slot",
            Self::BootloaderVersion(_) => "bootloader_version",
            Self::MaxApplicationSize(_) => "max_application_size",
        }
    }
}
