//! Property-based test generators using proptest.
//!
//! Provides strategies for tags, payloads and append sequences.

use bootshare_core::{
    BootConfig, ImageVersion, OperatingMode, RecoveryMode, SignatureType, TlvType,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Strategy for arbitrary tags.
pub fn tlv_type_strategy() -> impl Strategy<Value = TlvType> {
    (any::<u8>(), any::<u8>()).prop_map(|(major, minor)| TlvType::new(major, minor))
}

/// Strategy for non-empty payloads up to `max_len` bytes.
pub fn payload_strategy(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=max_len.max(1))
}

/// Strategy for a sequence of appends with pairwise distinct tags.
pub fn distinct_appends_strategy(
    max_entries: usize,
    max_payload: usize,
) -> impl Strategy<Value = Vec<(TlvType, Vec<u8>)>> {
    prop::collection::btree_set(tlv_type_strategy(), 0..=max_entries)
        .prop_flat_map(move |tags: BTreeSet<TlvType>| {
            let n = tags.len();
            (
                Just(tags.into_iter().collect::<Vec<_>>()).prop_shuffle(),
                prop::collection::vec(payload_strategy(max_payload), n),
            )
        })
        .prop_map(|(tags, payloads)| tags.into_iter().zip(payloads).collect::<Vec<_>>())
}

/// Strategy for a sequence of appends that may repeat tags.
///
/// Tags are drawn from a small pool so repeats are common.
pub fn colliding_appends_strategy(
    max_entries: usize,
    max_payload: usize,
) -> impl Strategy<Value = Vec<(TlvType, Vec<u8>)>> {
    let tag = (0u8..2, 0u8..4).prop_map(|(major, minor)| TlvType::new(major, minor));
    prop::collection::vec((tag, payload_strategy(max_payload)), 0..=max_entries)
}

/// Strategy for boot configurations.
pub fn boot_config_strategy() -> impl Strategy<Value = BootConfig> {
    let mode = prop_oneof![
        Just(OperatingMode::SingleSlot),
        Just(OperatingMode::SwapUsingScratch),
        Just(OperatingMode::UpgradeOnly),
        Just(OperatingMode::SwapUsingMove),
        Just(OperatingMode::DirectXip),
        Just(OperatingMode::DirectXipWithRevert),
        Just(OperatingMode::RamLoad),
        Just(OperatingMode::FirmwareLoader),
    ];
    let signature = prop_oneof![
        Just(SignatureType::None),
        Just(SignatureType::Rsa),
        Just(SignatureType::EcdsaP256),
        Just(SignatureType::Ed25519),
    ];
    let recovery = (any::<bool>(), any::<bool>())
        .prop_map(|(serial, dfu)| RecoveryMode::from_features(serial, dfu));
    let version = (any::<u8>(), any::<u8>(), any::<u16>(), any::<u32>())
        .prop_map(|(a, b, c, d)| ImageVersion::new(a, b, c, d));

    (mode, signature, recovery, version, any::<u32>()).prop_map(
        |(mode, signature, recovery, version, max_image_size)| {
            BootConfig::new()
                .mode(mode)
                .signature_type(signature)
                .recovery(recovery)
                .bootloader_version(version)
                .max_image_size(max_image_size)
        },
    )
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn distinct_appends_have_unique_tags(appends in distinct_appends_strategy(16, 8)) {
            let tags: BTreeSet<_> = appends.iter().map(|(t, _)| *t).collect();
            prop_assert_eq!(tags.len(), appends.len());
        }

        #[test]
        fn payloads_are_never_empty(payload in payload_strategy(4)) {
            prop_assert!(!payload.is_empty());
            prop_assert!(payload.len() <= 4);
        }
    }
}
