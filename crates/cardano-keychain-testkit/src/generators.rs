//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cardano_keychain_core::{
    harden, CardanoNamespaces, DerivationIndex, DerivationPath, Namespace, NamespaceRegistry,
};

/// Any derivation index, biased towards small normal and hardened values.
pub fn derivation_index() -> impl Strategy<Value = DerivationIndex> {
    prop_oneof![
        3 => 0u32..32,
        3 => (0u32..32).prop_map(harden),
        1 => any::<u32>(),
    ]
}

/// Either namespace.
pub fn namespace() -> impl Strategy<Value = Namespace> {
    prop_oneof![Just(Namespace::Byron), Just(Namespace::Shelley)]
}

/// A path inside one of the Cardano namespaces, with up to `max_suffix`
/// indices after the prefix.
pub fn namespaced_path(max_suffix: usize) -> impl Strategy<Value = DerivationPath> {
    (namespace(), prop::collection::vec(derivation_index(), 0..=max_suffix)).prop_map(
        |(namespace, suffix)| {
            let mut indices = CardanoNamespaces::prefix(namespace).to_vec();
            indices.extend(suffix);
            DerivationPath::new(indices)
        },
    )
}

/// A path outside both Cardano namespaces.
pub fn foreign_path(max_len: usize) -> impl Strategy<Value = DerivationPath> {
    prop_oneof![
        prop::collection::vec(derivation_index(), 0..=max_len),
        // Near misses: right coin type, wrong purpose, or unhardened prefix.
        prop::collection::vec(derivation_index(), 0..=max_len).prop_map(|mut rest| {
            let mut indices = vec![harden(44), 1815];
            indices.append(&mut rest);
            indices
        }),
        prop::collection::vec(derivation_index(), 0..=max_len).prop_map(|mut rest| {
            let mut indices = vec![harden(1852), harden(1852)];
            indices.append(&mut rest);
            indices
        }),
    ]
    .prop_filter("must miss both namespaces", |indices| {
        CardanoNamespaces::classify(indices).is_none()
    })
    .prop_map(DerivationPath::new)
}

/// A passphrase within the default length limit.
pub fn passphrase() -> impl Strategy<Value = String> {
    "[ -~]{0,50}"
}
