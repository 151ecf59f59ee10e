//! Path gate properties over the production keychain.

use std::sync::OnceLock;

use cardano_keychain::core::{root_from_mnemonic_and_passphrase, KeychainError, NamespaceRegistry};
use cardano_keychain::{CardanoNamespaces, Keychain};
use cardano_keychain_testkit::generators::{foreign_path, namespaced_path};
use cardano_keychain_testkit::ABANDON_MNEMONIC;
use proptest::prelude::*;

fn keychain() -> &'static Keychain {
    static KEYCHAIN: OnceLock<Keychain> = OnceLock::new();
    KEYCHAIN.get_or_init(|| {
        let root = root_from_mnemonic_and_passphrase(ABANDON_MNEMONIC, "").unwrap();
        Keychain::new(root).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_foreign_paths_are_forbidden(path in foreign_path(6)) {
        match keychain().derive(path.as_slice()) {
            Err(KeychainError::ForbiddenPath(rejected)) => prop_assert_eq!(rejected, path),
            other => prop_assert!(false, "{} accepted: {:?}", path, other.map(|n| n.xpub())),
        }
    }

    #[test]
    fn prop_namespaced_paths_derive_at_full_depth(path in namespaced_path(3)) {
        let node = keychain().derive(path.as_slice()).unwrap();
        prop_assert_eq!(node.depth() as usize, path.len());
        prop_assert!(path.len() >= CardanoNamespaces::LEN);
    }

    #[test]
    fn prop_derivation_is_repeatable(path in namespaced_path(3)) {
        let a = keychain().derive(path.as_slice()).unwrap();
        let b = keychain().derive(path.as_slice()).unwrap();
        prop_assert_eq!(a.xpub(), b.xpub());
    }
}
