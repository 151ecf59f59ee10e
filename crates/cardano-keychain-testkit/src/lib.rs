//! # Cardano Keychain Testkit
//!
//! Testing utilities for the Cardano keychain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Sessions wired to counting in-memory collaborators
//! - **Generators**: Proptest strategies for namespaced and foreign paths
//! - **Golden vectors**: Fixed inputs for cross-implementation determinism checks
//!
//! ## Golden Vectors
//!
//! ```rust
//! use cardano_keychain_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, xpub) in verify_all_vectors() {
//!     println!("{name}: {xpub} ({matches})");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cardano_keychain_testkit::generators::foreign_path;
//!
//! proptest! {
//!     #[test]
//!     fn foreign_paths_are_rejected(path in foreign_path(6)) {
//!         prop_assert!(keychain.verify_path(path.as_slice()).is_err());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use cardano_keychain_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_passphrase("secret");
//! let keychain = fixture.context().keychain().await?;
//! assert_eq!(fixture.prompts(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{TestFixture, ABANDON_MNEMONIC, ICARUS_MNEMONIC};
pub use generators::{foreign_path, namespaced_path};
pub use vectors::{all_vectors, derive_from_vector, random_mnemonic, verify_all_vectors, GoldenVector};
