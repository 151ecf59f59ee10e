//! # Cardano Keychain Core
//!
//! Pure primitives for the Cardano keychain: derivation paths, the Byron and
//! Shelley namespace registry, HD nodes and the namespace-gated [`Keychain`].
//!
//! This crate contains no I/O, no sessions, no prompting. It is pure
//! computation over key material.
//!
//! ## Key Types
//!
//! - [`DerivationPath`] - Ordered sequence of BIP32 indices
//! - [`Namespace`] - The two eras a path may belong to
//! - [`NamespaceRegistry`] - Compile-time table of namespace prefixes
//! - [`HdNode`] - The derivation primitive seam
//! - [`CardanoNode`] - BIP32-Ed25519 node using the Cardano V2 scheme
//! - [`Keychain`] - Master root plus cached namespace roots
//!
//! ## Root Derivation
//!
//! Roots are created either from a BIP-39 mnemonic and passphrase (Icarus) or
//! from a raw seed with the SLIP-0023 label. See [`root`] module.

pub mod crypto;
pub mod error;
pub mod keychain;
pub mod namespace;
pub mod node;
pub mod path;
pub mod root;

pub use crypto::{ChainCode, Ed25519PublicKey, Ed25519Signature, ExtendedPublicKey, NodeFingerprint};
pub use error::{DerivationError, KeychainError, PathError, Result};
pub use keychain::Keychain;
pub use namespace::{CardanoNamespaces, Namespace, NamespaceRegistry};
pub use node::{CardanoNode, HdNode};
pub use path::{harden, is_hardened, DerivationIndex, DerivationPath, HARDENED};
pub use root::{
    root_from_mnemonic_and_passphrase, root_from_seed, RootAlgorithm, CARDANO_SEED_LABEL,
};
