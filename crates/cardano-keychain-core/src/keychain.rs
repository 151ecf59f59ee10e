//! The namespace-gated keychain.
//!
//! A keychain owns a master root and the two namespace roots derived from it
//! at construction. Every externally requested path is checked against the
//! registry before any key material is produced, and derivation always starts
//! from a namespace root, never from the master root.

use std::marker::PhantomData;

use crate::crypto::NodeFingerprint;
use crate::error::{KeychainError, Result};
use crate::namespace::{CardanoNamespaces, Namespace, NamespaceRegistry};
use crate::node::{derive_through, CardanoNode, HdNode};
use crate::path::{DerivationIndex, DerivationPath};

/// Master root plus the Byron and Shelley subtree roots.
///
/// Namespace roots are derived once in [`Keychain::new`] and never change.
pub struct Keychain<N: HdNode = CardanoNode, R: NamespaceRegistry = CardanoNamespaces> {
    /// Never used for external paths.
    root: N,
    byron_root: N,
    shelley_root: N,
    registry: PhantomData<fn() -> R>,
}

impl<N: HdNode, R: NamespaceRegistry> Keychain<N, R> {
    /// Build a keychain, eagerly deriving both namespace roots from `root`.
    pub fn new(root: N) -> Result<Self> {
        let byron_root = derive_through(&root, R::BYRON)?;
        let shelley_root = derive_through(&root, R::SHELLEY)?;
        Ok(Self {
            root,
            byron_root,
            shelley_root,
            registry: PhantomData,
        })
    }

    /// Check that `path` starts with the Byron or the Shelley prefix.
    pub fn verify_path(&self, path: &[DerivationIndex]) -> Result<()> {
        self.namespace_of(path).map(|_| ())
    }

    /// The namespace `path` belongs to.
    pub fn namespace_of(&self, path: &[DerivationIndex]) -> Result<Namespace> {
        R::classify(path).ok_or_else(|| KeychainError::ForbiddenPath(DerivationPath::from(path)))
    }

    /// Derive the node at `path`.
    ///
    /// The path is verified first; the namespace root is cloned and the
    /// remaining indices are derived from it.
    pub fn derive(&self, path: &[DerivationIndex]) -> Result<N> {
        let namespace = self.namespace_of(path)?;
        let suffix = &path[R::LEN..];
        Ok(derive_through(self.namespace_root(namespace), suffix)?)
    }

    /// Read-only view of a namespace root.
    pub fn namespace_root(&self, namespace: Namespace) -> &N {
        match namespace {
            Namespace::Byron => &self.byron_root,
            Namespace::Shelley => &self.shelley_root,
        }
    }
}

impl<R: NamespaceRegistry> Keychain<CardanoNode, R> {
    /// Non-secret identifier of the master root, safe to log.
    pub fn fingerprint(&self) -> NodeFingerprint {
        self.root.fingerprint()
    }
}

impl<N: HdNode, R: NamespaceRegistry> std::fmt::Debug for Keychain<N, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keychain")
            .field("namespace_len", &R::LEN)
            .finish_non_exhaustive()
    }
}
