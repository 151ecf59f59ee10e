//! The Byron and Shelley namespace registry.
//!
//! A namespace is a fixed path prefix identifying which era's subtree a path
//! belongs to. The prefixes are compile-time constants; there is no runtime
//! API to add or change them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::path::{harden, DerivationIndex};

/// The two derivation eras a keychain serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    /// Legacy Byron-era wallets (BIP-44 purpose).
    Byron,
    /// Shelley-era wallets (CIP-1852 purpose).
    Shelley,
}

impl Namespace {
    /// Every namespace, in classification order.
    pub const ALL: [Namespace; 2] = [Namespace::Byron, Namespace::Shelley];

    /// Lowercase name, for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Namespace::Byron => "byron",
            Namespace::Shelley => "shelley",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Panics at compile time (post-monomorphization) when the prefixes differ
/// in length.
const fn equal_len(byron: &[DerivationIndex], shelley: &[DerivationIndex]) -> usize {
    assert!(
        byron.len() == shelley.len(),
        "Byron and Shelley namespaces must have equal length"
    );
    byron.len()
}

/// Compile-time table of the two whitelisted prefixes.
///
/// Keychains are generic over the registry so the same gating rules apply to
/// any pair of prefixes. `LEN` fails to evaluate, and therefore fails the
/// build, if the two prefixes differ in length.
pub trait NamespaceRegistry: Send + Sync + 'static {
    /// Byron prefix.
    const BYRON: &'static [DerivationIndex];

    /// Shelley prefix.
    const SHELLEY: &'static [DerivationIndex];

    /// Shared prefix length `L`.
    const LEN: usize = equal_len(Self::BYRON, Self::SHELLEY);

    /// The prefix belonging to `namespace`.
    fn prefix(namespace: Namespace) -> &'static [DerivationIndex] {
        match namespace {
            Namespace::Byron => Self::BYRON,
            Namespace::Shelley => Self::SHELLEY,
        }
    }

    /// The namespace whose prefix `path` starts with, if any.
    fn classify(path: &[DerivationIndex]) -> Option<Namespace> {
        Namespace::ALL
            .into_iter()
            .find(|&namespace| path.starts_with(Self::prefix(namespace)))
    }
}

/// The production registry: purpose and coin type, account left to callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardanoNamespaces;

impl NamespaceRegistry for CardanoNamespaces {
    const BYRON: &'static [DerivationIndex] = &[harden(44), harden(1815)];
    const SHELLEY: &'static [DerivationIndex] = &[harden(1852), harden(1815)];
}
