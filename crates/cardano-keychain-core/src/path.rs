//! Derivation indices and paths.
//!
//! A path is an ordered list of BIP32 indices. Comparison is positional and
//! exact; the hardened bit is carried through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

/// A single BIP32 child index.
pub type DerivationIndex = u32;

/// Offset marking a hardened index.
pub const HARDENED: DerivationIndex = 0x8000_0000;

/// Mark an index as hardened.
pub const fn harden(index: DerivationIndex) -> DerivationIndex {
    index | HARDENED
}

/// Whether an index carries the hardened bit.
pub const fn is_hardened(index: DerivationIndex) -> bool {
    index & HARDENED != 0
}

/// An ordered sequence of derivation indices.
///
/// Serializes as a plain array of integers, the same shape as the
/// `address_n` field of request messages.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivationPath(Vec<DerivationIndex>);

impl DerivationPath {
    /// Create a path from raw indices.
    pub fn new(indices: Vec<DerivationIndex>) -> Self {
        Self(indices)
    }

    /// The indices as a slice.
    pub fn as_slice(&self) -> &[DerivationIndex] {
        &self.0
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the master path `m`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the indices.
    pub fn iter(&self) -> std::slice::Iter<'_, DerivationIndex> {
        self.0.iter()
    }

    /// Whether the path begins with `prefix`.
    pub fn starts_with(&self, prefix: &[DerivationIndex]) -> bool {
        self.0.starts_with(prefix)
    }

    /// Consume into the raw indices.
    pub fn into_inner(self) -> Vec<DerivationIndex> {
        self.0
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for &index in &self.0 {
            if is_hardened(index) {
                write!(f, "/{}'", index & !HARDENED)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivationPath({})", self)
    }
}

impl FromStr for DerivationPath {
    type Err = PathError;

    /// Parse `m/1852'/1815'/0'/0/5`. Both `'` and `h` mark hardened indices.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');
        match parts.next() {
            Some("m") | Some("M") => {}
            _ => return Err(PathError::MissingRoot),
        }

        let mut indices = Vec::new();
        for (position, part) in parts.enumerate() {
            if part.is_empty() {
                return Err(PathError::EmptyComponent(position + 1));
            }

            let (digits, hardened) = match part.strip_suffix('\'').or_else(|| part.strip_suffix('h')) {
                Some(digits) => (digits, true),
                None => (part, false),
            };

            let value: u32 = digits
                .parse()
                .map_err(|_| PathError::InvalidComponent(part.to_string()))?;
            if value >= HARDENED {
                return Err(PathError::IndexOutOfRange(value));
            }

            indices.push(if hardened { harden(value) } else { value });
        }

        Ok(Self(indices))
    }
}

impl AsRef<[DerivationIndex]> for DerivationPath {
    fn as_ref(&self) -> &[DerivationIndex] {
        &self.0
    }
}

impl From<Vec<DerivationIndex>> for DerivationPath {
    fn from(indices: Vec<DerivationIndex>) -> Self {
        Self(indices)
    }
}

impl From<&[DerivationIndex]> for DerivationPath {
    fn from(indices: &[DerivationIndex]) -> Self {
        Self(indices.to_vec())
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a DerivationIndex;
    type IntoIter = std::slice::Iter<'a, DerivationIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
