//! HD nodes: the derivation primitive seam.
//!
//! [`HdNode`] is what the keychain needs from a node: deep cloning and
//! in-place child derivation. [`CardanoNode`] implements it with
//! BIP32-Ed25519 under the Cardano V2 scheme.

use ed25519_bip32::{DerivationScheme, Signature, XPrv};
use std::fmt;

use crate::crypto::{ChainCode, Ed25519PublicKey, Ed25519Signature, ExtendedPublicKey, NodeFingerprint};
use crate::error::DerivationError;
use crate::path::DerivationIndex;

/// A hierarchical-deterministic key-derivation state.
///
/// `Clone` must produce an independent deep copy: deriving from a clone never
/// affects the original.
pub trait HdNode: Clone + Send + Sync {
    /// Replace this node with its child at `index`.
    fn derive_child(&mut self, index: DerivationIndex) -> Result<(), DerivationError>;
}

/// Clone `from` and derive through each index in order.
pub(crate) fn derive_through<N: HdNode>(
    from: &N,
    indices: &[DerivationIndex],
) -> Result<N, DerivationError> {
    let mut node = from.clone();
    for &index in indices {
        node.derive_child(index)?;
    }
    Ok(node)
}

/// A BIP32-Ed25519 node using the Cardano V2 derivation scheme.
///
/// The extended private key is wiped when the node is dropped.
#[derive(Clone)]
pub struct CardanoNode {
    xprv: XPrv,
    depth: u32,
    child_num: DerivationIndex,
}

impl CardanoNode {
    /// Wrap a root extended private key.
    pub fn from_xprv(xprv: XPrv) -> Self {
        Self {
            xprv,
            depth: 0,
            child_num: 0,
        }
    }

    /// Distance from the master root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The index this node was derived with (0 for a root).
    pub fn child_num(&self) -> DerivationIndex {
        self.child_num
    }

    /// Ed25519 public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.xpub().public_key
    }

    /// Chain code.
    pub fn chain_code(&self) -> ChainCode {
        self.xpub().chain_code
    }

    /// Public key and chain code together.
    pub fn xpub(&self) -> ExtendedPublicKey {
        let xpub = self.xprv.public();
        ExtendedPublicKey {
            public_key: Ed25519PublicKey(*xpub.public_key_bytes()),
            chain_code: ChainCode(*xpub.chain_code()),
        }
    }

    /// Log-safe identifier.
    pub fn fingerprint(&self) -> NodeFingerprint {
        NodeFingerprint::of(&self.public_key())
    }

    /// Sign a message with the extended private key.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let signature: Signature<Vec<u8>> = self.xprv.sign(message);
        Ed25519Signature(*signature.to_bytes())
    }
}

impl HdNode for CardanoNode {
    fn derive_child(&mut self, index: DerivationIndex) -> Result<(), DerivationError> {
        let depth = self.depth.checked_add(1).ok_or(DerivationError::ChildDerivation {
            index,
            reason: "maximum depth exceeded".to_string(),
        })?;
        self.xprv = self.xprv.derive(DerivationScheme::V2, index);
        self.depth = depth;
        self.child_num = index;
        Ok(())
    }
}

impl fmt::Debug for CardanoNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardanoNode")
            .field("depth", &self.depth)
            .field("child_num", &self.child_num)
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::harden;

    fn test_node() -> CardanoNode {
        let mut bytes = [0x5au8; 96];
        bytes[0] &= 0b1111_1000;
        bytes[31] &= 0b0001_1111;
        bytes[31] |= 0b0100_0000;
        CardanoNode::from_xprv(XPrv::from_bytes_verified(bytes).unwrap())
    }

    #[test]
    fn test_clone_is_independent() {
        let root = test_node();
        let before = root.xpub();

        let mut child = root.clone();
        child.derive_child(harden(1852)).unwrap();

        assert_eq!(root.xpub(), before);
        assert_ne!(child.xpub(), before);
        assert_eq!(root.depth(), 0);
        assert_eq!(child.depth(), 1);
        assert_eq!(child.child_num(), harden(1852));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let path = [harden(1852), harden(1815), harden(0), 0, 5];
        let a = derive_through(&test_node(), &path).unwrap();
        let b = derive_through(&test_node(), &path).unwrap();
        assert_eq!(a.xpub(), b.xpub());
        assert_eq!(a.depth(), 5);
    }

    #[test]
    fn test_hardened_and_soft_children_differ() {
        let root = test_node();
        let soft = derive_through(&root, &[0]).unwrap();
        let hard = derive_through(&root, &[harden(0)]).unwrap();
        assert_ne!(soft.public_key(), hard.public_key());
    }

    #[test]
    fn test_signature_verifies_with_public_key() {
        let node = derive_through(&test_node(), &[harden(1852), 0]).unwrap();
        let signature = node.sign(b"hello cardano");

        assert!(node.public_key().verify(b"hello cardano", &signature));
        assert!(!node.public_key().verify(b"hello cardanO", &signature));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let node = test_node();
        let debug = format!("{:?}", node);
        assert!(debug.starts_with("CardanoNode"));
        assert!(!debug.contains(&hex::encode([0x5au8; 8])));
    }
}
