//! Master root derivation.
//!
//! Two algorithms produce a Cardano master node:
//!
//! - **Icarus**: PBKDF2-HMAC-SHA512 over the BIP-39 entropy, keyed by the
//!   passphrase, 4096 rounds, 96 bytes, then clamped.
//! - **SLIP-0023**: HMAC-SHA512 over a seed, keyed by a fixed label,
//!   retried until the scalar's third-highest bit is clear.

use bip39::Mnemonic;
use ed25519_bip32::XPrv;
use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

use crate::error::DerivationError;
use crate::node::CardanoNode;

/// HMAC key used by SLIP-0023 for Cardano.
pub const CARDANO_SEED_LABEL: &str = "ed25519 cardano seed";

const ICARUS_ITERATIONS: u32 = 4096;
const XPRV_LEN: usize = 96;

/// Upper bound on SLIP-0023 rehash rounds. Each round succeeds with
/// probability 1/2.
const SLIP23_MAX_ROUNDS: usize = 256;

/// Which algorithm produced a master root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootAlgorithm {
    /// Mnemonic entropy + passphrase (BIP-39 devices).
    Icarus,
    /// Seed + fixed label (SLIP-39 devices).
    Slip23,
}

/// Derive the master node from a BIP-39 mnemonic and passphrase (Icarus).
pub fn root_from_mnemonic_and_passphrase(
    mnemonic: &str,
    passphrase: &str,
) -> Result<CardanoNode, DerivationError> {
    let parsed = Mnemonic::parse_normalized(mnemonic)
        .map_err(|e| DerivationError::InvalidMnemonic(e.to_string()))?;
    let entropy = Zeroizing::new(parsed.to_entropy());

    let mut secret = Zeroizing::new([0u8; XPRV_LEN]);
    pbkdf2_hmac::<Sha512>(
        passphrase.as_bytes(),
        &entropy,
        ICARUS_ITERATIONS,
        &mut secret[..],
    );

    clamp_scalar(&mut secret[..]);
    root_from_bytes(&secret[..])
}

/// Apply the Ed25519-BIP32 scalar mask, clearing the third-highest bit.
fn clamp_scalar(xprv: &mut [u8]) {
    xprv[0] &= 0b1111_1000;
    xprv[31] &= 0b0001_1111;
    xprv[31] |= 0b0100_0000;
}

fn root_from_bytes(xprv: &[u8]) -> Result<CardanoNode, DerivationError> {
    let xprv = XPrv::from_slice_verified(xprv)
        .map_err(|e| DerivationError::InvalidRootKey(format!("{:?}", e)))?;
    Ok(CardanoNode::from_xprv(xprv))
}

/// Derive the master node from a seed using SLIP-0023 with the given label.
pub fn root_from_seed(seed: &[u8], label: &str) -> Result<CardanoNode, DerivationError> {
    if seed.is_empty() {
        return Err(DerivationError::InvalidSeed("seed is empty".to_string()));
    }

    let mut data = Zeroizing::new(seed.to_vec());
    for _ in 0..SLIP23_MAX_ROUNDS {
        let mut mac = Hmac::<Sha512>::new_from_slice(label.as_bytes())
            .map_err(|e| DerivationError::InvalidSeed(e.to_string()))?;
        mac.update(&data);
        let mut i = Zeroizing::new([0u8; 64]);
        i.copy_from_slice(&mac.finalize().into_bytes());
        let (il, ir) = i.split_at(32);

        let mut k = Zeroizing::new([0u8; 64]);
        k.copy_from_slice(&Sha512::digest(il));
        if k[31] & 0b0010_0000 != 0 {
            data = Zeroizing::new(i.to_vec());
            continue;
        }

        let mut bytes = Zeroizing::new([0u8; XPRV_LEN]);
        bytes[..64].copy_from_slice(&k[..]);
        bytes[64..].copy_from_slice(ir);
        clamp_scalar(&mut bytes[..]);
        return root_from_bytes(&bytes[..]);
    }

    Err(DerivationError::InvalidSeed(format!(
        "no valid key after {} rounds",
        SLIP23_MAX_ROUNDS
    )))
}
