//! Building a session keychain from device collaborators.
//!
//! Provisioning runs at most once per session (see [`crate::session`]):
//!
//! 1. Refuse uninitialized devices before the user sees any prompt.
//! 2. Obtain the passphrase.
//! 3. Pick the root algorithm from the mnemonic type.
//! 4. Derive the master root and both namespace roots.

use cardano_keychain_core::{
    root_from_mnemonic_and_passphrase, root_from_seed, CardanoNode, Keychain, RootAlgorithm,
    CARDANO_SEED_LABEL,
};

use crate::config::ProvisioningConfig;
use crate::device::{DeviceState, MnemonicSource, Passphrase, PassphrasePrompt};
use crate::error::{Result, SessionError};
use crate::passphrase::get_passphrase;

/// Root algorithm for a device.
pub fn root_algorithm(mnemonic: &dyn MnemonicSource) -> RootAlgorithm {
    if mnemonic.is_bip39() {
        RootAlgorithm::Icarus
    } else {
        RootAlgorithm::Slip23
    }
}

/// Derive the master root with the chosen algorithm.
pub fn derive_root(
    mnemonic: &dyn MnemonicSource,
    passphrase: &Passphrase,
) -> Result<CardanoNode> {
    match root_algorithm(mnemonic) {
        RootAlgorithm::Icarus => {
            let secret = mnemonic.secret()?;
            let phrase = std::str::from_utf8(&secret)
                .map_err(|_| SessionError::Mnemonic("mnemonic is not valid UTF-8".to_string()))?;
            Ok(root_from_mnemonic_and_passphrase(phrase, passphrase.expose())?)
        }
        RootAlgorithm::Slip23 => {
            let seed = mnemonic.seed(passphrase)?;
            Ok(root_from_seed(&seed, CARDANO_SEED_LABEL)?)
        }
    }
}

/// Provision a fresh keychain.
pub async fn provision_keychain(
    device: &dyn DeviceState,
    mnemonic: &dyn MnemonicSource,
    prompt: &dyn PassphrasePrompt,
    config: &ProvisioningConfig,
) -> Result<Keychain> {
    if !device.is_initialized() {
        return Err(SessionError::NotInitialized);
    }

    let algorithm = root_algorithm(mnemonic);
    tracing::debug!(?algorithm, "Provisioning keychain");

    let passphrase = get_passphrase(device, prompt, config).await?;
    let root = derive_root(mnemonic, &passphrase)?;
    let keychain: Keychain = Keychain::new(root)?;

    tracing::debug!(?algorithm, fingerprint = %keychain.fingerprint(), "Keychain provisioned");
    Ok(keychain)
}
