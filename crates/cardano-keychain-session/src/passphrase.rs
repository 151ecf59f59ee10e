//! Passphrase acquisition.

use crate::config::ProvisioningConfig;
use crate::device::{DeviceState, Passphrase, PassphraseEntry, PassphrasePrompt};
use crate::error::{PromptError, Result, SessionError};

/// Obtain the session passphrase.
///
/// With passphrase protection disabled the empty passphrase is returned and
/// the user is never prompted. Otherwise the prompt is shown once, on the
/// device or the host depending on device settings.
pub async fn get_passphrase(
    device: &dyn DeviceState,
    prompt: &dyn PassphrasePrompt,
    config: &ProvisioningConfig,
) -> Result<Passphrase> {
    if !device.is_passphrase_enabled() {
        return Ok(Passphrase::empty());
    }

    let entry = if device.passphrase_always_on_device() {
        PassphraseEntry::Device
    } else {
        PassphraseEntry::Host
    };

    let passphrase = match prompt.request_passphrase(entry).await {
        Ok(p) => p,
        Err(PromptError::Cancelled) => {
            tracing::warn!(?entry, "Passphrase entry cancelled");
            return Err(SessionError::PassphraseCancelled);
        }
        Err(e) => return Err(e.into()),
    };

    if passphrase.len() > config.max_passphrase_len {
        return Err(SessionError::PassphraseTooLong {
            len: passphrase.len(),
            max: config.max_passphrase_len,
        });
    }

    Ok(passphrase)
}
