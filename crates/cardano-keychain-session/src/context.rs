//! Per-request context.

use std::sync::Arc;

use cardano_keychain_core::Keychain;

use crate::config::ProvisioningConfig;
use crate::device::{DeviceState, MnemonicSource, PassphrasePrompt};
use crate::error::Result;
use crate::provision::provision_keychain;
use crate::session::Session;

/// Everything a handler can reach while serving one request.
///
/// Cloning is cheap; clones share the same session.
#[derive(Clone)]
pub struct Context {
    session: Arc<Session>,
    device: Arc<dyn DeviceState>,
    mnemonic: Arc<dyn MnemonicSource>,
    prompt: Arc<dyn PassphrasePrompt>,
    config: ProvisioningConfig,
}

impl Context {
    /// Create a context with the default configuration.
    pub fn new(
        session: Arc<Session>,
        device: Arc<dyn DeviceState>,
        mnemonic: Arc<dyn MnemonicSource>,
        prompt: Arc<dyn PassphrasePrompt>,
    ) -> Self {
        Self::with_config(session, device, mnemonic, prompt, ProvisioningConfig::default())
    }

    /// Create a context with a custom configuration.
    pub fn with_config(
        session: Arc<Session>,
        device: Arc<dyn DeviceState>,
        mnemonic: Arc<dyn MnemonicSource>,
        prompt: Arc<dyn PassphrasePrompt>,
        config: ProvisioningConfig,
    ) -> Self {
        Self {
            session,
            device,
            mnemonic,
            prompt,
            config,
        }
    }

    /// The session this request belongs to.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The provisioning configuration.
    pub fn config(&self) -> &ProvisioningConfig {
        &self.config
    }

    /// The session keychain, provisioning it on first use.
    pub async fn keychain(&self) -> Result<Arc<Keychain>> {
        self.session
            .get_or_provision(|| {
                provision_keychain(
                    self.device.as_ref(),
                    self.mnemonic.as_ref(),
                    self.prompt.as_ref(),
                    &self.config,
                )
            })
            .await
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("session", &self.session)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
