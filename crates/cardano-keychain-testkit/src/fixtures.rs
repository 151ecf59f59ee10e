//! Test fixtures and helpers.
//!
//! Pre-wired request contexts over the in-memory collaborators.

use std::sync::Arc;

use cardano_keychain_session::device::memory::{
    MemoryDevice, MemoryMnemonic, ScriptedAnswer, ScriptedPrompt,
};
use cardano_keychain_session::{Context, ProvisioningConfig, Session};

/// The all-`abandon` BIP-39 test mnemonic.
pub const ABANDON_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                                    abandon abandon abandon abandon abandon about";

/// The 15-word Icarus mnemonic from CIP-0003.
pub const ICARUS_MNEMONIC: &str = "eight country switch draw meat scout mystery blade tip \
                                   drift useless good keep usage title";

/// A session with counting collaborators.
pub struct TestFixture {
    pub session: Arc<Session>,
    pub device: Arc<MemoryDevice>,
    pub mnemonic: Arc<MemoryMnemonic>,
    pub prompt: Arc<ScriptedPrompt>,
    pub config: ProvisioningConfig,
}

impl TestFixture {
    /// Initialized BIP-39 device, passphrase protection off.
    pub fn new() -> Self {
        Self::with_parts(
            MemoryDevice::initialized(),
            MemoryMnemonic::bip39(ABANDON_MNEMONIC),
            ScriptedPrompt::silent(),
        )
    }

    /// Initialized BIP-39 device that will be answered `passphrase`.
    pub fn with_passphrase(passphrase: &str) -> Self {
        Self::with_parts(
            MemoryDevice::initialized().with_passphrase(true),
            MemoryMnemonic::bip39(ABANDON_MNEMONIC),
            ScriptedPrompt::answering(passphrase, 16),
        )
    }

    /// Initialized device holding a recovered seed.
    pub fn with_seed(seed: &[u8]) -> Self {
        Self::with_parts(
            MemoryDevice::initialized(),
            MemoryMnemonic::recovered_seed(seed.to_vec()),
            ScriptedPrompt::silent(),
        )
    }

    /// Device with no seed.
    pub fn uninitialized() -> Self {
        Self::with_parts(
            MemoryDevice::uninitialized().with_passphrase(true),
            MemoryMnemonic::bip39(ABANDON_MNEMONIC),
            ScriptedPrompt::silent(),
        )
    }

    /// Passphrase-protected device whose prompt replays `answers`.
    pub fn scripted(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self::with_parts(
            MemoryDevice::initialized().with_passphrase(true),
            MemoryMnemonic::bip39(ABANDON_MNEMONIC),
            ScriptedPrompt::new(answers),
        )
    }

    /// Assemble from explicit collaborators.
    pub fn with_parts(
        device: MemoryDevice,
        mnemonic: MemoryMnemonic,
        prompt: ScriptedPrompt,
    ) -> Self {
        Self {
            session: Arc::new(Session::new()),
            device: Arc::new(device),
            mnemonic: Arc::new(mnemonic),
            prompt: Arc::new(prompt),
            config: ProvisioningConfig::default(),
        }
    }

    /// A request context bound to this fixture's session.
    pub fn context(&self) -> Context {
        Context::with_config(
            self.session.clone(),
            self.device.clone(),
            self.mnemonic.clone(),
            self.prompt.clone(),
            self.config.clone(),
        )
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> usize {
        self.prompt.prompt_count()
    }

    /// Secret reads so far.
    pub fn secret_reads(&self) -> usize {
        self.mnemonic.reads()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardano_keychain::{get_public_key, CardanoGetPublicKey, Handler, ProvisioningState};

    #[tokio::test]
    async fn test_fixture_contexts_share_session() {
        let fixture = TestFixture::with_passphrase("secret");
        let request = CardanoGetPublicKey {
            address_n: "m/1852'/1815'/0'".parse().unwrap(),
        };

        let a = get_public_key()
            .handle(&fixture.context(), request.clone())
            .await
            .unwrap();
        let b = get_public_key()
            .handle(&fixture.context(), request)
            .await
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(fixture.prompts(), 1);
        assert_eq!(fixture.secret_reads(), 1);
        assert_eq!(fixture.session.state(), ProvisioningState::Cached);
    }

    #[tokio::test]
    async fn test_uninitialized_fixture() {
        let fixture = TestFixture::uninitialized();
        let err = fixture.context().keychain().await.unwrap_err();
        assert_eq!(err.failure_kind(), cardano_keychain::FailureKind::NotInitialized);
        assert_eq!(fixture.prompts(), 0);
    }
}
