//! Collaborators consulted while provisioning a keychain.
//!
//! The device state, the mnemonic store and the passphrase prompt live
//! outside this crate. They are reached through these traits so that
//! provisioning can run against real firmware services or the in-memory
//! implementations in [`memory`].

use async_trait::async_trait;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{PromptError, Result};

/// A user passphrase. Wiped on drop, never printed.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase(String);

impl Passphrase {
    /// Wrap a passphrase.
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(passphrase.into())
    }

    /// The empty passphrase used when protection is disabled.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Borrow the secret text.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the empty passphrase.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase([REDACTED])")
    }
}

/// Where the user types the passphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassphraseEntry {
    /// On the connected host.
    Host,
    /// On the device itself.
    Device,
}

/// Read-only view of persistent device settings.
pub trait DeviceState: Send + Sync {
    /// Whether a seed has been provisioned.
    fn is_initialized(&self) -> bool;

    /// Whether passphrase protection is turned on.
    fn is_passphrase_enabled(&self) -> bool;

    /// Whether the passphrase must always be entered on the device.
    fn passphrase_always_on_device(&self) -> bool;
}

/// Access to the stored mnemonic secret.
pub trait MnemonicSource: Send + Sync {
    /// Whether the device was set up from a BIP-39 mnemonic.
    fn is_bip39(&self) -> bool;

    /// The encoded mnemonic secret (BIP-39 phrase bytes).
    fn secret(&self) -> Result<Zeroizing<Vec<u8>>>;

    /// The seed bytes for `passphrase`.
    fn seed(&self, passphrase: &Passphrase) -> Result<Zeroizing<Vec<u8>>>;
}

/// Interactive passphrase request.
///
/// May suspend for as long as the user takes; timeouts belong to the
/// implementation.
#[async_trait]
pub trait PassphrasePrompt: Send + Sync {
    /// Ask the user for a passphrase.
    async fn request_passphrase(
        &self,
        entry: PassphraseEntry,
    ) -> std::result::Result<Passphrase, PromptError>;
}

/// In-memory collaborators for tests and host-side simulation.
pub mod memory {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, PoisonError};
    use std::time::Duration;

    use bip39::Mnemonic;

    use crate::error::SessionError;

    /// Fixed device settings.
    #[derive(Debug, Clone)]
    pub struct MemoryDevice {
        initialized: bool,
        passphrase_enabled: bool,
        passphrase_always_on_device: bool,
    }

    impl MemoryDevice {
        /// An initialized device without passphrase protection.
        pub fn initialized() -> Self {
            Self {
                initialized: true,
                passphrase_enabled: false,
                passphrase_always_on_device: false,
            }
        }

        /// A device with no seed.
        pub fn uninitialized() -> Self {
            Self {
                initialized: false,
                ..Self::initialized()
            }
        }

        /// Toggle passphrase protection.
        pub fn with_passphrase(mut self, enabled: bool) -> Self {
            self.passphrase_enabled = enabled;
            self
        }

        /// Toggle on-device passphrase entry.
        pub fn with_passphrase_on_device(mut self, always: bool) -> Self {
            self.passphrase_always_on_device = always;
            self
        }
    }

    impl DeviceState for MemoryDevice {
        fn is_initialized(&self) -> bool {
            self.initialized
        }

        fn is_passphrase_enabled(&self) -> bool {
            self.passphrase_enabled
        }

        fn passphrase_always_on_device(&self) -> bool {
            self.passphrase_always_on_device
        }
    }

    enum StoredSecret {
        Bip39(Zeroizing<String>),
        Seed(Zeroizing<Vec<u8>>),
    }

    /// A mnemonic store holding either a BIP-39 phrase or a recovered seed.
    ///
    /// Counts how often secret material is read.
    pub struct MemoryMnemonic {
        secret: StoredSecret,
        reads: AtomicUsize,
    }

    impl MemoryMnemonic {
        /// A BIP-39 backed device.
        pub fn bip39(phrase: impl Into<String>) -> Self {
            Self {
                secret: StoredSecret::Bip39(Zeroizing::new(phrase.into())),
                reads: AtomicUsize::new(0),
            }
        }

        /// A non-BIP-39 device whose seed has already been recovered.
        ///
        /// The stored seed is returned for every passphrase.
        pub fn recovered_seed(seed: impl Into<Vec<u8>>) -> Self {
            Self {
                secret: StoredSecret::Seed(Zeroizing::new(seed.into())),
                reads: AtomicUsize::new(0),
            }
        }

        /// Number of `secret`/`seed` calls so far.
        pub fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl MnemonicSource for MemoryMnemonic {
        fn is_bip39(&self) -> bool {
            matches!(self.secret, StoredSecret::Bip39(_))
        }

        fn secret(&self) -> Result<Zeroizing<Vec<u8>>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            match &self.secret {
                StoredSecret::Bip39(phrase) => Ok(Zeroizing::new(phrase.as_bytes().to_vec())),
                StoredSecret::Seed(_) => Err(SessionError::Mnemonic(
                    "no BIP-39 phrase stored".to_string(),
                )),
            }
        }

        fn seed(&self, passphrase: &Passphrase) -> Result<Zeroizing<Vec<u8>>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            match &self.secret {
                StoredSecret::Bip39(phrase) => {
                    let mnemonic = Mnemonic::parse_normalized(phrase)
                        .map_err(|e| SessionError::Mnemonic(e.to_string()))?;
                    let seed = Zeroizing::new(mnemonic.to_seed_normalized(passphrase.expose()));
                    Ok(Zeroizing::new(seed.to_vec()))
                }
                StoredSecret::Seed(seed) => Ok(seed.clone()),
            }
        }
    }

    /// A scripted answer for [`ScriptedPrompt`].
    #[derive(Debug, Clone)]
    pub enum ScriptedAnswer {
        Passphrase(String),
        Cancel,
        Fail(String),
    }

    /// A prompt that replays scripted answers and records every request.
    pub struct ScriptedPrompt {
        answers: Mutex<VecDeque<ScriptedAnswer>>,
        requests: Mutex<Vec<PassphraseEntry>>,
        delay: Option<Duration>,
    }

    impl ScriptedPrompt {
        /// Replay `answers` in order.
        pub fn new(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
            Self {
                answers: Mutex::new(answers.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        /// A prompt with no answers; any request fails.
        pub fn silent() -> Self {
            Self::new(Vec::new())
        }

        /// Always answer with the same passphrase.
        pub fn answering(passphrase: &str, times: usize) -> Self {
            Self::new(std::iter::repeat(ScriptedAnswer::Passphrase(passphrase.to_string())).take(times))
        }

        /// Wait this long before answering, simulating a user.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Number of prompts shown so far.
        pub fn prompt_count(&self) -> usize {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        /// Entry locations requested so far.
        pub fn requests(&self) -> Vec<PassphraseEntry> {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    #[async_trait]
    impl PassphrasePrompt for ScriptedPrompt {
        async fn request_passphrase(
            &self,
            entry: PassphraseEntry,
        ) -> std::result::Result<Passphrase, PromptError> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(entry);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let answer = self
                .answers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();
            match answer {
                Some(ScriptedAnswer::Passphrase(p)) => Ok(Passphrase::new(p)),
                Some(ScriptedAnswer::Cancel) => Err(PromptError::Cancelled),
                Some(ScriptedAnswer::Fail(msg)) => Err(PromptError::Failed(msg)),
                None => Err(PromptError::Failed("no scripted answer left".to_string())),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const ABANDON: &str = "abandon abandon abandon abandon abandon abandon \
                               abandon abandon abandon abandon abandon about";

        #[test]
        fn test_memory_device_flags() {
            let device = MemoryDevice::initialized()
                .with_passphrase(true)
                .with_passphrase_on_device(true);
            assert!(device.is_initialized());
            assert!(device.is_passphrase_enabled());
            assert!(device.passphrase_always_on_device());
            assert!(!MemoryDevice::uninitialized().is_initialized());
        }

        #[test]
        fn test_bip39_mnemonic() {
            let mnemonic = MemoryMnemonic::bip39(ABANDON);
            assert!(mnemonic.is_bip39());
            assert_eq!(&mnemonic.secret().unwrap()[..], ABANDON.as_bytes());

            let plain = mnemonic.seed(&Passphrase::empty()).unwrap();
            let salted = mnemonic.seed(&Passphrase::new("TREZOR")).unwrap();
            assert_eq!(plain.len(), 64);
            assert_ne!(&plain[..], &salted[..]);
            assert_eq!(mnemonic.reads(), 3);
        }

        #[test]
        fn test_recovered_seed() {
            let mnemonic = MemoryMnemonic::recovered_seed(vec![0x11; 32]);
            assert!(!mnemonic.is_bip39());
            assert!(mnemonic.secret().is_err());
            assert_eq!(&mnemonic.seed(&Passphrase::empty()).unwrap()[..], &[0x11; 32]);
        }

        #[tokio::test]
        async fn test_scripted_prompt_replays_answers() {
            let prompt = ScriptedPrompt::new([
                ScriptedAnswer::Passphrase("secret".into()),
                ScriptedAnswer::Cancel,
            ]);

            let first = prompt.request_passphrase(PassphraseEntry::Host).await.unwrap();
            assert_eq!(first.expose(), "secret");
            assert!(matches!(
                prompt.request_passphrase(PassphraseEntry::Device).await,
                Err(PromptError::Cancelled)
            ));
            assert!(matches!(
                prompt.request_passphrase(PassphraseEntry::Host).await,
                Err(PromptError::Failed(_))
            ));
            assert_eq!(
                prompt.requests(),
                vec![PassphraseEntry::Host, PassphraseEntry::Device, PassphraseEntry::Host]
            );
        }

        #[test]
        fn test_passphrase_debug_is_redacted() {
            let passphrase = Passphrase::new("hunter2");
            assert_eq!(format!("{:?}", passphrase), "Passphrase([REDACTED])");
        }
    }
}
