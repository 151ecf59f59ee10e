//! Provisioning configuration.

/// Maximum passphrase length accepted by the firmware, in bytes.
pub const MAX_PASSPHRASE_LEN: usize = 50;

/// Configuration for keychain provisioning.
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    /// Longest passphrase accepted, in bytes.
    pub max_passphrase_len: usize,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            max_passphrase_len: MAX_PASSPHRASE_LEN,
        }
    }
}
