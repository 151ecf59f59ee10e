//! Error types for keychain provisioning and handlers.

use cardano_keychain_core::{DerivationError, KeychainError};
use thiserror::Error;

/// How a failure is reported back to the message-dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The device holds no seed.
    NotInitialized,
    /// The request carried bad data (forbidden path, malformed seed...).
    DataError,
    /// The user cancelled an interaction.
    ActionCancelled,
    /// Anything else.
    ProcessError,
}

/// Errors reported by the passphrase prompt collaborator.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The user cancelled or denied the prompt.
    #[error("passphrase entry cancelled")]
    Cancelled,

    /// The prompt could not be shown or answered.
    #[error("prompt failed: {0}")]
    Failed(String),
}

/// Errors that can occur while provisioning or using a session keychain.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Device is not initialized.
    #[error("device is not initialized")]
    NotInitialized,

    /// Passphrase prompt was cancelled.
    #[error("passphrase entry cancelled")]
    PassphraseCancelled,

    /// Passphrase exceeds the configured maximum.
    #[error("passphrase is {len} bytes, maximum is {max}")]
    PassphraseTooLong { len: usize, max: usize },

    /// Prompt collaborator failure.
    #[error("prompt error: {0}")]
    Prompt(String),

    /// Mnemonic/seed collaborator failure.
    #[error("mnemonic error: {0}")]
    Mnemonic(String),

    /// Keychain error (forbidden path or derivation failure).
    #[error(transparent)]
    Keychain(#[from] KeychainError),
}

impl SessionError {
    /// Classify for the dispatch layer.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            SessionError::NotInitialized => FailureKind::NotInitialized,
            SessionError::PassphraseCancelled => FailureKind::ActionCancelled,
            SessionError::PassphraseTooLong { .. } => FailureKind::DataError,
            SessionError::Keychain(_) => FailureKind::DataError,
            SessionError::Prompt(_) | SessionError::Mnemonic(_) => FailureKind::ProcessError,
        }
    }
}

impl From<DerivationError> for SessionError {
    fn from(e: DerivationError) -> Self {
        SessionError::Keychain(KeychainError::Derivation(e))
    }
}

impl From<PromptError> for SessionError {
    fn from(e: PromptError) -> Self {
        match e {
            PromptError::Cancelled => SessionError::PassphraseCancelled,
            PromptError::Failed(msg) => SessionError::Prompt(msg),
        }
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
