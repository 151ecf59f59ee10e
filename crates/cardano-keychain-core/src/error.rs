//! Error types for the keychain core.

use thiserror::Error;

use crate::path::{DerivationIndex, DerivationPath};

/// Errors raised while parsing a textual derivation path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("derivation path must start with 'm'")]
    MissingRoot,

    #[error("empty path component at position {0}")]
    EmptyComponent(usize),

    #[error("invalid path component '{0}'")]
    InvalidComponent(String),

    #[error("index {0} does not fit below the hardened offset")]
    IndexOutOfRange(u32),
}

/// Failures of the underlying derivation primitive.
#[derive(Debug, Clone, Error)]
pub enum DerivationError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("invalid root key: {0}")]
    InvalidRootKey(String),

    #[error("child derivation failed at index {index}: {reason}")]
    ChildDerivation {
        index: DerivationIndex,
        reason: String,
    },
}

/// Errors produced by [`Keychain`](crate::Keychain) operations.
#[derive(Debug, Clone, Error)]
pub enum KeychainError {
    /// The path lies outside both whitelisted namespaces.
    #[error("forbidden key path: {0}")]
    ForbiddenPath(DerivationPath),

    /// The derivation primitive failed.
    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

/// Result type for keychain operations.
pub type Result<T> = std::result::Result<T, KeychainError>;
