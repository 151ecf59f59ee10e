//! # Cardano Keychain Session
//!
//! Session-scoped provisioning of the Cardano [`Keychain`] and the
//! [`with_keychain`] middleware that hands it to message handlers.
//!
//! ## Overview
//!
//! The first keychain request in a session checks that the device holds a
//! seed, asks for the passphrase, derives the master root with the algorithm
//! matching the seed type and caches the resulting keychain in the
//! [`Session`]. Later requests reuse it without prompting again.
//!
//! ## Key Types
//!
//! - [`Session`] - Holds at most one cached keychain
//! - [`Context`] - Per-request view of the session and device collaborators
//! - [`Handler`] / [`KeychainHandler`] - Message handler seams
//! - [`DeviceState`], [`MnemonicSource`], [`PassphrasePrompt`] - Collaborators
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cardano_keychain_session::{with_keychain, Context, Handler};
//!
//! let handler = with_keychain(MyHandler);
//! let response = handler.handle(&ctx, request).await?;
//! ```
//!
//! [`Keychain`]: cardano_keychain_core::Keychain

pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod handler;
pub mod passphrase;
pub mod provision;
pub mod session;

pub use config::{ProvisioningConfig, MAX_PASSPHRASE_LEN};
pub use context::Context;
pub use device::{DeviceState, MnemonicSource, Passphrase, PassphraseEntry, PassphrasePrompt};
pub use error::{FailureKind, PromptError, Result, SessionError};
pub use handler::{with_keychain, Handler, KeychainHandler, WithKeychain};
pub use passphrase::get_passphrase;
pub use provision::{derive_root, provision_keychain, root_algorithm};
pub use session::{ProvisioningState, Session};
