//! # Cardano Keychain
//!
//! Namespace-gated hierarchical-deterministic keys for Cardano, provisioned
//! once per session and handed to message handlers.
//!
//! ## Overview
//!
//! One device seed serves two incompatible eras:
//!
//! - **Byron**: paths under `m/44'/1815'`
//! - **Shelley**: paths under `m/1852'/1815'`
//!
//! Every requested path must start with one of these prefixes. Derivation
//! always continues from the cached namespace root, never from the master
//! root, so no key outside the two subtrees can be produced.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cardano_keychain::{dispatch, CardanoGetPublicKey, Context, Request, Session};
//! use cardano_keychain::session::device::memory::{MemoryDevice, MemoryMnemonic, ScriptedPrompt};
//!
//! async fn example() {
//!     let ctx = Context::new(
//!         Arc::new(Session::new()),
//!         Arc::new(MemoryDevice::initialized()),
//!         Arc::new(MemoryMnemonic::bip39(
//!             "abandon abandon abandon abandon abandon abandon \
//!              abandon abandon abandon abandon abandon about",
//!         )),
//!         Arc::new(ScriptedPrompt::silent()),
//!     );
//!
//!     let request = Request::CardanoGetPublicKey(CardanoGetPublicKey {
//!         address_n: "m/1852'/1815'/0'/0/0".parse().unwrap(),
//!     });
//!     let response = dispatch(&ctx, request).await;
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `cardano_keychain::core` - Paths, namespaces, nodes, the keychain
//! - `cardano_keychain::session` - Provisioning, session cache, middleware

pub mod handlers;
pub mod messages;

// Re-export component crates
pub use cardano_keychain_core as core;
pub use cardano_keychain_session as session;

pub use handlers::{dispatch, get_public_key, sign_message, GetPublicKey, SignMessage};
pub use messages::{
    CardanoGetPublicKey, CardanoMessageSignature, CardanoPublicKey, CardanoSignMessage, Failure,
    FailureCode, HdNodeType, Request, Response,
};

// Re-export commonly used types
pub use cardano_keychain_core::{
    harden, CardanoNamespaces, CardanoNode, DerivationPath, Keychain, KeychainError, Namespace,
};
pub use cardano_keychain_session::{
    with_keychain, Context, FailureKind, Handler, KeychainHandler, ProvisioningConfig,
    ProvisioningState, Session, SessionError,
};
