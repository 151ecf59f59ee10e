//! Message handlers and the `with_keychain` middleware.
//!
//! A [`Handler`] serves one message type given a request [`Context`]. A
//! [`KeychainHandler`] additionally needs the session keychain;
//! [`with_keychain`] turns it into a plain handler that obtains the keychain
//! first, provisioning it if this is the session's first keychain request.

use async_trait::async_trait;

use cardano_keychain_core::{Keychain, KeychainError};

use crate::context::Context;
use crate::error::{Result, SessionError};

/// A message handler.
#[async_trait]
pub trait Handler<M: Send + 'static>: Send + Sync {
    /// Response message type.
    type Response: Send;

    /// Serve one message.
    async fn handle(&self, ctx: &Context, msg: M) -> Result<Self::Response>;
}

/// A message handler that needs the session keychain.
#[async_trait]
pub trait KeychainHandler<M: Send + 'static>: Send + Sync {
    /// Response message type.
    type Response: Send;

    /// Serve one message with the session keychain.
    async fn handle_with_keychain(
        &self,
        ctx: &Context,
        msg: M,
        keychain: &Keychain,
    ) -> Result<Self::Response>;
}

/// Middleware produced by [`with_keychain`].
#[derive(Debug, Clone)]
pub struct WithKeychain<H> {
    inner: H,
}

impl<H> WithKeychain<H> {
    /// The wrapped handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

/// Wrap a keychain-aware handler into a plain [`Handler`].
pub fn with_keychain<H>(handler: H) -> WithKeychain<H> {
    WithKeychain { inner: handler }
}

#[async_trait]
impl<M, H> Handler<M> for WithKeychain<H>
where
    M: Send + 'static,
    H: KeychainHandler<M>,
{
    type Response = H::Response;

    async fn handle(&self, ctx: &Context, msg: M) -> Result<Self::Response> {
        let keychain = ctx.keychain().await?;
        let result = self.inner.handle_with_keychain(ctx, msg, &keychain).await;

        if let Err(SessionError::Keychain(KeychainError::ForbiddenPath(path))) = &result {
            tracing::warn!(%path, "Rejected key path outside Cardano namespaces");
        }
        result
    }
}
