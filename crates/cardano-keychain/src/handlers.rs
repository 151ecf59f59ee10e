//! Keychain-backed message handlers.

use async_trait::async_trait;

use cardano_keychain_core::Keychain;
use cardano_keychain_session::{with_keychain, Context, Handler, KeychainHandler, Result, WithKeychain};

use crate::messages::{
    CardanoGetPublicKey, CardanoMessageSignature, CardanoPublicKey, CardanoSignMessage, Failure,
    Request, Response,
};

/// Serves [`CardanoGetPublicKey`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GetPublicKey;

#[async_trait]
impl KeychainHandler<CardanoGetPublicKey> for GetPublicKey {
    type Response = CardanoPublicKey;

    async fn handle_with_keychain(
        &self,
        _ctx: &Context,
        msg: CardanoGetPublicKey,
        keychain: &Keychain,
    ) -> Result<CardanoPublicKey> {
        let node = keychain.derive(msg.address_n.as_slice())?;
        Ok(CardanoPublicKey::from_node(msg.address_n, &node))
    }
}

/// Serves [`CardanoSignMessage`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SignMessage;

#[async_trait]
impl KeychainHandler<CardanoSignMessage> for SignMessage {
    type Response = CardanoMessageSignature;

    async fn handle_with_keychain(
        &self,
        _ctx: &Context,
        msg: CardanoSignMessage,
        keychain: &Keychain,
    ) -> Result<CardanoMessageSignature> {
        let node = keychain.derive(msg.address_n.as_slice())?;
        let signature = node.sign(&msg.message);
        Ok(CardanoMessageSignature::new(&node.public_key(), &signature))
    }
}

/// The public key handler, wrapped for session keychain access.
pub fn get_public_key() -> WithKeychain<GetPublicKey> {
    with_keychain(GetPublicKey)
}

/// The message signing handler, wrapped for session keychain access.
pub fn sign_message() -> WithKeychain<SignMessage> {
    with_keychain(SignMessage)
}

/// Route a request to its handler, converting errors to [`Failure`].
pub async fn dispatch(ctx: &Context, request: Request) -> Response {
    let result = match request {
        Request::CardanoGetPublicKey(msg) => get_public_key()
            .handle(ctx, msg)
            .await
            .map(Response::CardanoPublicKey),
        Request::CardanoSignMessage(msg) => sign_message()
            .handle(ctx, msg)
            .await
            .map(Response::CardanoMessageSignature),
    };

    result.unwrap_or_else(|err| {
        tracing::debug!(error = %err, "Request failed");
        Response::Failure(Failure::from(&err))
    })
}
