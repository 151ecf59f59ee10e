//! Request and response messages.
//!
//! Keys and signatures travel as lowercase hex strings; paths as integer
//! arrays.

use serde::{Deserialize, Serialize};

use cardano_keychain_core::{CardanoNode, DerivationPath, Ed25519PublicKey, Ed25519Signature};
use cardano_keychain_session::{FailureKind, SessionError};

/// Request the public key at a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardanoGetPublicKey {
    pub address_n: DerivationPath,
}

/// Request a signature over `message` with the key at a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardanoSignMessage {
    pub address_n: DerivationPath,
    pub message: Vec<u8>,
}

/// Public node data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdNodeType {
    pub depth: u32,
    pub child_num: u32,
    pub public_key: String,
    pub chain_code: String,
}

/// Response to [`CardanoGetPublicKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardanoPublicKey {
    pub path: DerivationPath,
    pub node: HdNodeType,
    /// `public_key || chain_code`.
    pub xpub: String,
}

impl CardanoPublicKey {
    /// Describe `node`, found at `path`.
    pub fn from_node(path: DerivationPath, node: &CardanoNode) -> Self {
        let xpub = node.xpub();
        Self {
            path,
            node: HdNodeType {
                depth: node.depth(),
                child_num: node.child_num(),
                public_key: xpub.public_key.to_hex(),
                chain_code: xpub.chain_code.to_hex(),
            },
            xpub: xpub.to_hex(),
        }
    }
}

/// Response to [`CardanoSignMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardanoMessageSignature {
    pub public_key: String,
    pub signature: String,
}

impl CardanoMessageSignature {
    /// Pair a signature with the key that made it.
    pub fn new(public_key: &Ed25519PublicKey, signature: &Ed25519Signature) -> Self {
        Self {
            public_key: public_key.to_hex(),
            signature: signature.to_hex(),
        }
    }
}

/// Failure category on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    NotInitialized,
    DataError,
    ActionCancelled,
    ProcessError,
}

impl From<FailureKind> for FailureCode {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::NotInitialized => FailureCode::NotInitialized,
            FailureKind::DataError => FailureCode::DataError,
            FailureKind::ActionCancelled => FailureCode::ActionCancelled,
            FailureKind::ProcessError => FailureCode::ProcessError,
        }
    }
}

/// A request that could not be served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub code: FailureCode,
    pub message: String,
}

impl From<&SessionError> for Failure {
    fn from(err: &SessionError) -> Self {
        Self {
            code: err.failure_kind().into(),
            message: err.to_string(),
        }
    }
}

/// Any inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    CardanoGetPublicKey(CardanoGetPublicKey),
    CardanoSignMessage(CardanoSignMessage),
}

/// Any outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    CardanoPublicKey(CardanoPublicKey),
    CardanoMessageSignature(CardanoMessageSignature),
    Failure(Failure),
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardano_keychain_core::{harden, KeychainError};

    #[test]
    fn test_request_json_shape() {
        let request = Request::CardanoGetPublicKey(CardanoGetPublicKey {
            address_n: DerivationPath::new(vec![harden(1852), harden(1815), harden(0)]),
        });
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"type":"CardanoGetPublicKey","address_n":[2147485500,2147485463,2147483648]}"#
        );
        let parsed: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_failure_from_error() {
        let err = SessionError::from(KeychainError::ForbiddenPath(DerivationPath::new(vec![
            harden(9),
            1,
            2,
        ])));
        let failure = Failure::from(&err);
        assert_eq!(failure.code, FailureCode::DataError);
        assert_eq!(failure.message, "forbidden key path: m/9'/1/2");

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["code"], "data_error");
    }
}
