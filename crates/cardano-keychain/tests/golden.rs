//! Golden key vectors for cross-implementation verification.
//!
//! Every implementation of the keychain must derive identical:
//! - master root fingerprint
//! - namespace root extended public keys
//! - extended public key at the requested path
//! - Ed25519 signature over the message (deterministic)

use cardano_keychain::core::{
    root_from_mnemonic_and_passphrase, root_from_seed, CardanoNode, CARDANO_SEED_LABEL,
};
use cardano_keychain::{DerivationPath, Keychain, Namespace};
use serde::{Deserialize, Serialize};

const ABANDON: &str = "abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon abandon abandon about";
const EIGHT: &str = "eight country switch draw meat scout mystery blade tip drift \
                     useless good keep usage title";

/// A single golden vector.
#[derive(Debug, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub algorithm: String,

    // Inputs
    pub secret: String, // mnemonic, or seed hex
    pub passphrase: String,
    pub path: String,
    pub message: String, // hex

    // Derived outputs (hex)
    pub root_fingerprint: String,
    pub byron_root_xpub: String,
    pub shelley_root_xpub: String,
    pub xpub: String,
    pub signature: String,
}

fn describe(
    name: &str,
    algorithm: &str,
    secret: String,
    passphrase: &str,
    root: CardanoNode,
    path: &str,
    message: &[u8],
) -> GoldenVector {
    let keychain: Keychain = Keychain::new(root).unwrap();
    let parsed: DerivationPath = path.parse().unwrap();
    let node = keychain.derive(parsed.as_slice()).unwrap();

    GoldenVector {
        name: name.to_string(),
        algorithm: algorithm.to_string(),
        secret,
        passphrase: passphrase.to_string(),
        path: parsed.to_string(),
        message: hex::encode(message),
        root_fingerprint: hex::encode(keychain.fingerprint().0),
        byron_root_xpub: keychain.namespace_root(Namespace::Byron).xpub().to_hex(),
        shelley_root_xpub: keychain.namespace_root(Namespace::Shelley).xpub().to_hex(),
        xpub: node.xpub().to_hex(),
        signature: node.sign(message).to_hex(),
    }
}

fn icarus(name: &str, mnemonic: &str, passphrase: &str, path: &str, message: &[u8]) -> GoldenVector {
    let root = root_from_mnemonic_and_passphrase(mnemonic, passphrase).unwrap();
    describe(name, "icarus", mnemonic.to_string(), passphrase, root, path, message)
}

fn slip23(name: &str, seed: &[u8], path: &str, message: &[u8]) -> GoldenVector {
    let root = root_from_seed(seed, CARDANO_SEED_LABEL).unwrap();
    describe(name, "slip23", hex::encode(seed), "", root, path, message)
}

/// Generate all golden vectors.
pub fn generate_all_vectors() -> Vec<GoldenVector> {
    vec![
        icarus("abandon_shelley_payment", ABANDON, "", "m/1852'/1815'/0'/0/0", b""),
        icarus("abandon_shelley_change", ABANDON, "", "m/1852'/1815'/0'/1/3", b"change"),
        icarus("abandon_byron_address", ABANDON, "", "m/44'/1815'/0'/0/0", b"byron"),
        icarus("abandon_passphrase", ABANDON, "TREZOR", "m/1852'/1815'/0'/0/0", b"hello"),
        icarus("eight_shelley_staking", EIGHT, "", "m/1852'/1815'/0'/2/0", b"stake"),
        icarus("eight_namespace_root", EIGHT, "", "m/44'/1815'", b""),
        slip23("slip23_zero_seed", &[0x00; 16], "m/1852'/1815'/0'/0/0", b""),
        slip23("slip23_ramp_seed", &(0u8..32).collect::<Vec<u8>>(), "m/44'/1815'/3'/0/7", b"ramp"),
    ]
}

#[test]
fn test_generate_vectors() {
    let vectors = generate_all_vectors();
    let json = serde_json::to_string_pretty(&vectors).unwrap();
    println!("{}", json);
    assert_eq!(vectors.len(), 8);
}

#[test]
fn test_vectors_are_deterministic() {
    let first = serde_json::to_string(&generate_all_vectors()).unwrap();
    let second = serde_json::to_string(&generate_all_vectors()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_vector_shapes() {
    for v in generate_all_vectors() {
        assert_eq!(v.root_fingerprint.len(), 64, "{}", v.name);
        assert_eq!(v.byron_root_xpub.len(), 128, "{}", v.name);
        assert_eq!(v.shelley_root_xpub.len(), 128, "{}", v.name);
        assert_eq!(v.xpub.len(), 128, "{}", v.name);
        assert_eq!(v.signature.len(), 128, "{}", v.name);
        assert_ne!(v.byron_root_xpub, v.shelley_root_xpub, "{}", v.name);
    }
}

/// Outputs computed independently of this crate.
const KNOWN_XPUBS: &[(&str, &str)] = &[
    (
        "abandon_shelley_payment",
        "7ea09a34aebb13c9841c71397b1cabfec5ddf950405293dee496cac2f437480a\
         88848e8af62a27a57e982215741c9eac17e6e45cbfd6ea65a0e0dcc03bb777b2",
    ),
    (
        "abandon_byron_address",
        "008254ee8b74b30fa3a7ab1f6c34e911a16fb1bb53107920cb45f1dea5ba9f07\
         528ca351238f8c1e0e6ef281ce34818a3481c65ac00b7bb7ab7bb9d5b8b7024c",
    ),
    (
        "abandon_passphrase",
        "4620d26d9e17f37419b35a09049ee7cadf1c9a8bc1aa3ca8676267993f1c88cf\
         6f85344c00efe21c0e30e5a6119a0430854ea8d3621a7633a1d3d35b337fd6e0",
    ),
    (
        "eight_shelley_staking",
        "6162765320c93ad3c82cc28b9578be31a791f03a37dcae056343cc25bbcb3b31\
         18c452024ee1ae7477b82f42e1a0debc01d4696177d92a5c98695dbf47aaf6fa",
    ),
    (
        "eight_namespace_root",
        "719bdea4ffb732097e209dfeb9c35b8ec71001ac02f4d5ab4bc7e2240355d3ce\
         823e2321475cb576da0f7999f26eeb229547e7ba88c5335b884d9d5cd4c50282",
    ),
    (
        "slip23_zero_seed",
        "5be80620117f598d87803fc9880b90f83a15428ad9f5d3581affdf4422e6559d\
         9a9415d4bad9ab18756b394f23181162c7012f235eda69d09c5a55ff3afc5557",
    ),
    (
        "slip23_ramp_seed",
        "6553a5bd4493efd24425ada2e53aff70110aadd6a8439aba594e7a94f2b7ffd9\
         17def33f0aaf11a2ceec8dfc1f5fc6051d1fdc16694494048a26bcdb72c2036e",
    ),
];

const KNOWN_SIGNATURES: &[(&str, &str)] = &[
    (
        "abandon_shelley_payment",
        "cfbeb66ededaaecd418c067e580a3c639fe6946e93565ecdb7301446924d02ce\
         478c1fdefe1f0383d2ec439e7432243a20b687045cd08129d251ec2157634d08",
    ),
    (
        "abandon_byron_address",
        "b4c4ff727ef6385588d0aac4c0214f3acfc79e3fa439e5f87a5aca8640b53daf\
         951e9bd72c2629e6167b05dba4a196a67430be8ce26df0437e6df33d2a9acd0f",
    ),
    (
        "slip23_ramp_seed",
        "d619ac1bd440eb50131e206e59c5d87b9efd5d4dbe4d4fc50689c49d62178b4e\
         578514a5dbc88d6bd7e062b2b4f013376f43f477c9e0d84ae47d2e09fb91bb0f",
    ),
];

#[test]
fn test_known_xpubs() {
    let vectors = generate_all_vectors();
    for (name, expected) in KNOWN_XPUBS {
        let v = vectors.iter().find(|v| v.name == *name).unwrap();
        assert_eq!(v.xpub, *expected, "{name}");
    }
}

#[test]
fn test_known_signatures() {
    let vectors = generate_all_vectors();
    for (name, expected) in KNOWN_SIGNATURES {
        let v = vectors.iter().find(|v| v.name == *name).unwrap();
        assert_eq!(v.signature, *expected, "{name}");
    }
}

#[test]
fn test_namespace_root_vector_matches_root_xpub() {
    let vectors = generate_all_vectors();
    let v = vectors
        .iter()
        .find(|v| v.name == "eight_namespace_root")
        .unwrap();
    assert_eq!(v.xpub, v.byron_root_xpub);
}

#[test]
fn test_passphrase_and_algorithm_separate_keys() {
    let vectors = generate_all_vectors();
    let by_name = |name: &str| vectors.iter().find(|v| v.name == name).unwrap();

    assert_ne!(
        by_name("abandon_shelley_payment").root_fingerprint,
        by_name("abandon_passphrase").root_fingerprint
    );
    assert_ne!(
        by_name("abandon_shelley_payment").root_fingerprint,
        by_name("eight_shelley_staking").root_fingerprint
    );
    assert_ne!(
        by_name("slip23_zero_seed").root_fingerprint,
        by_name("slip23_ramp_seed").root_fingerprint
    );
}
