/// Elliptic curve cryptography on secp256k1.
///
/// Field arithmetic, the curve group, private and public keys, ECDSA
/// signatures with deterministic or random nonces, and 65-byte compact
/// signatures with public key recovery.

pub mod field;
pub mod curve;
pub mod point;
pub mod nonce;
pub mod private_key;
pub mod public_key;
pub mod signature;
pub mod compact;

pub use compact::CompactSignature;
pub use curve::{secp256k1, CurveParams};
pub use nonce::NonceStrategy;
pub use point::Point;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
