/// Bitcoin signed-message SDK - Cryptographic primitives, hashing, and key codecs.
///
/// This crate provides the foundational building blocks for message signing:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160, HMAC-SHA256)
/// - Base58 and Base58Check encoding/decoding
/// - secp256k1 field and group arithmetic on arbitrary precision integers
/// - Private keys, public keys, ECDSA and compact (recoverable) signatures
/// - Legacy wallet private key formats (WIF, mini-key, hex, base64)
/// - P2PKH addresses and network parameters

pub mod hash;
pub mod util;
pub mod base58;
pub mod ec;
pub mod keyformat;
pub mod address;
pub mod network;

mod error;
pub use error::PrimitivesError;
