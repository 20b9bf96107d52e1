//! secp256k1 private key.
//!
//! Wraps a scalar in `[1, n)` together with the compression preference the
//! key was imported with. Key material is zeroized on drop and never shown
//! by `Debug`.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroize;

use crate::base58;
use crate::ec::curve::secp256k1;
use crate::ec::nonce::NonceStrategy;
use crate::ec::public_key::{to_32_bytes, PublicKey};
use crate::ec::signature::Signature;
use crate::keyformat::{self, DecodedKey};
use crate::network::Network;
use crate::PrimitivesError;

/// Byte appended to a WIF payload to flag a compressed public key.
pub const WIF_COMPRESSED_MARKER: u8 = 0x01;

/// A secp256k1 private key.
#[derive(Clone)]
pub struct PrivateKey {
    bytes: [u8; 32],
    compressed: bool,
}

impl PrivateKey {
    /// Create a private key from a 32-byte big-endian scalar.
    ///
    /// Values at or above the group order are reduced mod n, as wallets
    /// importing raw 256-bit material do.
    ///
    /// # Arguments
    /// * `bytes` - Exactly 32 bytes.
    ///
    /// # Returns
    /// `InvalidKeyLength` for other lengths, `InvalidPrivateKey` when the
    /// reduced scalar is zero.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != 32 {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: 32,
                got: bytes.len(),
            });
        }
        let scalar = BigUint::from_bytes_be(bytes) % secp256k1().n();
        if scalar.is_zero() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "scalar is zero modulo the group order".to_string(),
            ));
        }
        Ok(PrivateKey {
            bytes: to_32_bytes(&scalar),
            compressed: false,
        })
    }

    /// Create a private key from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let mut bytes = hex::decode(hex_str)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Decode a mainnet WIF string, compressed or not.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        Self::from_wif_for(wif, Network::Mainnet)
    }

    /// Decode a WIF string whose version byte must match `network`.
    ///
    /// # Returns
    /// `InvalidWif` for payloads that are neither 33 nor 34 bytes,
    /// `ChecksumInvalid` or `UnsupportedWalletVersion` as appropriate.
    pub fn from_wif_for(wif: &str, network: Network) -> Result<Self, PrimitivesError> {
        let mut decoded = base58::decode(wif)?;
        let compressed = decoded.len() == 1 + 32 + 1 + base58::CHECKSUM_LEN;
        let result = keyformat::wif_scalar(&decoded, compressed, network.wif_version())
            .and_then(|mut scalar| {
                let key = Self::from_bytes(&scalar);
                scalar.zeroize();
                key
            })
            .map(|key| key.with_compressed(compressed));
        decoded.zeroize();
        result
    }

    /// Build a key from the output of the wallet-format classifier,
    /// carrying over the format's compression flag.
    pub fn from_decoded(decoded: &DecodedKey) -> Result<Self, PrimitivesError> {
        Ok(Self::from_bytes(decoded.scalar())?.with_compressed(decoded.format().is_compressed()))
    }

    /// Encode as WIF for the given network.
    pub fn to_wif(&self, network: Network) -> String {
        self.to_wif_prefix(network.wif_version())
    }

    /// Encode as WIF with an explicit version byte.
    ///
    /// Compressed keys get the trailing 0x01 marker.
    pub fn to_wif_prefix(&self, version: u8) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(version);
        payload.extend_from_slice(&self.bytes);
        if self.compressed {
            payload.push(WIF_COMPRESSED_MARKER);
        }
        let encoded = base58::check_encode(&payload);
        payload.zeroize();
        encoded
    }

    /// The 32-byte big-endian scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// The scalar as 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Whether the derived public key serializes compressed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The same scalar with a different compression preference.
    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    pub(crate) fn scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }

    /// Derive the public key `d·G`, inheriting the compression flag.
    pub fn pub_key(&self) -> PublicKey {
        let point = secp256k1().generator().mul(&self.scalar());
        PublicKey::from_point_unchecked(point, self.compressed)
    }

    /// Sign a 32-byte digest.
    pub fn sign(
        &self,
        hash: &[u8; 32],
        nonces: NonceStrategy,
    ) -> Result<Signature, PrimitivesError> {
        Signature::sign(hash, self, nonces)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes && self.compressed == other.compressed
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bytes", &"<redacted>")
            .field("compressed", &self.compressed)
            .finish()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}
