//! secp256k1 public key with Bitcoin-specific functionality.
//!
//! Supports compressed/uncompressed SEC1 serialization (including
//! decompression through the field square root), Hash160 and P2PKH address
//! derivation, and ECDSA verification.

use std::fmt;

use num_bigint::BigUint;

use crate::address::Address;
use crate::ec::curve::{secp256k1, CurveParams};
use crate::ec::field::{is_odd, sqrt_mod};
use crate::ec::point::Point;
use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

const PREFIX_EVEN: u8 = 0x02;
const PREFIX_ODD: u8 = 0x03;
const PREFIX_UNCOMPRESSED: u8 = 0x04;

/// A secp256k1 public key.
///
/// A non-infinity curve point plus a `compressed` flag. The flag only
/// selects the serialization (and therefore the address); it carries no
/// cryptographic content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: Point,
    compressed: bool,
}

impl PublicKey {
    /// Wrap a curve point as a public key.
    ///
    /// # Returns
    /// `InvalidPublicKey` for the point at infinity, `PointNotOnCurve` for
    /// coordinates that violate the curve equation.
    pub fn from_point(point: Point, compressed: bool) -> Result<Self, PrimitivesError> {
        if point.is_infinity() {
            return Err(PrimitivesError::InvalidPublicKey(
                "point at infinity".to_string(),
            ));
        }
        if !point.is_on_curve() {
            return Err(PrimitivesError::PointNotOnCurve);
        }
        Ok(PublicKey { point, compressed })
    }

    /// Wrap a point already known to be finite and on the curve.
    pub(crate) fn from_point_unchecked(point: Point, compressed: bool) -> Self {
        debug_assert!(!point.is_infinity() && point.is_on_curve());
        PublicKey { point, compressed }
    }

    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats;
    /// the resulting key keeps the format it was parsed from.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let curve = secp256k1();
        match (bytes.len(), bytes.first()) {
            (COMPRESSED_LEN, Some(&prefix)) if prefix == PREFIX_EVEN || prefix == PREFIX_ODD => {
                let x = BigUint::from_bytes_be(&bytes[1..]);
                let y = decompress_y(curve, &x, prefix == PREFIX_ODD)?;
                Self::from_point(Point::from_affine(curve, x, y)?, true)
            }
            (UNCOMPRESSED_LEN, Some(&PREFIX_UNCOMPRESSED)) => {
                let x = BigUint::from_bytes_be(&bytes[1..33]);
                let y = BigUint::from_bytes_be(&bytes[33..]);
                Self::from_point(Point::from_affine(curve, x, y)?, false)
            }
            (0, _) => Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            )),
            (len, prefix) => Err(PrimitivesError::InvalidPublicKey(format!(
                "unsupported encoding: {} bytes with prefix {:?}",
                len, prefix
            ))),
        }
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// The underlying curve point.
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Whether this key serializes in compressed form.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The same point with a different serialization preference.
    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the 32-byte X coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let (x, y) = self.coordinates();
        let mut out = [0u8; COMPRESSED_LEN];
        out[0] = if y[31] & 1 == 1 { PREFIX_ODD } else { PREFIX_EVEN };
        out[1..].copy_from_slice(&x);
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    ///
    /// The first byte is 0x04, followed by 32-byte X and 32-byte Y coordinates.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let (x, y) = self.coordinates();
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out[0] = PREFIX_UNCOMPRESSED;
        out[1..33].copy_from_slice(&x);
        out[33..].copy_from_slice(&y);
        out
    }

    /// Serialize according to the key's compression flag.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.to_compressed().to_vec()
        } else {
            self.to_uncompressed().to_vec()
        }
    }

    /// Serialize as a lowercase hexadecimal string, honoring the compression flag.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Hash160 of the serialized key: RIPEMD160(SHA256(bytes)).
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_bytes())
    }

    /// Derive the P2PKH address for the given network version byte.
    pub fn to_address(&self, version: u8) -> Address {
        Address::new(version, self.hash160())
    }

    /// Verify an ECDSA signature against a message hash using this public key.
    pub fn verify(&self, hash: &[u8; 32], sig: &Signature) -> bool {
        sig.verify(hash, self)
    }

    fn coordinates(&self) -> ([u8; 32], [u8; 32]) {
        // from_point guarantees a finite point
        let (x, y) = match (self.point.x(), self.point.y()) {
            (Some(x), Some(y)) => (x, y),
            _ => unreachable!("public key holds the point at infinity"),
        };
        (to_32_bytes(x), to_32_bytes(y))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Recover the y coordinate with the requested parity for `x`.
pub(crate) fn decompress_y(
    curve: &CurveParams,
    x: &BigUint,
    odd: bool,
) -> Result<BigUint, PrimitivesError> {
    if x >= curve.p() {
        return Err(PrimitivesError::PointNotOnCurve);
    }
    let y = sqrt_mod(&curve.y_squared(x), curve.p())?;
    if is_odd(&y) == odd {
        Ok(y)
    } else {
        Ok(curve.p() - y)
    }
}

/// Left-pad a big-endian integer to 32 bytes.
///
/// Values are always below the field prime or group order, so they fit.
pub(crate) fn to_32_bytes(v: &BigUint) -> [u8; 32] {
    let bytes = v.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
