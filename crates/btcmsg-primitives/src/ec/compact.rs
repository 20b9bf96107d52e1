//! 65-byte recoverable ("compact") signatures.
//!
//! Wire layout: `header || r || s` where `header = 27 + recovery_id`, plus 4
//! when the signer's public key is serialized compressed. The recovery id
//! selects one of the (up to) four public keys a bare (r, s) pair is valid
//! for, so a verifier can rebuild the key from the signature and digest.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::ec::curve::secp256k1;
use crate::ec::field::{inverse_mod, neg_mod};
use crate::ec::point::Point;
use crate::ec::public_key::{decompress_y, PublicKey};
use crate::ec::signature::{hash_to_scalar, Signature};
use crate::PrimitivesError;

/// Length of a compact signature in bytes.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

/// Header value for recovery id 0 with an uncompressed key.
pub const HEADER_BASE: u8 = 27;

/// Added to the header when the signing key is compressed.
pub const COMPRESSED_FLAG: u8 = 4;

const HEADER_MAX: u8 = HEADER_BASE + COMPRESSED_FLAG + 3;

/// An ECDSA signature together with the data needed to recover its key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactSignature {
    signature: Signature,
    recovery_id: u8,
    compressed: bool,
}

impl CompactSignature {
    /// Attach a recovery id (0..=3) and compression flag to a signature.
    pub fn new(
        signature: Signature,
        recovery_id: u8,
        compressed: bool,
    ) -> Result<Self, PrimitivesError> {
        if recovery_id > 3 {
            return Err(PrimitivesError::InvalidSignature(format!(
                "recovery id {} is out of range",
                recovery_id
            )));
        }
        Ok(CompactSignature { signature, recovery_id, compressed })
    }

    /// The underlying (r, s) pair.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Which of the candidate keys this signature recovers to, 0 to 3.
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// Whether the signer's address uses the compressed public key.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The header byte, always within `[27, 34]`.
    pub fn header(&self) -> u8 {
        let flag = if self.compressed { COMPRESSED_FLAG } else { 0 };
        HEADER_BASE + self.recovery_id + flag
    }

    /// Parse the 65-byte wire form.
    ///
    /// # Returns
    /// `BadSignatureLength` unless exactly 65 bytes are given, and
    /// `BadFirstByte` when the header lies outside `[27, 34]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != COMPACT_SIGNATURE_LEN {
            return Err(PrimitivesError::BadSignatureLength(bytes.len()));
        }
        let header = bytes[0];
        if !(HEADER_BASE..=HEADER_MAX).contains(&header) {
            return Err(PrimitivesError::BadFirstByte(header));
        }

        let mut id = header - HEADER_BASE;
        let compressed = id >= COMPRESSED_FLAG;
        if compressed {
            id -= COMPRESSED_FLAG;
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[1..33]);
        s.copy_from_slice(&bytes[33..65]);
        Self::new(Signature::new(r, s), id, compressed)
    }

    /// Serialize to the 65-byte wire form.
    pub fn to_bytes(&self) -> [u8; COMPACT_SIGNATURE_LEN] {
        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out[0] = self.header();
        out[1..33].copy_from_slice(self.signature.r());
        out[33..].copy_from_slice(self.signature.s());
        out
    }

    /// Decode from standard (padded) base64.
    pub fn from_base64(s: &str) -> Result<Self, PrimitivesError> {
        let bytes = STANDARD.decode(s)?;
        Self::from_bytes(&bytes)
    }

    /// Encode the wire form as standard (padded) base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Recover the public key that produced this signature over `hash`.
    ///
    /// Computes `Q = r^-1 * (s*R - e*G)` where `R` is rebuilt from `r` and
    /// the recovery id. The returned key carries this signature's
    /// compression flag.
    ///
    /// # Returns
    /// `NoSquareRoot` if the candidate x has no point on the curve,
    /// `InvalidSignature` for out-of-range scalars, and `InvalidPublicKey`
    /// if the recovered point is the point at infinity.
    pub fn recover_public_key(&self, hash: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
        let curve = secp256k1();
        let n = curve.n();
        let r = self.signature.r_scalar();
        let s = self.signature.s_scalar();
        if r.is_zero() || &r >= n || s.is_zero() || &s >= n {
            return Err(PrimitivesError::InvalidSignature(
                "signature scalars are out of range".to_string(),
            ));
        }

        // the nonce point's x may have exceeded n and been reduced
        let x = (&r + BigUint::from(self.recovery_id / 2) * n) % curve.p();
        let y = decompress_y(curve, &x, self.recovery_id & 1 == 1)?;
        let big_r = Point::from_affine(curve, x, y)?;

        let e_neg = neg_mod(&hash_to_scalar(hash), n);
        let r_inv = inverse_mod(&r, n)?;
        let sum = &big_r.mul(&s) + &curve.generator().mul(&e_neg);
        let q = sum.mul(&r_inv);

        PublicKey::from_point(q, self.compressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::nonce::NonceStrategy;
    use crate::ec::private_key::PrivateKey;
    use crate::hash::sha256d;

    fn sample_signature() -> Signature {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r[31] = 0x11;
        s[31] = 0x22;
        Signature::new(r, s)
    }

    #[test]
    fn test_header_values() {
        for id in 0..4u8 {
            let plain = CompactSignature::new(sample_signature(), id, false).unwrap();
            let packed = CompactSignature::new(sample_signature(), id, true).unwrap();
            assert_eq!(plain.header(), 27 + id);
            assert_eq!(packed.header(), 31 + id);
        }
        assert!(CompactSignature::new(sample_signature(), 4, false).is_err());
    }

    #[test]
    fn test_wire_round_trip() {
        let sig = CompactSignature::new(sample_signature(), 2, true).unwrap();
        let bytes = sig.to_bytes();
        assert_eq!(bytes[0], 33);
        assert_eq!(CompactSignature::from_bytes(&bytes).unwrap(), sig);
        assert_eq!(CompactSignature::from_base64(&sig.to_base64()).unwrap(), sig);
    }

    #[test]
    fn test_bad_signature_length() {
        let short = "A".repeat(86) + "==";
        let long = "A".repeat(88);
        match CompactSignature::from_base64(&short) {
            Err(PrimitivesError::BadSignatureLength(64)) => {}
            other => panic!("expected BadSignatureLength(64), got {:?}", other),
        }
        match CompactSignature::from_base64(&long) {
            Err(PrimitivesError::BadSignatureLength(66)) => {}
            other => panic!("expected BadSignatureLength(66), got {:?}", other),
        }
    }

    #[test]
    fn test_bad_first_byte() {
        for header in [0u8, 26, 35, 36, 255] {
            let mut bytes = [1u8; COMPACT_SIGNATURE_LEN];
            bytes[0] = header;
            match CompactSignature::from_bytes(&bytes) {
                Err(PrimitivesError::BadFirstByte(b)) => assert_eq!(b, header),
                other => panic!("expected BadFirstByte, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_base64() {
        let err = CompactSignature::from_base64("not base64!").unwrap_err();
        assert!(matches!(err, PrimitivesError::InvalidBase64(_)));
    }

    #[test]
    fn test_recover_matches_signer() {
        let priv_key = PrivateKey::from_hex(
            "eaf02ca348c524e6392655ba4d29603cd1a7347d9d65cfe93ce1ebffdca22694",
        )
        .unwrap();
        let pub_key = priv_key.pub_key();
        let hash = sha256d(b"recover me");
        let sig = priv_key.sign(&hash, NonceStrategy::Deterministic).unwrap();

        let matches: Vec<u8> = (0..4u8)
            .filter(|&id| {
                CompactSignature::new(sig.clone(), id, false)
                    .unwrap()
                    .recover_public_key(&hash)
                    .map(|k| k.point() == pub_key.point())
                    .unwrap_or(false)
            })
            .collect();
        assert_eq!(matches.len(), 1, "exactly one recovery id should match");

        let compact = CompactSignature::new(sig, matches[0], true).unwrap();
        let recovered = compact.recover_public_key(&hash).unwrap();
        assert!(recovered.is_compressed());
        assert_eq!(recovered.to_compressed(), pub_key.to_compressed());
    }

    #[test]
    fn test_recover_without_square_root() {
        // x = 5 is not the abscissa of any secp256k1 point
        let mut r = [0u8; 32];
        r[31] = 5;
        let mut s = [0u8; 32];
        s[31] = 1;
        let compact = CompactSignature::new(Signature::new(r, s), 0, false).unwrap();
        let err = compact.recover_public_key(&[7u8; 32]).unwrap_err();
        assert!(matches!(err, PrimitivesError::NoSquareRoot));
    }

    #[test]
    fn test_recover_rejects_zero_r() {
        let compact = CompactSignature::new(Signature::new([0u8; 32], [1u8; 32]), 0, false).unwrap();
        assert!(compact.recover_public_key(&[7u8; 32]).is_err());
    }
}
