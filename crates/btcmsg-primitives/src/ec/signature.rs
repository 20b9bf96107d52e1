//! ECDSA signature over secp256k1.
//!
//! Signing draws nonces from a [`NonceStrategy`] and normalizes S to the
//! lower half of the curve order (BIP-0062). Verification is the textbook
//! `u1·G + u2·Q` check.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::ec::curve::secp256k1;
use crate::ec::field::{add_mod, inverse_mod, mul_mod};
use crate::ec::nonce::NonceStrategy;
use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::{to_32_bytes, PublicKey};
use crate::PrimitivesError;

/// An ECDSA signature with R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    ///
    /// No range check is applied; see [`Signature::from_scalars`].
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Create a signature from integers, requiring `1 <= r, s < n`.
    pub fn from_scalars(r: &BigUint, s: &BigUint) -> Result<Self, PrimitivesError> {
        let n = secp256k1().n();
        if r.is_zero() || r >= n {
            return Err(PrimitivesError::InvalidSignature(
                "signature R is out of range".to_string(),
            ));
        }
        if s.is_zero() || s >= n {
            return Err(PrimitivesError::InvalidSignature(
                "signature S is out of range".to_string(),
            ));
        }
        Ok(Signature { r: to_32_bytes(r), s: to_32_bytes(s) })
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// R as an integer.
    pub fn r_scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.r)
    }

    /// S as an integer.
    pub fn s_scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.s)
    }

    /// Whether S lies in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        &self.s_scalar() <= secp256k1().half_n()
    }

    /// Return the signature with S replaced by `n - S` when S is high.
    pub fn normalize_s(self) -> Self {
        if self.is_low_s() {
            return self;
        }
        let s = secp256k1().n() - self.s_scalar();
        Signature { r: self.r, s: to_32_bytes(&s) }
    }

    /// Sign a 32-byte message hash.
    ///
    /// Candidate nonces yielding `r = 0` or `s = 0` are skipped.
    ///
    /// # Arguments
    /// * `hash` - The message hash to sign.
    /// * `priv_key` - The private key to sign with.
    /// * `nonces` - Where the per-signature nonce comes from.
    ///
    /// # Returns
    /// A low-S signature, or an error if no usable nonce was produced.
    pub fn sign(
        hash: &[u8; 32],
        priv_key: &PrivateKey,
        nonces: NonceStrategy,
    ) -> Result<Self, PrimitivesError> {
        let curve = secp256k1();
        let n = curve.n();
        let g = curve.generator();
        let d = priv_key.scalar();
        let e = hash_to_scalar(hash);

        for k in nonces.nonces(&priv_key.to_bytes(), hash) {
            let point = g.mul(&k);
            let r = match point.x() {
                Some(x) => x % n,
                None => continue,
            };
            if r.is_zero() {
                continue;
            }
            let k_inv = inverse_mod(&k, n)?;
            let s = mul_mod(&k_inv, &add_mod(&e, &mul_mod(&r, &d, n), n), n);
            if s.is_zero() {
                continue;
            }
            return Ok(Signature::from_scalars(&r, &s)?.normalize_s());
        }

        Err(PrimitivesError::InvalidSignature(
            "nonce source exhausted".to_string(),
        ))
    }

    /// Verify this signature against a message hash and public key.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, hash: &[u8; 32], pub_key: &PublicKey) -> bool {
        let curve = secp256k1();
        let n = curve.n();
        let r = self.r_scalar();
        let s = self.s_scalar();
        if r.is_zero() || s.is_zero() || &r >= n || &s >= n {
            return false;
        }

        let w = match inverse_mod(&s, n) {
            Ok(w) => w,
            Err(_) => return false,
        };
        let u1 = mul_mod(&hash_to_scalar(hash), &w, n);
        let u2 = mul_mod(&r, &w, n);
        let point = &curve.generator().mul(&u1) + &pub_key.point().mul(&u2);

        match point.x() {
            Some(x) => x % n == r,
            None => false,
        }
    }
}

/// Interpret a 32-byte digest as a big-endian integer reduced mod n.
pub fn hash_to_scalar(hash: &[u8; 32]) -> BigUint {
    BigUint::from_bytes_be(hash) % secp256k1().n()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    /// Known-answer RFC6979 vectors (Trezor / CoreBitcoin set), low-S form.
    #[test]
    fn test_rfc6979() {
        let tests = vec![
            (
                "cca9fbcc1b41e5a95d369eaa6ddcff73b61a4efaa279cfc6567e8daa39cbaf50",
                "sample",
                "af340daf02cc15c8d5d08d7735dfe6b98a474ed373bdb5fbecf7571be52b3842",
                "5009fb27f37034a9b24b707b7c6b79ca23ddef9e25f7282e8a797efe53a8f124",
            ),
            (
                "0000000000000000000000000000000000000000000000000000000000000001",
                "Satoshi Nakamoto",
                "934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8",
                "2442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5",
            ),
            (
                "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140",
                "Satoshi Nakamoto",
                "fd567d121db66e382991534ada77a6bd3106f0a1098c231e47993447cd6af2d0",
                "6b39cd0eb1bc8603e159ef5c20a5c8ad685a45b06ce9bebed3f153d10d93bed5",
            ),
            (
                "f8b8af8ce3c7cca5e300d33939540c10d45ce001b8f252bfbc57ba0342904181",
                "Alan Turing",
                "7063ae83e7f62bbb171798131b4a0564b956930092b33b07b395615d9ec7e15c",
                "58dfcc1e00a35e1572f366ffe34ba0fc47db1e7189759b9fb233c5b05ab388ea",
            ),
        ];

        for (key_hex, msg, expected_r, expected_s) in &tests {
            let priv_key = PrivateKey::from_hex(key_hex).unwrap();
            let hash = sha256(msg.as_bytes());

            let sig = priv_key.sign(&hash, NonceStrategy::Deterministic).unwrap();
            assert_eq!(hex::encode(sig.r()), *expected_r, "R for message '{}'", msg);
            assert_eq!(hex::encode(sig.s()), *expected_s, "S for message '{}'", msg);
            assert!(priv_key.pub_key().verify(&hash, &sig));
        }
    }

    #[test]
    fn test_random_nonce_signatures_verify() {
        let priv_key = PrivateKey::from_hex(
            "eaf02ca348c524e6392655ba4d29603cd1a7347d9d65cfe93ce1ebffdca22694",
        )
        .unwrap();
        let hash = sha256(b"random nonce");
        let a = priv_key.sign(&hash, NonceStrategy::Random).unwrap();
        let b = priv_key.sign(&hash, NonceStrategy::Random).unwrap();
        assert_ne!(a, b);
        assert!(a.is_low_s() && b.is_low_s());
        assert!(priv_key.pub_key().verify(&hash, &a));
        assert!(priv_key.pub_key().verify(&hash, &b));
    }

    #[test]
    fn test_verify_rejects_wrong_hash_and_key() {
        let priv_key = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        let other = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000002",
        )
        .unwrap();
        let hash = sha256(b"Satoshi Nakamoto");
        let sig = priv_key.sign(&hash, NonceStrategy::Deterministic).unwrap();

        assert!(!priv_key.pub_key().verify(&sha256(b"Satoshi Nakamoto!"), &sig));
        assert!(!other.pub_key().verify(&hash, &sig));
    }

    #[test]
    fn test_verify_rejects_out_of_range() {
        let priv_key = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        let hash = sha256(b"x");
        assert!(!priv_key.pub_key().verify(&hash, &Signature::new([0u8; 32], [1u8; 32])));
        assert!(!priv_key.pub_key().verify(&hash, &Signature::new([0xffu8; 32], [1u8; 32])));
    }

    #[test]
    fn test_normalize_s() {
        let n = secp256k1().n();
        let high = n - BigUint::from(5u32);
        let sig = Signature::from_scalars(&BigUint::from(9u32), &high).unwrap();
        assert!(!sig.is_low_s());
        let low = sig.normalize_s();
        assert!(low.is_low_s());
        assert_eq!(low.s_scalar(), BigUint::from(5u32));
    }

    #[test]
    fn test_from_scalars_range() {
        let n = secp256k1().n();
        assert!(Signature::from_scalars(&BigUint::zero(), &BigUint::from(1u32)).is_err());
        assert!(Signature::from_scalars(&BigUint::from(1u32), n).is_err());
        assert!(Signature::from_scalars(&BigUint::from(1u32), &BigUint::from(1u32)).is_ok());
    }
}
