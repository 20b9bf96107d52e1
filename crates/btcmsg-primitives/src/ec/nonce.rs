//! ECDSA nonce generation.
//!
//! `Deterministic` follows RFC 6979 with HMAC-SHA256, so the same key and
//! digest always produce the same signature. `Random` draws nonces from the
//! operating system CSPRNG.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::ec::curve::secp256k1;
use crate::ec::public_key::to_32_bytes;
use crate::hash::sha256_hmac;

/// How signing nonces are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonceStrategy {
    /// RFC 6979 deterministic nonces keyed on the secret and the digest.
    #[default]
    Deterministic,
    /// Uniform nonces from the OS random number generator.
    Random,
}

impl NonceStrategy {
    /// An endless stream of candidate nonces in `[1, n)` for one signature.
    pub fn nonces(&self, secret: &[u8; 32], hash: &[u8; 32]) -> Nonces {
        match self {
            NonceStrategy::Deterministic => Nonces::Deterministic(Rfc6979::new(secret, hash)),
            NonceStrategy::Random => Nonces::Random,
        }
    }
}

/// Candidate nonces for a single signing operation.
pub enum Nonces {
    Deterministic(Rfc6979),
    Random,
}

impl Iterator for Nonces {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        match self {
            Nonces::Deterministic(drbg) => drbg.next(),
            Nonces::Random => Some(random_scalar()),
        }
    }
}

fn random_scalar() -> BigUint {
    let n = secp256k1().n();
    loop {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let k = BigUint::from_bytes_be(&bytes);
        bytes.zeroize();
        if !k.is_zero() && &k < n {
            return k;
        }
    }
}

/// HMAC-DRBG state from RFC 6979 section 3.2, specialised to
/// secp256k1 and SHA-256 (qlen = hlen = 256).
pub struct Rfc6979 {
    k: [u8; 32],
    v: [u8; 32],
    started: bool,
}

impl Rfc6979 {
    /// Seed the generator with the private scalar and the message digest.
    pub fn new(secret: &[u8; 32], hash: &[u8; 32]) -> Self {
        let n = secp256k1().n();
        let mut h1 = to_32_bytes(&(BigUint::from_bytes_be(hash) % n));

        let mut k = [0u8; 32];
        let mut v = [1u8; 32];
        for marker in [0x00u8, 0x01] {
            let mut data = Vec::with_capacity(32 + 1 + 32 + 32);
            data.extend_from_slice(&v);
            data.push(marker);
            data.extend_from_slice(secret);
            data.extend_from_slice(&h1);
            k = sha256_hmac(&k, &data);
            v = sha256_hmac(&k, &v);
            data.zeroize();
        }
        h1.zeroize();

        Rfc6979 { k, v, started: false }
    }

    fn reseed(&mut self) {
        let mut data = Vec::with_capacity(33);
        data.extend_from_slice(&self.v);
        data.push(0x00);
        self.k = sha256_hmac(&self.k, &data);
        self.v = sha256_hmac(&self.k, &self.v);
    }
}

impl Iterator for Rfc6979 {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        let n = secp256k1().n();
        // a caller asking again rejected the previous candidate
        if self.started {
            self.reseed();
        }
        self.started = true;
        loop {
            self.v = sha256_hmac(&self.k, &self.v);
            let candidate = BigUint::from_bytes_be(&self.v);
            if !candidate.is_zero() && &candidate < n {
                return Some(candidate);
            }
            self.reseed();
        }
    }
}

impl Drop for Rfc6979 {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    fn hex_32(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(s).unwrap());
        out
    }

    #[test]
    fn test_rfc6979_is_deterministic() {
        let secret = hex_32("0000000000000000000000000000000000000000000000000000000000000001");
        let hash = sha256(b"Satoshi Nakamoto");
        let a: Vec<BigUint> = NonceStrategy::Deterministic.nonces(&secret, &hash).take(3).collect();
        let b: Vec<BigUint> = NonceStrategy::Deterministic.nonces(&secret, &hash).take(3).collect();
        assert_eq!(a, b);
        // successive candidates differ
        assert_ne!(a[0], a[1]);
        assert_ne!(a[1], a[2]);
    }

    #[test]
    fn test_rfc6979_depends_on_hash() {
        let secret = hex_32("0000000000000000000000000000000000000000000000000000000000000001");
        let mut first = NonceStrategy::Deterministic.nonces(&secret, &sha256(b"a"));
        let mut second = NonceStrategy::Deterministic.nonces(&secret, &sha256(b"b"));
        assert_ne!(first.next(), second.next());
    }

    #[test]
    fn test_random_nonces_in_range() {
        let n = secp256k1().n();
        let secret = [7u8; 32];
        let hash = [9u8; 32];
        let nonces: Vec<BigUint> = NonceStrategy::Random.nonces(&secret, &hash).take(4).collect();
        for k in &nonces {
            assert!(!k.is_zero());
            assert!(k < n);
        }
        assert_ne!(nonces[0], nonces[1]);
    }

    #[test]
    fn test_strategy_serde_names() {
        assert_eq!(
            serde_json::to_string(&NonceStrategy::Deterministic).unwrap(),
            "\"deterministic\""
        );
        let parsed: NonceStrategy = serde_json::from_str("\"random\"").unwrap();
        assert_eq!(parsed, NonceStrategy::Random);
    }
}
