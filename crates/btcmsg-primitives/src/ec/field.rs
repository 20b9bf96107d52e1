//! Modular arithmetic over a prime field or the group order.
//!
//! All helpers return canonical residues in `[0, m)`. The same functions
//! serve the field modulus `p` and the subgroup order `n`; callers pick
//! the modulus.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::PrimitivesError;

/// `(a + b) mod m`.
pub fn add_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// `(a - b) mod m`, wrapping into the non-negative range.
pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    ((a % m) + m - (b % m)) % m
}

/// `(a * b) mod m`.
pub fn mul_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `-a mod m`.
pub fn neg_mod(a: &BigUint, m: &BigUint) -> BigUint {
    (m - (a % m)) % m
}

/// `base^exponent mod m`.
pub fn pow_mod(base: &BigUint, exponent: &BigUint, m: &BigUint) -> BigUint {
    base.modpow(exponent, m)
}

/// Whether `v` is odd.
pub fn is_odd(v: &BigUint) -> bool {
    v.to_bytes_le()[0] & 1 == 1
}

/// Compute the modular inverse of `a` modulo `m` with the extended
/// Euclidean algorithm.
///
/// # Returns
/// `x` with `a * x ≡ 1 (mod m)`, or `NoInverse` when `gcd(a, m) != 1`
/// (including `a ≡ 0`).
pub fn inverse_mod(a: &BigUint, m: &BigUint) -> Result<BigUint, PrimitivesError> {
    if m.is_zero() {
        return Err(PrimitivesError::NoInverse);
    }
    let modulus = BigInt::from(m.clone());

    let mut old_r = BigInt::from(a % m);
    let mut r = modulus.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(PrimitivesError::NoInverse);
    }

    let normalized = ((old_s % &modulus) + &modulus) % &modulus;
    normalized.to_biguint().ok_or(PrimitivesError::NoInverse)
}

/// Compute a square root of `a` modulo a prime `p` with `p ≡ 3 (mod 4)`.
///
/// The candidate `a^((p+1)/4)` is squared back and compared against `a`.
/// Either root may be returned; callers choose the parity they need.
///
/// # Returns
/// A root, or `NoSquareRoot` when `a` is a quadratic non-residue.
pub fn sqrt_mod(a: &BigUint, p: &BigUint) -> Result<BigUint, PrimitivesError> {
    let a = a % p;
    let exponent = (p + 1u32) / 4u32;
    let candidate = a.modpow(&exponent, p);
    if mul_mod(&candidate, &candidate, p) != a {
        return Err(PrimitivesError::NoSquareRoot);
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::curve::secp256k1;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_inverse_mod_small() {
        assert_eq!(inverse_mod(&big(3), &big(7)).unwrap(), big(5));
        assert_eq!(inverse_mod(&big(10), &big(17)).unwrap(), big(12));
        // a larger than the modulus is reduced first
        assert_eq!(inverse_mod(&big(10), &big(7)).unwrap(), big(5));
    }

    #[test]
    fn test_inverse_mod_no_inverse() {
        assert!(matches!(
            inverse_mod(&big(6), &big(9)),
            Err(PrimitivesError::NoInverse)
        ));
        assert!(matches!(
            inverse_mod(&big(0), &big(7)),
            Err(PrimitivesError::NoInverse)
        ));
        assert!(matches!(
            inverse_mod(&big(3), &big(0)),
            Err(PrimitivesError::NoInverse)
        ));
    }

    #[test]
    fn test_inverse_mod_curve_order() {
        let n = secp256k1().n();
        let a = BigUint::parse_bytes(
            b"eaf02ca348c524e6392655ba4d29603cd1a7347d9d65cfe93ce1ebffdca22694",
            16,
        )
        .unwrap();
        let inv = inverse_mod(&a, n).unwrap();
        assert_eq!(mul_mod(&a, &inv, n), big(1));
    }

    #[test]
    fn test_sqrt_mod_small_prime() {
        // 4^2 = 16 = 5 (mod 11)
        let root = sqrt_mod(&big(5), &big(11)).unwrap();
        assert_eq!(mul_mod(&root, &root, &big(11)), big(5));
        assert!(matches!(
            sqrt_mod(&big(2), &big(11)),
            Err(PrimitivesError::NoSquareRoot)
        ));
    }

    #[test]
    fn test_sqrt_mod_field_residue() {
        let p = secp256k1().p();
        for v in [2u64, 4, 8, 9, 11] {
            let root = sqrt_mod(&big(v), p).unwrap();
            assert_eq!(mul_mod(&root, &root, p), big(v), "root of {}", v);
        }
    }

    #[test]
    fn test_sqrt_mod_field_non_residue() {
        let p = secp256k1().p();
        for v in [3u64, 5, 6, 7, 10] {
            assert!(
                matches!(sqrt_mod(&big(v), p), Err(PrimitivesError::NoSquareRoot)),
                "{} should be a non-residue",
                v
            );
        }
    }

    #[test]
    fn test_sub_and_neg_wrap() {
        let m = big(13);
        assert_eq!(sub_mod(&big(3), &big(5), &m), big(11));
        assert_eq!(neg_mod(&big(0), &m), big(0));
        assert_eq!(neg_mod(&big(4), &m), big(9));
        assert_eq!(add_mod(&big(12), &big(5), &m), big(4));
        assert_eq!(pow_mod(&big(2), &big(10), &m), big(1024 % 13));
    }
}
