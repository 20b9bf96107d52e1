//! secp256k1 domain parameters.
//!
//! The parameters are built once on first use and shared read-only for the
//! rest of the process as a `&'static CurveParams`.

use std::sync::LazyLock;

use num_bigint::BigUint;

use crate::ec::field::{add_mod, mul_mod, pow_mod};
use crate::ec::point::Point;

/// The secp256k1 field prime P.
/// P = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F
const FIELD_PRIME: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF,
    0xFC, 0x2F,
];

/// The secp256k1 curve order N.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

const GENERATOR_X: [u8; 32] = [
    0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B,
    0x07, 0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8,
    0x17, 0x98,
];

const GENERATOR_Y: [u8; 32] = [
    0x48, 0x3A, 0xDA, 0x77, 0x26, 0xA3, 0xC4, 0x65, 0x5D, 0xA4, 0xFB, 0xFC, 0x0E, 0x11, 0x08,
    0xA8, 0xFD, 0x17, 0xB4, 0x48, 0xA6, 0x85, 0x54, 0x19, 0x9C, 0x47, 0xD0, 0x8F, 0xFB, 0x10,
    0xD4, 0xB8,
];

static SECP256K1: LazyLock<CurveParams> = LazyLock::new(|| {
    let n = BigUint::from_bytes_be(&CURVE_ORDER);
    CurveParams {
        name: "secp256k1",
        p: BigUint::from_bytes_be(&FIELD_PRIME),
        a: BigUint::from(0u32),
        b: BigUint::from(7u32),
        half_n: &n >> 1usize,
        n,
        gx: BigUint::from_bytes_be(&GENERATOR_X),
        gy: BigUint::from_bytes_be(&GENERATOR_Y),
    }
});

/// The process-wide secp256k1 parameters.
pub fn secp256k1() -> &'static CurveParams {
    &SECP256K1
}

/// Short Weierstrass curve `y² = x³ + a·x + b` over `F_p` with a generator
/// of prime order `n`.
#[derive(Debug)]
pub struct CurveParams {
    name: &'static str,
    p: BigUint,
    a: BigUint,
    b: BigUint,
    n: BigUint,
    half_n: BigUint,
    gx: BigUint,
    gy: BigUint,
}

impl CurveParams {
    /// Human readable curve name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field prime.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Coefficient `a`.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `b`.
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Order of the generator.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// `n / 2`, the upper bound of a low-S value.
    pub fn half_n(&self) -> &BigUint {
        &self.half_n
    }

    /// The generator point G.
    pub fn generator(&'static self) -> Point {
        Point::from_affine_unchecked(self, self.gx.clone(), self.gy.clone())
    }

    /// Right-hand side of the curve equation, `x³ + a·x + b mod p`.
    pub fn y_squared(&self, x: &BigUint) -> BigUint {
        let x_cubed = pow_mod(x, &BigUint::from(3u32), &self.p);
        let ax = mul_mod(&self.a, x, &self.p);
        add_mod(&add_mod(&x_cubed, &ax, &self.p), &self.b, &self.p)
    }

    /// Whether the affine coordinates satisfy the curve equation.
    pub fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        if x >= &self.p || y >= &self.p {
            return false;
        }
        mul_mod(y, y, &self.p) == self.y_squared(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_is_three_mod_four() {
        let p = secp256k1().p();
        assert_eq!(p % 4u32, BigUint::from(3u32));
    }

    #[test]
    fn test_generator_on_curve() {
        let curve = secp256k1();
        assert!(curve.contains(&curve.gx, &curve.gy));
        assert!(!curve.contains(&curve.gx, &(&curve.gy + 1u32)));
    }

    #[test]
    fn test_order_constants() {
        let curve = secp256k1();
        assert_eq!(
            hex::encode(curve.n().to_bytes_be()),
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
        );
        assert_eq!(
            hex::encode(curve.half_n().to_bytes_be()),
            "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0"
        );
        assert_eq!(curve.name(), "secp256k1");
    }
}
