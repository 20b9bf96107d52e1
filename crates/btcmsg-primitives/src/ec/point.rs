//! Affine points on secp256k1 and the group law.
//!
//! Points are immutable values. Every point, including the point at
//! infinity, keeps a reference to the curve it lives on, so scalar
//! reduction and the on-curve check never need extra arguments.

use std::fmt;
use std::ops::{Add, Mul, Neg};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::ec::curve::CurveParams;
use crate::ec::field::{inverse_mod, mul_mod, neg_mod, sub_mod};
use crate::PrimitivesError;

/// A point on a short Weierstrass curve, or the point at infinity.
#[derive(Clone)]
pub struct Point {
    curve: &'static CurveParams,
    coords: Option<(BigUint, BigUint)>,
}

impl Point {
    /// The group identity on `curve`.
    pub fn infinity(curve: &'static CurveParams) -> Self {
        Point { curve, coords: None }
    }

    /// Create a point from affine coordinates.
    ///
    /// # Returns
    /// `PointNotOnCurve` unless `y² ≡ x³ + a·x + b (mod p)`.
    pub fn from_affine(
        curve: &'static CurveParams,
        x: BigUint,
        y: BigUint,
    ) -> Result<Self, PrimitivesError> {
        if !curve.contains(&x, &y) {
            return Err(PrimitivesError::PointNotOnCurve);
        }
        Ok(Point { curve, coords: Some((x, y)) })
    }

    pub(crate) fn from_affine_unchecked(curve: &'static CurveParams, x: BigUint, y: BigUint) -> Self {
        Point { curve, coords: Some((x, y)) }
    }

    /// The curve this point belongs to.
    pub fn curve(&self) -> &'static CurveParams {
        self.curve
    }

    /// Whether this is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        self.coords.is_none()
    }

    /// The affine x coordinate, `None` at infinity.
    pub fn x(&self) -> Option<&BigUint> {
        self.coords.as_ref().map(|(x, _)| x)
    }

    /// The affine y coordinate, `None` at infinity.
    pub fn y(&self) -> Option<&BigUint> {
        self.coords.as_ref().map(|(_, y)| y)
    }

    /// Whether the point satisfies the curve equation. Infinity always does.
    pub fn is_on_curve(&self) -> bool {
        match &self.coords {
            None => true,
            Some((x, y)) => self.curve.contains(x, y),
        }
    }

    /// Group addition.
    pub fn add(&self, other: &Point) -> Point {
        let (x1, y1) = match &self.coords {
            None => return other.clone(),
            Some(c) => c,
        };
        let (x2, y2) = match &other.coords {
            None => return self.clone(),
            Some(c) => c,
        };
        let p = self.curve.p();

        if x1 == x2 {
            // P + (-P) = O
            if (y1 + y2) % p == BigUint::zero() {
                return Point::infinity(self.curve);
            }
            return self.double();
        }

        let lambda = mul_mod(&sub_mod(y2, y1, p), &field_inverse(&sub_mod(x2, x1, p), p), p);
        self.finish(&lambda, x1, y1, x2)
    }

    /// Point doubling.
    pub fn double(&self) -> Point {
        let (x, y) = match &self.coords {
            None => return self.clone(),
            Some(c) => c,
        };
        if y.is_zero() {
            return Point::infinity(self.curve);
        }
        let p = self.curve.p();

        let numerator = (BigUint::from(3u32) * mul_mod(x, x, p) + self.curve.a()) % p;
        let denominator = (BigUint::from(2u32) * y) % p;
        let lambda = mul_mod(&numerator, &field_inverse(&denominator, p), p);
        self.finish(&lambda, x, y, x)
    }

    /// Complete an addition or doubling given the chord/tangent slope.
    fn finish(&self, lambda: &BigUint, x1: &BigUint, y1: &BigUint, x2: &BigUint) -> Point {
        let p = self.curve.p();
        let x3 = sub_mod(&sub_mod(&mul_mod(lambda, lambda, p), x1, p), x2, p);
        let y3 = sub_mod(&mul_mod(lambda, &sub_mod(x1, &x3, p), p), y1, p);
        let result = Point::from_affine_unchecked(self.curve, x3, y3);
        assert!(result.is_on_curve(), "group law produced a point off the curve");
        result
    }

    /// Additive inverse, `(x, -y)`.
    pub fn negate(&self) -> Point {
        match &self.coords {
            None => self.clone(),
            Some((x, y)) => {
                Point::from_affine_unchecked(self.curve, x.clone(), neg_mod(y, self.curve.p()))
            }
        }
    }

    /// Scalar multiplication by double-and-add. The scalar is used as given.
    pub fn mul(&self, k: &BigUint) -> Point {
        let mut result = Point::infinity(self.curve);
        for byte in k.to_bytes_be() {
            for bit in (0..8).rev() {
                result = result.double();
                if (byte >> bit) & 1 == 1 {
                    result = result.add(self);
                }
            }
        }
        result
    }

    /// Scalar multiplication with the scalar first reduced modulo the group order.
    pub fn mul_reduced(&self, k: &BigUint) -> Point {
        self.mul(&(k % self.curve.n()))
    }
}

/// Inverse of a nonzero field element.
///
/// Callers pass `x2 - x1` with `x1 != x2` or `2y` with `y != 0`, both
/// nonzero modulo the prime `p`.
fn field_inverse(a: &BigUint, p: &BigUint) -> BigUint {
    match inverse_mod(a, p) {
        Ok(inv) => inv,
        Err(_) => unreachable!("nonzero element of a prime field has no inverse"),
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl Eq for Point {}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coords {
            None => write!(f, "Point(infinity)"),
            Some((x, y)) => write!(f, "Point({:064x}, {:064x})", x, y),
        }
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    fn add(self, rhs: &Point) -> Point {
        Point::add(self, rhs)
    }
}

impl Neg for &Point {
    type Output = Point;

    fn neg(self) -> Point {
        self.negate()
    }
}

impl Mul<&BigUint> for &Point {
    type Output = Point;

    fn mul(self, k: &BigUint) -> Point {
        Point::mul(self, k)
    }
}
