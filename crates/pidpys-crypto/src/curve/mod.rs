//! Elliptic curves y^2 + xy = x^3 + Ax^2 + B over GF(2^m)
//!
//! Affine representation with an explicit point at infinity as the group
//! identity. Group law, doubling and double-and-add scalar multiplication
//! follow DSTU 4145-2002 appendix B.

mod codec;
mod domain;
mod generate;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{CryptoError, Result};
use crate::field::{FieldElement, Gf2m};

pub use domain::DomainParams;

/// A point of the curve group: the identity O or an affine pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    /// The point at infinity, the group identity
    Infinity,
    /// An affine point satisfying the curve equation
    Affine {
        /// x coordinate
        x: FieldElement,
        /// y coordinate
        y: FieldElement,
    },
}

impl Point {
    /// True for the point at infinity
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// x coordinate of a non-infinity point
    pub fn x(&self) -> Option<&FieldElement> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    /// y coordinate of a non-infinity point
    pub fn y(&self) -> Option<&FieldElement> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }
}

/// An elliptic curve over a binary field
///
/// Immutable after construction; shareable across threads.
#[derive(Debug, Clone)]
pub struct Curve {
    field: Gf2m,
    a: u8,
    b: FieldElement,
}

impl Curve {
    /// Create a curve with coefficients A in {0, 1} and B != 0
    pub fn new(field: Gf2m, a: u8, b: FieldElement) -> Result<Self> {
        if a > 1 {
            return Err(CryptoError::Domain(format!(
                "curve coefficient A must be 0 or 1, got {a}"
            )));
        }
        if b.is_zero() {
            return Err(CryptoError::Domain(
                "curve coefficient B must be non-zero".into(),
            ));
        }
        Ok(Self { field, a, b })
    }

    /// The underlying field
    pub fn field(&self) -> &Gf2m {
        &self.field
    }

    /// Coefficient A
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Coefficient B
    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    /// Right-hand side of the curve equation: x^3 + A*x^2 + B
    fn equation_rhs(&self, x: &FieldElement) -> FieldElement {
        let f = &self.field;
        let x_sq = f.square(x);
        let mut rhs = f.mul(x, &x_sq);
        if self.a == 1 {
            rhs = f.add(&rhs, &x_sq);
        }
        f.add(&rhs, &self.b)
    }

    /// Membership test: y^2 + xy = x^3 + Ax^2 + B, with O always a member
    pub fn contains(&self, p: &Point) -> bool {
        match p {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                let f = &self.field;
                let lhs = f.add(&f.square(y), &f.mul(x, y));
                lhs == self.equation_rhs(x)
            }
        }
    }

    /// Group negation: -(x, y) = (x, x + y)
    pub fn negate(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: self.field.add(x, y),
            },
        }
    }

    /// Group addition
    pub fn add(&self, p: &Point, q: &Point) -> Point {
        let (x1, y1) = match p {
            Point::Infinity => return q.clone(),
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match q {
            Point::Infinity => return p.clone(),
            Point::Affine { x, y } => (x, y),
        };

        let f = &self.field;
        if x1 == x2 {
            if y1 == y2 {
                return self.double(p);
            }
            // Q = -P
            return Point::Infinity;
        }

        // lambda = (y1 + y2) / (x1 + x2); the denominator is non-zero here
        let denom = f.add(x1, x2);
        let lambda = match f.inverse(&denom) {
            Ok(inv) => f.mul(&f.add(y1, y2), &inv),
            Err(_) => return Point::Infinity,
        };

        // x3 = lambda^2 + lambda + x1 + x2 + A
        let mut x3 = f.add(&f.square(&lambda), &lambda);
        x3 = f.add(&x3, x1);
        x3 = f.add(&x3, x2);
        if self.a == 1 {
            x3 = f.add(&x3, &f.one());
        }

        // y3 = lambda * (x1 + x3) + x3 + y1
        let mut y3 = f.mul(&lambda, &f.add(x1, &x3));
        y3 = f.add(&y3, &x3);
        y3 = f.add(&y3, y1);

        Point::Affine { x: x3, y: y3 }
    }

    /// Point doubling; 2P = O when P = O or x = 0
    pub fn double(&self, p: &Point) -> Point {
        let (x1, y1) = match p {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        if x1.is_zero() {
            return Point::Infinity;
        }

        let f = &self.field;
        // lambda = x1 + y1 / x1
        let lambda = match f.inverse(x1) {
            Ok(inv) => f.add(x1, &f.mul(y1, &inv)),
            Err(_) => return Point::Infinity,
        };

        // x3 = lambda^2 + lambda + A
        let mut x3 = f.add(&f.square(&lambda), &lambda);
        if self.a == 1 {
            x3 = f.add(&x3, &f.one());
        }

        // y3 = x1^2 + lambda * x3 + x3
        let mut y3 = f.add(&f.square(x1), &f.mul(&lambda, &x3));
        y3 = f.add(&y3, &x3);

        Point::Affine { x: x3, y: y3 }
    }

    /// Scalar multiplication k*P by right-to-left double-and-add
    ///
    /// Returns O when k = 0 or P = O.
    pub fn mul(&self, k: &BigUint, p: &Point) -> Point {
        if k.is_zero() || p.is_infinity() {
            return Point::Infinity;
        }

        let mut result = Point::Infinity;
        let mut addend = p.clone();
        let bits = k.bits();
        for i in 0..bits {
            if k.bit(i) {
                result = self.add(&result, &addend);
            }
            if i + 1 < bits {
                addend = self.double(&addend);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::domain::DomainParams;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn m163() -> &'static DomainParams {
        DomainParams::m163()
    }

    #[test]
    fn test_curve_rejects_bad_coefficients() {
        let field = crate::field::field_163();
        let b = field.one();
        assert!(Curve::new(field.clone(), 2, b.clone()).is_err());
        assert!(Curve::new(field.clone(), 0, field.zero()).is_err());
        assert!(Curve::new(field, 1, b).is_ok());
    }

    #[test]
    fn test_base_point_is_on_curve() {
        let params = m163();
        assert!(params.curve().contains(params.base()));
    }

    #[test]
    fn test_identity_laws() {
        let params = m163();
        let curve = params.curve();
        let p = params.base();

        assert_eq!(&curve.add(p, &Point::Infinity), p);
        assert_eq!(&curve.add(&Point::Infinity, p), p);
        assert!(curve.add(p, &curve.negate(p)).is_infinity());
        assert!(curve.contains(&curve.negate(p)));
    }

    #[test]
    fn test_double_equals_add_self() {
        let params = m163();
        let curve = params.curve();
        let p = params.base();
        assert_eq!(curve.double(p), curve.add(p, p));
    }

    #[test]
    fn test_addition_commutes_and_associates() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = m163();
        let curve = params.curve();

        let p = curve.random_point(&mut rng).unwrap();
        let q = curve.random_point(&mut rng).unwrap();
        let r = curve.random_point(&mut rng).unwrap();

        assert_eq!(curve.add(&p, &q), curve.add(&q, &p));
        assert_eq!(
            curve.add(&curve.add(&p, &q), &r),
            curve.add(&p, &curve.add(&q, &r))
        );
    }

    #[test]
    fn test_scalar_multiples_stay_on_curve() {
        let params = m163();
        let curve = params.curve();
        let p = params.base();

        let mut acc = Point::Infinity;
        for k in 0u32..12 {
            let by_scalar = curve.mul(&BigUint::from(k), p);
            assert!(curve.contains(&by_scalar));
            assert_eq!(by_scalar, acc, "k*P must match repeated addition at k={k}");
            acc = curve.add(&acc, p);
        }
    }

    #[test]
    fn test_base_point_order() {
        let params = m163();
        let curve = params.curve();
        assert!(curve.mul(params.order(), params.base()).is_infinity());
        // (n + 1) * P = P
        let n_plus_1 = params.order() + BigUint::from(1u32);
        assert_eq!(&curve.mul(&n_plus_1, params.base()), params.base());
    }

    #[test]
    fn test_mul_zero_and_infinity() {
        let params = m163();
        let curve = params.curve();
        assert!(curve.mul(&BigUint::zero(), params.base()).is_infinity());
        assert!(curve
            .mul(&BigUint::from(7u32), &Point::Infinity)
            .is_infinity());
    }
}
