//! Point compression and decompression (DSTU 4145-2002 sections 6.9 / 6.10)
//!
//! A compressed point is a single field element: the x coordinate with its
//! lowest bit replaced by the trace of y/x. The all-zero element encodes both
//! the point at infinity and the x = 0 point; the two are distinguished by
//! context, which is sound for the named curves because signatures never
//! serialize O and their key points never have x = 0.

use crate::error::{CryptoError, Result};
use crate::field::{FieldElement, QuadraticRoots};

use super::{Curve, Point};

impl Curve {
    /// Compress a point to one field element
    ///
    /// O and points with x = 0 both map to the zero element.
    pub fn compress(&self, p: &Point) -> FieldElement {
        let f = self.field();
        let (x, y) = match p {
            Point::Infinity => return f.zero(),
            Point::Affine { x, y } => (x, y),
        };
        if x.is_zero() {
            return f.zero();
        }

        let x_inv = f
            .inverse(x)
            .expect("x was checked non-zero above");
        let trace_bit = f.trace(&f.mul(y, &x_inv));

        let mut compressed = x.clone();
        compressed.set_bit(0, trace_bit == 1);
        compressed
    }

    /// Recover a point from its compressed form
    ///
    /// The zero element decodes to (0, sqrt(B)). Fails with
    /// [`CryptoError::Decode`] when no y coordinate exists for the encoded x.
    pub fn decompress(&self, compressed: &FieldElement) -> Result<Point> {
        let f = self.field();

        if compressed.is_zero() {
            return Ok(Point::Affine {
                x: f.zero(),
                y: f.sqrt(self.b()),
            });
        }

        let y_bit = u8::from(compressed.bit(0));
        let mut x = compressed.clone();
        x.set_bit(0, false);

        // Normalize the candidate into the trace class of A
        if f.trace(&x) != self.a() {
            x.set_bit(0, true);
        }

        // v = (x^3 + A*x^2 + B) / x^2
        let w = self.equation_rhs(&x);
        let x_sq_inv = match f.inverse(&f.square(&x)) {
            Ok(inv) => inv,
            Err(_) => {
                return Err(CryptoError::Decode(
                    "compressed point has a degenerate x coordinate".into(),
                ))
            }
        };
        let v = f.mul(&w, &x_sq_inv);

        let z = match f.solve_quadratic(&f.one(), &v) {
            QuadraticRoots::None => {
                return Err(CryptoError::Decode(
                    "compressed element does not correspond to a curve point".into(),
                ))
            }
            QuadraticRoots::One(z) | QuadraticRoots::Two(z) => z,
        };

        // Pick the solution whose trace matches the stored bit
        let z = if f.trace(&z) == y_bit {
            z
        } else {
            f.add(&z, &f.one())
        };

        let y = f.mul(&z, &x);
        Ok(Point::Affine { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::DomainParams;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_compression_roundtrip() {
        let mut rng = StdRng::seed_from_u64(21);
        for params in [DomainParams::m163(), DomainParams::m257()] {
            let curve = params.curve();
            for _ in 0..10 {
                let p = curve.random_point(&mut rng).unwrap();
                let compressed = curve.compress(&p);
                let restored = curve.decompress(&compressed).unwrap();
                assert_eq!(restored, p);
            }
        }
    }

    #[test]
    fn test_zero_encoding_decodes_to_sqrt_b() {
        let params = DomainParams::m257();
        let curve = params.curve();
        let f = curve.field();

        let p = curve.decompress(&f.zero()).unwrap();
        let (x, y) = (p.x().unwrap(), p.y().unwrap());
        assert!(x.is_zero());
        // y = sqrt(B), so y^2 = B
        assert_eq!(&f.square(y), curve.b());
        assert!(curve.contains(&p));
    }

    #[test]
    fn test_infinity_compresses_to_zero() {
        let params = DomainParams::m163();
        let curve = params.curve();
        assert!(curve.compress(&crate::curve::Point::Infinity).is_zero());
    }

    #[test]
    fn test_decompress_rejects_pointless_element() {
        // Search for an element that decodes to no curve point; about half of
        // all candidates fail the trace test, so a small scan is enough.
        let params = DomainParams::m257();
        let curve = params.curve();
        let f = curve.field();

        let mut rng = StdRng::seed_from_u64(22);
        let mut rejected = false;
        for _ in 0..64 {
            let candidate = f.random_element(&mut rng);
            if candidate.is_zero() {
                continue;
            }
            if curve.decompress(&candidate).is_err() {
                rejected = true;
                break;
            }
        }
        assert!(rejected, "some random elements must fail decompression");
    }
}
