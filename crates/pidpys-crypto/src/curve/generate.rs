//! Random-point and base-point generation (DSTU 4145-2002 sections 6.8 / 7.3)
//!
//! Both procedures take the randomness source as a parameter so that callers
//! can pass a seeded generator for reproducible results.

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, trace};

use crate::error::{CryptoError, Result};
use crate::field::QuadraticRoots;

use super::{Curve, Point};

/// Retry cap for the random-point search
const RANDOM_POINT_ATTEMPTS: usize = 1000;
/// Retry cap for the base-point search
const BASE_POINT_ATTEMPTS: usize = 100;

impl Curve {
    /// Draw a uniformly random point of the curve
    ///
    /// Iterates: pick a random non-zero x, move it into the trace class of A,
    /// solve z^2 + z = (x^3 + Ax^2 + B) / x^2 and take y = z*x. Each
    /// candidate is re-checked against the curve equation before being
    /// returned. Fails with [`CryptoError::Generation`] after 1000 attempts.
    pub fn random_point<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<Point> {
        let f = self.field();

        for attempt in 0..RANDOM_POINT_ATTEMPTS {
            let mut x = f.random_element(rng);
            if x.is_zero() {
                continue;
            }

            if f.trace(&x) != self.a() {
                x = f.add(&x, &f.one());
                if f.trace(&x) != self.a() {
                    continue;
                }
            }

            let w = self.equation_rhs(&x);
            let x_sq_inv = match f.inverse(&f.square(&x)) {
                Ok(inv) => inv,
                Err(_) => continue,
            };
            let v = f.mul(&w, &x_sq_inv);

            let z = match f.solve_quadratic(&f.one(), &v) {
                QuadraticRoots::None => continue,
                QuadraticRoots::One(z) | QuadraticRoots::Two(z) => z,
            };

            let point = Point::Affine {
                x: x.clone(),
                y: f.mul(&z, &x),
            };

            // The solver output must satisfy the curve equation; anything
            // else indicates a defect in the field layer.
            if self.contains(&point) {
                trace!(attempt, "random curve point found");
                return Ok(point);
            }
        }

        Err(CryptoError::Generation(format!(
            "no curve point found in {RANDOM_POINT_ATTEMPTS} attempts"
        )))
    }

    /// Find a base point of order `n`
    ///
    /// Draws random points Q, computes P = cofactor * Q and keeps the first P
    /// with P != O and n*P = O. Fails with [`CryptoError::Generation`] after
    /// 100 attempts.
    pub fn generate_base_point<R: RngCore + CryptoRng>(
        &self,
        n: &BigUint,
        cofactor: u32,
        rng: &mut R,
    ) -> Result<Point> {
        for attempt in 0..BASE_POINT_ATTEMPTS {
            let q = self.random_point(rng)?;
            let p = if cofactor == 1 {
                q
            } else {
                self.mul(&BigUint::from(cofactor), &q)
            };

            if p.is_infinity() {
                continue;
            }

            if self.mul(n, &p).is_infinity() {
                debug!(attempt, "base point of requested order found");
                return Ok(p);
            }
            trace!(attempt, "candidate point has wrong order, retrying");
        }

        Err(CryptoError::Generation(format!(
            "no point of the requested order found in {BASE_POINT_ATTEMPTS} attempts"
        )))
    }
}
