//! Standard domain parameter sets
//!
//! Two of the DSTU 4145-2002 appendix D parameter sets are bundled: the
//! 163-bit curve with its published base point, and the 257-bit curve whose
//! base point is derived once per process by the section 7.3 search with a
//! fixed seed, so the result is stable across runs.

use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::One;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::{CryptoError, Result};
use crate::field::{field_163, field_257};

use super::{Curve, Point};

/// Seed for the reproducible 257-bit base-point search
const M257_BASE_POINT_SEED: u64 = 257;

/// A complete set of signature domain parameters: curve, base point and its
/// prime order
#[derive(Debug, Clone)]
pub struct DomainParams {
    curve: Curve,
    base: Point,
    n: BigUint,
}

impl DomainParams {
    /// Assemble domain parameters, validating that the base point is a
    /// proper curve point
    pub fn new(curve: Curve, base: Point, n: BigUint) -> Result<Self> {
        if base.is_infinity() {
            return Err(CryptoError::Domain(
                "the base point must not be the point at infinity".into(),
            ));
        }
        if !curve.contains(&base) {
            return Err(CryptoError::Domain(
                "the base point does not lie on the curve".into(),
            ));
        }
        if n <= BigUint::one() {
            return Err(CryptoError::Domain("the order n must exceed 1".into()));
        }
        Ok(Self { curve, base, n })
    }

    /// The curve
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// The underlying field
    pub fn field(&self) -> &crate::field::Gf2m {
        self.curve.field()
    }

    /// The base point P
    pub fn base(&self) -> &Point {
        &self.base
    }

    /// The order n of the base point
    pub fn order(&self) -> &BigUint {
        &self.n
    }

    /// Bytes per serialized scalar: ceil(bitlen(n) / 8)
    pub fn scalar_byte_len(&self) -> usize {
        ((self.n.bits() as usize) + 7) / 8
    }

    /// Bytes per serialized coordinate: ceil(m / 8)
    pub fn coordinate_byte_len(&self) -> usize {
        self.field().byte_len()
    }

    /// The 163-bit parameter set with the published base point
    pub fn m163() -> &'static DomainParams {
        static PARAMS: OnceLock<DomainParams> = OnceLock::new();
        PARAMS.get_or_init(|| {
            let field = field_163();
            let b = field.elem_from_int(&parse_hex("5FF6108462A2DC8210AB403925E638A19C1455D21"));
            let curve = Curve::new(field.clone(), 1, b).expect("standard curve parameters");

            let base = Point::Affine {
                x: field.elem_from_int(&parse_hex("72D867F93A93AC27DF9FF01AFFE74885C8C540420")),
                y: field.elem_from_int(&parse_hex("0224A9C3947852B97C5599D5F4AB81122ADC3FD9B")),
            };
            let n = parse_hex("400000000000000000002BEC12BE2262D39BCF14D");

            DomainParams::new(curve, base, n).expect("standard base point is valid")
        })
    }

    /// The 257-bit parameter set; the base point is searched once with a
    /// fixed seed and cached for the lifetime of the process
    pub fn m257() -> &'static DomainParams {
        static PARAMS: OnceLock<DomainParams> = OnceLock::new();
        PARAMS.get_or_init(|| {
            let field = field_257();
            let b = field.elem_from_int(&parse_hex(
                "1CEF494720115657E18F938D7A7942394FF9425C1458C57861F9EEA6ADBE3BE10",
            ));
            let curve = Curve::new(field, 0, b).expect("standard curve parameters");
            let n = parse_hex("800000000000000000000000000000006759213AF182E987D3E17714907D470D");

            debug!("deriving the 257-bit base point (seeded search)");
            let mut rng = StdRng::seed_from_u64(M257_BASE_POINT_SEED);
            let base = curve
                .generate_base_point(&n, 1, &mut rng)
                .expect("the seeded base point search converges");

            DomainParams::new(curve, base, n).expect("derived base point is valid")
        })
    }
}

fn parse_hex(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 16).expect("valid hex literal")
}
