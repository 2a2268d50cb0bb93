//! Reduction polynomials and the standard field instances
//!
//! DSTU 4145-2002 table 1 fixes one irreducible polynomial per field degree.
//! The three degrees exercised by this crate are 163, 173 and 257; arbitrary
//! odd degrees in the allowed range can still be constructed directly through
//! [`Gf2m::new`](super::Gf2m::new).

use std::sync::OnceLock;

use super::Gf2m;

/// Shape of the irreducible reduction polynomial f(t)
///
/// Only sparse polynomials are used: a trinomial t^m + t^k + 1 or a
/// pentanomial t^m + t^k + t^j + t^l + 1 with m > k > j > l > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionPoly {
    /// t^m + t^k + 1
    Trinomial {
        /// Exponent of the middle term
        k: u32,
    },
    /// t^m + t^k + t^j + t^l + 1
    Pentanomial {
        /// Exponent of the highest non-leading term
        k: u32,
        /// Exponent of the second term
        j: u32,
        /// Exponent of the third term
        l: u32,
    },
}

impl ReductionPoly {
    /// Exponents of the non-leading, non-constant terms, highest first
    pub(crate) fn exponents(&self) -> Vec<u32> {
        match *self {
            ReductionPoly::Trinomial { k } => vec![k],
            ReductionPoly::Pentanomial { k, j, l } => vec![k, j, l],
        }
    }
}

static FIELD_163: OnceLock<Gf2m> = OnceLock::new();
static FIELD_173: OnceLock<Gf2m> = OnceLock::new();
static FIELD_257: OnceLock<Gf2m> = OnceLock::new();

/// GF(2^163) with f(t) = t^163 + t^7 + t^6 + t^3 + 1
pub fn field_163() -> Gf2m {
    FIELD_163
        .get_or_init(|| {
            Gf2m::new(163, ReductionPoly::Pentanomial { k: 7, j: 6, l: 3 })
                .expect("standard field parameters are valid")
        })
        .clone()
}

/// GF(2^173) with f(t) = t^173 + t^10 + t^2 + t + 1
pub fn field_173() -> Gf2m {
    FIELD_173
        .get_or_init(|| {
            Gf2m::new(173, ReductionPoly::Pentanomial { k: 10, j: 2, l: 1 })
                .expect("standard field parameters are valid")
        })
        .clone()
}

/// GF(2^257) with f(t) = t^257 + t^12 + 1
pub fn field_257() -> Gf2m {
    FIELD_257
        .get_or_init(|| {
            Gf2m::new(257, ReductionPoly::Trinomial { k: 12 })
                .expect("standard field parameters are valid")
        })
        .clone()
}

/// Look up a standard field by degree
///
/// Returns `None` for degrees outside the fixed table.
pub fn standard_field(m: u32) -> Option<Gf2m> {
    match m {
        163 => Some(field_163()),
        173 => Some(field_173()),
        257 => Some(field_257()),
        _ => None,
    }
}
