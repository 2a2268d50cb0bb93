//! Arithmetic in the binary extension fields GF(2^m)
//!
//! Elements are polynomials of degree < m over GF(2) in polynomial basis,
//! packed little-endian into `u64` limbs (coefficient i lives at bit i).
//! A field is described by an immutable, cheaply cloneable [`Gf2m`] handle;
//! all operations are methods on the handle so that elements stay plain
//! value types.
//!
//! Reduction is performed against a sparse irreducible polynomial, either a
//! trinomial or a pentanomial, as fixed by DSTU 4145-2002 for each supported
//! degree.

pub mod params;

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

use crate::error::{CryptoError, Result};
pub use params::{field_163, field_173, field_257, standard_field, ReductionPoly};

/// Lowest permitted field degree
pub const MIN_DEGREE: u32 = 163;
/// Highest permitted field degree
pub const MAX_DEGREE: u32 = 509;

/// An element of GF(2^m) in canonical form (no bits at positions >= m)
///
/// Elements do not carry a reference to their field; arithmetic goes through
/// the owning [`Gf2m`] handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldElement {
    limbs: Vec<u64>,
}

impl FieldElement {
    /// True if this is the additive identity
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&w| w == 0)
    }

    /// Coefficient at position `i` (false for positions beyond the limbs)
    pub fn bit(&self, i: u32) -> bool {
        let word = (i / 64) as usize;
        match self.limbs.get(word) {
            Some(w) => (w >> (i % 64)) & 1 == 1,
            None => false,
        }
    }

    pub(crate) fn set_bit(&mut self, i: u32, value: bool) {
        let word = (i / 64) as usize;
        let mask = 1u64 << (i % 64);
        if value {
            self.limbs[word] |= mask;
        } else {
            self.limbs[word] &= !mask;
        }
    }
}

/// Solutions of the quadratic equation z^2 + u*z + w = 0 over GF(2^m)
///
/// When two solutions exist the carried root is one of them; the other is
/// the root plus `u`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuadraticRoots {
    /// The equation has no solution in the field
    None,
    /// Exactly one solution (the unique square root when u = 0)
    One(FieldElement),
    /// Two solutions; the second is the carried root plus u
    Two(FieldElement),
}

impl QuadraticRoots {
    /// Number of solutions: 0, 1 or 2
    pub fn count(&self) -> usize {
        match self {
            QuadraticRoots::None => 0,
            QuadraticRoots::One(_) => 1,
            QuadraticRoots::Two(_) => 2,
        }
    }

    /// One solution, if any exists
    pub fn root(&self) -> Option<&FieldElement> {
        match self {
            QuadraticRoots::None => None,
            QuadraticRoots::One(z) | QuadraticRoots::Two(z) => Some(z),
        }
    }
}

#[derive(Debug)]
struct FieldInner {
    m: u32,
    poly: ReductionPoly,
    words: usize,
    top_mask: u64,
    /// f(t) - t^m, i.e. the terms folded back in when the leading bit
    /// overflows during multiplication
    tail: Vec<u64>,
}

/// Immutable descriptor of a binary field GF(2^m)
///
/// Cloning is cheap (shared inner); instances may be used freely across
/// threads.
#[derive(Debug, Clone)]
pub struct Gf2m {
    inner: Arc<FieldInner>,
}

impl Gf2m {
    /// Construct a field from its degree and reduction polynomial
    ///
    /// The degree must be odd and within [163, 509]; the polynomial exponents
    /// must satisfy m > k (> j > l) > 0. Violations produce
    /// [`CryptoError::Domain`].
    pub fn new(m: u32, poly: ReductionPoly) -> Result<Self> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&m) {
            return Err(CryptoError::Domain(format!(
                "field degree m={m} outside the allowed range [{MIN_DEGREE}, {MAX_DEGREE}]"
            )));
        }
        if m % 2 == 0 {
            return Err(CryptoError::Domain(format!(
                "field degree m={m} must be odd"
            )));
        }
        let exps = poly.exponents();
        let descending = exps.windows(2).all(|w| w[0] > w[1]);
        let bounded = exps.iter().all(|&e| e > 0 && e < m);
        if !descending || !bounded {
            return Err(CryptoError::Domain(format!(
                "reduction polynomial exponents {exps:?} are inconsistent for m={m}"
            )));
        }

        let words = ((m as usize) + 63) / 64;
        let top_mask = match m % 64 {
            0 => u64::MAX,
            r => (1u64 << r) - 1,
        };
        let mut tail = vec![0u64; words];
        tail[0] |= 1;
        for e in exps {
            tail[(e / 64) as usize] |= 1u64 << (e % 64);
        }

        Ok(Self {
            inner: Arc::new(FieldInner {
                m,
                poly,
                words,
                top_mask,
                tail,
            }),
        })
    }

    /// Field degree m
    pub fn m(&self) -> u32 {
        self.inner.m
    }

    /// The reduction polynomial
    pub fn poly(&self) -> ReductionPoly {
        self.inner.poly
    }

    /// Bytes needed for one serialized element
    pub fn byte_len(&self) -> usize {
        ((self.inner.m as usize) + 7) / 8
    }

    /// True when both handles share the same underlying descriptor
    pub fn same_instance(&self, other: &Gf2m) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The additive identity
    pub fn zero(&self) -> FieldElement {
        FieldElement {
            limbs: vec![0; self.inner.words],
        }
    }

    /// The multiplicative identity
    pub fn one(&self) -> FieldElement {
        let mut limbs = vec![0; self.inner.words];
        limbs[0] = 1;
        FieldElement { limbs }
    }

    /// Build an element from a non-negative integer; bits at positions >= m
    /// are discarded
    pub fn elem_from_int(&self, value: &BigUint) -> FieldElement {
        let mut limbs = vec![0u64; self.inner.words];
        for (i, digit) in value.iter_u64_digits().enumerate() {
            if i >= self.inner.words {
                break;
            }
            limbs[i] = digit;
        }
        let mut elem = FieldElement { limbs };
        self.mask(&mut elem);
        elem
    }

    /// Integer value of an element
    pub fn elem_to_int(&self, a: &FieldElement) -> BigUint {
        let mut bytes = Vec::with_capacity(self.inner.words * 8);
        for w in &a.limbs {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        BigUint::from_bytes_le(&bytes)
    }

    /// Build an element from big-endian bytes (any length); the value is
    /// reduced to m bits like [`elem_from_int`](Self::elem_from_int)
    pub fn elem_from_bytes(&self, data: &[u8]) -> FieldElement {
        self.elem_from_int(&BigUint::from_bytes_be(data))
    }

    /// Serialize an element to exactly `byte_len()` big-endian bytes
    pub fn elem_to_bytes(&self, a: &FieldElement) -> Vec<u8> {
        let raw = self.elem_to_int(a).to_bytes_be();
        let len = self.byte_len();
        let mut out = vec![0u8; len - raw.len()];
        out.extend_from_slice(&raw);
        out
    }

    /// Uniformly random element drawn from the supplied source
    pub fn random_element<R: RngCore + CryptoRng>(&self, rng: &mut R) -> FieldElement {
        let mut limbs = vec![0u64; self.inner.words];
        for w in limbs.iter_mut() {
            *w = rng.next_u64();
        }
        let mut elem = FieldElement { limbs };
        self.mask(&mut elem);
        elem
    }

    fn mask(&self, a: &mut FieldElement) {
        let last = self.inner.words - 1;
        a.limbs[last] &= self.inner.top_mask;
    }

    /// Addition: bitwise XOR, the only addition in characteristic 2
    pub fn add(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        debug_assert_eq!(a.limbs.len(), self.inner.words);
        debug_assert_eq!(b.limbs.len(), self.inner.words);
        let limbs = a
            .limbs
            .iter()
            .zip(&b.limbs)
            .map(|(x, y)| x ^ y)
            .collect();
        FieldElement { limbs }
    }

    /// Polynomial product modulo the reduction polynomial
    ///
    /// Shift-and-XOR over the m coefficient positions of `a`; every overflow
    /// out of position m - 1 is folded back through f(t) - t^m.
    pub fn mul(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        debug_assert_eq!(a.limbs.len(), self.inner.words);
        debug_assert_eq!(b.limbs.len(), self.inner.words);
        let m = self.inner.m;
        let mut acc = vec![0u64; self.inner.words];
        let mut shifted = b.limbs.clone();

        for i in 0..m {
            if a.bit(i) {
                xor_into(&mut acc, &shifted);
            }
            shl1_in_place(&mut shifted);
            if get_bit(&shifted, m) {
                clear_bit(&mut shifted, m);
                xor_into(&mut shifted, &self.inner.tail);
            }
        }

        FieldElement { limbs: acc }
    }

    /// Squaring; in characteristic 2 this equals `mul(a, a)`
    pub fn square(&self, a: &FieldElement) -> FieldElement {
        self.mul(a, a)
    }

    /// Exponentiation by square-and-multiply; a^0 = 1 by convention
    pub fn pow(&self, a: &FieldElement, e: &BigUint) -> FieldElement {
        if e.is_zero() {
            return self.one();
        }
        let mut result = self.one();
        let mut base = a.clone();
        let bits = e.bits();
        for i in 0..bits {
            if e.bit(i) {
                result = self.mul(&result, &base);
            }
            if i + 1 < bits {
                base = self.square(&base);
            }
        }
        result
    }

    /// Multiplicative inverse via the binary extended Euclidean algorithm
    /// on GF(2)[t]
    ///
    /// Fails with [`CryptoError::Domain`] when `a` is zero.
    pub fn inverse(&self, a: &FieldElement) -> Result<FieldElement> {
        if a.is_zero() {
            return Err(CryptoError::Domain(
                "the zero element has no multiplicative inverse".into(),
            ));
        }

        let words = self.inner.words;
        let mut u = a.limbs.clone();
        let mut v = self.inner.tail.clone();
        set_bit(&mut v, self.inner.m);
        let mut g1 = vec![0u64; words];
        g1[0] = 1;
        let mut g2 = vec![0u64; words];

        // Invariant: g1 * a == u and g2 * a == v (mod f). One of u, v reaches
        // 1 because gcd(a, f) = 1 for any irreducible f, and the matching
        // accumulator then holds the inverse with degree < m.
        while !is_one(&u) && !is_one(&v) {
            let du = degree(&u).expect("u stays non-zero while the gcd is 1");
            let dv = degree(&v).expect("v stays non-zero while the gcd is 1");
            let mut j = du as i64 - dv as i64;
            if j < 0 {
                std::mem::swap(&mut u, &mut v);
                std::mem::swap(&mut g1, &mut g2);
                j = -j;
            }
            xor_shifted(&mut u, &v, j as u32);
            xor_shifted(&mut g1, &g2, j as u32);
        }

        let limbs = if is_one(&u) { g1 } else { g2 };
        Ok(FieldElement { limbs })
    }

    /// Square root, i.e. a^(2^(m-1)); every element of GF(2^m) has exactly
    /// one
    pub fn sqrt(&self, a: &FieldElement) -> FieldElement {
        let mut result = a.clone();
        for _ in 0..self.inner.m - 1 {
            result = self.square(&result);
        }
        result
    }

    /// Absolute trace Tr(a) = a + a^2 + a^4 + ... + a^(2^(m-1)), always 0
    /// or 1
    pub fn trace(&self, a: &FieldElement) -> u8 {
        let mut result = a.clone();
        let mut term = a.clone();
        for _ in 0..self.inner.m - 1 {
            term = self.square(&term);
            result = self.add(&result, &term);
        }
        debug_assert!(result.is_zero() || result == self.one());
        u8::from(!result.is_zero())
    }

    /// Half-trace h(a) = a + a^4 + a^16 + ... + a^(2^(m-1)) for odd m
    ///
    /// Satisfies h(a)^2 + h(a) = a + Tr(a).
    pub fn half_trace(&self, a: &FieldElement) -> FieldElement {
        let mut result = a.clone();
        let mut term = a.clone();
        for _ in 0..(self.inner.m - 1) / 2 {
            term = self.square(&self.square(&term));
            result = self.add(&result, &term);
        }
        result
    }

    /// Solve z^2 + u*z + w = 0
    ///
    /// Case analysis:
    /// - u = 0, w = 0: two solutions, z = 0
    /// - u = 0, w != 0: the unique square root of w
    /// - u != 0: with v = w / u^2, solvable iff Tr(v) = 0, and then
    ///   z = u * h(v) with second solution z + u
    pub fn solve_quadratic(&self, u: &FieldElement, w: &FieldElement) -> QuadraticRoots {
        if u.is_zero() {
            if w.is_zero() {
                return QuadraticRoots::Two(self.zero());
            }
            return QuadraticRoots::One(self.sqrt(w));
        }
        if w.is_zero() {
            // z = 0 and z = u
            return QuadraticRoots::Two(self.zero());
        }

        let u_sq_inv = self
            .inverse(&self.square(u))
            .expect("u is non-zero, so u^2 is invertible");
        let v = self.mul(w, &u_sq_inv);
        if self.trace(&v) != 0 {
            return QuadraticRoots::None;
        }
        let z = self.mul(&self.half_trace(&v), u);
        QuadraticRoots::Two(z)
    }
}

fn xor_into(dst: &mut [u64], src: &[u64]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

fn shl1_in_place(limbs: &mut [u64]) {
    for i in (1..limbs.len()).rev() {
        limbs[i] = (limbs[i] << 1) | (limbs[i - 1] >> 63);
    }
    limbs[0] <<= 1;
}

fn get_bit(limbs: &[u64], i: u32) -> bool {
    (limbs[(i / 64) as usize] >> (i % 64)) & 1 == 1
}

fn set_bit(limbs: &mut [u64], i: u32) {
    limbs[(i / 64) as usize] |= 1u64 << (i % 64);
}

fn clear_bit(limbs: &mut [u64], i: u32) {
    limbs[(i / 64) as usize] &= !(1u64 << (i % 64));
}

fn is_one(limbs: &[u64]) -> bool {
    limbs[0] == 1 && limbs[1..].iter().all(|&w| w == 0)
}

/// Degree of the highest set bit, or None for the zero polynomial
fn degree(limbs: &[u64]) -> Option<u32> {
    for (i, &w) in limbs.iter().enumerate().rev() {
        if w != 0 {
            return Some(i as u32 * 64 + 63 - w.leading_zeros());
        }
    }
    None
}

/// dst ^= src << j, assuming the result still fits the limb count
fn xor_shifted(dst: &mut [u64], src: &[u64], j: u32) {
    let words = (j / 64) as usize;
    let bits = j % 64;
    for i in (words..dst.len()).rev() {
        let mut v = src[i - words] << bits;
        if bits > 0 && i - words > 0 {
            v |= src[i - words - 1] >> (64 - bits);
        }
        dst[i] ^= v;
    }
}
