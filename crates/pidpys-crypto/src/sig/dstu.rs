//! DSTU 4145-2002 digital signatures
//!
//! Key generation, signing and verification over a [`DomainParams`] set,
//! plus the fixed-width byte serialization of signatures and public keys.
//! Message digests are computed with Kupyna-256.

use std::fmt;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::curve::{DomainParams, Point};
use crate::error::{CryptoError, Result};
use crate::field::FieldElement;
use crate::hash::kupyna_256;

/// Retry cap for the ephemeral-nonce loop; in practice the first iteration
/// succeeds with overwhelming probability
const NONCE_ATTEMPTS: usize = 1000;

/// A DSTU 4145 private key: a scalar d with 0 < d < n
///
/// The scalar is dropped (and its container released) on zeroize; callers
/// should avoid copying it out of this wrapper.
#[derive(Clone, Serialize, Deserialize)]
pub struct DstuPrivateKey {
    d: BigUint,
}

impl DstuPrivateKey {
    /// Wrap a raw scalar; range validation against n happens at use time
    pub fn from_scalar(d: BigUint) -> Self {
        Self { d }
    }

    /// The raw private scalar
    pub fn scalar(&self) -> &BigUint {
        &self.d
    }
}

impl Zeroize for DstuPrivateKey {
    fn zeroize(&mut self) {
        // BigUint offers no in-place wipe of its allocation; replacing the
        // value releases the old limbs without copying them anywhere new
        self.d = BigUint::zero();
    }
}

impl Drop for DstuPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for DstuPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DstuPrivateKey(<redacted>)")
    }
}

/// A DSTU 4145 signature: the scalar pair (r, s)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstuSignature {
    r: BigUint,
    s: BigUint,
}

impl DstuSignature {
    /// Assemble a signature from its scalars
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// The r component
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The s component
    pub fn s(&self) -> &BigUint {
        &self.s
    }
}

/// The DSTU 4145-2002 signature scheme over a fixed parameter set
#[derive(Debug, Clone)]
pub struct Dstu4145 {
    params: DomainParams,
}

impl Dstu4145 {
    /// Build a scheme over arbitrary (pre-validated) domain parameters
    pub fn new(params: DomainParams) -> Self {
        Self { params }
    }

    /// The scheme over the 163-bit standard parameter set
    pub fn m163() -> Self {
        Self::new(DomainParams::m163().clone())
    }

    /// The scheme over the 257-bit standard parameter set
    pub fn m257() -> Self {
        Self::new(DomainParams::m257().clone())
    }

    /// The domain parameters in use
    pub fn params(&self) -> &DomainParams {
        &self.params
    }

    /// Digest a message with Kupyna-256 and load it as a field element
    ///
    /// A zero digest is replaced by the field one, since h = 0 would erase
    /// the x coordinate from the signature equation.
    pub fn hash_to_field(&self, data: &[u8]) -> FieldElement {
        let field = self.params.field();
        let element = field.elem_from_bytes(&kupyna_256(data));
        if element.is_zero() {
            field.one()
        } else {
            element
        }
    }

    /// Field element to signature scalar: keep the low bitlen(n) - 1 bits
    fn truncate_to_scalar(&self, y: &FieldElement) -> BigUint {
        let value = self.params.field().elem_to_int(y);
        let keep = self.params.order().bits() - 1;
        value & ((BigUint::one() << keep) - BigUint::one())
    }

    /// Generate a keypair: d uniform in {1, ..., n-1}, Q = d*P
    pub fn generate_keypair<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<(DstuPrivateKey, Point)> {
        let n = self.params.order();
        let d = loop {
            let candidate = rng.gen_biguint_below(n);
            if !candidate.is_zero() {
                break candidate;
            }
        };

        let public = self.params.curve().mul(&d, self.params.base());
        if public.is_infinity() {
            return Err(CryptoError::Generation(
                "degenerate public key: d*P is the point at infinity".into(),
            ));
        }
        debug!(m = self.params.field().m(), "DSTU keypair generated");
        Ok((DstuPrivateKey::from_scalar(d), public))
    }

    /// Sign a message
    ///
    /// Draws a fresh ephemeral nonce per attempt and retries on the
    /// probability-zero degenerate cases; fails with
    /// [`CryptoError::Exhausted`] if the cap is ever reached.
    pub fn sign<R: RngCore + CryptoRng>(
        &self,
        data: &[u8],
        key: &DstuPrivateKey,
        rng: &mut R,
    ) -> Result<DstuSignature> {
        let n = self.params.order();
        if key.d.is_zero() || &key.d >= n {
            return Err(CryptoError::Domain(
                "private key scalar out of range (0, n)".into(),
            ));
        }

        let h = self.hash_to_field(data);
        let field = self.params.field();
        let curve = self.params.curve();

        for attempt in 0..NONCE_ATTEMPTS {
            let e = rng.gen_biguint_below(n);
            if e.is_zero() {
                continue;
            }

            let ephemeral = curve.mul(&e, self.params.base());
            let Some(x_r) = ephemeral.x() else {
                trace!(attempt, "ephemeral point degenerated to O, retrying");
                continue;
            };

            let y = field.mul(&h, x_r);
            let r = self.truncate_to_scalar(&y);
            if r.is_zero() {
                trace!(attempt, "r collapsed to zero, retrying");
                continue;
            }

            let dr = (&key.d * &r) % n;
            let s = ((&e + n) - dr) % n;
            if s.is_zero() {
                trace!(attempt, "s collapsed to zero, retrying");
                continue;
            }

            return Ok(DstuSignature { r, s });
        }

        Err(CryptoError::Exhausted(format!(
            "no valid nonce in {NONCE_ATTEMPTS} attempts"
        )))
    }

    /// Verify a signature against a public key
    ///
    /// All failure modes, including malformed public keys and out-of-range
    /// scalars, are reported as `false`.
    pub fn verify(&self, data: &[u8], signature: &DstuSignature, public_key: &Point) -> bool {
        let n = self.params.order();
        if signature.r.is_zero() || &signature.r >= n {
            return false;
        }
        if signature.s.is_zero() || &signature.s >= n {
            return false;
        }
        if public_key.is_infinity() || !self.params.curve().contains(public_key) {
            return false;
        }

        let h = self.hash_to_field(data);
        let curve = self.params.curve();

        let sp = curve.mul(&signature.s, self.params.base());
        let rq = curve.mul(&signature.r, public_key);
        let ephemeral = curve.add(&sp, &rq);
        let Some(x_r) = ephemeral.x() else {
            return false;
        };

        let y = self.params.field().mul(&h, x_r);
        let r_prime = self.truncate_to_scalar(&y);

        // Fixed-width compare so the result does not leak which bytes differ
        let len = self.params.scalar_byte_len();
        let (Ok(expected), Ok(actual)) = (
            fixed_width_be(&signature.r, len),
            fixed_width_be(&r_prime, len),
        ) else {
            return false;
        };
        bool::from(expected.ct_eq(&actual))
    }

    /// Serialize a signature as r || s, each `scalar_byte_len()` bytes
    /// big-endian
    pub fn export_signature(&self, signature: &DstuSignature) -> Result<Vec<u8>> {
        let len = self.params.scalar_byte_len();
        let mut out = fixed_width_be(&signature.r, len)?;
        out.extend(fixed_width_be(&signature.s, len)?);
        Ok(out)
    }

    /// Parse a signature serialized by [`export_signature`](Self::export_signature)
    pub fn import_signature(&self, bytes: &[u8]) -> Result<DstuSignature> {
        let len = self.params.scalar_byte_len();
        if bytes.len() != 2 * len {
            return Err(CryptoError::Decode(format!(
                "signature must be {} bytes, got {}",
                2 * len,
                bytes.len()
            )));
        }
        Ok(DstuSignature {
            r: BigUint::from_bytes_be(&bytes[..len]),
            s: BigUint::from_bytes_be(&bytes[len..]),
        })
    }

    /// Serialize a public key as x || y, each `coordinate_byte_len()` bytes
    /// big-endian; the point at infinity has no encoding
    pub fn export_public_key(&self, public_key: &Point) -> Result<Vec<u8>> {
        let field = self.params.field();
        let (Some(x), Some(y)) = (public_key.x(), public_key.y()) else {
            return Err(CryptoError::Domain(
                "the point at infinity cannot be exported".into(),
            ));
        };
        let mut out = field.elem_to_bytes(x);
        out.extend(field.elem_to_bytes(y));
        Ok(out)
    }

    /// Parse and validate a public key serialized by
    /// [`export_public_key`](Self::export_public_key)
    pub fn import_public_key(&self, bytes: &[u8]) -> Result<Point> {
        let len = self.params.coordinate_byte_len();
        if bytes.len() != 2 * len {
            return Err(CryptoError::Decode(format!(
                "public key must be {} bytes, got {}",
                2 * len,
                bytes.len()
            )));
        }

        let field = self.params.field();
        let point = Point::Affine {
            x: field.elem_from_bytes(&bytes[..len]),
            y: field.elem_from_bytes(&bytes[len..]),
        };
        if !self.params.curve().contains(&point) {
            return Err(CryptoError::Decode(
                "imported point does not lie on the curve".into(),
            ));
        }
        Ok(point)
    }
}

/// Big-endian encoding padded to exactly `len` bytes
fn fixed_width_be(value: &BigUint, len: usize) -> Result<Vec<u8>> {
    let raw = value.to_bytes_be();
    if raw.len() > len {
        return Err(CryptoError::Domain(format!(
            "integer needs {} bytes, limit is {len}",
            raw.len()
        )));
    }
    let mut out = vec![0u8; len - raw.len()];
    out.extend_from_slice(&raw);
    Ok(out)
}
