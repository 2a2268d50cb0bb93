//! # Pidpys Cryptography Library
//!
//! This crate implements a hybrid digital signature scheme that pairs the
//! Ukrainian national standard DSTU 4145-2002 (elliptic curves over binary
//! fields, Kupyna-256 hashing) with the post-quantum ML-DSA-44 (FIPS 204).
//! A message is signed by both components independently; the hybrid verifies
//! only when both component signatures verify.
//!
//! ## Features
//!
//! - **GF(2^m) arithmetic**: packed polynomial-basis fields with trinomial
//!   and pentanomial reduction, trace/half-trace and quadratic solving
//! - **Binary elliptic curves**: affine group law, point compression,
//!   standard-conformant random-point and base-point generation
//! - **Hybrid envelopes**: DSTU + ML-DSA (Kupyna-256) and an ECDSA P-256
//!   + ML-DSA variant (SHA-256, RFC 6979), with JSON serialization
//! - **Memory hygiene**: private scalars and post-quantum secrets are
//!   zeroized on drop
//!
//! Signing and key generation take the randomness source as an explicit
//! parameter, so deterministic generators can be injected for reproducible
//! fixtures while production callers pass an OS source.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod curve;
pub mod error;
pub mod field;
pub mod hash;
pub mod sig;

// Re-export commonly used types
pub use curve::{Curve, DomainParams, Point};
pub use error::{CryptoError, Result};
pub use field::{FieldElement, Gf2m, QuadraticRoots, ReductionPoly};
pub use sig::{
    Dstu4145, DstuPrivateKey, DstuSignature, HybridKeyPair, HybridP256Scheme, HybridScheme,
    HybridSignature, HybridVerification,
};

/// Library version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
