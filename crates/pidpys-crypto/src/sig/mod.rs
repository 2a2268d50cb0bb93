//! Digital signature schemes
//!
//! DSTU 4145-2002 (the from-scratch classical core), the ML-DSA-44 and
//! ECDSA P-256 bindings, and the two hybrid envelopes built on top of them.

pub mod dstu;
pub mod ecdsa;
pub mod hybrid;
pub mod hybrid_p256;
pub mod mldsa;

pub use dstu::{Dstu4145, DstuPrivateKey, DstuSignature};
pub use hybrid::{HybridKeyPair, HybridScheme, HybridSignature, HybridVerification};
pub use hybrid_p256::{HybridP256KeyPair, HybridP256Scheme, HybridP256Signature};
