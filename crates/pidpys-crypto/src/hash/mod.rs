//! Cryptographic hash functions
//!
//! Kupyna-256 (DSTU 7564:2014) is used inside the DSTU 4145 signature and
//! for the informational payload digest of the hybrid envelope; SHA-256
//! serves the ECDSA hybrid variant.

pub mod kupyna;
pub mod sha256;

pub use kupyna::{kupyna_256, Kupyna256};
pub use sha256::sha_256;
