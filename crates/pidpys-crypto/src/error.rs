//! Error types for cryptographic operations

use thiserror::Error;

/// Result type alias using CryptoError
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur during cryptographic operations
///
/// Verification failures are deliberately *not* represented here: a signature
/// that does not verify is reported as boolean `false` so that callers cannot
/// distinguish a forgery from a malformed-but-plausible signature through the
/// error taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid input in the mathematical domain (zero inverse, bad curve
    /// coefficients, field degree out of range, inconsistent polynomial)
    #[error("invalid domain parameter: {0}")]
    Domain(String),

    /// Malformed serialized material: wrong length, not on the curve,
    /// undecodable point, bad hex/base64
    #[error("malformed encoding: {0}")]
    Decode(String),

    /// Random-point or base-point search exceeded its retry cap
    #[error("point generation failed: {0}")]
    Generation(String),

    /// Signature generation exceeded its nonce retry cap
    #[error("signature generation exhausted: {0}")]
    Exhausted(String),

    /// The external post-quantum backend failed unexpectedly
    #[error("ML-DSA backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CryptoError {
    fn from(e: serde_json::Error) -> Self {
        CryptoError::Serialization(e.to_string())
    }
}

impl From<bincode::Error> for CryptoError {
    fn from(e: bincode::Error) -> Self {
        CryptoError::Serialization(e.to_string())
    }
}
