//! ML-DSA-44 (FIPS 204) signature binding
//!
//! Thin adapter over the `fips204` backend. Keys and signatures cross this
//! boundary as opaque byte strings; verification never propagates backend
//! failures, it only ever answers `false`.

use fips204::ml_dsa_44::{self, PrivateKey, PublicKey};
use fips204::traits::{SerDes, Signer, Verifier};

use crate::error::{CryptoError, Result};

/// Public key length in bytes
pub const PUBLIC_KEY_LEN: usize = ml_dsa_44::PK_LEN;
/// Private key length in bytes
pub const PRIVATE_KEY_LEN: usize = ml_dsa_44::SK_LEN;
/// Signature length in bytes
pub const SIGNATURE_LEN: usize = ml_dsa_44::SIG_LEN;

/// Canonical algorithm identifier
pub const ALGORITHM: &str = "ML-DSA-44";

/// Identifiers accepted for compatibility with older backend revisions
const KNOWN_IDENTIFIERS: &[&str] = &["ML-DSA-44", "Dilithium2", "ML-DSA-44-ipd"];

/// True if `name` denotes this algorithm under any accepted spelling
pub fn is_known_identifier(name: &str) -> bool {
    KNOWN_IDENTIFIERS.contains(&name)
}

/// Generate a keypair, returned as (private, public) byte strings
pub fn generate_keypair() -> Result<(Vec<u8>, Vec<u8>)> {
    let (pk, sk) = ml_dsa_44::try_keygen()
        .map_err(|e| CryptoError::Backend(format!("ML-DSA-44 keygen failed: {e}")))?;
    Ok((sk.into_bytes().to_vec(), pk.into_bytes().to_vec()))
}

/// Sign a message with a serialized private key
pub fn sign(message: &[u8], private_key: &[u8]) -> Result<Vec<u8>> {
    let bytes: [u8; PRIVATE_KEY_LEN] = private_key.try_into().map_err(|_| {
        CryptoError::Decode(format!(
            "ML-DSA-44 private key must be {PRIVATE_KEY_LEN} bytes, got {}",
            private_key.len()
        ))
    })?;
    let sk = PrivateKey::try_from_bytes(bytes)
        .map_err(|e| CryptoError::Backend(format!("ML-DSA-44 private key rejected: {e}")))?;
    let signature = sk
        .try_sign(message, &[])
        .map_err(|e| CryptoError::Backend(format!("ML-DSA-44 signing failed: {e}")))?;
    Ok(signature.to_vec())
}

/// Verify a signature; any malformed input or backend failure yields `false`
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(pk_bytes) = <[u8; PUBLIC_KEY_LEN]>::try_from(public_key) else {
        return false;
    };
    let Ok(pk) = PublicKey::try_from_bytes(pk_bytes) else {
        return false;
    };
    let Ok(sig) = <[u8; SIGNATURE_LEN]>::try_from(signature) else {
        return false;
    };
    pk.verify(message, &sig, &[])
}
