//! ECDSA over NIST P-256 (RFC 6979 deterministic signing)
//!
//! Binding over the `p256` crate for the classical half of the ECDSA hybrid
//! variant. Signatures use the 64-byte fixed-width r || s form; public keys
//! use SEC1 encoding.

use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::CryptoRngCore;

use crate::error::{CryptoError, Result};

/// Fixed signature length: 32-byte r plus 32-byte s
pub const SIGNATURE_LEN: usize = 64;

/// Generate an ECDSA P-256 keypair
pub fn generate_keypair<R: CryptoRngCore>(rng: &mut R) -> (SigningKey, VerifyingKey) {
    let private = SigningKey::random(rng);
    let public = VerifyingKey::from(&private);
    (private, public)
}

/// Sign a message; the nonce is derived per RFC 6979, so the signature is
/// deterministic for a given key and message
pub fn sign(message: &[u8], key: &SigningKey) -> Vec<u8> {
    let signature: Signature = key.sign(message);
    signature.to_bytes().to_vec()
}

/// Verify a 64-byte signature; malformed input yields `false`
pub fn verify(message: &[u8], signature: &[u8], key: &VerifyingKey) -> bool {
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    key.verify(message, &signature).is_ok()
}

/// SEC1 uncompressed encoding of a public key (65 bytes)
pub fn public_key_to_bytes(key: &VerifyingKey) -> Vec<u8> {
    key.to_encoded_point(false).as_bytes().to_vec()
}

/// Parse a SEC1-encoded public key
pub fn public_key_from_bytes(bytes: &[u8]) -> Result<VerifyingKey> {
    VerifyingKey::from_sec1_bytes(bytes)
        .map_err(|e| CryptoError::Decode(format!("invalid P-256 public key: {e}")))
}

/// Raw 32-byte scalar encoding of a private key
pub fn private_key_to_bytes(key: &SigningKey) -> Vec<u8> {
    key.to_bytes().to_vec()
}

/// Parse a 32-byte private key scalar
pub fn private_key_from_bytes(bytes: &[u8]) -> Result<SigningKey> {
    SigningKey::from_slice(bytes)
        .map_err(|e| CryptoError::Decode(format!("invalid P-256 private key: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn test_sign_verify_roundtrip() {
        let (private, public) = generate_keypair(&mut OsRng);
        let message = b"classical component";
        let signature = sign(message, &private);
        assert_eq!(signature.len(), SIGNATURE_LEN);
        assert!(verify(message, &signature, &public));
        assert!(!verify(b"other message", &signature, &public));
    }

    #[test]
    fn test_signing_is_deterministic() {
        // RFC 6979 removes the nonce as a source of variation
        let (private, _) = generate_keypair(&mut OsRng);
        assert_eq!(sign(b"msg", &private), sign(b"msg", &private));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let (private, public) = generate_keypair(&mut OsRng);
        let mut signature = sign(b"msg", &private);
        signature[10] ^= 0x80;
        assert!(!verify(b"msg", &signature, &public));
        assert!(!verify(b"msg", &signature[..SIGNATURE_LEN - 1], &public));
    }

    #[test]
    fn test_key_serialization_roundtrip() {
        let (private, public) = generate_keypair(&mut OsRng);

        let private_bytes = private_key_to_bytes(&private);
        assert_eq!(private_bytes.len(), 32);
        let restored_private = private_key_from_bytes(&private_bytes).unwrap();
        assert_eq!(sign(b"m", &restored_private), sign(b"m", &private));

        let public_bytes = public_key_to_bytes(&public);
        assert_eq!(public_bytes.len(), 65);
        let restored_public = public_key_from_bytes(&public_bytes).unwrap();
        assert_eq!(restored_public, public);

        assert!(public_key_from_bytes(&public_bytes[..10]).is_err());
        assert!(private_key_from_bytes(&[0u8; 4]).is_err());
    }
}
