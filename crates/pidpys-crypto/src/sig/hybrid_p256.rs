//! Hybrid signature variant: ECDSA P-256 + ML-DSA-44 + SHA-256
//!
//! Mirrors the DSTU hybrid with a mainstream classical component. ECDSA
//! signing is deterministic (RFC 6979), so only ML-DSA consumes randomness
//! at signing time. Both component signatures travel hex-encoded in the
//! JSON envelope.

use chrono::Utc;
use p256::ecdsa::{SigningKey, VerifyingKey};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};
use crate::hash::sha_256;
use crate::sig::{ecdsa, mldsa};

/// Algorithm label carried by this variant's signatures
pub const HYBRID_P256_ALGORITHM: &str = "ECDSA-P256 + ML-DSA-44 + SHA-256";

/// Keypair for the ECDSA + ML-DSA hybrid
#[derive(Clone)]
pub struct HybridP256KeyPair {
    ecdsa_private: SigningKey,
    ecdsa_public: VerifyingKey,
    mldsa_private: Vec<u8>,
    mldsa_public: Vec<u8>,
}

impl HybridP256KeyPair {
    /// The ECDSA verifying key
    pub fn ecdsa_public(&self) -> &VerifyingKey {
        &self.ecdsa_public
    }

    /// The serialized ML-DSA-44 public key
    pub fn mldsa_public(&self) -> &[u8] {
        &self.mldsa_public
    }
}

/// Signature produced by the ECDSA + ML-DSA hybrid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridP256Signature {
    /// ECDSA component, 64 bytes r || s
    pub ecdsa: Vec<u8>,
    /// ML-DSA-44 component
    pub mldsa: Vec<u8>,
    /// Hex SHA-256 digest of the payload; informational only
    pub data_hash_sha256: String,
    /// RFC 3339 signing timestamp
    pub timestamp: String,
    /// Algorithm label, normally [`HYBRID_P256_ALGORITHM`]
    pub algorithm: String,
}

/// The ECDSA + ML-DSA hybrid scheme
#[derive(Debug, Default, Clone, Copy)]
pub struct HybridP256Scheme;

impl HybridP256Scheme {
    /// Create the scheme
    pub fn new() -> Self {
        Self
    }

    /// Generate a hybrid keypair
    pub fn generate_keypair<R: CryptoRngCore>(&self, rng: &mut R) -> Result<HybridP256KeyPair> {
        let (ecdsa_private, ecdsa_public) = ecdsa::generate_keypair(rng);
        let (mldsa_private, mldsa_public) = mldsa::generate_keypair()?;
        Ok(HybridP256KeyPair {
            ecdsa_private,
            ecdsa_public,
            mldsa_private,
            mldsa_public,
        })
    }

    /// Sign a message with both components
    pub fn sign(&self, data: &[u8], keypair: &HybridP256KeyPair) -> Result<HybridP256Signature> {
        let ecdsa = ecdsa::sign(data, &keypair.ecdsa_private);
        let mldsa = mldsa::sign(data, &keypair.mldsa_private)?;

        Ok(HybridP256Signature {
            ecdsa,
            mldsa,
            data_hash_sha256: hex::encode(sha_256(data)),
            timestamp: Utc::now().to_rfc3339(),
            algorithm: HYBRID_P256_ALGORITHM.to_string(),
        })
    }

    /// Verify both components; true only when both verify
    pub fn verify(
        &self,
        data: &[u8],
        signature: &HybridP256Signature,
        keypair: &HybridP256KeyPair,
    ) -> bool {
        let ecdsa_valid = ecdsa::verify(data, &signature.ecdsa, &keypair.ecdsa_public);
        let mldsa_valid = mldsa::verify(data, &signature.mldsa, &keypair.mldsa_public);
        ecdsa_valid && mldsa_valid
    }

    /// Export a signature as the JSON envelope
    pub fn export_signature_json(&self, signature: &HybridP256Signature) -> Result<String> {
        let envelope = SignatureEnvelope {
            algorithm: signature.algorithm.clone(),
            timestamp: signature.timestamp.clone(),
            data_hash_sha256: signature.data_hash_sha256.clone(),
            ecdsa_p256: HexComponent {
                signature: hex::encode(&signature.ecdsa),
            },
            mldsa44: HexComponent {
                signature: hex::encode(&signature.mldsa),
            },
        };
        serde_json::to_string_pretty(&envelope).map_err(Into::into)
    }

    /// Import a signature from its JSON envelope
    pub fn import_signature_json(&self, json: &str) -> Result<HybridP256Signature> {
        let envelope: SignatureEnvelope = serde_json::from_str(json)?;
        Ok(HybridP256Signature {
            ecdsa: decode_hex(&envelope.ecdsa_p256.signature)?,
            mldsa: decode_hex(&envelope.mldsa44.signature)?,
            data_hash_sha256: envelope.data_hash_sha256,
            timestamp: envelope.timestamp,
            algorithm: envelope.algorithm,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct SignatureEnvelope {
    algorithm: String,
    timestamp: String,
    data_hash_sha256: String,
    ecdsa_p256: HexComponent,
    mldsa44: HexComponent,
}

#[derive(Serialize, Deserialize)]
struct HexComponent {
    signature: String,
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| CryptoError::Decode(format!("invalid hex signature: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn test_sign_verify_roundtrip() {
        let scheme = HybridP256Scheme::new();
        let keypair = scheme.generate_keypair(&mut OsRng).unwrap();

        let signature = scheme.sign(b"hybrid p256", &keypair).unwrap();
        assert!(scheme.verify(b"hybrid p256", &signature, &keypair));
        assert!(!scheme.verify(b"hybrid P256", &signature, &keypair));
    }

    #[test]
    fn test_single_component_failure_fails_the_hybrid() {
        let scheme = HybridP256Scheme::new();
        let keypair = scheme.generate_keypair(&mut OsRng).unwrap();
        let signature = scheme.sign(b"message", &keypair).unwrap();

        let mut broken_ecdsa = signature.clone();
        broken_ecdsa.ecdsa[5] ^= 0x01;
        assert!(!scheme.verify(b"message", &broken_ecdsa, &keypair));

        let mut broken_mldsa = signature.clone();
        broken_mldsa.mldsa[5] ^= 0x01;
        assert!(!scheme.verify(b"message", &broken_mldsa, &keypair));
    }

    #[test]
    fn test_json_roundtrip_is_byte_identical() {
        let scheme = HybridP256Scheme::new();
        let keypair = scheme.generate_keypair(&mut OsRng).unwrap();
        let signature = scheme.sign(b"envelope", &keypair).unwrap();

        let json = scheme.export_signature_json(&signature).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"], HYBRID_P256_ALGORITHM);
        assert!(value["ecdsa_p256"]["signature"].is_string());
        assert_eq!(
            value["data_hash_sha256"].as_str().unwrap(),
            hex::encode(sha_256(b"envelope"))
        );

        let restored = scheme.import_signature_json(&json).unwrap();
        assert_eq!(restored, signature);
        assert!(scheme.verify(b"envelope", &restored, &keypair));
    }
}
