//! Hybrid signature scheme: DSTU 4145 (GF(2^257)) + ML-DSA-44 + Kupyna-256
//!
//! A message is signed independently by both component schemes; the hybrid
//! verifies only when both components verify. The JSON envelope carries the
//! DSTU scalars as 0x-prefixed hex and the ML-DSA material as base64,
//! together with an informational Kupyna-256 digest of the payload.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, Result};
use crate::hash::kupyna_256;
use crate::sig::dstu::{Dstu4145, DstuPrivateKey, DstuSignature};
use crate::sig::mldsa;

/// Algorithm label carried by hybrid signatures
pub const HYBRID_ALGORITHM: &str = "DSTU-4145 + ML-DSA-44 + Купина-256";

/// Algorithm label carried by serialized keypairs
const KEYPAIR_ALGORITHM: &str = "DSTU-4145 + ML-DSA-44";

/// A hybrid keypair: DSTU 4145 and ML-DSA-44 key material plus metadata
///
/// Private components are zeroized when the pair is dropped.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct HybridKeyPair {
    key_id: String,
    created_at: String,
    dstu_private: DstuPrivateKey,
    dstu_public: Vec<u8>,
    mldsa_private: Vec<u8>,
    mldsa_public: Vec<u8>,
}

impl HybridKeyPair {
    /// Opaque key identifier
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// RFC 3339 creation timestamp
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Serialized DSTU public key (x || y)
    pub fn dstu_public(&self) -> &[u8] {
        &self.dstu_public
    }

    /// Serialized ML-DSA-44 public key
    pub fn mldsa_public(&self) -> &[u8] {
        &self.mldsa_public
    }

    pub(crate) fn dstu_private(&self) -> &DstuPrivateKey {
        &self.dstu_private
    }

    pub(crate) fn mldsa_private(&self) -> &[u8] {
        &self.mldsa_private
    }

    /// Serialize the whole pair (private material included)
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(Into::into)
    }

    /// Restore a pair serialized with [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(Into::into)
    }
}

/// A hybrid signature with its envelope metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridSignature {
    /// DSTU 4145 component
    pub dstu: DstuSignature,
    /// ML-DSA-44 component
    pub mldsa: Vec<u8>,
    /// Algorithm label, normally [`HYBRID_ALGORITHM`]
    pub algorithm: String,
    /// RFC 3339 signing timestamp
    pub timestamp: String,
    /// Hex Kupyna-256 digest of the payload; informational only, it does not
    /// authenticate anything
    pub data_hash_kupyna: String,
}

/// Outcome of hybrid verification with per-component diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridVerification {
    /// The overall verdict: the AND of both components
    pub valid: bool,
    /// DSTU 4145 component verdict
    pub dstu_valid: bool,
    /// ML-DSA-44 component verdict
    pub mldsa_valid: bool,
    /// Component errors that were downgraded to a failed verdict
    pub errors: Vec<String>,
}

/// The hybrid signature scheme
pub struct HybridScheme {
    dstu: Dstu4145,
}

impl HybridScheme {
    /// Hybrid scheme over the standard 257-bit DSTU parameters
    pub fn new() -> Self {
        Self {
            dstu: Dstu4145::m257(),
        }
    }

    /// Hybrid scheme over caller-supplied DSTU parameters
    pub fn with_dstu(dstu: Dstu4145) -> Self {
        Self { dstu }
    }

    /// The DSTU component scheme
    pub fn dstu(&self) -> &Dstu4145 {
        &self.dstu
    }

    /// Generate a hybrid keypair
    ///
    /// `key_id` defaults to a timestamp-derived identifier when not given.
    pub fn generate_keypair<R: RngCore + CryptoRng>(
        &self,
        key_id: Option<String>,
        rng: &mut R,
    ) -> Result<HybridKeyPair> {
        let (dstu_private, dstu_public_point) = self.dstu.generate_keypair(rng)?;
        let dstu_public = self.dstu.export_public_key(&dstu_public_point)?;
        let (mldsa_private, mldsa_public) = mldsa::generate_keypair()?;

        let now = Utc::now();
        let keypair = HybridKeyPair {
            key_id: key_id.unwrap_or_else(|| format!("hybrid-{}", now.format("%Y%m%d%H%M%S"))),
            created_at: now.to_rfc3339(),
            dstu_private,
            dstu_public,
            mldsa_private,
            mldsa_public,
        };
        debug!(key_id = %keypair.key_id, "hybrid keypair generated");
        Ok(keypair)
    }

    /// Sign a message with both components
    pub fn sign<R: RngCore + CryptoRng>(
        &self,
        data: &[u8],
        keypair: &HybridKeyPair,
        rng: &mut R,
    ) -> Result<HybridSignature> {
        let dstu = self.dstu.sign(data, keypair.dstu_private(), rng)?;
        let mldsa = mldsa::sign(data, keypair.mldsa_private())?;

        Ok(HybridSignature {
            dstu,
            mldsa,
            algorithm: HYBRID_ALGORITHM.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            data_hash_kupyna: hex::encode(kupyna_256(data)),
        })
    }

    /// Verify both components; the hybrid verdict is their AND
    ///
    /// Component errors (such as an undecodable public key) are captured in
    /// the returned diagnostics and count as a failed component; they are
    /// never propagated.
    pub fn verify(
        &self,
        data: &[u8],
        signature: &HybridSignature,
        keypair: &HybridKeyPair,
    ) -> HybridVerification {
        let mut result = HybridVerification {
            valid: false,
            dstu_valid: false,
            mldsa_valid: false,
            errors: Vec::new(),
        };

        match self.dstu.import_public_key(keypair.dstu_public()) {
            Ok(public) => {
                result.dstu_valid = self.dstu.verify(data, &signature.dstu, &public);
            }
            Err(e) => result.errors.push(format!("dstu4145: {e}")),
        }

        result.mldsa_valid = mldsa::verify(data, &signature.mldsa, keypair.mldsa_public());

        result.valid = result.dstu_valid && result.mldsa_valid;
        result
    }

    /// Export a signature as the JSON envelope
    pub fn export_signature_json(&self, signature: &HybridSignature) -> Result<String> {
        let envelope = SignatureEnvelope {
            algorithm: signature.algorithm.clone(),
            timestamp: signature.timestamp.clone(),
            data_hash_kupyna: signature.data_hash_kupyna.clone(),
            dstu4145: DstuComponent {
                r: format!("0x{:x}", signature.dstu.r()),
                s: format!("0x{:x}", signature.dstu.s()),
            },
            mldsa44: MlDsaComponent {
                signature: BASE64.encode(&signature.mldsa),
            },
        };
        serde_json::to_string_pretty(&envelope).map_err(Into::into)
    }

    /// Import a signature from its JSON envelope
    pub fn import_signature_json(&self, json: &str) -> Result<HybridSignature> {
        let envelope: SignatureEnvelope = serde_json::from_str(json)?;
        Ok(HybridSignature {
            dstu: DstuSignature::new(
                parse_hex_scalar(&envelope.dstu4145.r)?,
                parse_hex_scalar(&envelope.dstu4145.s)?,
            ),
            mldsa: BASE64
                .decode(&envelope.mldsa44.signature)
                .map_err(|e| CryptoError::Decode(format!("invalid base64 signature: {e}")))?,
            algorithm: envelope.algorithm,
            timestamp: envelope.timestamp,
            data_hash_kupyna: envelope.data_hash_kupyna,
        })
    }

    /// Export a keypair as JSON, optionally including private material
    pub fn export_keypair_json(&self, keypair: &HybridKeyPair, include_private: bool) -> Result<String> {
        let envelope = KeyPairEnvelope {
            key_id: keypair.key_id.clone(),
            created_at: keypair.created_at.clone(),
            algorithm: KEYPAIR_ALGORITHM.to_string(),
            public_keys: KeyComponents {
                dstu4145: BASE64.encode(&keypair.dstu_public),
                mldsa44: BASE64.encode(&keypair.mldsa_public),
            },
            private_keys: include_private.then(|| KeyComponents {
                dstu4145: format!("0x{:x}", keypair.dstu_private.scalar()),
                mldsa44: BASE64.encode(&keypair.mldsa_private),
            }),
        };
        serde_json::to_string_pretty(&envelope).map_err(Into::into)
    }

    /// Import a keypair exported with private material
    ///
    /// The algorithm label must name a recognized ML-DSA identifier; the
    /// aliases of older backend revisions are accepted.
    pub fn import_keypair_json(&self, json: &str) -> Result<HybridKeyPair> {
        let envelope: KeyPairEnvelope = serde_json::from_str(json)?;

        let names_known_mldsa = envelope
            .algorithm
            .split(" + ")
            .any(mldsa::is_known_identifier);
        if !names_known_mldsa {
            return Err(CryptoError::Decode(format!(
                "unrecognized keypair algorithm: {}",
                envelope.algorithm
            )));
        }

        let private_keys = envelope.private_keys.ok_or_else(|| {
            CryptoError::Decode("keypair JSON lacks the private_keys object".into())
        })?;

        Ok(HybridKeyPair {
            key_id: envelope.key_id,
            created_at: envelope.created_at,
            dstu_private: DstuPrivateKey::from_scalar(parse_hex_scalar(&private_keys.dstu4145)?),
            dstu_public: BASE64
                .decode(&envelope.public_keys.dstu4145)
                .map_err(|e| CryptoError::Decode(format!("invalid base64 public key: {e}")))?,
            mldsa_private: BASE64
                .decode(&private_keys.mldsa44)
                .map_err(|e| CryptoError::Decode(format!("invalid base64 private key: {e}")))?,
            mldsa_public: BASE64
                .decode(&envelope.public_keys.mldsa44)
                .map_err(|e| CryptoError::Decode(format!("invalid base64 public key: {e}")))?,
        })
    }
}

impl Default for HybridScheme {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
struct SignatureEnvelope {
    algorithm: String,
    timestamp: String,
    data_hash_kupyna: String,
    dstu4145: DstuComponent,
    mldsa44: MlDsaComponent,
}

#[derive(Serialize, Deserialize)]
struct DstuComponent {
    r: String,
    s: String,
}

#[derive(Serialize, Deserialize)]
struct MlDsaComponent {
    signature: String,
}

#[derive(Serialize, Deserialize)]
struct KeyPairEnvelope {
    key_id: String,
    created_at: String,
    algorithm: String,
    public_keys: KeyComponents,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_keys: Option<KeyComponents>,
}

#[derive(Serialize, Deserialize)]
struct KeyComponents {
    dstu4145: String,
    mldsa44: String,
}

/// Parse an integer written as hex with an optional 0x prefix
fn parse_hex_scalar(text: &str) -> Result<BigUint> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| CryptoError::Decode(format!("invalid hex integer: {text}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_envelope_uses_the_documented_field_names() {
        let mut rng = StdRng::seed_from_u64(61);
        let scheme = HybridScheme::new();
        let keypair = scheme.generate_keypair(None, &mut rng).unwrap();
        let signature = scheme.sign(b"envelope", &keypair, &mut rng).unwrap();

        let json = scheme.export_signature_json(&signature).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["algorithm"], HYBRID_ALGORITHM);
        assert!(value["dstu4145"]["r"].as_str().unwrap().starts_with("0x"));
        assert!(value["dstu4145"]["s"].as_str().unwrap().starts_with("0x"));
        assert!(value["mldsa44"]["signature"].is_string());
        assert_eq!(
            value["data_hash_kupyna"].as_str().unwrap(),
            hex::encode(kupyna_256(b"envelope"))
        );
    }

    #[test]
    fn test_default_key_id_is_timestamp_derived() {
        let mut rng = StdRng::seed_from_u64(62);
        let scheme = HybridScheme::new();
        let keypair = scheme.generate_keypair(None, &mut rng).unwrap();
        assert!(keypair.key_id().starts_with("hybrid-"));

        let named = scheme
            .generate_keypair(Some("unit-test-001".into()), &mut rng)
            .unwrap();
        assert_eq!(named.key_id(), "unit-test-001");
    }

    #[test]
    fn test_keypair_json_requires_private_keys() {
        let mut rng = StdRng::seed_from_u64(63);
        let scheme = HybridScheme::new();
        let keypair = scheme.generate_keypair(None, &mut rng).unwrap();

        let public_only = scheme.export_keypair_json(&keypair, false).unwrap();
        assert!(!public_only.contains("private_keys"));
        assert!(scheme.import_keypair_json(&public_only).is_err());
    }

    #[test]
    fn test_keypair_json_rejects_unknown_algorithm() {
        let mut rng = StdRng::seed_from_u64(64);
        let scheme = HybridScheme::new();
        let keypair = scheme.generate_keypair(None, &mut rng).unwrap();

        let json = scheme.export_keypair_json(&keypair, true).unwrap();
        let swapped = json.replace(KEYPAIR_ALGORITHM, "DSTU-4145 + ML-DSA-65");
        assert!(scheme.import_keypair_json(&swapped).is_err());

        // the Dilithium2 alias of older backends remains acceptable
        let aliased = json.replace(KEYPAIR_ALGORITHM, "DSTU-4145 + Dilithium2");
        assert!(scheme.import_keypair_json(&aliased).is_ok());
    }

    #[test]
    fn test_parse_hex_scalar_accepts_and_rejects() {
        assert_eq!(parse_hex_scalar("0x2a").unwrap(), BigUint::from(42u32));
        assert_eq!(parse_hex_scalar("2A").unwrap(), BigUint::from(42u32));
        assert!(parse_hex_scalar("0xzz").is_err());
        assert!(parse_hex_scalar("").is_err());
    }
}
