//! SHA-256 wrapper

use sha2::{Digest, Sha256};

/// Hash data using SHA-256
///
/// # Arguments
///
/// * `data` - The data to hash
///
/// # Returns
///
/// 32-byte SHA-256 hash
pub fn sha_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha_256_known_answer() {
        // FIPS 180-2 test vector for "abc"
        let digest = sha_256(b"abc");
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha_256_distinct_inputs() {
        assert_ne!(sha_256(b"hello world"), sha_256(b"hello worlds"));
    }
}
