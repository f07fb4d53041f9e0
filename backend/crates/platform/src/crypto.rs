//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate an opaque URL-safe token from `len` random bytes.
///
/// The output is unpadded base64url, so 32 bytes yield 43 characters.
pub fn random_token(len: usize) -> String {
    to_base64url(&random_bytes(len))
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short, non-reversible reference to a secret, safe to put in logs.
///
/// First 8 bytes of the SHA-256 digest as lowercase hex.
pub fn fingerprint(secret: &[u8]) -> String {
    sha256(secret)[..8]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Decode standard (padded) base64, e.g. secrets supplied via environment
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Encode bytes as unpadded base64url
pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_values() {
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);

        let hash = sha256(b"hello");
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_token_shape() {
        let token = random_token(32);
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(
            general_purpose::URL_SAFE_NO_PAD
                .decode(&token)
                .unwrap()
                .len(),
            32
        );
    }

    #[test]
    fn test_random_tokens_differ() {
        assert_ne!(random_token(32), random_token(32));
    }

    #[test]
    fn test_fingerprint() {
        // First 8 bytes of sha256("hello")
        assert_eq!(fingerprint(b"hello"), "2cf24dba5fb0a30e");
        assert_eq!(fingerprint(b"hello").len(), 16);
    }

    #[test]
    fn test_from_base64() {
        assert_eq!(from_base64("c2VjcmV0").unwrap(), b"secret");
        assert!(from_base64("***").is_err());
        // URL-safe alphabet is not accepted here
        assert!(from_base64("-_-_").is_err());
    }
}
