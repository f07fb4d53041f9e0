//! Session Token Value Object
//!
//! Opaque bearer credential: 32 random bytes, unpadded base64url (43 chars).
//! The token itself carries no data. It is only meaningful as a key into
//! the session store.

use std::fmt;

use platform::crypto;

/// Random bytes per token (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// Encoded length of a token
pub const TOKEN_LENGTH: usize = 43;

#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh token from the OS CSPRNG.
    pub fn generate() -> Self {
        Self(crypto::random_token(TOKEN_BYTES))
    }

    /// Accept a client-supplied token if it is well-formed.
    ///
    /// Malformed input returns `None` without touching the session store.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == TOKEN_LENGTH
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe reference to this token.
    pub fn reference(&self) -> String {
        crypto::fingerprint(self.0.as_bytes())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken")
            .field(&self.reference())
            .finish()
    }
}
