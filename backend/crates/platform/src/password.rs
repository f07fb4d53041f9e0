//! Password Hashing and Verification
//!
//! Credential handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time verification
//! - Optional application-wide pepper
//!
//! ## Security Features
//! - A fresh random salt per hash, embedded in the PHC output string
//! - Cost parameters are configurable and recorded in every hash
//! - A pre-computed dummy hash lets callers spend the same verification
//!   time when no account exists

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in Unicode code points
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("secret1".to_string()).unwrap();
/// assert!(ClearTextPassword::new("short".to_string()).is_err());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password, enforcing the registration policy:
    /// - Between [`MIN_PASSWORD_LENGTH`] and [`MAX_PASSWORD_LENGTH`] code points
    /// - Not empty or whitespace only
    /// - No control characters other than space, tab and newline
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::unvalidated(raw);
        password.check_policy()?;
        Ok(password)
    }

    /// NFKC-normalize without policy checks.
    ///
    /// Used when verifying a login attempt: the stored hash is the only
    /// authority there, and a later policy change must not lock users out.
    pub fn unvalidated(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        if self.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points, not bytes
        let char_count = self.0.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if self
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, cost parameters, salt and
/// digest, so verification never depends on the current hasher settings.
///
/// Serializes as the bare PHC string; deserialization re-validates the format.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl TryFrom<String> for HashedPassword {
    type Error = PasswordHashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_phc_string(value)
    }
}

impl From<HashedPassword> for String {
    fn from(value: HashedPassword) -> Self {
        value.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingCost {
    /// OWASP recommendation: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Salted one-way credential transform.
///
/// Hashing and verifying are CPU-bound and take tens of milliseconds at the
/// default cost. Async callers should run them on a blocking thread.
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashingCost, PasswordHasher};
///
/// let cost = HashingCost { memory_kib: 64, iterations: 1, parallelism: 1 };
/// let hasher = PasswordHasher::new(cost, None).unwrap();
///
/// let password = ClearTextPassword::new("secret1".to_string()).unwrap();
/// let hashed = hasher.hash(&password).unwrap();
/// assert!(hasher.verify(&password, &hashed));
/// ```
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    pepper: Option<Zeroizing<Vec<u8>>>,
    dummy: HashedPassword,
}

impl PasswordHasher {
    /// Build a hasher with the given cost and optional pepper.
    ///
    /// Fails if the cost parameters are out of Argon2's accepted range.
    pub fn new(cost: HashingCost, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParameters(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let pepper = pepper.map(Zeroizing::new);

        let mut hasher = Self {
            argon2,
            pepper,
            dummy: HashedPassword {
                hash: String::new(),
            },
        };

        let filler = ClearTextPassword::unvalidated(crate::crypto::random_token(24));
        hasher.dummy = hasher.hash(&filler)?;

        Ok(hasher)
    }

    /// Hash the password with a fresh random salt.
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let input = self.peppered(password);

        // 128-bit salt
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(&input, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` for a wrong password and for an unparseable hash; it
    /// never errors. The digest comparison is constant-time.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let input = self.peppered(password);

        let parsed_hash = match PasswordHash::new(&hashed.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        self.argon2.verify_password(&input, &parsed_hash).is_ok()
    }

    /// Spend the same work as a real verification against a throwaway hash.
    ///
    /// Always returns `false`.
    pub fn verify_dummy(&self, password: &ClearTextPassword) -> bool {
        std::hint::black_box(self.verify(password, &self.dummy));
        false
    }

    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut input = Zeroizing::new(password.as_bytes().to_vec());
        if let Some(pepper) = &self.pepper {
            input.extend_from_slice(pepper);
        }
        input
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("peppered", &self.pepper.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
