use std::fmt;
use std::str::FromStr;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, StoreError};

const SHA256_PREFIX: &str = "sha256";

/// Digest used for newly stored credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    #[default]
    Argon2,
    Sha256,
}

impl PasswordAlgorithm {
    /// Hash `password` with a fresh random salt.
    pub fn hash(self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        match self {
            PasswordAlgorithm::Argon2 => Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| StoreError::Credential(e.to_string())),
            PasswordAlgorithm::Sha256 => Ok(format!(
                "{}${}${}",
                SHA256_PREFIX,
                salt.as_str(),
                sha256_hex(salt.as_str(), password)
            )),
        }
    }
}

impl fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordAlgorithm::Argon2 => f.write_str("argon2"),
            PasswordAlgorithm::Sha256 => f.write_str("sha256"),
        }
    }
}

impl FromStr for PasswordAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(PasswordAlgorithm::Argon2),
            "sha256" | "sha-256" => Ok(PasswordAlgorithm::Sha256),
            other => Err(format!("unknown password algorithm '{}'", other)),
        }
    }
}

/// Check `password` against a stored credential produced by either algorithm.
/// Malformed credentials never verify.
pub fn verify_password(stored: &str, password: &str) -> bool {
    if let Some(rest) = stored.strip_prefix(SHA256_PREFIX).and_then(|r| r.strip_prefix('$')) {
        return match rest.split_once('$') {
            Some((salt, digest)) => sha256_hex(salt, password) == digest,
            None => false,
        };
    }

    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn sha256_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_roundtrip() {
        let stored = PasswordAlgorithm::Sha256.hash("hunter2").unwrap();
        assert!(stored.starts_with("sha256$"));
        assert!(!stored.contains("hunter2"));
        assert!(verify_password(&stored, "hunter2"));
        assert!(!verify_password(&stored, "hunter3"));
    }

    #[test]
    fn test_argon2_roundtrip() {
        let stored = PasswordAlgorithm::Argon2.hash("correct horse").unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(verify_password(&stored, "correct horse"));
        assert!(!verify_password(&stored, "battery staple"));
    }

    #[test]
    fn test_salts_differ() {
        let a = PasswordAlgorithm::Sha256.hash("same").unwrap();
        let b = PasswordAlgorithm::Sha256.hash("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password(&a, "same"));
        assert!(verify_password(&b, "same"));
    }

    #[test]
    fn test_malformed_never_verifies() {
        assert!(!verify_password("", ""));
        assert!(!verify_password("sha256$nosalt", "nosalt"));
        assert!(!verify_password("plaintext", "plaintext"));
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("ARGON2".parse::<PasswordAlgorithm>(), Ok(PasswordAlgorithm::Argon2));
        assert_eq!("sha256".parse::<PasswordAlgorithm>(), Ok(PasswordAlgorithm::Sha256));
        assert!("md5".parse::<PasswordAlgorithm>().is_err());
    }
}
