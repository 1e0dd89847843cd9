// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Salted password digests.
//!
//! Each credential gets a fresh random salt that is used directly as the
//! HMAC-SHA512 key over the UTF-8 password bytes:
//!
//! ```text
//! digest = HMAC-SHA512(key = salt, message = utf8(password))
//! ```
//!
//! The salt is the size of one SHA-512 block (128 bytes). This is a keyed
//! hash, not a memory-hard KDF; it defeats precomputed tables but not
//! dedicated offline guessing.

use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha512;

use super::AuthError;

type HmacSha512 = Hmac<Sha512>;

/// Salt length in bytes.
pub const SALT_LEN: usize = 128;

/// Digest length in bytes (SHA-512 output).
pub const DIGEST_LEN: usize = 64;

/// Digest and salt produced for a single password write.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub hash: Vec<u8>,
    pub salt: Vec<u8>,
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hash", &format_args!("<{} bytes>", self.hash.len()))
            .field("salt", &format_args!("<{} bytes>", self.salt.len()))
            .finish()
    }
}

/// Derives and verifies salted password digests.
///
/// Stateless apart from the system RNG handle; safe to share across tasks.
#[derive(Clone)]
pub struct PasswordHasher {
    rng: SystemRandom,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    /// Hash a password under a freshly generated salt.
    ///
    /// Only fails if the operating system RNG is unavailable.
    pub fn hash(&self, password: &str) -> Result<PasswordDigest, AuthError> {
        let mut salt = vec![0u8; SALT_LEN];
        self.rng
            .fill(&mut salt)
            .map_err(|_| AuthError::InternalError("system RNG unavailable".to_string()))?;

        let hash = compute(&salt, password)
            .ok_or_else(|| AuthError::InternalError("HMAC key rejected".to_string()))?;

        Ok(PasswordDigest { hash, salt })
    }

    /// Check a password against a stored digest and salt.
    ///
    /// The comparison is constant-time. Any mismatch, including a digest of
    /// the wrong length, yields `false`.
    pub fn verify(&self, password: &str, hash: &[u8], salt: &[u8]) -> bool {
        if salt.is_empty() {
            return false;
        }
        let Ok(mut mac) = HmacSha512::new_from_slice(salt) else {
            return false;
        };
        mac.update(password.as_bytes());
        mac.verify_slice(hash).is_ok()
    }
}

/// Keyed digest of `password` under `salt`. The MAC state lives only for
/// this call.
fn compute(salt: &[u8], password: &str) -> Option<Vec<u8>> {
    let mut mac = HmacSha512::new_from_slice(salt).ok()?;
    mac.update(password.as_bytes());
    Some(mac.finalize().into_bytes().to_vec())
}
