// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account registration and login.
//!
//! ## Register
//!
//! existence check → hash → insert. The store re-checks uniqueness on
//! insert, so a concurrent registration that slips past the first check
//! still surfaces as [`AuthError::DuplicateUsername`].
//!
//! ## Login
//!
//! lookup → verify → issue. An unknown username still pays for one HMAC
//! verification against a fixed dummy digest, keeping the two failure
//! paths comparable in latency while reporting distinct error kinds.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::password::{PasswordHasher, DIGEST_LEN, SALT_LEN};
use super::token::TokenIssuer;
use super::AuthError;
use crate::storage::{Credential, CredentialStore, StoreError};

const DUMMY_HASH: [u8; DIGEST_LEN] = [0u8; DIGEST_LEN];
const DUMMY_SALT: [u8; SALT_LEN] = [0x5a; SALT_LEN];

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateUsername(_) => AuthError::DuplicateUsername,
            StoreError::Unavailable(msg) => AuthError::InternalError(msg),
        }
    }
}

/// Stateless orchestration of the account flows.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, issuer: TokenIssuer) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            issuer,
        }
    }

    /// Register a new account and return its id.
    ///
    /// # Errors
    /// `DuplicateUsername` if the name is taken case-insensitively.
    pub async fn register(&self, username: &str, password: &str) -> Result<Uuid, AuthError> {
        if self.store.username_exists(username).await? {
            debug!(username, "Registration rejected: username taken");
            return Err(AuthError::DuplicateUsername);
        }

        let digest = self.hasher.hash(password)?;
        let credential = Credential {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: digest.hash,
            password_salt: digest.salt,
        };

        let id = self.store.insert(credential).await?;
        info!(user_id = %id, username, "Registered new account");
        Ok(id)
    }

    /// Verify credentials and issue a bearer token valid from now.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        self.login_at(username, password, Utc::now()).await
    }

    /// Verify credentials and issue a bearer token valid from `now`.
    ///
    /// # Errors
    /// `UserNotFound` if no account matches case-insensitively,
    /// `InvalidCredentials` if the password does not verify.
    pub async fn login_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let Some(credential) = self.store.find_by_username(username).await? else {
            std::hint::black_box(self.hasher.verify(password, &DUMMY_HASH, &DUMMY_SALT));
            debug!(username, "Login failed: unknown user");
            return Err(AuthError::UserNotFound);
        };

        if !self.hasher.verify(
            password,
            &credential.password_hash,
            &credential.password_salt,
        ) {
            debug!(user_id = %credential.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issuer.issue(credential.id, &credential.username, now)?;
        info!(user_id = %credential.id, "Issued bearer token");
        Ok(token)
    }

    /// Probe the credential store with a lookup that matches nothing.
    pub async fn store_available(&self) -> bool {
        self.store.find_by_username("").await.is_ok()
    }
}
