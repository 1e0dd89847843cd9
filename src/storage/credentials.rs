// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential persistence boundary.
//!
//! The auth service only needs two operations from a store: a
//! case-insensitive lookup by username and an insert that enforces
//! case-insensitive uniqueness. The in-memory implementation below keeps a
//! lowercase username index next to the rows and takes a single write lock
//! for the check-and-insert, so two concurrent registrations of the same
//! name cannot both succeed.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored username plus salted password digest.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Unique credential identifier
    pub id: Uuid,
    /// Username as registered (original casing)
    pub username: String,
    /// HMAC-SHA512 digest of the password
    pub password_hash: Vec<u8>,
    /// Per-credential random salt (HMAC key)
    pub password_salt: Vec<u8>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Error type for credential store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A credential with the same case-insensitive username already exists
    #[error("username already taken: {0}")]
    DuplicateUsername(String),
    /// The backing store failed
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup and insert of credential records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a credential whose username matches case-insensitively.
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError>;

    /// Insert a new credential.
    ///
    /// # Errors
    /// Returns `StoreError::DuplicateUsername` if the username is taken.
    async fn insert(&self, credential: Credential) -> Result<Uuid, StoreError>;

    /// Whether any credential matches `username` case-insensitively.
    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_username(username).await?.is_some())
    }
}

/// Case-folded key used for uniqueness and lookup.
pub fn normalize_username(username: &str) -> String {
    username.to_lowercase()
}

#[derive(Default)]
struct Tables {
    credentials: HashMap<Uuid, Credential>,
    by_username: HashMap<String, Uuid>,
}

/// Process-local credential store.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    tables: RwLock<Tables>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials.
    pub async fn len(&self) -> usize {
        self.tables.read().await.credentials.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError> {
        let tables = self.tables.read().await;
        let found = tables
            .by_username
            .get(&normalize_username(username))
            .and_then(|id| tables.credentials.get(id))
            .cloned();
        Ok(found)
    }

    async fn insert(&self, credential: Credential) -> Result<Uuid, StoreError> {
        let key = normalize_username(&credential.username);
        let mut tables = self.tables.write().await;

        if tables.by_username.contains_key(&key) {
            return Err(StoreError::DuplicateUsername(credential.username));
        }

        let id = credential.id;
        tables.by_username.insert(key, id);
        tables.credentials.insert(id, credential);
        Ok(id)
    }
}
