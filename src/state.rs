// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AuthService, TokenIssuer, TokenValidator};
use crate::config::{ConfigError, SigningSecret};
use crate::storage::{CharacterRepository, CredentialStore, InMemoryCredentialStore};

/// Shared handler state. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub validator: Arc<TokenValidator>,
    pub characters: Arc<CharacterRepository>,
}

impl AppState {
    /// Wire the auth core to `store`, signing and verifying with `secret`.
    pub fn new(
        secret: &SigningSecret,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ConfigError> {
        let issuer = TokenIssuer::new(secret)?;
        let validator = TokenValidator::new(secret)?;

        Ok(Self {
            auth: Arc::new(AuthService::new(store, issuer)),
            validator: Arc::new(validator),
            characters: Arc::new(CharacterRepository::new()),
        })
    }

    /// State backed by process-local stores.
    pub fn in_memory(secret: &SigningSecret) -> Result<Self, ConfigError> {
        Self::new(secret, Arc::new(InMemoryCredentialStore::new()))
    }
}
