// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistence boundaries used by the service:
//!
//! - [`CredentialStore`] holds user credentials (username, salted digest).
//!   The auth core depends only on this trait; [`InMemoryCredentialStore`]
//!   is the process-local implementation.
//! - [`CharacterRepository`] holds per-user character records, scoped by
//!   the owner id taken from the caller's bearer token.

pub mod characters;
pub mod credentials;
pub mod ownership;

pub use characters::{CharacterError, CharacterRepository, StoredCharacter};
pub use credentials::{Credential, CredentialStore, InMemoryCredentialStore, StoreError};
pub use ownership::{OwnedResource, OwnershipCheck};
