// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Character repository.
//!
//! Characters belong to exactly one user through `owner_user_id`. A
//! per-owner index keeps scoped listings cheap and in creation order.
//! Every operation takes the caller's identity; records of other users are
//! reported as not found.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::ownership::{OwnedResource, OwnershipCheck};
use crate::auth::AuthenticatedUser;
use crate::models::{AddCharacterRequest, CharacterResponse, RpgClass, UpdateCharacterRequest};

/// Character row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCharacter {
    pub id: Uuid,
    /// Owning credential id
    pub owner_user_id: Uuid,
    pub name: String,
    pub hit_points: i32,
    pub strength: i32,
    pub defense: i32,
    pub intelligence: i32,
    pub class: RpgClass,
}

impl OwnedResource for StoredCharacter {
    fn owner_user_id(&self) -> Uuid {
        self.owner_user_id
    }
}

impl From<StoredCharacter> for CharacterResponse {
    fn from(c: StoredCharacter) -> Self {
        Self {
            id: c.id,
            name: c.name,
            hit_points: c.hit_points,
            strength: c.strength,
            defense: c.defense,
            intelligence: c.intelligence,
            class: c.class,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CharacterError {
    #[error("Character with id {0} not found.")]
    NotFound(Uuid),
}

#[derive(Default)]
struct Tables {
    rows: HashMap<Uuid, StoredCharacter>,
    by_owner: HashMap<Uuid, Vec<Uuid>>,
}

impl Tables {
    fn owned(&self, user: &AuthenticatedUser, id: Uuid) -> Option<&StoredCharacter> {
        self.rows.get(&id).owned_by(user)
    }
}

/// In-memory character storage, shared across handlers.
#[derive(Default)]
pub struct CharacterRepository {
    tables: RwLock<Tables>,
}

impl CharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All characters owned by `user`, oldest first.
    pub async fn list(&self, user: &AuthenticatedUser) -> Vec<StoredCharacter> {
        let tables = self.tables.read().await;
        tables
            .by_owner
            .get(&user.user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| tables.rows.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub async fn get(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<StoredCharacter, CharacterError> {
        let tables = self.tables.read().await;
        tables
            .owned(user, id)
            .cloned()
            .ok_or(CharacterError::NotFound(id))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: AddCharacterRequest,
    ) -> StoredCharacter {
        let character = StoredCharacter {
            id: Uuid::new_v4(),
            owner_user_id: user.user_id,
            name: request.name,
            hit_points: request.hit_points,
            strength: request.strength,
            defense: request.defense,
            intelligence: request.intelligence,
            class: request.class,
        };

        let mut tables = self.tables.write().await;
        tables
            .by_owner
            .entry(user.user_id)
            .or_default()
            .push(character.id);
        tables.rows.insert(character.id, character.clone());
        character
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateCharacterRequest,
    ) -> Result<StoredCharacter, CharacterError> {
        let mut tables = self.tables.write().await;
        if tables.owned(user, id).is_none() {
            return Err(CharacterError::NotFound(id));
        }
        let Some(character) = tables.rows.get_mut(&id) else {
            return Err(CharacterError::NotFound(id));
        };

        character.name = request.name;
        character.hit_points = request.hit_points;
        character.strength = request.strength;
        character.defense = request.defense;
        character.intelligence = request.intelligence;
        character.class = request.class;

        Ok(character.clone())
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), CharacterError> {
        let mut tables = self.tables.write().await;
        if tables.owned(user, id).is_none() {
            return Err(CharacterError::NotFound(id));
        }

        tables.rows.remove(&id);
        if let Some(ids) = tables.by_owner.get_mut(&user.user_id) {
            ids.retain(|owned| *owned != id);
        }
        Ok(())
    }
}
