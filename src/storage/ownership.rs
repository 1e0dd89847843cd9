// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for per-user records.
//!
//! Owned rows carry the owning credential id as a plain foreign key; there
//! is no back-pointer from the user to its records.

use uuid::Uuid;

use crate::auth::AuthenticatedUser;

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_user_id(&self) -> Uuid;

    /// Whether `user` owns this resource.
    fn is_owned_by(&self, user: &AuthenticatedUser) -> bool {
        self.owner_user_id() == user.user_id
    }
}

impl<T: OwnedResource + ?Sized> OwnedResource for &T {
    fn owner_user_id(&self) -> Uuid {
        (**self).owner_user_id()
    }
}

/// Narrow an optional lookup to resources the user owns.
///
/// A record owned by someone else is indistinguishable from a missing one.
pub trait OwnershipCheck<T> {
    fn owned_by(self, user: &AuthenticatedUser) -> Option<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for Option<T> {
    fn owned_by(self, user: &AuthenticatedUser) -> Option<T> {
        self.filter(|resource| resource.is_owned_by(user))
    }
}
