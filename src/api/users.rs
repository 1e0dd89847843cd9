// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity of the caller, as carried by their bearer token.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{Auth, AuthenticatedUser};

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUser {
    /// Token subject; owner id of the caller's characters
    pub user_id: Uuid,
    pub username: String,
    /// When the presented token stops being accepted
    pub token_expires_at: Option<DateTime<Utc>>,
}

impl From<AuthenticatedUser> for CurrentUser {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            token_expires_at: DateTime::from_timestamp(user.expires_at, 0),
            user_id: user.user_id,
            username: user.username,
        }
    }
}

/// Who am I.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Identity from the bearer token", body = CurrentUser),
        (status = 401, description = "Missing, malformed, forged or expired token"),
    )
)]
pub async fn current_user(Auth(user): Auth) -> Json<CurrentUser> {
    Json(user.into())
}
