// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Character endpoints. Every route is scoped to the token subject.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    auth::{Auth, AuthenticatedUser},
    error::ApiError,
    models::{AddCharacterRequest, CharacterResponse, ServiceResponse, UpdateCharacterRequest},
    state::AppState,
};

type CharacterList = ServiceResponse<Vec<CharacterResponse>>;

async fn owned_list(state: &AppState, user: &AuthenticatedUser) -> Vec<CharacterResponse> {
    state
        .characters
        .list(user)
        .await
        .into_iter()
        .map(Into::into)
        .collect()
}

/// List the caller's characters.
#[utoipa::path(
    get,
    path = "/v1/characters",
    tag = "Characters",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Characters owned by the caller", body = ServiceResponse<Vec<CharacterResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_characters(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Json<CharacterList> {
    Json(ServiceResponse::ok(owned_list(&state, &user).await))
}

/// Fetch one of the caller's characters.
#[utoipa::path(
    get,
    path = "/v1/characters/{id}",
    tag = "Characters",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Character ID")),
    responses(
        (status = 200, description = "Character", body = ServiceResponse<CharacterResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found or owned by another user", body = ServiceResponse<CharacterResponse>)
    )
)]
pub async fn get_character(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse<CharacterResponse>>, ApiError> {
    let character = state.characters.get(&user, id).await?;
    Ok(Json(ServiceResponse::ok(character.into())))
}

/// Create a character for the caller and return the caller's list.
#[utoipa::path(
    post,
    path = "/v1/characters",
    tag = "Characters",
    security(("bearer" = [])),
    request_body = AddCharacterRequest,
    responses(
        (status = 201, description = "Created", body = ServiceResponse<Vec<CharacterResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_character(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<AddCharacterRequest>,
) -> (StatusCode, Json<CharacterList>) {
    let created = state.characters.create(&user, request).await;
    tracing::info!(user_id = %user.user_id, character_id = %created.id, "Created character");

    let list = owned_list(&state, &user).await;
    (StatusCode::CREATED, Json(ServiceResponse::ok(list)))
}

/// Replace the attributes of one of the caller's characters.
#[utoipa::path(
    put,
    path = "/v1/characters/{id}",
    tag = "Characters",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Character ID")),
    request_body = UpdateCharacterRequest,
    responses(
        (status = 200, description = "Updated", body = ServiceResponse<CharacterResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found or owned by another user", body = ServiceResponse<CharacterResponse>)
    )
)]
pub async fn update_character(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCharacterRequest>,
) -> Result<Json<ServiceResponse<CharacterResponse>>, ApiError> {
    let updated = state.characters.update(&user, id, request).await?;
    Ok(Json(ServiceResponse::ok(updated.into())))
}

/// Delete one of the caller's characters and return what remains.
#[utoipa::path(
    delete,
    path = "/v1/characters/{id}",
    tag = "Characters",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Character ID")),
    responses(
        (status = 200, description = "Deleted", body = ServiceResponse<Vec<CharacterResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found or owned by another user", body = ServiceResponse<Vec<CharacterResponse>>)
    )
)]
pub async fn delete_character(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CharacterList>, ApiError> {
    state.characters.delete(&user, id).await?;
    tracing::info!(user_id = %user.user_id, character_id = %id, "Deleted character");

    Ok(Json(ServiceResponse::ok(owned_list(&state, &user).await)))
}
