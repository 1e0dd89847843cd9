// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account endpoints: registration and login.
//!
//! Expected failures come back as `ServiceResponse` bodies with
//! `success = false` and a 400 status rather than as error faults.

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{LoginRequest, RegisterRequest, ServiceResponse},
    state::AppState,
};

fn require_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required."));
    }
    Ok(())
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Account created", body = ServiceResponse<Uuid>),
        (status = 400, description = "Username taken or input missing", body = ServiceResponse<Uuid>)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ServiceResponse<Uuid>>, ApiError> {
    require_credentials(&request.username, &request.password)?;

    let id = state
        .auth
        .register(&request.username, &request.password)
        .await?;
    Ok(Json(ServiceResponse::ok(id)))
}

/// Log in and receive a bearer token.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Bearer token issued", body = ServiceResponse<String>),
        (status = 400, description = "Unknown user or wrong password", body = ServiceResponse<String>)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ServiceResponse<String>>, ApiError> {
    require_credentials(&request.username, &request.password)?;

    let token = state.auth.login(&request.username, &request.password).await?;
    Ok(Json(ServiceResponse::ok(token)))
}
