// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failure of an account operation or of bearer-token validation.
///
/// The `Display` text of the account variants is shown to end users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is required")]
    MissingAuthHeader,
    #[error("Authorization header must use the form 'Bearer <token>'")]
    InvalidAuthHeader,
    /// Not a decodable HS512 token
    #[error("Token is malformed")]
    MalformedToken,
    /// Signed with another key or another algorithm
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
    /// Username already taken (case-insensitive)
    #[error("User already exists.")]
    DuplicateUsername,
    #[error("User not found.")]
    UserNotFound,
    /// Password does not match the stored digest
    #[error("Wrong password.")]
    InvalidCredentials,
    #[error("Internal authentication error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: &'static str,
}

impl AuthError {
    /// Stable machine-readable code, rendered as `error_code`.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "token_expired",
            AuthError::DuplicateUsername => "duplicate_username",
            AuthError::UserNotFound => "user_not_found",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_token_error() {
            return StatusCode::UNAUTHORIZED;
        }
        match self {
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Whether this error came from the bearer-token gate rather than an
    /// account operation.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingAuthHeader
                | AuthError::InvalidAuthHeader
                | AuthError::MalformedToken
                | AuthError::InvalidSignature
                | AuthError::Expired
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let challenge = self.is_token_error();
        let body = Json(ErrorBody {
            error: self.to_string(),
            error_code: self.error_code(),
        });

        let mut response = (status, body).into_response();
        if challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
