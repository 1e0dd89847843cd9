// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user.user_id scopes the caller's records
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use chrono::Utc;

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::InvalidAuthHeader)?;

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}

/// Validate the request's bearer token against the current time.
pub fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<AuthenticatedUser, AuthError> {
    let token = bearer_token(headers)?;
    let claims = state.validator.validate(token, Utc::now())?;
    Ok(AuthenticatedUser::from_claims(claims))
}

/// Extractor for authenticated users.
///
/// Reuses the identity stored by [`super::middleware::auth_middleware`] when
/// the route sits behind it; otherwise validates the header itself.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_characters(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Json<ServiceResponse<Vec<CharacterResponse>>> {
///     // user.user_id contains the authenticated user's ID
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // First check if middleware already set the user
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let user = authenticate(&parts.headers, state)?;
        Ok(Auth(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenIssuer;
    use crate::config::SigningSecret;
    use axum::http::Request;
    use chrono::Duration;
    use uuid::Uuid;

    const SECRET: &str = "extractor-test-secret";

    fn create_test_state() -> AppState {
        AppState::in_memory(&SigningSecret::new(SECRET).unwrap()).unwrap()
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn issue(user_id: Uuid, issued_at: chrono::DateTime<Utc>) -> String {
        TokenIssuer::new(&SigningSecret::new(SECRET).unwrap())
            .unwrap()
            .issue(user_id, "frodo", issued_at)
            .unwrap()
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let state = create_test_state();
        let mut parts = parts_with_auth(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_non_bearer_scheme() {
        let state = create_test_state();
        for value in ["Basic Zm9vOmJhcg==", "Bearer ", "bearer abc"] {
            let mut parts = parts_with_auth(Some(value));
            let result = Auth::from_request_parts(&mut parts, &state).await;
            assert!(matches!(result, Err(AuthError::InvalidAuthHeader)), "{value}");
        }
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_issued_token() {
        let state = create_test_state();
        let user_id = Uuid::new_v4();
        let token = issue(user_id, Utc::now());
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.username, "frodo");
    }

    #[tokio::test]
    async fn auth_extractor_rejects_expired_token() {
        let state = create_test_state();
        let token = issue(Uuid::new_v4(), Utc::now() - Duration::days(8));
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::Expired)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_foreign_signature() {
        let state = create_test_state();
        let token = TokenIssuer::new(&SigningSecret::new("another-secret").unwrap())
            .unwrap()
            .issue(Uuid::new_v4(), "frodo", Utc::now())
            .unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[tokio::test]
    async fn auth_extractor_prefers_extensions() {
        let state = create_test_state();
        let mut parts = parts_with_auth(None);

        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            username: "from_middleware".to_string(),
            expires_at: 0,
        };
        parts.extensions.insert(user.clone());

        let Auth(found) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(found, user);
    }
}
