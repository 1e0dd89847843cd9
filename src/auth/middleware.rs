// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied to whole router subtrees: the bearer token is validated once and
//! the resulting [`AuthenticatedUser`] is stored in request extensions,
//! where the `Auth` extractor picks it up.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/characters", get(list_characters))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         auth_middleware,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::extractor::authenticate;
use super::AuthenticatedUser;
use crate::state::AppState;

/// Reject the request unless it carries a valid bearer token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state) {
        Ok(user) => {
            tracing::debug!(user_id = %user.user_id, "Authenticated request");
            request.extensions_mut().insert::<AuthenticatedUser>(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(
                error_code = e.error_code(),
                path = %request.uri().path(),
                "Rejected unauthenticated request"
            );
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenIssuer;
    use crate::config::SigningSecret;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::get,
        Extension, Router,
    };
    use chrono::Utc;
    use tower::ServiceExt;
    use uuid::Uuid;

    const SECRET: &str = "middleware-test-secret";

    fn protected_app() -> Router {
        let state = AppState::in_memory(&SigningSecret::new(SECRET).unwrap()).unwrap();
        Router::new()
            .route(
                "/whoami",
                get(|Extension(user): Extension<AuthenticatedUser>| async move { user.username }),
            )
            .route_layer(axum::middleware::from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    #[tokio::test]
    async fn passes_identity_to_handler() {
        let token = TokenIssuer::new(&SigningSecret::new(SECRET).unwrap())
            .unwrap()
            .issue(Uuid::new_v4(), "frodo", Utc::now())
            .unwrap();

        let response = protected_app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"frodo");
    }

    #[tokio::test]
    async fn rejects_missing_token() {
        let response = protected_app()
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error_code"], "missing_auth_header");
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let response = protected_app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("Authorization", "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
