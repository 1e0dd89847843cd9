// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Probes. Neither touches the signing secret or any credential.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    Degraded,
    Unavailable,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthReport {
    pub status: ProbeStatus,
    /// Result of a no-match lookup against the credential store
    pub credential_store: ProbeStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LivenessReport {
    pub status: ProbeStatus,
}

/// Service health, including the credential store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Accounts can register and log in", body = HealthReport),
        (status = 503, description = "Credential store is not answering", body = HealthReport)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    if state.auth.store_available().await {
        let report = HealthReport {
            status: ProbeStatus::Ok,
            credential_store: ProbeStatus::Ok,
        };
        return (StatusCode::OK, Json(report));
    }

    tracing::warn!("Health probe: credential store unavailable");
    let report = HealthReport {
        status: ProbeStatus::Degraded,
        credential_store: ProbeStatus::Unavailable,
    };
    (StatusCode::SERVICE_UNAVAILABLE, Json(report))
}

/// Process liveness.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Process is serving requests", body = LivenessReport)
    )
)]
pub async fn liveness() -> Json<LivenessReport> {
    Json(LivenessReport {
        status: ProbeStatus::Ok,
    })
}
