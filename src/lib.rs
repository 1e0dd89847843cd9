// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RPG Accounts - authentication core for a multi-tenant character API
//!
//! Users register with a username and password, log in to receive an
//! HS512-signed bearer token, and present that token to reach the
//! character records they own.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and OpenAPI document
//! - `auth` - Password digests, token issuance/validation, account service
//! - `config` - Environment configuration and the signing secret
//! - `storage` - Credential store and owner-scoped character repository
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod telemetry;
