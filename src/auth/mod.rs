// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Account registration, password verification and bearer tokens.
//!
//! ## Auth Flow
//!
//! 1. Client registers: username uniqueness (case-insensitive) → salted
//!    HMAC-SHA512 digest → credential stored
//! 2. Client logs in: lookup → digest verification → HS512 token issued,
//!    valid for seven days
//! 3. Client sends `Authorization: Bearer <token>` on protected requests
//! 4. Server verifies signature and expiry, then exposes:
//!    - `sub` → canonical `user_id` used to scope records
//!    - `name` → username
//!
//! ## Security
//!
//! - Password digests are compared in constant time
//! - Tokens are signed with a process-wide secret injected at startup
//! - Token validation performs no I/O
//! - Issuer and audience are not checked

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::auth_middleware;
pub use password::{PasswordDigest, PasswordHasher};
pub use service::AuthService;
pub use token::{TokenClaims, TokenIssuer, TokenValidator};
