// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for JSON handling and
//! OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Envelope**: [`ServiceResponse`] wraps every account and character result
//! - **Accounts**: registration and login payloads
//! - **Characters**: per-user owned records

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =============================================================================
// Response Envelope
// =============================================================================

/// Uniform result envelope.
///
/// Expected failures (duplicate username, wrong password, missing record)
/// are reported with `success = false` and a human-readable `message`
/// instead of an error body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ServiceResponse<T> {
    /// Payload, absent on failure.
    pub data: Option<T>,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Failure reason or informational message.
    pub message: String,
}

impl<T> ServiceResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            message: message.into(),
        }
    }
}

// =============================================================================
// Account Models
// =============================================================================

/// Request body for registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Desired username (unique, case-insensitive).
    pub username: String,
    /// Plaintext password; only its salted digest is stored.
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username (matched case-insensitively).
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

// =============================================================================
// Character Models
// =============================================================================

/// Character class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub enum RpgClass {
    #[default]
    Knight,
    Mage,
    Cleric,
}

fn default_name() -> String {
    "Frodo".to_string()
}

fn default_hit_points() -> i32 {
    100
}

fn default_attribute() -> i32 {
    10
}

/// Request body for creating a character. Omitted fields take defaults.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AddCharacterRequest {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_hit_points")]
    pub hit_points: i32,
    #[serde(default = "default_attribute")]
    pub strength: i32,
    #[serde(default = "default_attribute")]
    pub defense: i32,
    #[serde(default = "default_attribute")]
    pub intelligence: i32,
    #[serde(default)]
    pub class: RpgClass,
}

impl Default for AddCharacterRequest {
    fn default() -> Self {
        Self {
            name: default_name(),
            hit_points: default_hit_points(),
            strength: default_attribute(),
            defense: default_attribute(),
            intelligence: default_attribute(),
            class: RpgClass::default(),
        }
    }
}

/// Request body for replacing a character's attributes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UpdateCharacterRequest {
    pub name: String,
    pub hit_points: i32,
    pub strength: i32,
    pub defense: i32,
    pub intelligence: i32,
    pub class: RpgClass,
}

/// A character as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CharacterResponse {
    pub id: Uuid,
    pub name: String,
    pub hit_points: i32,
    pub strength: i32,
    pub defense: i32,
    pub intelligence: i32,
    pub class: RpgClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_character_defaults_fill_missing_fields() {
        let request: AddCharacterRequest = serde_json::from_str(r#"{"name":"Sam"}"#).unwrap();
        assert_eq!(request.name, "Sam");
        assert_eq!(request.hit_points, 100);
        assert_eq!(request.strength, 10);
        assert_eq!(request.class, RpgClass::Knight);

        let empty: AddCharacterRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AddCharacterRequest::default());
    }

    #[test]
    fn rpg_class_serializes_as_string() {
        assert_eq!(serde_json::to_string(&RpgClass::Mage).unwrap(), r#""Mage""#);
        let parsed: RpgClass = serde_json::from_str(r#""Cleric""#).unwrap();
        assert_eq!(parsed, RpgClass::Cleric);
    }

    #[test]
    fn service_response_constructors() {
        let ok = ServiceResponse::ok(5);
        assert!(ok.success);
        assert_eq!(ok.data, Some(5));

        let failed: ServiceResponse<i32> = ServiceResponse::failure("User already exists.");
        assert!(!failed.success);
        assert!(failed.data.is_none());
        assert_eq!(failed.message, "User already exists.");
    }
}
