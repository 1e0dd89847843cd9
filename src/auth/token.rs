// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuance and validation.
//!
//! Tokens are standard compact JWS (`header.claims.signature`) signed with
//! HS512 under the process signing secret, so any JWT library holding the
//! secret can verify them.
//!
//! ## Claims
//!
//! | Claim | Meaning |
//! |-------|---------|
//! | `sub` | Credential id (UUID) |
//! | `name` | Username as registered |
//! | `iat` | Issued at (Unix seconds) |
//! | `exp` | Expires at (Unix seconds), `iat` + 7 days |
//!
//! Issuer and audience are neither emitted nor checked: any token signed
//! with the current secret is accepted. Pinning `iss`/`aud` would be the
//! first hardening step, at the cost of rejecting tokens already issued.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;
use crate::config::{ConfigError, SigningSecret, RECOMMENDED_SECRET_LEN};

/// Signing algorithm for every token this service issues.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS512;

/// Token lifetime in days.
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Identity claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (credential id)
    pub sub: Uuid,
    /// Username
    pub name: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Builds signed, time-limited bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create an issuer bound to `secret`.
    ///
    /// Fails if the secret is empty; callers treat that as fatal at startup.
    pub fn new(secret: &SigningSecret) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::MissingSigningSecret);
        }
        if secret.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                secret_len = secret.len(),
                recommended = RECOMMENDED_SECRET_LEN,
                "Token signing secret is shorter than the SHA-512 output size"
            );
        }

        Ok(Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::days(TOKEN_LIFETIME_DAYS),
        })
    }

    /// Issue a token for the given subject, valid from `now` for seven days.
    pub fn issue(
        &self,
        subject_id: Uuid,
        subject_username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = TokenClaims {
            sub: subject_id,
            name: subject_username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.key)
            .map_err(|e| AuthError::InternalError(format!("token signing failed: {e}")))
    }
}

/// Verifies bearer tokens issued under the same secret.
///
/// Pure CPU work: no I/O, no shared mutable state.
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator bound to `secret`.
    pub fn new(secret: &SigningSecret) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::MissingSigningSecret);
        }

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry is checked against the caller-supplied clock below.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Verify the signature and expiry of `token` as of `now`.
    ///
    /// A token is still valid at exactly `exp` and expired one second later.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AuthError> {
        let token_data =
            decode::<TokenClaims>(token, &self.key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        AuthError::InvalidSignature
                    }
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    _ => AuthError::MalformedToken,
                }
            })?;

        let claims = token_data.claims;
        if now.timestamp() > claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    const SECRET: &str =
        "test-signing-secret-that-is-at-least-sixty-four-bytes-long-for-hs512-keys";

    fn secret() -> SigningSecret {
        SigningSecret::new(SECRET).unwrap()
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&secret()).unwrap()
    }

    fn validator() -> TokenValidator {
        TokenValidator::new(&secret()).unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn issue_then_validate_returns_claims() {
        let id = Uuid::new_v4();
        let now = fixed_now();
        let token = issuer().issue(id, "frodo", now).unwrap();

        let claims = validator().validate(&token, now).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.name, "frodo");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 7 * 24 * 60 * 60);
    }

    #[test]
    fn token_is_hs512_jws() {
        let token = issuer().issue(Uuid::new_v4(), "frodo", fixed_now()).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS512);
    }

    #[test]
    fn token_valid_until_exact_expiry() {
        let now = fixed_now();
        let token = issuer().issue(Uuid::new_v4(), "frodo", now).unwrap();

        let at_expiry = now + Duration::days(TOKEN_LIFETIME_DAYS);
        assert!(validator().validate(&token, at_expiry).is_ok());
    }

    #[test]
    fn token_after_expiry_is_expired() {
        let now = fixed_now();
        let token = issuer().issue(Uuid::new_v4(), "frodo", now).unwrap();

        let later = now + Duration::days(TOKEN_LIFETIME_DAYS) + Duration::seconds(1);
        assert_eq!(validator().validate(&token, later), Err(AuthError::Expired));
    }

    #[test]
    fn altered_signature_is_rejected() {
        let token = issuer().issue(Uuid::new_v4(), "frodo", fixed_now()).unwrap();
        let (signed, signature) = token.rsplit_once('.').unwrap();

        let mut sig: Vec<u8> = URL_SAFE_NO_PAD.decode(signature).unwrap();
        sig[0] ^= 0x01;
        let tampered = format!("{signed}.{}", URL_SAFE_NO_PAD.encode(sig));

        assert_eq!(
            validator().validate(&tampered, fixed_now()),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn altered_claims_are_rejected() {
        let token = issuer().issue(Uuid::new_v4(), "frodo", fixed_now()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let forged = String::from_utf8(payload).unwrap().replace("frodo", "sauron");
        let tampered = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(forged.as_bytes()),
            parts[2]
        );

        assert_eq!(
            validator().validate(&tampered, fixed_now()),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn other_secret_is_rejected() {
        let other = TokenIssuer::new(&SigningSecret::new("some-other-secret").unwrap()).unwrap();
        let token = other.issue(Uuid::new_v4(), "frodo", fixed_now()).unwrap();

        assert_eq!(
            validator().validate(&token, fixed_now()),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn other_algorithm_is_rejected() {
        let now = fixed_now();
        let claims = TokenClaims {
            sub: Uuid::new_v4(),
            name: "frodo".into(),
            iat: now.timestamp(),
            exp: now.timestamp() + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            validator().validate(&token, now),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn foreign_issuer_and_audience_are_accepted() {
        #[derive(Serialize)]
        struct ForeignClaims {
            sub: Uuid,
            name: String,
            iat: i64,
            exp: i64,
            iss: String,
            aud: String,
        }

        let now = fixed_now();
        let id = Uuid::new_v4();
        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &ForeignClaims {
                sub: id,
                name: "frodo".into(),
                iat: now.timestamp(),
                exp: now.timestamp() + 60,
                iss: "https://elsewhere.example".into(),
                aud: "someone-else".into(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let claims = validator().validate(&token, now).unwrap();
        assert_eq!(claims.sub, id);
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            validator().validate("not-a-token", fixed_now()),
            Err(AuthError::MalformedToken)
        );
        assert_eq!(
            validator().validate("", fixed_now()),
            Err(AuthError::MalformedToken)
        );
    }

    #[test]
    fn short_secret_still_constructs() {
        let short = SigningSecret::new("short").unwrap();
        assert!(TokenIssuer::new(&short).is_ok());
        assert!(TokenValidator::new(&short).is_ok());
    }
}
