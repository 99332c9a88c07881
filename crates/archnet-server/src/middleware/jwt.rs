//! JWT authentication middleware.
//!
//! Validates the `Authorization: Bearer <token>` header, builds a
//! `Principal` from the claims and stores it in request extensions.
//! Token issuance lives here too so login and the middleware share one
//! claims shape.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use archnet_core::principal::JwtClaims;
use archnet_core::types::User;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct JwtConfig {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtConfig {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a signed token for a freshly authenticated user.
    pub fn issue(&self, user: &User) -> Result<String, ArchError> {
        let claims = JwtClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            exp: (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ArchError::Internal(anyhow::anyhow!(e)))
    }

    /// Validate a token and build the request principal.
    pub fn verify(&self, token: &str) -> Result<Principal, ArchError> {
        let data = decode::<JwtClaims>(token, &self.decoding, &Validation::default())
            .map_err(|e| ArchError::Unauthorized(format!("invalid token: {e}")))?;
        Principal::from_jwt_claims(&data.claims)
    }
}

/// axum middleware for the protected route set.
pub async fn jwt_auth(
    Extension(config): Extension<JwtConfig>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ArchError::Unauthorized("missing bearer token".into()))?;

    let principal = config.verify(token)?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archnet_core::types::Role;
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "lina".into(),
            email: "lina@archnet.jo".into(),
            password_hash: "x".into(),
            full_name: "Lina Q".into(),
            role: Role::Firm,
            bio: None,
            location: None,
            website: None,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_verify_round_trips() {
        let config = JwtConfig::from_secret(b"unit-test-secret");
        let user = test_user();
        let token = config.issue(&user).unwrap();
        let principal = config.verify(&token).unwrap();
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.username, "lina");
        assert_eq!(principal.role, Role::Firm);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let issuer = JwtConfig::from_secret(b"secret-a");
        let verifier = JwtConfig::from_secret(b"secret-b");
        let token = issuer.issue(&test_user()).unwrap();
        assert!(matches!(
            verifier.verify(&token).unwrap_err(),
            ArchError::Unauthorized(_)
        ));
    }

    #[test]
    fn verify_rejects_garbage() {
        let config = JwtConfig::from_secret(b"unit-test-secret");
        assert!(config.verify("not-a-jwt").is_err());
    }
}
