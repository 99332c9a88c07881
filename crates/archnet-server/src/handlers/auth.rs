//! Account handlers.
//!
//! POST /api/auth/register — create an account (400 on duplicate email/username)
//! POST /api/auth/login    — bcrypt verify, issue JWT
//! GET  /api/auth/me       — the authenticated account

use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{LoginRequest, LoginResponse, PrivateUser, RegisterRequest};
use archnet_core::types::User;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;
use crate::middleware::jwt::JwtConfig;

pub async fn register(
    Extension(stores): Extension<Stores>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PrivateUser>), AppError> {
    req.validate()?;

    if stores.users.get_user_by_email(&req.email).await?.is_some() {
        return Err(ArchError::validation("email already registered").into());
    }
    if stores
        .users
        .get_user_by_username(&req.username)
        .await?
        .is_some()
    {
        return Err(ArchError::validation("username already taken").into());
    }

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
        .map_err(|e| ArchError::Internal(anyhow::anyhow!(e)))?;

    let user = User {
        id: Uuid::new_v4(),
        username: req.username.trim().to_string(),
        email: req.email.trim().to_string(),
        password_hash,
        full_name: req.full_name.trim().to_string(),
        role: req.role,
        bio: None,
        location: None,
        website: None,
        avatar_url: None,
        created_at: Utc::now(),
    };
    stores.users.insert_user(&user).await?;

    Ok((StatusCode::CREATED, Json(PrivateUser::from(user))))
}

pub async fn login(
    Extension(stores): Extension<Stores>,
    Extension(jwt): Extension<JwtConfig>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = stores
        .users
        .get_user_by_email(&req.email)
        .await?
        .ok_or_else(|| ArchError::Unauthorized("invalid credentials".into()))?;

    let valid = bcrypt::verify(&req.password, &user.password_hash)
        .map_err(|e| ArchError::Internal(anyhow::anyhow!(e)))?;
    if !valid {
        return Err(ArchError::Unauthorized("invalid credentials".into()).into());
    }

    let token = jwt.issue(&user)?;
    Ok(Json(LoginResponse {
        token,
        user: PrivateUser::from(user),
    }))
}

pub async fn me(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<PrivateUser>, AppError> {
    let user = stores
        .users
        .get_user(principal.id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", principal.id))?;
    Ok(Json(PrivateUser::from(user)))
}
