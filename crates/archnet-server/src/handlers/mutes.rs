//! Mute handlers. Muted authors drop out of the caller's feed; nothing else
//! changes for either side.
//!
//! POST   /api/mutes/:user_id
//! DELETE /api/mutes/:user_id
//! GET    /api/mutes

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::PublicUser;
use archnet_core::types::MutedUser;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn mute(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(user_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MutedUser>), AppError> {
    if user_id == principal.id {
        return Err(ArchError::validation("cannot mute yourself").into());
    }
    stores
        .users
        .get_user(user_id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", user_id))?;
    if stores.social.get_mute(principal.id, user_id).await?.is_some() {
        return Err(ArchError::validation("user is already muted").into());
    }

    let mute = MutedUser {
        id: Uuid::new_v4(),
        user_id: principal.id,
        target_user_id: user_id,
        created_at: Utc::now(),
    };
    stores.social.insert_mute(&mute).await?;
    Ok((StatusCode::CREATED, Json(mute)))
}

pub async fn unmute(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let removed = stores.social.delete_mute(principal.id, user_id).await?;
    if !removed {
        return Err(ArchError::not_found("mute", user_id).into());
    }
    Ok(Json(json!({ "deleted": true })))
}

pub async fn list(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let mutes = stores.social.list_mutes(principal.id).await?;
    let ids: Vec<Uuid> = mutes.iter().map(|m| m.target_user_id).collect();
    let users = stores.users.get_users_by_ids(&ids).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}
