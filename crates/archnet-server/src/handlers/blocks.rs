//! Block handlers. Blocking removes follow edges in both directions and
//! forbids new messages either way.
//!
//! POST   /api/blocks/:user_id
//! DELETE /api/blocks/:user_id
//! GET    /api/blocks

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::PublicUser;
use archnet_core::types::BlockedUser;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn block(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(user_id): Path<Uuid>,
) -> Result<(StatusCode, Json<BlockedUser>), AppError> {
    if user_id == principal.id {
        return Err(ArchError::validation("cannot block yourself").into());
    }
    stores
        .users
        .get_user(user_id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", user_id))?;
    if stores.social.get_block(principal.id, user_id).await?.is_some() {
        return Err(ArchError::validation("user is already blocked").into());
    }

    let block = BlockedUser {
        id: Uuid::new_v4(),
        user_id: principal.id,
        target_user_id: user_id,
        created_at: Utc::now(),
    };
    stores.social.insert_block(&block).await?;
    stores
        .social
        .delete_follows_between(principal.id, user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(block)))
}

pub async fn unblock(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let removed = stores.social.delete_block(principal.id, user_id).await?;
    if !removed {
        return Err(ArchError::not_found("block", user_id).into());
    }
    Ok(Json(json!({ "deleted": true })))
}

pub async fn list(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let blocks = stores.social.list_blocks(principal.id).await?;
    let ids: Vec<Uuid> = blocks.iter().map(|b| b.target_user_id).collect();
    let users = stores.users.get_users_by_ids(&ids).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}
