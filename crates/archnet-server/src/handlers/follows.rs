//! Follow handlers. Every follow starts as a pending request; only the
//! followee accepts or declines.
//!
//! POST   /api/follows/:user_id               — request to follow
//! DELETE /api/follows/:user_id               — unfollow / withdraw request
//! GET    /api/follows/requests               — incoming pending requests
//! POST   /api/follows/requests/:id/accept
//! POST   /api/follows/requests/:id/decline

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{FollowRequestView, PublicUser};
use archnet_core::types::{Follow, FollowStatus, NotificationKind};
use archnet_core::{ArchError, Principal};

use crate::error::AppError;
use crate::handlers::notify;

pub async fn follow(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(user_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Follow>), AppError> {
    if user_id == principal.id {
        return Err(ArchError::validation("cannot follow yourself").into());
    }
    stores
        .users
        .get_user(user_id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", user_id))?;
    if stores.social.is_blocked_between(principal.id, user_id).await? {
        return Err(ArchError::forbidden("cannot follow this user").into());
    }
    if stores.social.get_follow(principal.id, user_id).await?.is_some() {
        return Err(ArchError::validation("follow request already exists").into());
    }

    let follow = Follow {
        id: Uuid::new_v4(),
        follower_id: principal.id,
        followee_id: user_id,
        status: FollowStatus::Pending,
        created_at: Utc::now(),
    };
    stores.social.insert_follow(&follow).await?;
    notify(
        &stores,
        user_id,
        principal.id,
        NotificationKind::FollowRequest,
        None,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(follow)))
}

pub async fn unfollow(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let follow = stores
        .social
        .get_follow(principal.id, user_id)
        .await?
        .ok_or_else(|| ArchError::not_found("follow", user_id))?;
    stores.social.delete_follow(follow.id).await?;
    Ok(Json(json!({ "deleted": true })))
}

pub async fn requests(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<Vec<FollowRequestView>>, AppError> {
    let pending = stores.social.list_incoming_requests(principal.id).await?;
    let follower_ids: Vec<Uuid> = pending.iter().map(|f| f.follower_id).collect();
    let followers = stores.users.get_users_by_ids(&follower_ids).await?;
    let views = pending
        .into_iter()
        .filter_map(|f| {
            let follower = followers.iter().find(|u| u.id == f.follower_id)?.clone();
            Some(FollowRequestView {
                id: f.id,
                follower: PublicUser::from(follower),
                created_at: f.created_at,
            })
        })
        .collect();
    Ok(Json(views))
}

/// Shared accept/decline guard: 404 unless the request exists and is
/// pending, 403 unless the caller is the followee.
async fn pending_request(
    stores: &Stores,
    principal: &Principal,
    id: Uuid,
) -> Result<Follow, ArchError> {
    let follow = stores
        .social
        .get_follow_by_id(id)
        .await?
        .ok_or_else(|| ArchError::not_found("follow request", id))?;
    if follow.followee_id != principal.id {
        return Err(ArchError::forbidden(
            "only the followee may respond to a follow request",
        ));
    }
    if follow.status != FollowStatus::Pending {
        return Err(ArchError::validation("follow request already handled"));
    }
    Ok(follow)
}

pub async fn accept(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Follow>, AppError> {
    let mut follow = pending_request(&stores, &principal, id).await?;
    stores
        .social
        .set_follow_status(follow.id, FollowStatus::Accepted)
        .await?;
    follow.status = FollowStatus::Accepted;
    notify(
        &stores,
        follow.follower_id,
        principal.id,
        NotificationKind::FollowAccepted,
        None,
    )
    .await?;
    Ok(Json(follow))
}

pub async fn decline(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let follow = pending_request(&stores, &principal, id).await?;
    stores.social.delete_follow(follow.id).await?;
    Ok(Json(json!({ "declined": true })))
}
