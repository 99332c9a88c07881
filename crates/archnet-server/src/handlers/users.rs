//! User profile handlers.
//!
//! GET /api/users                — search by username / full name
//! GET /api/users/:id            — profile with follow counts
//! PUT /api/users/me             — update own profile fields
//! GET /api/users/:id/followers
//! GET /api/users/:id/following

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{
    PrivateUser, PublicUser, UpdateProfileRequest, UserProfile, UserSearchQuery,
};
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn search(
    Extension(stores): Extension<Stores>,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let users = stores.users.search_users(query.q.as_deref(), limit).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

pub async fn get(
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    let user = stores
        .users
        .get_user(id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", id))?;
    let followers = stores.social.count_followers(id).await?;
    let following = stores.social.count_following(id).await?;
    Ok(Json(UserProfile {
        user: PublicUser::from(user),
        followers,
        following,
    }))
}

pub async fn update_me(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<PrivateUser>, AppError> {
    req.validate()?;
    let mut user = stores
        .users
        .get_user(principal.id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", principal.id))?;

    if let Some(full_name) = req.full_name {
        user.full_name = full_name;
    }
    if let Some(bio) = req.bio {
        user.bio = Some(bio);
    }
    if let Some(location) = req.location {
        user.location = Some(location);
    }
    if let Some(website) = req.website {
        user.website = Some(website);
    }
    if let Some(avatar_url) = req.avatar_url {
        user.avatar_url = Some(avatar_url);
    }

    stores.users.update_user(&user).await?;
    Ok(Json(PrivateUser::from(user)))
}

async fn hydrate(stores: &Stores, ids: Vec<Uuid>) -> Result<Vec<PublicUser>, AppError> {
    let users = stores.users.get_users_by_ids(&ids).await?;
    Ok(users.into_iter().map(PublicUser::from).collect())
}

pub async fn followers(
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    stores
        .users
        .get_user(id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", id))?;
    let ids = stores.social.list_followers(id).await?;
    Ok(Json(hydrate(&stores, ids).await?))
}

pub async fn following(
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    stores
        .users
        .get_user(id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", id))?;
    let ids = stores.social.list_following(id).await?;
    Ok(Json(hydrate(&stores, ids).await?))
}
