//! Post handlers.
//!
//! GET    /api/posts       — list (optional author filter)
//! GET    /api/posts/:id
//! POST   /api/posts       — any authenticated user
//! PUT    /api/posts/:id   — owner or admin
//! DELETE /api/posts/:id   — owner or admin

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{CreatePostRequest, ListQuery, UpdatePostRequest};
use archnet_core::types::Post;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn list(
    Extension(stores): Extension<Stores>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts = stores
        .content
        .list_posts(query.author_id, query.limit())
        .await?;
    Ok(Json(posts))
}

pub async fn get(
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, AppError> {
    let post = stores
        .content
        .get_post(id)
        .await?
        .ok_or_else(|| ArchError::not_found("post", id))?;
    Ok(Json(post))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    req.validate()?;
    let now = Utc::now();
    let post = Post {
        id: Uuid::new_v4(),
        author_id: principal.id,
        content: req.content,
        image_url: req.image_url,
        created_at: now,
        updated_at: now,
    };
    stores.content.insert_post(&post).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    let mut post = stores
        .content
        .get_post(id)
        .await?
        .ok_or_else(|| ArchError::not_found("post", id))?;
    principal.require_owner_or_admin(post.author_id)?;

    if let Some(content) = req.content {
        post.content = content;
    }
    if let Some(image_url) = req.image_url {
        post.image_url = Some(image_url);
    }
    post.updated_at = Utc::now();
    stores.content.update_post(&post).await?;
    Ok(Json(post))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let post = stores
        .content
        .get_post(id)
        .await?
        .ok_or_else(|| ArchError::not_found("post", id))?;
    principal.require_owner_or_admin(post.author_id)?;
    stores.content.delete_post(id).await?;
    Ok(Json(json!({ "deleted": true })))
}
