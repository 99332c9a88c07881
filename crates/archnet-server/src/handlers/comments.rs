//! Comment handlers.
//!
//! Threads are one level deep: a reply's parent must be a top-level comment
//! on the same target.
//!
//! POST   /api/comments
//! GET    /api/comments?target_type=&target_id=
//! PUT    /api/comments/:id   — owner
//! DELETE /api/comments/:id   — owner or admin

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{
    CommentThread, CreateCommentRequest, TargetQuery, UpdateCommentRequest,
};
use archnet_core::types::{Comment, NotificationKind, TargetRef};
use archnet_core::{ArchError, Principal};

use crate::error::AppError;
use crate::handlers::{notify, require_target_author};

pub async fn create(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    req.validate()?;
    let target = TargetRef {
        target_type: req.target_type,
        target_id: req.target_id,
    };
    let target_author = require_target_author(&stores, target).await?;

    if let Some(parent_id) = req.parent_id {
        let parent = stores
            .engagement
            .get_comment(parent_id)
            .await?
            .ok_or_else(|| ArchError::not_found("comment", parent_id))?;
        if parent.target != target {
            return Err(
                ArchError::validation("parent comment belongs to a different target").into(),
            );
        }
        if parent.parent_id.is_some() {
            return Err(ArchError::validation("replies cannot be nested").into());
        }
    }

    let now = Utc::now();
    let comment = Comment {
        id: Uuid::new_v4(),
        author_id: principal.id,
        target,
        parent_id: req.parent_id,
        content: req.content,
        created_at: now,
        updated_at: now,
    };
    stores.engagement.insert_comment(&comment).await?;
    notify(
        &stores,
        target_author,
        principal.id,
        NotificationKind::Comment,
        Some(target),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list(
    Extension(stores): Extension<Stores>,
    Query(query): Query<TargetQuery>,
) -> Result<Json<Vec<CommentThread>>, AppError> {
    let comments = stores.engagement.list_comments(query.target()).await?;
    Ok(Json(CommentThread::build(comments)))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<Comment>, AppError> {
    req.validate()?;
    let mut comment = stores
        .engagement
        .get_comment(id)
        .await?
        .ok_or_else(|| ArchError::not_found("comment", id))?;
    if comment.author_id != principal.id {
        return Err(ArchError::forbidden("only the author may edit a comment").into());
    }
    comment.content = req.content;
    comment.updated_at = Utc::now();
    stores.engagement.update_comment(&comment).await?;
    Ok(Json(comment))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let comment = stores
        .engagement
        .get_comment(id)
        .await?
        .ok_or_else(|| ArchError::not_found("comment", id))?;
    principal.require_owner_or_admin(comment.author_id)?;
    stores.engagement.delete_comment(id).await?;
    Ok(Json(json!({ "deleted": true })))
}
