//! Notification handlers.
//!
//! GET  /api/notifications
//! GET  /api/notifications/unread-count
//! POST /api/notifications/:id/read
//! POST /api/notifications/read-all

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::ListQuery;
use archnet_core::types::Notification;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn list(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let rows = stores
        .notifications
        .list_notifications(principal.id, query.limit())
        .await?;
    Ok(Json(rows))
}

pub async fn unread_count(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<Value>, AppError> {
    let count = stores.notifications.unread_count(principal.id).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn mark_read(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    let notification = stores
        .notifications
        .get_notification(id)
        .await?
        .ok_or_else(|| ArchError::not_found("notification", id))?;
    if notification.recipient_id != principal.id {
        return Err(ArchError::forbidden("not your notification").into());
    }
    stores.notifications.mark_read(id).await?;
    Ok(Json(Notification {
        read: true,
        ..notification
    }))
}

pub async fn mark_all_read(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<Value>, AppError> {
    stores.notifications.mark_all_read(principal.id).await?;
    Ok(Json(json!({ "updated": true })))
}
