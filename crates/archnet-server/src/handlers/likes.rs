//! Like handlers.
//!
//! POST /api/likes        — toggle; first call likes, second removes
//! GET  /api/likes/count?target_type=&target_id=

use axum::extract::Query;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{TargetQuery, ToggleLikeRequest, ToggleLikeResponse};
use archnet_core::types::{Like, NotificationKind, TargetRef};
use archnet_core::Principal;

use crate::error::AppError;
use crate::handlers::{notify, require_target_author};

pub async fn toggle(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<ToggleLikeRequest>,
) -> Result<Json<ToggleLikeResponse>, AppError> {
    let target = TargetRef {
        target_type: req.target_type,
        target_id: req.target_id,
    };
    let target_author = require_target_author(&stores, target).await?;

    let liked = match stores.engagement.get_like(principal.id, target).await? {
        Some(existing) => {
            stores.engagement.delete_like(existing.id).await?;
            false
        }
        None => {
            stores
                .engagement
                .insert_like(&Like {
                    id: Uuid::new_v4(),
                    user_id: principal.id,
                    target,
                    created_at: Utc::now(),
                })
                .await?;
            notify(
                &stores,
                target_author,
                principal.id,
                NotificationKind::Like,
                Some(target),
            )
            .await?;
            true
        }
    };
    let count = stores.engagement.count_likes(target).await?;
    Ok(Json(ToggleLikeResponse { liked, count }))
}

pub async fn count(
    Extension(stores): Extension<Stores>,
    Query(query): Query<TargetQuery>,
) -> Result<Json<Value>, AppError> {
    let count = stores.engagement.count_likes(query.target()).await?;
    Ok(Json(json!({ "count": count })))
}
