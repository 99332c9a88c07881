//! Saved-item handlers.
//!
//! POST /api/saved — toggle
//! GET  /api/saved — the caller's saved items

use axum::{Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{ToggleSavedRequest, ToggleSavedResponse};
use archnet_core::types::{SavedItem, TargetRef};
use archnet_core::Principal;

use crate::error::AppError;
use crate::handlers::require_target_author;

pub async fn toggle(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<ToggleSavedRequest>,
) -> Result<Json<ToggleSavedResponse>, AppError> {
    let target = TargetRef {
        target_type: req.target_type,
        target_id: req.target_id,
    };
    require_target_author(&stores, target).await?;

    let saved = match stores.engagement.get_saved(principal.id, target).await? {
        Some(existing) => {
            stores.engagement.delete_saved(existing.id).await?;
            false
        }
        None => {
            stores
                .engagement
                .insert_saved(&SavedItem {
                    id: Uuid::new_v4(),
                    user_id: principal.id,
                    target,
                    created_at: Utc::now(),
                })
                .await?;
            true
        }
    };
    Ok(Json(ToggleSavedResponse { saved }))
}

pub async fn list(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<Vec<SavedItem>>, AppError> {
    let items = stores.engagement.list_saved(principal.id).await?;
    Ok(Json(items))
}
