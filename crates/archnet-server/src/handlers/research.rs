//! Research handlers. Open to any authenticated user.
//!
//! GET    /api/research
//! GET    /api/research/:id
//! POST   /api/research
//! PUT    /api/research/:id   — owner or admin
//! DELETE /api/research/:id   — owner or admin

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{CreateResearchRequest, ListQuery, UpdateResearchRequest};
use archnet_core::types::Research;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn list(
    Extension(stores): Extension<Stores>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Research>>, AppError> {
    let rows = stores
        .content
        .list_research(query.author_id, query.limit())
        .await?;
    Ok(Json(rows))
}

pub async fn get(
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Research>, AppError> {
    let research = stores
        .content
        .get_research(id)
        .await?
        .ok_or_else(|| ArchError::not_found("research", id))?;
    Ok(Json(research))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateResearchRequest>,
) -> Result<(StatusCode, Json<Research>), AppError> {
    req.validate()?;
    let now = Utc::now();
    let research = Research {
        id: Uuid::new_v4(),
        author_id: principal.id,
        title: req.title,
        abstract_text: req.abstract_text,
        document_url: req.document_url,
        created_at: now,
        updated_at: now,
    };
    stores.content.insert_research(&research).await?;
    Ok((StatusCode::CREATED, Json(research)))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResearchRequest>,
) -> Result<Json<Research>, AppError> {
    let mut research = stores
        .content
        .get_research(id)
        .await?
        .ok_or_else(|| ArchError::not_found("research", id))?;
    principal.require_owner_or_admin(research.author_id)?;

    if let Some(title) = req.title {
        research.title = title;
    }
    if let Some(abstract_text) = req.abstract_text {
        research.abstract_text = abstract_text;
    }
    if let Some(document_url) = req.document_url {
        research.document_url = Some(document_url);
    }
    research.updated_at = Utc::now();
    stores.content.update_research(&research).await?;
    Ok(Json(research))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let research = stores
        .content
        .get_research(id)
        .await?
        .ok_or_else(|| ArchError::not_found("research", id))?;
    principal.require_owner_or_admin(research.author_id)?;
    stores.content.delete_research(id).await?;
    Ok(Json(json!({ "deleted": true })))
}
