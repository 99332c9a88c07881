//! Competition handlers. Publishing is firm/admin only.
//!
//! GET    /api/competitions
//! GET    /api/competitions/:id
//! POST   /api/competitions
//! PUT    /api/competitions/:id   — owner or admin
//! DELETE /api/competitions/:id   — owner or admin

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{CreateCompetitionRequest, ListQuery, UpdateCompetitionRequest};
use archnet_core::types::Competition;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn list(
    Extension(stores): Extension<Stores>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Competition>>, AppError> {
    let rows = stores
        .content
        .list_competitions(query.author_id, query.limit())
        .await?;
    Ok(Json(rows))
}

pub async fn get(
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Competition>, AppError> {
    let competition = stores
        .content
        .get_competition(id)
        .await?
        .ok_or_else(|| ArchError::not_found("competition", id))?;
    Ok(Json(competition))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateCompetitionRequest>,
) -> Result<(StatusCode, Json<Competition>), AppError> {
    if !principal.can_publish_listings() {
        return Err(ArchError::forbidden("only firms and admins post competitions").into());
    }
    req.validate()?;
    let now = Utc::now();
    let competition = Competition {
        id: Uuid::new_v4(),
        author_id: principal.id,
        title: req.title,
        description: req.description,
        deadline: req.deadline,
        prize: req.prize,
        external_url: req.external_url,
        created_at: now,
        updated_at: now,
    };
    stores.content.insert_competition(&competition).await?;
    Ok((StatusCode::CREATED, Json(competition)))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCompetitionRequest>,
) -> Result<Json<Competition>, AppError> {
    let mut competition = stores
        .content
        .get_competition(id)
        .await?
        .ok_or_else(|| ArchError::not_found("competition", id))?;
    principal.require_owner_or_admin(competition.author_id)?;

    if let Some(title) = req.title {
        competition.title = title;
    }
    if let Some(description) = req.description {
        competition.description = description;
    }
    if let Some(deadline) = req.deadline {
        competition.deadline = Some(deadline);
    }
    if let Some(prize) = req.prize {
        competition.prize = Some(prize);
    }
    if let Some(external_url) = req.external_url {
        competition.external_url = Some(external_url);
    }
    competition.updated_at = Utc::now();
    stores.content.update_competition(&competition).await?;
    Ok(Json(competition))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let competition = stores
        .content
        .get_competition(id)
        .await?
        .ok_or_else(|| ArchError::not_found("competition", id))?;
    principal.require_owner_or_admin(competition.author_id)?;
    stores.content.delete_competition(id).await?;
    Ok(Json(json!({ "deleted": true })))
}
