//! Project handlers.
//!
//! Creation is role-gated: engineers, firms and admins publish projects;
//! students get 403.
//!
//! GET    /api/projects
//! GET    /api/projects/:id
//! POST   /api/projects
//! PUT    /api/projects/:id   — owner or admin
//! DELETE /api/projects/:id   — owner or admin

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{CreateProjectRequest, ListQuery, UpdateProjectRequest};
use archnet_core::types::Project;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn list(
    Extension(stores): Extension<Stores>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = stores
        .content
        .list_projects(query.author_id, query.limit())
        .await?;
    Ok(Json(projects))
}

pub async fn get(
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    let project = stores
        .content
        .get_project(id)
        .await?
        .ok_or_else(|| ArchError::not_found("project", id))?;
    Ok(Json(project))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    if !principal.can_publish_projects() {
        return Err(ArchError::forbidden("students cannot publish projects").into());
    }
    req.validate()?;
    let now = Utc::now();
    let project = Project {
        id: Uuid::new_v4(),
        author_id: principal.id,
        title: req.title,
        description: req.description,
        location: req.location,
        year: req.year,
        cover_url: req.cover_url,
        created_at: now,
        updated_at: now,
    };
    stores.content.insert_project(&project).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let mut project = stores
        .content
        .get_project(id)
        .await?
        .ok_or_else(|| ArchError::not_found("project", id))?;
    principal.require_owner_or_admin(project.author_id)?;

    if let Some(title) = req.title {
        project.title = title;
    }
    if let Some(description) = req.description {
        project.description = description;
    }
    if let Some(location) = req.location {
        project.location = Some(location);
    }
    if let Some(year) = req.year {
        project.year = Some(year);
    }
    if let Some(cover_url) = req.cover_url {
        project.cover_url = Some(cover_url);
    }
    project.updated_at = Utc::now();
    stores.content.update_project(&project).await?;
    Ok(Json(project))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let project = stores
        .content
        .get_project(id)
        .await?
        .ok_or_else(|| ArchError::not_found("project", id))?;
    principal.require_owner_or_admin(project.author_id)?;
    stores.content.delete_project(id).await?;
    Ok(Json(json!({ "deleted": true })))
}
