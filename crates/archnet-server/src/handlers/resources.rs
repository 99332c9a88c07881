//! Catalogue resource handlers: books, tools, courses and plugins.
//!
//! One handler set parameterized by `ResourceKind` via router state; the
//! four kinds are nested under /api/books, /api/tools, /api/courses and
//! /api/plugins. Open to any authenticated user; mutation is owner or
//! admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{CreateResourceRequest, ListQuery, UpdateResourceRequest};
use archnet_core::types::{Resource, ResourceKind};
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

/// Route set for one resource kind, nested by the router.
pub fn routes(kind: ResourceKind) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete))
        .with_state(kind)
}

/// 404 unless the row exists and matches the kind the route serves.
async fn fetch(stores: &Stores, kind: ResourceKind, id: Uuid) -> Result<Resource, ArchError> {
    let resource = stores
        .content
        .get_resource(id)
        .await?
        .filter(|r| r.kind == kind)
        .ok_or_else(|| ArchError::not_found(kind.as_str(), id))?;
    Ok(resource)
}

async fn list(
    State(kind): State<ResourceKind>,
    Extension(stores): Extension<Stores>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Resource>>, AppError> {
    let rows = stores
        .content
        .list_resources(kind, query.author_id, query.limit())
        .await?;
    Ok(Json(rows))
}

async fn get_one(
    State(kind): State<ResourceKind>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resource>, AppError> {
    Ok(Json(fetch(&stores, kind, id).await?))
}

async fn create(
    State(kind): State<ResourceKind>,
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<Resource>), AppError> {
    req.validate()?;
    let now = Utc::now();
    let resource = Resource {
        id: Uuid::new_v4(),
        kind,
        author_id: principal.id,
        title: req.title,
        description: req.description,
        external_url: req.external_url,
        created_at: now,
        updated_at: now,
    };
    stores.content.insert_resource(&resource).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

async fn update(
    State(kind): State<ResourceKind>,
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResourceRequest>,
) -> Result<Json<Resource>, AppError> {
    let mut resource = fetch(&stores, kind, id).await?;
    principal.require_owner_or_admin(resource.author_id)?;

    if let Some(title) = req.title {
        resource.title = title;
    }
    if let Some(description) = req.description {
        resource.description = description;
    }
    if let Some(external_url) = req.external_url {
        resource.external_url = Some(external_url);
    }
    resource.updated_at = Utc::now();
    stores.content.update_resource(&resource).await?;
    Ok(Json(resource))
}

async fn delete(
    State(kind): State<ResourceKind>,
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let resource = fetch(&stores, kind, id).await?;
    principal.require_owner_or_admin(resource.author_id)?;
    stores.content.delete_resource(id).await?;
    Ok(Json(json!({ "deleted": true })))
}
