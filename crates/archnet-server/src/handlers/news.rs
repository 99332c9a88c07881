//! News and event handlers. Publishing is firm/admin only.
//!
//! GET    /api/news
//! GET    /api/news/:id
//! POST   /api/news
//! PUT    /api/news/:id   — owner or admin
//! DELETE /api/news/:id   — owner or admin
//! GET    /api/events     — news rows with is_event set

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{CreateNewsRequest, ListQuery, UpdateNewsRequest};
use archnet_core::types::NewsItem;
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn list(
    Extension(stores): Extension<Stores>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<NewsItem>>, AppError> {
    let rows = stores
        .content
        .list_news(query.author_id, false, query.limit())
        .await?;
    Ok(Json(rows))
}

pub async fn list_events(
    Extension(stores): Extension<Stores>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<NewsItem>>, AppError> {
    let rows = stores
        .content
        .list_news(query.author_id, true, query.limit())
        .await?;
    Ok(Json(rows))
}

pub async fn get(
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsItem>, AppError> {
    let news = stores
        .content
        .get_news(id)
        .await?
        .ok_or_else(|| ArchError::not_found("news item", id))?;
    Ok(Json(news))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<NewsItem>), AppError> {
    if !principal.can_publish_listings() {
        return Err(ArchError::forbidden("only firms and admins publish news").into());
    }
    req.validate()?;
    let now = Utc::now();
    let news = NewsItem {
        id: Uuid::new_v4(),
        author_id: principal.id,
        title: req.title,
        body: req.body,
        is_event: req.is_event,
        event_date: req.event_date,
        event_location: req.event_location,
        created_at: now,
        updated_at: now,
    };
    stores.content.insert_news(&news).await?;
    Ok((StatusCode::CREATED, Json(news)))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNewsRequest>,
) -> Result<Json<NewsItem>, AppError> {
    let mut news = stores
        .content
        .get_news(id)
        .await?
        .ok_or_else(|| ArchError::not_found("news item", id))?;
    principal.require_owner_or_admin(news.author_id)?;

    if let Some(title) = req.title {
        news.title = title;
    }
    if let Some(body) = req.body {
        news.body = body;
    }
    if let Some(is_event) = req.is_event {
        news.is_event = is_event;
    }
    if let Some(event_date) = req.event_date {
        news.event_date = Some(event_date);
    }
    if let Some(event_location) = req.event_location {
        news.event_location = Some(event_location);
    }
    news.updated_at = Utc::now();
    stores.content.update_news(&news).await?;
    Ok(Json(news))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let news = stores
        .content
        .get_news(id)
        .await?
        .ok_or_else(|| ArchError::not_found("news item", id))?;
    principal.require_owner_or_admin(news.author_id)?;
    stores.content.delete_news(id).await?;
    Ok(Json(json!({ "deleted": true })))
}
