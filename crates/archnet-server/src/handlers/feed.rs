//! Unified feed handler.
//!
//! GET /api/feed?limit=N

use axum::extract::Query;
use axum::{Extension, Json};

use archnet_core::feed::build_feed;
use archnet_core::ports::*;
use archnet_core::proto::{FeedItem, FeedQuery};
use archnet_core::Principal;

use crate::error::AppError;

pub async fn feed(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<FeedItem>>, AppError> {
    let items = build_feed(&stores, principal.id, query.limit()).await?;
    Ok(Json(items))
}
