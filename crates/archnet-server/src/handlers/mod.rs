//! Route handlers, one module per resource group.
//!
//! Every handler follows the same shape: extract `Principal` (injected by
//! the JWT middleware) and the `Stores` bundle, validate the body, apply the
//! role/ownership rule, then delegate to storage.

pub mod auth;
pub mod blocks;
pub mod comments;
pub mod competitions;
pub mod feed;
pub mod follows;
pub mod health;
pub mod jobs;
pub mod likes;
pub mod messages;
pub mod mutes;
pub mod news;
pub mod notifications;
pub mod posts;
pub mod projects;
pub mod reports;
pub mod research;
pub mod resources;
pub mod saved;
pub mod universities;
pub mod users;

use chrono::Utc;
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::types::{Notification, NotificationKind, TargetRef};
use archnet_core::{ArchError, Result};

/// Resolve a polymorphic target's author, 404 when the row is gone.
pub(crate) async fn require_target_author(stores: &Stores, target: TargetRef) -> Result<Uuid> {
    stores
        .content
        .content_author(target)
        .await?
        .ok_or_else(|| ArchError::not_found(target.target_type.as_str(), target.target_id))
}

/// Record a notification unless the actor is notifying themselves.
pub(crate) async fn notify(
    stores: &Stores,
    recipient_id: Uuid,
    actor_id: Uuid,
    kind: NotificationKind,
    target: Option<TargetRef>,
) -> Result<()> {
    if recipient_id == actor_id {
        return Ok(());
    }
    stores
        .notifications
        .insert_notification(&Notification {
            id: Uuid::new_v4(),
            recipient_id,
            actor_id,
            kind,
            target,
            read: false,
            created_at: Utc::now(),
        })
        .await
}
