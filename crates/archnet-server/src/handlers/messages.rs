//! Direct message handlers.
//!
//! A block in either direction makes messaging 403. History stays readable
//! after a block; only new sends are refused.
//!
//! POST   /api/messages
//! GET    /api/messages/conversations
//! GET    /api/messages/with/:user_id
//! POST   /api/messages/:id/read   — receiver
//! PUT    /api/messages/:id        — sender, marks edited
//! DELETE /api/messages/:id        — sender, soft delete
//! POST   /api/messages/:id/like   — receiver toggles the liked flag

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{ConversationView, CreateMessageRequest, PublicUser, UpdateMessageRequest};
use archnet_core::types::{Message, NotificationKind};
use archnet_core::{ArchError, Principal};

use crate::error::AppError;
use crate::handlers::notify;

pub async fn send(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    req.validate()?;
    if req.receiver_id == principal.id {
        return Err(ArchError::validation("cannot message yourself").into());
    }
    stores
        .users
        .get_user(req.receiver_id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", req.receiver_id))?;
    if stores
        .social
        .is_blocked_between(principal.id, req.receiver_id)
        .await?
    {
        return Err(ArchError::forbidden("messaging is blocked between these users").into());
    }

    let message = Message {
        id: Uuid::new_v4(),
        sender_id: principal.id,
        receiver_id: req.receiver_id,
        content: req.content,
        attachment_url: req.attachment_url,
        read: false,
        edited: false,
        deleted: false,
        liked: false,
        created_at: Utc::now(),
    };
    stores.messages.insert_message(&message).await?;
    notify(
        &stores,
        message.receiver_id,
        principal.id,
        NotificationKind::Message,
        None,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn conversations(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<Vec<ConversationView>>, AppError> {
    let rows = stores.messages.conversations(principal.id).await?;
    let peer_ids: Vec<Uuid> = rows.iter().map(|r| r.peer_id).collect();
    let peers = stores.users.get_users_by_ids(&peer_ids).await?;
    let views = rows
        .into_iter()
        .filter_map(|row| {
            let peer = peers.iter().find(|u| u.id == row.peer_id)?.clone();
            Some(ConversationView {
                peer: PublicUser::from(peer),
                last_message: row.last_message,
                unread_count: row.unread_count,
            })
        })
        .collect();
    Ok(Json(views))
}

pub async fn with_user(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    stores
        .users
        .get_user(user_id)
        .await?
        .ok_or_else(|| ArchError::not_found("user", user_id))?;
    let messages = stores.messages.list_between(principal.id, user_id).await?;
    Ok(Json(messages))
}

async fn fetch(stores: &Stores, id: Uuid) -> Result<Message, ArchError> {
    stores
        .messages
        .get_message(id)
        .await?
        .filter(|m| !m.deleted)
        .ok_or_else(|| ArchError::not_found("message", id))
}

pub async fn mark_read(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    let mut message = fetch(&stores, id).await?;
    if message.receiver_id != principal.id {
        return Err(ArchError::forbidden("only the receiver may mark a message read").into());
    }
    message.read = true;
    stores.messages.update_message(&message).await?;
    Ok(Json(message))
}

pub async fn edit(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<Json<Message>, AppError> {
    req.validate()?;
    let mut message = fetch(&stores, id).await?;
    if message.sender_id != principal.id {
        return Err(ArchError::forbidden("only the sender may edit a message").into());
    }
    message.content = req.content;
    message.edited = true;
    stores.messages.update_message(&message).await?;
    Ok(Json(message))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let mut message = fetch(&stores, id).await?;
    if message.sender_id != principal.id {
        return Err(ArchError::forbidden("only the sender may delete a message").into());
    }
    message.deleted = true;
    stores.messages.update_message(&message).await?;
    Ok(Json(json!({ "deleted": true })))
}

pub async fn toggle_like(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    let mut message = fetch(&stores, id).await?;
    if message.receiver_id != principal.id {
        return Err(ArchError::forbidden("only the receiver may like a message").into());
    }
    message.liked = !message.liked;
    stores.messages.update_message(&message).await?;
    Ok(Json(message))
}
