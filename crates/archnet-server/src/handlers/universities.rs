//! University membership handlers.
//!
//! POST /api/university-memberships       — request to join (pending)
//! GET  /api/university-memberships/mine
//! PUT  /api/university-memberships/:id   — admin approves or rejects

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{CreateMembershipRequest, ReviewMembershipRequest};
use archnet_core::types::{MembershipStatus, UniversityMembership};
use archnet_core::{ArchError, Principal};

use crate::error::AppError;

pub async fn request(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateMembershipRequest>,
) -> Result<(StatusCode, Json<UniversityMembership>), AppError> {
    req.validate()?;
    if stores
        .universities
        .find_membership(principal.id, &req.university)
        .await?
        .is_some()
    {
        return Err(ArchError::validation("membership already requested or active").into());
    }

    let membership = UniversityMembership {
        id: Uuid::new_v4(),
        user_id: principal.id,
        university: req.university.trim().to_string(),
        status: MembershipStatus::Pending,
        created_at: Utc::now(),
    };
    stores.universities.insert_membership(&membership).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

pub async fn mine(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<Vec<UniversityMembership>>, AppError> {
    let rows = stores
        .universities
        .list_memberships_for_user(principal.id)
        .await?;
    Ok(Json(rows))
}

pub async fn review(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewMembershipRequest>,
) -> Result<Json<UniversityMembership>, AppError> {
    principal.require_admin()?;
    req.validate()?;
    let membership = stores
        .universities
        .get_membership(id)
        .await?
        .ok_or_else(|| ArchError::not_found("membership", id))?;
    stores
        .universities
        .set_membership_status(id, req.status)
        .await?;
    Ok(Json(UniversityMembership {
        status: req.status,
        ..membership
    }))
}
