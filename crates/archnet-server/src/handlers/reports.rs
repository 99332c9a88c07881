//! Report handler. Reports land in the moderation queue, which is outside
//! this service.
//!
//! POST /api/reports

use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::CreateReportRequest;
use archnet_core::types::{Report, TargetRef};
use archnet_core::Principal;

use crate::error::AppError;
use crate::handlers::require_target_author;

pub async fn create(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<Report>), AppError> {
    req.validate()?;
    let target = TargetRef {
        target_type: req.target_type,
        target_id: req.target_id,
    };
    require_target_author(&stores, target).await?;

    let report = Report {
        id: Uuid::new_v4(),
        reporter_id: principal.id,
        target,
        reason: req.reason,
        created_at: Utc::now(),
    };
    stores.engagement.insert_report(&report).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
