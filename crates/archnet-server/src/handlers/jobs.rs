//! Job listing and application handlers.
//!
//! Listings are firm/admin only; anyone signed in may apply while the job is
//! open, once per job.
//!
//! GET    /api/jobs
//! GET    /api/jobs/:id
//! POST   /api/jobs
//! PUT    /api/jobs/:id                — owner or admin
//! DELETE /api/jobs/:id                — owner or admin
//! POST   /api/jobs/:id/applications
//! GET    /api/jobs/:id/applications   — job owner or admin
//! GET    /api/applications/mine

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use archnet_core::ports::*;
use archnet_core::proto::{CreateApplicationRequest, CreateJobRequest, ListQuery, UpdateJobRequest};
use archnet_core::types::{Job, JobApplication, NotificationKind, TargetRef, TargetType};
use archnet_core::{ArchError, Principal};

use crate::error::AppError;
use crate::handlers::notify;

pub async fn list(
    Extension(stores): Extension<Stores>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = stores
        .content
        .list_jobs(query.author_id, query.limit())
        .await?;
    Ok(Json(jobs))
}

pub async fn get(
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let job = stores
        .content
        .get_job(id)
        .await?
        .ok_or_else(|| ArchError::not_found("job", id))?;
    Ok(Json(job))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    if !principal.can_publish_listings() {
        return Err(ArchError::forbidden("only firms and admins post jobs").into());
    }
    req.validate()?;
    let now = Utc::now();
    let job = Job {
        id: Uuid::new_v4(),
        author_id: principal.id,
        title: req.title,
        description: req.description,
        company: req.company,
        location: req.location,
        job_type: req.job_type,
        open: true,
        created_at: now,
        updated_at: now,
    };
    stores.content.insert_job(&job).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<Json<Job>, AppError> {
    let mut job = stores
        .content
        .get_job(id)
        .await?
        .ok_or_else(|| ArchError::not_found("job", id))?;
    principal.require_owner_or_admin(job.author_id)?;

    if let Some(title) = req.title {
        job.title = title;
    }
    if let Some(description) = req.description {
        job.description = description;
    }
    if let Some(company) = req.company {
        job.company = company;
    }
    if let Some(location) = req.location {
        job.location = Some(location);
    }
    if let Some(job_type) = req.job_type {
        job.job_type = Some(job_type);
    }
    if let Some(open) = req.open {
        job.open = open;
    }
    job.updated_at = Utc::now();
    stores.content.update_job(&job).await?;
    Ok(Json(job))
}

pub async fn delete(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let job = stores
        .content
        .get_job(id)
        .await?
        .ok_or_else(|| ArchError::not_found("job", id))?;
    principal.require_owner_or_admin(job.author_id)?;
    stores.content.delete_job(id).await?;
    Ok(Json(json!({ "deleted": true })))
}

pub async fn apply(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<JobApplication>), AppError> {
    req.validate()?;
    let job = stores
        .content
        .get_job(id)
        .await?
        .ok_or_else(|| ArchError::not_found("job", id))?;
    if !job.open {
        return Err(ArchError::validation("job is no longer accepting applications").into());
    }
    if stores
        .applications
        .get_application_for(id, principal.id)
        .await?
        .is_some()
    {
        return Err(ArchError::validation("you have already applied to this job").into());
    }

    let application = JobApplication {
        id: Uuid::new_v4(),
        job_id: id,
        applicant_id: principal.id,
        cover_letter: req.cover_letter,
        created_at: Utc::now(),
    };
    stores.applications.insert_application(&application).await?;
    notify(
        &stores,
        job.author_id,
        principal.id,
        NotificationKind::Application,
        Some(TargetRef {
            target_type: TargetType::Job,
            target_id: id,
        }),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn list_applications(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    let job = stores
        .content
        .get_job(id)
        .await?
        .ok_or_else(|| ArchError::not_found("job", id))?;
    principal.require_owner_or_admin(job.author_id)?;
    let applications = stores.applications.list_applications_for_job(id).await?;
    Ok(Json(applications))
}

pub async fn my_applications(
    Extension(principal): Extension<Principal>,
    Extension(stores): Extension<Stores>,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    let applications = stores
        .applications
        .list_applications_for_user(principal.id)
        .await?;
    Ok(Json(applications))
}
