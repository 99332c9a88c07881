//! Postgres implementations of all archnet-core port traits.
//!
//! Each adapter is a newtype wrapping PgPool. All SQL is runtime-checked
//! (sqlx::query, not sqlx::query!) to avoid a compile-time DB requirement.
//! Optional filters bind as `($n::uuid IS NULL OR col = $n)` rather than
//! building SQL strings.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use archnet_core::error::{ArchError, Result};
use archnet_core::ports::*;
use archnet_core::types::*;

use crate::sqlx_types::*;

fn db_err(e: sqlx::Error) -> ArchError {
    ArchError::Database(anyhow!(e))
}

fn row_err(e: String) -> ArchError {
    ArchError::Internal(anyhow!(e))
}

// ── PgUserStore ───────────────────────────────────────────────

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLS: &str =
    "id, username, email, password_hash, full_name, role, bio, location, website, avatar_url, created_at";

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users
                (id, username, email, password_hash, full_name, role, bio, location, website, avatar_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(&user.bio)
        .bind(&user.location)
        .bind(&user.website)
        .bind(&user.avatar_url)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, PgUserRow>(&format!(
            "SELECT {USER_COLS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, PgUserRow>(&format!(
            "SELECT {USER_COLS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, PgUserRow>(&format!(
            "SELECT {USER_COLS} FROM users WHERE lower(username) = lower($1)"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(User::from))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET full_name = $2, bio = $3, location = $4, website = $5, avatar_url = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.bio)
        .bind(&user.location)
        .bind(&user.website)
        .bind(&user.avatar_url)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn search_users(&self, q: Option<&str>, limit: i64) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, PgUserRow>(&format!(
            r#"
            SELECT {USER_COLS} FROM users
            WHERE ($1::text IS NULL OR username ILIKE '%' || $1 || '%' OR full_name ILIKE '%' || $1 || '%')
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(q)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, PgUserRow>(&format!(
            "SELECT {USER_COLS} FROM users WHERE id = ANY($1)"
        ))
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

// ── PgContentStore ────────────────────────────────────────────

pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn list_posts(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PgPostRow>(
            r#"
            SELECT id, author_id, content, image_url, created_at, updated_at
            FROM posts
            WHERE ($1::uuid IS NULL OR author_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(author)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PgPostRow>(
            "SELECT id, author_id, content, image_url, created_at, updated_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Post::from))
    }

    async fn insert_post(&self, post: &Post) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, content, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id)
        .bind(post.author_id)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_post(&self, post: &Post) -> Result<()> {
        sqlx::query(
            "UPDATE posts SET content = $2, image_url = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(post.id)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_projects(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, PgProjectRow>(
            r#"
            SELECT id, author_id, title, description, location, year, cover_url, created_at, updated_at
            FROM projects
            WHERE ($1::uuid IS NULL OR author_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(author)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, PgProjectRow>(
            r#"
            SELECT id, author_id, title, description, location, year, cover_url, created_at, updated_at
            FROM projects WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Project::from))
    }

    async fn insert_project(&self, project: &Project) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, author_id, title, description, location, year, cover_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(project.id)
        .bind(project.author_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.location)
        .bind(project.year)
        .bind(&project.cover_url)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE projects
            SET title = $2, description = $3, location = $4, year = $5, cover_url = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.location)
        .bind(project.year)
        .bind(&project.cover_url)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_research(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Research>> {
        let rows = sqlx::query_as::<_, PgResearchRow>(
            r#"
            SELECT id, author_id, title, abstract_text, document_url, created_at, updated_at
            FROM research
            WHERE ($1::uuid IS NULL OR author_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(author)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Research::from).collect())
    }

    async fn get_research(&self, id: Uuid) -> Result<Option<Research>> {
        let row = sqlx::query_as::<_, PgResearchRow>(
            r#"
            SELECT id, author_id, title, abstract_text, document_url, created_at, updated_at
            FROM research WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Research::from))
    }

    async fn insert_research(&self, research: &Research) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO research (id, author_id, title, abstract_text, document_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(research.id)
        .bind(research.author_id)
        .bind(&research.title)
        .bind(&research.abstract_text)
        .bind(&research.document_url)
        .bind(research.created_at)
        .bind(research.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_research(&self, research: &Research) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE research
            SET title = $2, abstract_text = $3, document_url = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(research.id)
        .bind(&research.title)
        .bind(&research.abstract_text)
        .bind(&research.document_url)
        .bind(research.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_research(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM research WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_news(
        &self,
        author: Option<Uuid>,
        events_only: bool,
        limit: i64,
    ) -> Result<Vec<NewsItem>> {
        let rows = sqlx::query_as::<_, PgNewsRow>(
            r#"
            SELECT id, author_id, title, body, is_event, event_date, event_location, created_at, updated_at
            FROM news
            WHERE ($1::uuid IS NULL OR author_id = $1)
              AND (NOT $2 OR is_event)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(author)
        .bind(events_only)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(NewsItem::from).collect())
    }

    async fn get_news(&self, id: Uuid) -> Result<Option<NewsItem>> {
        let row = sqlx::query_as::<_, PgNewsRow>(
            r#"
            SELECT id, author_id, title, body, is_event, event_date, event_location, created_at, updated_at
            FROM news WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(NewsItem::from))
    }

    async fn insert_news(&self, news: &NewsItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO news (id, author_id, title, body, is_event, event_date, event_location, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(news.id)
        .bind(news.author_id)
        .bind(&news.title)
        .bind(&news.body)
        .bind(news.is_event)
        .bind(news.event_date)
        .bind(&news.event_location)
        .bind(news.created_at)
        .bind(news.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_news(&self, news: &NewsItem) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE news
            SET title = $2, body = $3, is_event = $4, event_date = $5, event_location = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(news.id)
        .bind(&news.title)
        .bind(&news.body)
        .bind(news.is_event)
        .bind(news.event_date)
        .bind(&news.event_location)
        .bind(news.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_news(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_jobs(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Job>> {
        let rows = sqlx::query_as::<_, PgJobRow>(
            r#"
            SELECT id, author_id, title, description, company, location, job_type, is_open, created_at, updated_at
            FROM jobs
            WHERE ($1::uuid IS NULL OR author_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(author)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, PgJobRow>(
            r#"
            SELECT id, author_id, title, description, company, location, job_type, is_open, created_at, updated_at
            FROM jobs WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Job::from))
    }

    async fn insert_job(&self, job: &Job) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, author_id, title, description, company, location, job_type, is_open, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(job.id)
        .bind(job.author_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(job.open)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_job(&self, job: &Job) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, company = $4, location = $5, job_type = $6, is_open = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(job.open)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_job(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_competitions(
        &self,
        author: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Competition>> {
        let rows = sqlx::query_as::<_, PgCompetitionRow>(
            r#"
            SELECT id, author_id, title, description, deadline, prize, external_url, created_at, updated_at
            FROM competitions
            WHERE ($1::uuid IS NULL OR author_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(author)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Competition::from).collect())
    }

    async fn get_competition(&self, id: Uuid) -> Result<Option<Competition>> {
        let row = sqlx::query_as::<_, PgCompetitionRow>(
            r#"
            SELECT id, author_id, title, description, deadline, prize, external_url, created_at, updated_at
            FROM competitions WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Competition::from))
    }

    async fn insert_competition(&self, competition: &Competition) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO competitions (id, author_id, title, description, deadline, prize, external_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(competition.id)
        .bind(competition.author_id)
        .bind(&competition.title)
        .bind(&competition.description)
        .bind(competition.deadline)
        .bind(&competition.prize)
        .bind(&competition.external_url)
        .bind(competition.created_at)
        .bind(competition.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_competition(&self, competition: &Competition) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE competitions
            SET title = $2, description = $3, deadline = $4, prize = $5, external_url = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(competition.id)
        .bind(&competition.title)
        .bind(&competition.description)
        .bind(competition.deadline)
        .bind(&competition.prize)
        .bind(&competition.external_url)
        .bind(competition.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_competition(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM competitions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_resources(
        &self,
        kind: ResourceKind,
        author: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Resource>> {
        let rows = sqlx::query_as::<_, PgResourceRow>(
            r#"
            SELECT id, kind, author_id, title, description, external_url, created_at, updated_at
            FROM resources
            WHERE kind = $1
              AND ($2::uuid IS NULL OR author_id = $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(kind.as_str())
        .bind(author)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter()
            .map(|r| Resource::try_from(r).map_err(row_err))
            .collect()
    }

    async fn get_resource(&self, id: Uuid) -> Result<Option<Resource>> {
        let row = sqlx::query_as::<_, PgResourceRow>(
            r#"
            SELECT id, kind, author_id, title, description, external_url, created_at, updated_at
            FROM resources WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| Resource::try_from(r).map_err(row_err)).transpose()
    }

    async fn insert_resource(&self, resource: &Resource) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resources (id, kind, author_id, title, description, external_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(resource.id)
        .bind(resource.kind.as_str())
        .bind(resource.author_id)
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.external_url)
        .bind(resource.created_at)
        .bind(resource.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_resource(&self, resource: &Resource) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE resources
            SET title = $2, description = $3, external_url = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(resource.id)
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.external_url)
        .bind(resource.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_resource(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn content_author(&self, target: TargetRef) -> Result<Option<Uuid>> {
        let query = match target.target_type {
            TargetType::Post => "SELECT author_id FROM posts WHERE id = $1",
            TargetType::Project => "SELECT author_id FROM projects WHERE id = $1",
            TargetType::Research => "SELECT author_id FROM research WHERE id = $1",
            TargetType::News => "SELECT author_id FROM news WHERE id = $1",
            TargetType::Job => "SELECT author_id FROM jobs WHERE id = $1",
            TargetType::Competition => "SELECT author_id FROM competitions WHERE id = $1",
            TargetType::Book | TargetType::Tool | TargetType::Course | TargetType::Plugin => {
                // kind check keeps a book id from resolving as a tool target
                let author = sqlx::query_scalar::<_, Uuid>(
                    "SELECT author_id FROM resources WHERE id = $1 AND kind = $2",
                )
                .bind(target.target_id)
                .bind(target.target_type.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
                return Ok(author);
            }
        };
        sqlx::query_scalar::<_, Uuid>(query)
            .bind(target.target_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)
    }
}

// ── PgApplicationStore ────────────────────────────────────────

pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn insert_application(&self, application: &JobApplication) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO job_applications (id, job_id, applicant_id, cover_letter, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(application.id)
        .bind(application.job_id)
        .bind(application.applicant_id)
        .bind(&application.cover_letter)
        .bind(application.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_application_for(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> Result<Option<JobApplication>> {
        let row = sqlx::query_as::<_, PgApplicationRow>(
            r#"
            SELECT id, job_id, applicant_id, cover_letter, created_at
            FROM job_applications
            WHERE job_id = $1 AND applicant_id = $2
            "#,
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(JobApplication::from))
    }

    async fn list_applications_for_job(&self, job_id: Uuid) -> Result<Vec<JobApplication>> {
        let rows = sqlx::query_as::<_, PgApplicationRow>(
            r#"
            SELECT id, job_id, applicant_id, cover_letter, created_at
            FROM job_applications
            WHERE job_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(JobApplication::from).collect())
    }

    async fn list_applications_for_user(
        &self,
        applicant_id: Uuid,
    ) -> Result<Vec<JobApplication>> {
        let rows = sqlx::query_as::<_, PgApplicationRow>(
            r#"
            SELECT id, job_id, applicant_id, cover_letter, created_at
            FROM job_applications
            WHERE applicant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(JobApplication::from).collect())
    }
}

// ── PgEngagementStore ─────────────────────────────────────────

pub struct PgEngagementStore {
    pool: PgPool,
}

impl PgEngagementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementStore for PgEngagementStore {
    async fn get_like(&self, user_id: Uuid, target: TargetRef) -> Result<Option<Like>> {
        let row = sqlx::query_as::<_, PgLikeRow>(
            r#"
            SELECT id, user_id, target_type, target_id, created_at
            FROM likes
            WHERE user_id = $1 AND target_type = $2 AND target_id = $3
            "#,
        )
        .bind(user_id)
        .bind(target.target_type.as_str())
        .bind(target.target_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| Like::try_from(r).map_err(row_err)).transpose()
    }

    async fn insert_like(&self, like: &Like) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO likes (id, user_id, target_type, target_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(like.id)
        .bind(like.user_id)
        .bind(like.target.target_type.as_str())
        .bind(like.target.target_id)
        .bind(like.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_like(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn count_likes(&self, target: TargetRef) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM likes WHERE target_type = $1 AND target_id = $2",
        )
        .bind(target.target_type.as_str())
        .bind(target.target_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn get_saved(&self, user_id: Uuid, target: TargetRef) -> Result<Option<SavedItem>> {
        let row = sqlx::query_as::<_, PgSavedRow>(
            r#"
            SELECT id, user_id, target_type, target_id, created_at
            FROM saved_items
            WHERE user_id = $1 AND target_type = $2 AND target_id = $3
            "#,
        )
        .bind(user_id)
        .bind(target.target_type.as_str())
        .bind(target.target_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| SavedItem::try_from(r).map_err(row_err)).transpose()
    }

    async fn insert_saved(&self, item: &SavedItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO saved_items (id, user_id, target_type, target_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.id)
        .bind(item.user_id)
        .bind(item.target.target_type.as_str())
        .bind(item.target.target_id)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_saved(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM saved_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_saved(&self, user_id: Uuid) -> Result<Vec<SavedItem>> {
        let rows = sqlx::query_as::<_, PgSavedRow>(
            r#"
            SELECT id, user_id, target_type, target_id, created_at
            FROM saved_items
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter()
            .map(|r| SavedItem::try_from(r).map_err(row_err))
            .collect()
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, author_id, target_type, target_id, parent_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(comment.id)
        .bind(comment.author_id)
        .bind(comment.target.target_type.as_str())
        .bind(comment.target.target_id)
        .bind(comment.parent_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, PgCommentRow>(
            r#"
            SELECT id, author_id, target_type, target_id, parent_id, content, created_at, updated_at
            FROM comments WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| Comment::try_from(r).map_err(row_err)).transpose()
    }

    async fn list_comments(&self, target: TargetRef) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, PgCommentRow>(
            r#"
            SELECT id, author_id, target_type, target_id, parent_id, content, created_at, updated_at
            FROM comments
            WHERE target_type = $1 AND target_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(target.target_type.as_str())
        .bind(target.target_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter()
            .map(|r| Comment::try_from(r).map_err(row_err))
            .collect()
    }

    async fn update_comment(&self, comment: &Comment) -> Result<()> {
        sqlx::query("UPDATE comments SET content = $2, updated_at = $3 WHERE id = $1")
            .bind(comment.id)
            .bind(&comment.content)
            .bind(comment.updated_at)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_comment(&self, id: Uuid) -> Result<()> {
        // replies go with the parent via ON DELETE CASCADE on parent_id
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn insert_report(&self, report: &Report) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reports (id, reporter_id, target_type, target_id, reason, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(report.id)
        .bind(report.reporter_id)
        .bind(report.target.target_type.as_str())
        .bind(report.target.target_id)
        .bind(&report.reason)
        .bind(report.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }
}

// ── PgSocialGraphStore ────────────────────────────────────────

pub struct PgSocialGraphStore {
    pool: PgPool,
}

impl PgSocialGraphStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialGraphStore for PgSocialGraphStore {
    async fn get_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<Option<Follow>> {
        let row = sqlx::query_as::<_, PgFollowRow>(
            r#"
            SELECT id, follower_id, followee_id, status, created_at
            FROM follows
            WHERE follower_id = $1 AND followee_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Follow::from))
    }

    async fn get_follow_by_id(&self, id: Uuid) -> Result<Option<Follow>> {
        let row = sqlx::query_as::<_, PgFollowRow>(
            "SELECT id, follower_id, followee_id, status, created_at FROM follows WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Follow::from))
    }

    async fn insert_follow(&self, follow: &Follow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO follows (id, follower_id, followee_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(follow.id)
        .bind(follow.follower_id)
        .bind(follow.followee_id)
        .bind(follow.status.as_str())
        .bind(follow.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn set_follow_status(&self, id: Uuid, status: FollowStatus) -> Result<()> {
        sqlx::query("UPDATE follows SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_follow(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM follows WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_follows_between(&self, a: Uuid, b: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM follows
            WHERE (follower_id = $1 AND followee_id = $2)
               OR (follower_id = $2 AND followee_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT follower_id FROM follows WHERE followee_id = $1 AND status = 'accepted'",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn list_following(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT followee_id FROM follows WHERE follower_id = $1 AND status = 'accepted'",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn count_followers(&self, user_id: Uuid) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM follows WHERE followee_id = $1 AND status = 'accepted'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn count_following(&self, user_id: Uuid) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM follows WHERE follower_id = $1 AND status = 'accepted'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn list_incoming_requests(&self, user_id: Uuid) -> Result<Vec<Follow>> {
        let rows = sqlx::query_as::<_, PgFollowRow>(
            r#"
            SELECT id, follower_id, followee_id, status, created_at
            FROM follows
            WHERE followee_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Follow::from).collect())
    }

    async fn get_block(
        &self,
        user_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<Option<BlockedUser>> {
        let row = sqlx::query_as::<_, PgPairRow>(
            r#"
            SELECT id, user_id, target_user_id, created_at
            FROM blocked_users
            WHERE user_id = $1 AND target_user_id = $2
            "#,
        )
        .bind(user_id)
        .bind(target_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(BlockedUser::from))
    }

    async fn insert_block(&self, block: &BlockedUser) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO blocked_users (id, user_id, target_user_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(block.id)
        .bind(block.user_id)
        .bind(block.target_user_id)
        .bind(block.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_block(&self, user_id: Uuid, target_user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM blocked_users WHERE user_id = $1 AND target_user_id = $2",
        )
        .bind(user_id)
        .bind(target_user_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_blocks(&self, user_id: Uuid) -> Result<Vec<BlockedUser>> {
        let rows = sqlx::query_as::<_, PgPairRow>(
            r#"
            SELECT id, user_id, target_user_id, created_at
            FROM blocked_users
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(BlockedUser::from).collect())
    }

    async fn is_blocked_between(&self, a: Uuid, b: Uuid) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM blocked_users
                WHERE (user_id = $1 AND target_user_id = $2)
                   OR (user_id = $2 AND target_user_id = $1)
            )
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn get_mute(&self, user_id: Uuid, target_user_id: Uuid) -> Result<Option<MutedUser>> {
        let row = sqlx::query_as::<_, PgPairRow>(
            r#"
            SELECT id, user_id, target_user_id, created_at
            FROM muted_users
            WHERE user_id = $1 AND target_user_id = $2
            "#,
        )
        .bind(user_id)
        .bind(target_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(MutedUser::from))
    }

    async fn insert_mute(&self, mute: &MutedUser) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO muted_users (id, user_id, target_user_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(mute.id)
        .bind(mute.user_id)
        .bind(mute.target_user_id)
        .bind(mute.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_mute(&self, user_id: Uuid, target_user_id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM muted_users WHERE user_id = $1 AND target_user_id = $2")
                .bind(user_id)
                .bind(target_user_id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_mutes(&self, user_id: Uuid) -> Result<Vec<MutedUser>> {
        let rows = sqlx::query_as::<_, PgPairRow>(
            r#"
            SELECT id, user_id, target_user_id, created_at
            FROM muted_users
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(MutedUser::from).collect())
    }

    async fn muted_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT target_user_id FROM muted_users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }
}

// ── PgMessageStore ────────────────────────────────────────────

pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const MESSAGE_COLS: &str = "id, sender_id, receiver_id, content, attachment_url, is_read, is_edited, is_deleted, is_liked, created_at";

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn insert_message(&self, message: &Message) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO messages
                (id, sender_id, receiver_id, content, attachment_url, is_read, is_edited, is_deleted, is_liked, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(message.id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.content)
        .bind(&message.attachment_url)
        .bind(message.read)
        .bind(message.edited)
        .bind(message.deleted)
        .bind(message.liked)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_message(&self, id: Uuid) -> Result<Option<Message>> {
        let row = sqlx::query_as::<_, PgMessageRow>(&format!(
            "SELECT {MESSAGE_COLS} FROM messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Message::from))
    }

    async fn list_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, PgMessageRow>(&format!(
            r#"
            SELECT {MESSAGE_COLS} FROM messages
            WHERE NOT is_deleted
              AND ((sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1))
            ORDER BY created_at ASC
            "#
        ))
        .bind(a)
        .bind(b)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn conversations(&self, user_id: Uuid) -> Result<Vec<ConversationRow>> {
        // Latest message per peer, then unread counts in a second query.
        let latest = sqlx::query_as::<_, PgMessageRow>(&format!(
            r#"
            SELECT DISTINCT ON (peer_id) {MESSAGE_COLS}
            FROM (
                SELECT m.*,
                       CASE WHEN m.sender_id = $1 THEN m.receiver_id ELSE m.sender_id END AS peer_id
                FROM messages m
                WHERE NOT m.is_deleted AND (m.sender_id = $1 OR m.receiver_id = $1)
            ) t
            ORDER BY peer_id, created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let unread: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT sender_id, COUNT(*)
            FROM messages
            WHERE receiver_id = $1 AND NOT is_read AND NOT is_deleted
            GROUP BY sender_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        let unread: std::collections::HashMap<Uuid, i64> = unread.into_iter().collect();

        let mut rows: Vec<ConversationRow> = latest
            .into_iter()
            .map(Message::from)
            .map(|m| {
                let peer_id = if m.sender_id == user_id {
                    m.receiver_id
                } else {
                    m.sender_id
                };
                ConversationRow {
                    peer_id,
                    unread_count: unread.get(&peer_id).copied().unwrap_or(0),
                    last_message: m,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));
        Ok(rows)
    }

    async fn update_message(&self, message: &Message) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE messages
            SET content = $2, is_read = $3, is_edited = $4, is_deleted = $5, is_liked = $6
            WHERE id = $1
            "#,
        )
        .bind(message.id)
        .bind(&message.content)
        .bind(message.read)
        .bind(message.edited)
        .bind(message.deleted)
        .bind(message.liked)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }
}

// ── PgNotificationStore ───────────────────────────────────────

pub struct PgNotificationStore {
    pool: PgPool,
}

impl PgNotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, recipient_id, actor_id, kind, target_type, target_id, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id)
        .bind(notification.recipient_id)
        .bind(notification.actor_id)
        .bind(notification.kind.as_str())
        .bind(notification.target.map(|t| t.target_type.as_str()))
        .bind(notification.target.map(|t| t.target_id))
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn list_notifications(&self, user_id: Uuid, limit: i64) -> Result<Vec<Notification>> {
        let rows = sqlx::query_as::<_, PgNotificationRow>(
            r#"
            SELECT id, recipient_id, actor_id, kind, target_type, target_id, is_read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn get_notification(&self, id: Uuid) -> Result<Option<Notification>> {
        let row = sqlx::query_as::<_, PgNotificationRow>(
            r#"
            SELECT id, recipient_id, actor_id, kind, target_type, target_id, is_read, created_at
            FROM notifications WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Notification::from))
    }

    async fn mark_read(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

// ── PgUniversityStore ─────────────────────────────────────────

pub struct PgUniversityStore {
    pool: PgPool,
}

impl PgUniversityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UniversityStore for PgUniversityStore {
    async fn insert_membership(&self, membership: &UniversityMembership) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO university_memberships (id, user_id, university, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(membership.id)
        .bind(membership.user_id)
        .bind(&membership.university)
        .bind(membership.status.as_str())
        .bind(membership.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_membership(&self, id: Uuid) -> Result<Option<UniversityMembership>> {
        let row = sqlx::query_as::<_, PgMembershipRow>(
            r#"
            SELECT id, user_id, university, status, created_at
            FROM university_memberships WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(UniversityMembership::from))
    }

    async fn find_membership(
        &self,
        user_id: Uuid,
        university: &str,
    ) -> Result<Option<UniversityMembership>> {
        let row = sqlx::query_as::<_, PgMembershipRow>(
            r#"
            SELECT id, user_id, university, status, created_at
            FROM university_memberships
            WHERE user_id = $1 AND lower(university) = lower($2) AND status <> 'rejected'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(university)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(UniversityMembership::from))
    }

    async fn list_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UniversityMembership>> {
        let rows = sqlx::query_as::<_, PgMembershipRow>(
            r#"
            SELECT id, user_id, university, status, created_at
            FROM university_memberships
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(UniversityMembership::from).collect())
    }

    async fn set_membership_status(&self, id: Uuid, status: MembershipStatus) -> Result<()> {
        sqlx::query("UPDATE university_memberships SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

// ── PgStores ──────────────────────────────────────────────────

/// Bundle of all adapters over one shared pool.
pub struct PgStores;

impl PgStores {
    pub fn new(pool: PgPool) -> Stores {
        Stores {
            users: Arc::new(PgUserStore::new(pool.clone())),
            content: Arc::new(PgContentStore::new(pool.clone())),
            applications: Arc::new(PgApplicationStore::new(pool.clone())),
            engagement: Arc::new(PgEngagementStore::new(pool.clone())),
            social: Arc::new(PgSocialGraphStore::new(pool.clone())),
            messages: Arc::new(PgMessageStore::new(pool.clone())),
            notifications: Arc::new(PgNotificationStore::new(pool.clone())),
            universities: Arc::new(PgUniversityStore::new(pool)),
        }
    }
}
