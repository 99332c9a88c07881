//! Row mirrors for `sqlx::query_as`.
//!
//! Domain enums are stored as TEXT; conversion back goes through the
//! `from_str_or_default` / `parse` helpers on the core types, so a row never
//! fails to map. `TargetType` columns are the one exception: an unknown
//! target_type would mis-route a polymorphic row, so those conversions are
//! fallible.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use archnet_core::types::*;

#[derive(FromRow)]
pub struct PgUserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PgUserRow> for User {
    fn from(r: PgUserRow) -> Self {
        User {
            id: r.id,
            username: r.username,
            email: r.email,
            password_hash: r.password_hash,
            full_name: r.full_name,
            role: Role::from_str_or_default(&r.role),
            bio: r.bio,
            location: r.location,
            website: r.website,
            avatar_url: r.avatar_url,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgPostRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PgPostRow> for Post {
    fn from(r: PgPostRow) -> Self {
        Post {
            id: r.id,
            author_id: r.author_id,
            content: r.content,
            image_url: r.image_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgProjectRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PgProjectRow> for Project {
    fn from(r: PgProjectRow) -> Self {
        Project {
            id: r.id,
            author_id: r.author_id,
            title: r.title,
            description: r.description,
            location: r.location,
            year: r.year,
            cover_url: r.cover_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgResearchRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub abstract_text: String,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PgResearchRow> for Research {
    fn from(r: PgResearchRow) -> Self {
        Research {
            id: r.id,
            author_id: r.author_id,
            title: r.title,
            abstract_text: r.abstract_text,
            document_url: r.document_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgNewsRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub is_event: bool,
    pub event_date: Option<DateTime<Utc>>,
    pub event_location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PgNewsRow> for NewsItem {
    fn from(r: PgNewsRow) -> Self {
        NewsItem {
            id: r.id,
            author_id: r.author_id,
            title: r.title,
            body: r.body,
            is_event: r.is_event,
            event_date: r.event_date,
            event_location: r.event_location,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgJobRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PgJobRow> for Job {
    fn from(r: PgJobRow) -> Self {
        Job {
            id: r.id,
            author_id: r.author_id,
            title: r.title,
            description: r.description,
            company: r.company,
            location: r.location,
            job_type: r.job_type,
            open: r.is_open,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgCompetitionRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub deadline: Option<DateTime<Utc>>,
    pub prize: Option<String>,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PgCompetitionRow> for Competition {
    fn from(r: PgCompetitionRow) -> Self {
        Competition {
            id: r.id,
            author_id: r.author_id,
            title: r.title,
            description: r.description,
            deadline: r.deadline,
            prize: r.prize,
            external_url: r.external_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgResourceRow {
    pub id: Uuid,
    pub kind: String,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PgResourceRow> for Resource {
    type Error = String;

    fn try_from(r: PgResourceRow) -> Result<Self, String> {
        let kind = ResourceKind::parse(&r.kind)
            .ok_or_else(|| format!("unknown resource kind '{}'", r.kind))?;
        Ok(Resource {
            id: r.id,
            kind,
            author_id: r.author_id,
            title: r.title,
            description: r.description,
            external_url: r.external_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(FromRow)]
pub struct PgApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub cover_letter: String,
    pub created_at: DateTime<Utc>,
}

impl From<PgApplicationRow> for JobApplication {
    fn from(r: PgApplicationRow) -> Self {
        JobApplication {
            id: r.id,
            job_id: r.job_id,
            applicant_id: r.applicant_id,
            cover_letter: r.cover_letter,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgCommentRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PgCommentRow> for Comment {
    type Error = String;

    fn try_from(r: PgCommentRow) -> Result<Self, String> {
        let target_type = TargetType::parse(&r.target_type)
            .ok_or_else(|| format!("unknown target type '{}'", r.target_type))?;
        Ok(Comment {
            id: r.id,
            author_id: r.author_id,
            target: TargetRef {
                target_type,
                target_id: r.target_id,
            },
            parent_id: r.parent_id,
            content: r.content,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(FromRow)]
pub struct PgLikeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PgLikeRow> for Like {
    type Error = String;

    fn try_from(r: PgLikeRow) -> Result<Self, String> {
        let target_type = TargetType::parse(&r.target_type)
            .ok_or_else(|| format!("unknown target type '{}'", r.target_type))?;
        Ok(Like {
            id: r.id,
            user_id: r.user_id,
            target: TargetRef {
                target_type,
                target_id: r.target_id,
            },
            created_at: r.created_at,
        })
    }
}

#[derive(FromRow)]
pub struct PgSavedRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PgSavedRow> for SavedItem {
    type Error = String;

    fn try_from(r: PgSavedRow) -> Result<Self, String> {
        let target_type = TargetType::parse(&r.target_type)
            .ok_or_else(|| format!("unknown target type '{}'", r.target_type))?;
        Ok(SavedItem {
            id: r.id,
            user_id: r.user_id,
            target: TargetRef {
                target_type,
                target_id: r.target_id,
            },
            created_at: r.created_at,
        })
    }
}

#[derive(FromRow)]
pub struct PgFollowRow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<PgFollowRow> for Follow {
    fn from(r: PgFollowRow) -> Self {
        Follow {
            id: r.id,
            follower_id: r.follower_id,
            followee_id: r.followee_id,
            status: FollowStatus::from_str_or_default(&r.status),
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgPairRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<PgPairRow> for BlockedUser {
    fn from(r: PgPairRow) -> Self {
        BlockedUser {
            id: r.id,
            user_id: r.user_id,
            target_user_id: r.target_user_id,
            created_at: r.created_at,
        }
    }
}

impl From<PgPairRow> for MutedUser {
    fn from(r: PgPairRow) -> Self {
        MutedUser {
            id: r.id,
            user_id: r.user_id,
            target_user_id: r.target_user_id,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgMessageRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub attachment_url: Option<String>,
    pub is_read: bool,
    pub is_edited: bool,
    pub is_deleted: bool,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PgMessageRow> for Message {
    fn from(r: PgMessageRow) -> Self {
        Message {
            id: r.id,
            sender_id: r.sender_id,
            receiver_id: r.receiver_id,
            content: r.content,
            attachment_url: r.attachment_url,
            read: r.is_read,
            edited: r.is_edited,
            deleted: r.is_deleted,
            liked: r.is_liked,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgNotificationRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub kind: String,
    pub target_type: Option<String>,
    pub target_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PgNotificationRow> for Notification {
    fn from(r: PgNotificationRow) -> Self {
        let target = match (r.target_type.as_deref().and_then(TargetType::parse), r.target_id)
        {
            (Some(target_type), Some(target_id)) => Some(TargetRef {
                target_type,
                target_id,
            }),
            _ => None,
        };
        Notification {
            id: r.id,
            recipient_id: r.recipient_id,
            actor_id: r.actor_id,
            kind: NotificationKind::from_str_or_default(&r.kind),
            target,
            read: r.is_read,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct PgMembershipRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub university: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<PgMembershipRow> for UniversityMembership {
    fn from(r: PgMembershipRow) -> Self {
        UniversityMembership {
            id: r.id,
            user_id: r.user_id,
            university: r.university,
            status: MembershipStatus::from_str_or_default(&r.status),
            created_at: r.created_at,
        }
    }
}
