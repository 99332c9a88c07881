//! Request/response DTOs for the HTTP surface.
//!
//! Every inbound body type carries a `validate()` returning
//! `ArchError::Validation` so handlers can surface 400s with a readable
//! message before touching storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ArchError, Result};
use crate::types::{
    Comment, MembershipStatus, Message, Role, TargetRef, TargetType, User,
};

fn require_nonempty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(ArchError::validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

// ── Users ─────────────────────────────────────────────────────

/// Profile shape returned to other users. Email and password hash stay
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            full_name: u.full_name,
            role: u.role,
            bio: u.bio,
            location: u.location,
            website: u.website,
            avatar_url: u.avatar_url,
            created_at: u.created_at,
        }
    }
}

/// Shape returned to the account owner (`/api/auth/me`, login).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PrivateUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            role: u.role,
            bio: u.bio,
            location: u.location,
            website: u.website,
            avatar_url: u.avatar_url,
            created_at: u.created_at,
        }
    }
}

/// Profile page payload: the user plus accepted-follow counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: PublicUser,
    pub followers: i64,
    pub following: i64,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().len() < 3 {
            return Err(ArchError::validation(
                "username must be at least 3 characters",
            ));
        }
        if !self.email.contains('@') {
            return Err(ArchError::validation("email is not valid"));
        }
        if self.password.len() < 8 {
            return Err(ArchError::validation(
                "password must be at least 8 characters",
            ));
        }
        require_nonempty("full_name", &self.full_name)?;
        if self.role == Role::Admin {
            return Err(ArchError::validation("cannot self-register as admin"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PrivateUser,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.full_name {
            require_nonempty("full_name", name)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UserSearchQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

// ── Shared list/target queries ────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub author_id: Option<Uuid>,
    pub limit: Option<i64>,
}

impl ListQuery {
    /// Effective page size, clamped to [1, 100].
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetQuery {
    pub target_type: TargetType,
    pub target_id: Uuid,
}

impl TargetQuery {
    pub fn target(&self) -> TargetRef {
        TargetRef {
            target_type: self.target_type,
            target_id: self.target_id,
        }
    }
}

// ── Content bodies ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub image_url: Option<String>,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("content", &self.content)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub cover_url: Option<String>,
}

impl CreateProjectRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("title", &self.title)?;
        require_nonempty("description", &self.description)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateResearchRequest {
    pub title: String,
    pub abstract_text: String,
    pub document_url: Option<String>,
}

impl CreateResearchRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("title", &self.title)?;
        require_nonempty("abstract_text", &self.abstract_text)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateResearchRequest {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub document_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub is_event: bool,
    pub event_date: Option<DateTime<Utc>>,
    pub event_location: Option<String>,
}

impl CreateNewsRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("title", &self.title)?;
        require_nonempty("body", &self.body)?;
        if self.is_event && self.event_date.is_none() {
            return Err(ArchError::validation("events require an event_date"));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_event: Option<bool>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

impl CreateJobRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("title", &self.title)?;
        require_nonempty("description", &self.description)?;
        require_nonempty("company", &self.company)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub open: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCompetitionRequest {
    pub title: String,
    pub description: String,
    pub deadline: Option<DateTime<Utc>>,
    pub prize: Option<String>,
    pub external_url: Option<String>,
}

impl CreateCompetitionRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("title", &self.title)?;
        require_nonempty("description", &self.description)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCompetitionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub prize: Option<String>,
    pub external_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateResourceRequest {
    pub title: String,
    pub description: String,
    pub external_url: Option<String>,
}

impl CreateResourceRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("title", &self.title)?;
        require_nonempty("description", &self.description)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateResourceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub external_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub cover_letter: String,
}

impl CreateApplicationRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("cover_letter", &self.cover_letter)
    }
}

// ── Engagement bodies ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ToggleLikeRequest {
    pub target_type: TargetType,
    pub target_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleLikeResponse {
    pub liked: bool,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct ToggleSavedRequest {
    pub target_type: TargetType,
    pub target_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleSavedResponse {
    pub saved: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub target_type: TargetType,
    pub target_id: Uuid,
    pub content: String,
    pub parent_id: Option<Uuid>,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("content", &self.content)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

impl UpdateCommentRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("content", &self.content)
    }
}

/// Top-level comment with its one level of replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

impl CommentThread {
    /// Group a flat target-scoped listing into top-level threads. Replies
    /// whose parent is missing from the batch are dropped rather than
    /// surfaced as orphan roots.
    pub fn build(comments: Vec<Comment>) -> Vec<CommentThread> {
        let mut threads: Vec<CommentThread> = comments
            .iter()
            .filter(|c| c.parent_id.is_none())
            .cloned()
            .map(|comment| CommentThread {
                comment,
                replies: Vec::new(),
            })
            .collect();
        for reply in comments.into_iter().filter(|c| c.parent_id.is_some()) {
            let parent = reply.parent_id.unwrap();
            if let Some(thread) = threads.iter_mut().find(|t| t.comment.id == parent) {
                thread.replies.push(reply);
            }
        }
        for thread in &mut threads {
            thread.replies.sort_by_key(|r| r.created_at);
        }
        threads
    }
}

/// Incoming follow request with the requester hydrated.
#[derive(Debug, Serialize, Deserialize)]
pub struct FollowRequestView {
    pub id: Uuid,
    pub follower: PublicUser,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub target_type: TargetType,
    pub target_id: Uuid,
    pub reason: String,
}

impl CreateReportRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("reason", &self.reason)
    }
}

// ── Messaging bodies ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub receiver_id: Uuid,
    pub content: String,
    pub attachment_url: Option<String>,
}

impl CreateMessageRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("content", &self.content)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub content: String,
}

impl UpdateMessageRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("content", &self.content)
    }
}

/// Conversation list entry with the peer hydrated.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationView {
    pub peer: PublicUser,
    pub last_message: Message,
    pub unread_count: i64,
}

// ── University membership bodies ──────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateMembershipRequest {
    pub university: String,
}

impl CreateMembershipRequest {
    pub fn validate(&self) -> Result<()> {
        require_nonempty("university", &self.university)
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewMembershipRequest {
    pub status: MembershipStatus,
}

impl ReviewMembershipRequest {
    pub fn validate(&self) -> Result<()> {
        if self.status == MembershipStatus::Pending {
            return Err(ArchError::validation(
                "review must set approved or rejected",
            ));
        }
        Ok(())
    }
}

// ── Feed ──────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

impl FeedQuery {
    /// Default 20, capped at 100.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

/// Normalized, tagged union of the six feed sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub feed_type: TargetType,
    pub id: Uuid,
    pub author: PublicUser,
    /// Absent for posts, which have no headline of their own.
    pub title: Option<String>,
    pub summary: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn comment(id: Uuid, parent_id: Option<Uuid>, minute: u32) -> Comment {
        Comment {
            id,
            author_id: Uuid::new_v4(),
            target: TargetRef {
                target_type: TargetType::Post,
                target_id: Uuid::new_v4(),
            },
            parent_id,
            content: "c".into(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 12, minute, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn comment_threads_nest_one_level() {
        let root = Uuid::new_v4();
        let all = vec![
            comment(root, None, 0),
            comment(Uuid::new_v4(), Some(root), 5),
            comment(Uuid::new_v4(), Some(root), 2),
        ];
        let threads = CommentThread::build(all);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].comment.id, root);
        assert_eq!(threads[0].replies.len(), 2);
        // replies come back oldest first
        assert!(threads[0].replies[0].created_at <= threads[0].replies[1].created_at);
    }

    #[test]
    fn orphan_replies_are_dropped() {
        let threads = CommentThread::build(vec![comment(Uuid::new_v4(), Some(Uuid::new_v4()), 0)]);
        assert!(threads.is_empty());
    }

    #[test]
    fn register_rejects_short_password() {
        let req = RegisterRequest {
            username: "amal".into(),
            email: "amal@archnet.jo".into(),
            password: "short".into(),
            full_name: "Amal H".into(),
            role: Role::Student,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_rejects_admin_role() {
        let req = RegisterRequest {
            username: "amal".into(),
            email: "amal@archnet.jo".into(),
            password: "longenough".into(),
            full_name: "Amal H".into(),
            role: Role::Admin,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn feed_query_clamps_limit() {
        assert_eq!(FeedQuery { limit: None }.limit(), 20);
        assert_eq!(FeedQuery { limit: Some(500) }.limit(), 100);
        assert_eq!(FeedQuery { limit: Some(0) }.limit(), 1);
    }
}
