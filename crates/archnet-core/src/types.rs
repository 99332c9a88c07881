//! Domain entities for the ArchNet platform.
//!
//! Enum-typed columns are stored as TEXT in Postgres; the adapter crate maps
//! them back through the `as_str` / `from_str_or_default` helpers here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Roles ─────────────────────────────────────────────────────

/// Account role. Gates which content-creation endpoints a user may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Firm,
    Engineer,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Firm => "firm",
            Role::Engineer => "engineer",
            Role::Student => "student",
        }
    }

    /// Unknown strings fall back to the least-privileged role.
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            "firm" => Role::Firm,
            "engineer" => Role::Engineer,
            _ => Role::Student,
        }
    }
}

// ── Polymorphic targets ───────────────────────────────────────

/// Content kind referenced by likes, saved items, comments and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Post,
    Project,
    Research,
    News,
    Job,
    Competition,
    Book,
    Tool,
    Course,
    Plugin,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Post => "post",
            TargetType::Project => "project",
            TargetType::Research => "research",
            TargetType::News => "news",
            TargetType::Job => "job",
            TargetType::Competition => "competition",
            TargetType::Book => "book",
            TargetType::Tool => "tool",
            TargetType::Course => "course",
            TargetType::Plugin => "plugin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "post" => Some(TargetType::Post),
            "project" => Some(TargetType::Project),
            "research" => Some(TargetType::Research),
            "news" => Some(TargetType::News),
            "job" => Some(TargetType::Job),
            "competition" => Some(TargetType::Competition),
            "book" => Some(TargetType::Book),
            "tool" => Some(TargetType::Tool),
            "course" => Some(TargetType::Course),
            "plugin" => Some(TargetType::Plugin),
            _ => None,
        }
    }
}

/// A (type, id) pair addressing any content entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub target_type: TargetType,
    pub target_id: Uuid,
}

// ── Users ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never serialized to clients (handlers convert to
    /// `PublicUser` / `PrivateUser` before responding).
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ── Feed content ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Research {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub abstract_text: String,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// News article; doubles as an event listing when `is_event` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
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

// ── Catalogue resources ───────────────────────────────────────

/// Books, tools, courses and plugins share one shape; the kind discriminant
/// routes them to their own endpoints and target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Book,
    Tool,
    Course,
    Plugin,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Book => "book",
            ResourceKind::Tool => "tool",
            ResourceKind::Course => "course",
            ResourceKind::Plugin => "plugin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "book" => Some(ResourceKind::Book),
            "tool" => Some(ResourceKind::Tool),
            "course" => Some(ResourceKind::Course),
            "plugin" => Some(ResourceKind::Plugin),
            _ => None,
        }
    }

    pub fn target_type(&self) -> TargetType {
        match self {
            ResourceKind::Book => TargetType::Book,
            ResourceKind::Tool => TargetType::Tool,
            ResourceKind::Course => TargetType::Course,
            ResourceKind::Plugin => TargetType::Plugin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub kind: ResourceKind,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Jobs: applications ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub cover_letter: String,
    pub created_at: DateTime<Utc>,
}

// ── Engagement ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub target: TargetRef,
    /// Present only on replies; always points at a top-level comment.
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target: TargetRef,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target: TargetRef,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub target: TargetRef,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

// ── Social graph ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowStatus {
    Pending,
    Accepted,
}

impl FollowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowStatus::Pending => "pending",
            FollowStatus::Accepted => "accepted",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "accepted" => FollowStatus::Accepted,
            _ => FollowStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub status: FollowStatus,
    pub created_at: DateTime<Utc>,
}

/// Directed block edge: `user_id` blocks `target_user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Directed mute edge: `user_id` mutes `target_user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutedUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ── Messaging ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub attachment_url: Option<String>,
    pub read: bool,
    pub edited: bool,
    pub deleted: bool,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

/// One row per conversation peer, as returned by the message store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRow {
    pub peer_id: Uuid,
    pub last_message: Message,
    pub unread_count: i64,
}

// ── Notifications ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FollowRequest,
    FollowAccepted,
    Like,
    Comment,
    Message,
    Application,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::FollowRequest => "follow_request",
            NotificationKind::FollowAccepted => "follow_accepted",
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
            NotificationKind::Message => "message",
            NotificationKind::Application => "application",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "follow_request" => NotificationKind::FollowRequest,
            "follow_accepted" => NotificationKind::FollowAccepted,
            "like" => NotificationKind::Like,
            "comment" => NotificationKind::Comment,
            "application" => NotificationKind::Application,
            _ => NotificationKind::Message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub kind: NotificationKind,
    pub target: Option<TargetRef>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// ── University memberships ────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Approved,
    Rejected,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Approved => "approved",
            MembershipStatus::Rejected => "rejected",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "approved" => MembershipStatus::Approved,
            "rejected" => MembershipStatus::Rejected,
            _ => MembershipStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversityMembership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub university: String,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        for role in [Role::Admin, Role::Firm, Role::Engineer, Role::Student] {
            assert_eq!(Role::from_str_or_default(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_falls_back_to_student() {
        assert_eq!(Role::from_str_or_default("superuser"), Role::Student);
    }

    #[test]
    fn target_type_round_trips() {
        for kind in [
            TargetType::Post,
            TargetType::Project,
            TargetType::Research,
            TargetType::News,
            TargetType::Job,
            TargetType::Competition,
            TargetType::Book,
            TargetType::Tool,
            TargetType::Course,
            TargetType::Plugin,
        ] {
            assert_eq!(TargetType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TargetType::parse("gallery"), None);
    }

    #[test]
    fn resource_kind_maps_to_target_type() {
        assert_eq!(ResourceKind::Book.target_type(), TargetType::Book);
        assert_eq!(ResourceKind::Plugin.target_type(), TargetType::Plugin);
    }
}
