//! Storage port traits.
//!
//! Handlers consume these as `Arc<dyn Trait>` so the same HTTP surface runs
//! against Postgres adapters in production and `MemStores` in tests. One
//! method per query shape; no transactions span ports.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::*;

// ── Users ─────────────────────────────────────────────────────

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn update_user(&self, user: &User) -> Result<()>;
    /// Substring match on username / full name; no query returns the newest
    /// accounts.
    async fn search_users(&self, q: Option<&str>, limit: i64) -> Result<Vec<User>>;
    /// Batch hydration for feed items, follower lists and conversations.
    async fn get_users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>>;
}

// ── Content ───────────────────────────────────────────────────

/// CRUD over the six feed sources and the catalogue resources. Listings are
/// newest-first and capped by `limit`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list_posts(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Post>>;
    async fn get_post(&self, id: Uuid) -> Result<Option<Post>>;
    async fn insert_post(&self, post: &Post) -> Result<()>;
    async fn update_post(&self, post: &Post) -> Result<()>;
    async fn delete_post(&self, id: Uuid) -> Result<()>;

    async fn list_projects(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Project>>;
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>>;
    async fn insert_project(&self, project: &Project) -> Result<()>;
    async fn update_project(&self, project: &Project) -> Result<()>;
    async fn delete_project(&self, id: Uuid) -> Result<()>;

    async fn list_research(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Research>>;
    async fn get_research(&self, id: Uuid) -> Result<Option<Research>>;
    async fn insert_research(&self, research: &Research) -> Result<()>;
    async fn update_research(&self, research: &Research) -> Result<()>;
    async fn delete_research(&self, id: Uuid) -> Result<()>;

    async fn list_news(
        &self,
        author: Option<Uuid>,
        events_only: bool,
        limit: i64,
    ) -> Result<Vec<NewsItem>>;
    async fn get_news(&self, id: Uuid) -> Result<Option<NewsItem>>;
    async fn insert_news(&self, news: &NewsItem) -> Result<()>;
    async fn update_news(&self, news: &NewsItem) -> Result<()>;
    async fn delete_news(&self, id: Uuid) -> Result<()>;

    async fn list_jobs(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Job>>;
    async fn get_job(&self, id: Uuid) -> Result<Option<Job>>;
    async fn insert_job(&self, job: &Job) -> Result<()>;
    async fn update_job(&self, job: &Job) -> Result<()>;
    async fn delete_job(&self, id: Uuid) -> Result<()>;

    async fn list_competitions(&self, author: Option<Uuid>, limit: i64)
        -> Result<Vec<Competition>>;
    async fn get_competition(&self, id: Uuid) -> Result<Option<Competition>>;
    async fn insert_competition(&self, competition: &Competition) -> Result<()>;
    async fn update_competition(&self, competition: &Competition) -> Result<()>;
    async fn delete_competition(&self, id: Uuid) -> Result<()>;

    async fn list_resources(
        &self,
        kind: ResourceKind,
        author: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Resource>>;
    async fn get_resource(&self, id: Uuid) -> Result<Option<Resource>>;
    async fn insert_resource(&self, resource: &Resource) -> Result<()>;
    async fn update_resource(&self, resource: &Resource) -> Result<()>;
    async fn delete_resource(&self, id: Uuid) -> Result<()>;

    /// Resolve the author of any likeable/commentable target, or None when
    /// the target row does not exist.
    async fn content_author(&self, target: TargetRef) -> Result<Option<Uuid>>;
}

// ── Job applications ──────────────────────────────────────────

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert_application(&self, application: &JobApplication) -> Result<()>;
    async fn get_application_for(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> Result<Option<JobApplication>>;
    async fn list_applications_for_job(&self, job_id: Uuid) -> Result<Vec<JobApplication>>;
    async fn list_applications_for_user(&self, applicant_id: Uuid)
        -> Result<Vec<JobApplication>>;
}

// ── Engagement: likes, saved items, comments, reports ─────────

#[async_trait]
pub trait EngagementStore: Send + Sync {
    async fn get_like(&self, user_id: Uuid, target: TargetRef) -> Result<Option<Like>>;
    async fn insert_like(&self, like: &Like) -> Result<()>;
    async fn delete_like(&self, id: Uuid) -> Result<()>;
    async fn count_likes(&self, target: TargetRef) -> Result<i64>;

    async fn get_saved(&self, user_id: Uuid, target: TargetRef) -> Result<Option<SavedItem>>;
    async fn insert_saved(&self, item: &SavedItem) -> Result<()>;
    async fn delete_saved(&self, id: Uuid) -> Result<()>;
    async fn list_saved(&self, user_id: Uuid) -> Result<Vec<SavedItem>>;

    async fn insert_comment(&self, comment: &Comment) -> Result<()>;
    async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>>;
    /// Full flat listing for a target, oldest first; thread nesting happens
    /// in `proto::CommentThread::build`.
    async fn list_comments(&self, target: TargetRef) -> Result<Vec<Comment>>;
    async fn update_comment(&self, comment: &Comment) -> Result<()>;
    /// Deleting a top-level comment removes its replies as well.
    async fn delete_comment(&self, id: Uuid) -> Result<()>;

    async fn insert_report(&self, report: &Report) -> Result<()>;
}

// ── Social graph: follows, blocks, mutes ──────────────────────

#[async_trait]
pub trait SocialGraphStore: Send + Sync {
    async fn get_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<Option<Follow>>;
    async fn get_follow_by_id(&self, id: Uuid) -> Result<Option<Follow>>;
    async fn insert_follow(&self, follow: &Follow) -> Result<()>;
    async fn set_follow_status(&self, id: Uuid, status: FollowStatus) -> Result<()>;
    async fn delete_follow(&self, id: Uuid) -> Result<()>;
    /// Remove follow edges in both directions (used when a block is created).
    async fn delete_follows_between(&self, a: Uuid, b: Uuid) -> Result<()>;
    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>>;
    async fn list_following(&self, user_id: Uuid) -> Result<Vec<Uuid>>;
    async fn count_followers(&self, user_id: Uuid) -> Result<i64>;
    async fn count_following(&self, user_id: Uuid) -> Result<i64>;
    async fn list_incoming_requests(&self, user_id: Uuid) -> Result<Vec<Follow>>;

    async fn get_block(&self, user_id: Uuid, target_user_id: Uuid)
        -> Result<Option<BlockedUser>>;
    async fn insert_block(&self, block: &BlockedUser) -> Result<()>;
    /// Returns false when no such edge existed.
    async fn delete_block(&self, user_id: Uuid, target_user_id: Uuid) -> Result<bool>;
    async fn list_blocks(&self, user_id: Uuid) -> Result<Vec<BlockedUser>>;
    /// True when either side has blocked the other.
    async fn is_blocked_between(&self, a: Uuid, b: Uuid) -> Result<bool>;

    async fn get_mute(&self, user_id: Uuid, target_user_id: Uuid) -> Result<Option<MutedUser>>;
    async fn insert_mute(&self, mute: &MutedUser) -> Result<()>;
    async fn delete_mute(&self, user_id: Uuid, target_user_id: Uuid) -> Result<bool>;
    async fn list_mutes(&self, user_id: Uuid) -> Result<Vec<MutedUser>>;
    /// Author ids the feed must exclude for this requester.
    async fn muted_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>>;
}

// ── Messaging ─────────────────────────────────────────────────

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert_message(&self, message: &Message) -> Result<()>;
    async fn get_message(&self, id: Uuid) -> Result<Option<Message>>;
    /// Conversation history between two users, oldest first, soft-deleted
    /// rows excluded.
    async fn list_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>>;
    /// One row per peer with the latest message and the caller's unread
    /// count.
    async fn conversations(&self, user_id: Uuid) -> Result<Vec<ConversationRow>>;
    async fn update_message(&self, message: &Message) -> Result<()>;
}

// ── Notifications ─────────────────────────────────────────────

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert_notification(&self, notification: &Notification) -> Result<()>;
    async fn list_notifications(&self, user_id: Uuid, limit: i64) -> Result<Vec<Notification>>;
    async fn unread_count(&self, user_id: Uuid) -> Result<i64>;
    async fn get_notification(&self, id: Uuid) -> Result<Option<Notification>>;
    async fn mark_read(&self, id: Uuid) -> Result<()>;
    async fn mark_all_read(&self, user_id: Uuid) -> Result<()>;
}

// ── University memberships ────────────────────────────────────

#[async_trait]
pub trait UniversityStore: Send + Sync {
    async fn insert_membership(&self, membership: &UniversityMembership) -> Result<()>;
    async fn get_membership(&self, id: Uuid) -> Result<Option<UniversityMembership>>;
    /// Latest non-rejected membership for (user, university), if any.
    async fn find_membership(
        &self,
        user_id: Uuid,
        university: &str,
    ) -> Result<Option<UniversityMembership>>;
    async fn list_memberships_for_user(&self, user_id: Uuid)
        -> Result<Vec<UniversityMembership>>;
    async fn set_membership_status(&self, id: Uuid, status: MembershipStatus) -> Result<()>;
}

// ── Bundle ────────────────────────────────────────────────────

/// The full set of ports a handler can reach. Built once at startup (or per
/// test) and shared behind an `Arc`.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub content: Arc<dyn ContentStore>,
    pub applications: Arc<dyn ApplicationStore>,
    pub engagement: Arc<dyn EngagementStore>,
    pub social: Arc<dyn SocialGraphStore>,
    pub messages: Arc<dyn MessageStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub universities: Arc<dyn UniversityStore>,
}
