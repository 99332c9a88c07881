//! In-memory implementation of every storage port.
//!
//! Test double standing in for the Postgres adapters: service-level tests
//! and the HTTP contract suite run against this so they need no database.
//! Plain `RwLock<Vec<_>>` tables; queries re-sort per call, which is fine at
//! fixture scale.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::ports::*;
use crate::types::*;

#[derive(Default)]
pub struct MemStores {
    users: RwLock<Vec<User>>,
    posts: RwLock<Vec<Post>>,
    projects: RwLock<Vec<Project>>,
    research: RwLock<Vec<Research>>,
    news: RwLock<Vec<NewsItem>>,
    jobs: RwLock<Vec<Job>>,
    competitions: RwLock<Vec<Competition>>,
    resources: RwLock<Vec<Resource>>,
    applications: RwLock<Vec<JobApplication>>,
    likes: RwLock<Vec<Like>>,
    saved: RwLock<Vec<SavedItem>>,
    comments: RwLock<Vec<Comment>>,
    reports: RwLock<Vec<Report>>,
    follows: RwLock<Vec<Follow>>,
    blocks: RwLock<Vec<BlockedUser>>,
    mutes: RwLock<Vec<MutedUser>>,
    messages: RwLock<Vec<Message>>,
    notifications: RwLock<Vec<Notification>>,
    memberships: RwLock<Vec<UniversityMembership>>,
}

impl MemStores {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// One shared instance wired into every port slot.
    pub fn stores() -> Stores {
        let mem = Self::new();
        Stores {
            users: mem.clone(),
            content: mem.clone(),
            applications: mem.clone(),
            engagement: mem.clone(),
            social: mem.clone(),
            messages: mem.clone(),
            notifications: mem.clone(),
            universities: mem,
        }
    }
}

fn newest_first<T, F>(mut rows: Vec<T>, key: F, limit: i64) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows.truncate(limit as usize);
    rows
}

#[async_trait]
impl UserStore for MemStores {
    async fn insert_user(&self, user: &User) -> Result<()> {
        self.users.write().unwrap().push(user.clone());
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().unwrap();
        if let Some(slot) = users.iter_mut().find(|u| u.id == user.id) {
            *slot = user.clone();
        }
        Ok(())
    }

    async fn search_users(&self, q: Option<&str>, limit: i64) -> Result<Vec<User>> {
        let needle = q.map(str::to_lowercase);
        let rows: Vec<User> = self
            .users
            .read()
            .unwrap()
            .iter()
            .filter(|u| match &needle {
                Some(n) => {
                    u.username.to_lowercase().contains(n)
                        || u.full_name.to_lowercase().contains(n)
                }
                None => true,
            })
            .cloned()
            .collect();
        Ok(newest_first(rows, |u| u.created_at, limit))
    }

    async fn get_users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ContentStore for MemStores {
    async fn list_posts(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Post>> {
        let rows: Vec<Post> = self
            .posts
            .read()
            .unwrap()
            .iter()
            .filter(|p| author.map_or(true, |a| p.author_id == a))
            .cloned()
            .collect();
        Ok(newest_first(rows, |p| p.created_at, limit))
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self.posts.read().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn insert_post(&self, post: &Post) -> Result<()> {
        self.posts.write().unwrap().push(post.clone());
        Ok(())
    }

    async fn update_post(&self, post: &Post) -> Result<()> {
        let mut table = self.posts.write().unwrap();
        if let Some(slot) = table.iter_mut().find(|p| p.id == post.id) {
            *slot = post.clone();
        }
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<()> {
        self.posts.write().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_projects(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Project>> {
        let rows: Vec<Project> = self
            .projects
            .read()
            .unwrap()
            .iter()
            .filter(|p| author.map_or(true, |a| p.author_id == a))
            .cloned()
            .collect();
        Ok(newest_first(rows, |p| p.created_at, limit))
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        Ok(self
            .projects
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn insert_project(&self, project: &Project) -> Result<()> {
        self.projects.write().unwrap().push(project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> Result<()> {
        let mut table = self.projects.write().unwrap();
        if let Some(slot) = table.iter_mut().find(|p| p.id == project.id) {
            *slot = project.clone();
        }
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<()> {
        self.projects.write().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_research(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Research>> {
        let rows: Vec<Research> = self
            .research
            .read()
            .unwrap()
            .iter()
            .filter(|r| author.map_or(true, |a| r.author_id == a))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r| r.created_at, limit))
    }

    async fn get_research(&self, id: Uuid) -> Result<Option<Research>> {
        Ok(self
            .research
            .read()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn insert_research(&self, research: &Research) -> Result<()> {
        self.research.write().unwrap().push(research.clone());
        Ok(())
    }

    async fn update_research(&self, research: &Research) -> Result<()> {
        let mut table = self.research.write().unwrap();
        if let Some(slot) = table.iter_mut().find(|r| r.id == research.id) {
            *slot = research.clone();
        }
        Ok(())
    }

    async fn delete_research(&self, id: Uuid) -> Result<()> {
        self.research.write().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn list_jobs(&self, author: Option<Uuid>, limit: i64) -> Result<Vec<Job>> {
        let rows: Vec<Job> = self
            .jobs
            .read()
            .unwrap()
            .iter()
            .filter(|j| author.map_or(true, |a| j.author_id == a))
            .cloned()
            .collect();
        Ok(newest_first(rows, |j| j.created_at, limit))
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
        Ok(self.jobs.read().unwrap().iter().find(|j| j.id == id).cloned())
    }

    async fn insert_job(&self, job: &Job) -> Result<()> {
        self.jobs.write().unwrap().push(job.clone());
        Ok(())
    }

    async fn update_job(&self, job: &Job) -> Result<()> {
        let mut table = self.jobs.write().unwrap();
        if let Some(slot) = table.iter_mut().find(|j| j.id == job.id) {
            *slot = job.clone();
        }
        Ok(())
    }

    async fn delete_job(&self, id: Uuid) -> Result<()> {
        self.jobs.write().unwrap().retain(|j| j.id != id);
        Ok(())
    }

    async fn list_competitions(
        &self,
        author: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Competition>> {
        let rows: Vec<Competition> = self
            .competitions
            .read()
            .unwrap()
            .iter()
            .filter(|c| author.map_or(true, |a| c.author_id == a))
            .cloned()
            .collect();
        Ok(newest_first(rows, |c| c.created_at, limit))
    }

    async fn get_competition(&self, id: Uuid) -> Result<Option<Competition>> {
        Ok(self
            .competitions
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert_competition(&self, competition: &Competition) -> Result<()> {
        self.competitions.write().unwrap().push(competition.clone());
        Ok(())
    }

    async fn update_competition(&self, competition: &Competition) -> Result<()> {
        let mut table = self.competitions.write().unwrap();
        if let Some(slot) = table.iter_mut().find(|c| c.id == competition.id) {
            *slot = competition.clone();
        }
        Ok(())
    }

    async fn delete_competition(&self, id: Uuid) -> Result<()> {
        self.competitions.write().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn list_news(
        &self,
        author: Option<Uuid>,
        events_only: bool,
        limit: i64,
    ) -> Result<Vec<NewsItem>> {
        let rows: Vec<NewsItem> = self
            .news
            .read()
            .unwrap()
            .iter()
            .filter(|n| author.map_or(true, |a| n.author_id == a))
            .filter(|n| !events_only || n.is_event)
            .cloned()
            .collect();
        Ok(newest_first(rows, |n| n.created_at, limit))
    }

    async fn get_news(&self, id: Uuid) -> Result<Option<NewsItem>> {
        Ok(self.news.read().unwrap().iter().find(|n| n.id == id).cloned())
    }

    async fn insert_news(&self, news: &NewsItem) -> Result<()> {
        self.news.write().unwrap().push(news.clone());
        Ok(())
    }

    async fn update_news(&self, news: &NewsItem) -> Result<()> {
        let mut table = self.news.write().unwrap();
        if let Some(slot) = table.iter_mut().find(|n| n.id == news.id) {
            *slot = news.clone();
        }
        Ok(())
    }

    async fn delete_news(&self, id: Uuid) -> Result<()> {
        self.news.write().unwrap().retain(|n| n.id != id);
        Ok(())
    }

    async fn list_resources(
        &self,
        kind: ResourceKind,
        author: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Resource>> {
        let rows: Vec<Resource> = self
            .resources
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.kind == kind)
            .filter(|r| author.map_or(true, |a| r.author_id == a))
            .cloned()
            .collect();
        Ok(newest_first(rows, |r| r.created_at, limit))
    }

    async fn get_resource(&self, id: Uuid) -> Result<Option<Resource>> {
        Ok(self
            .resources
            .read()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn insert_resource(&self, resource: &Resource) -> Result<()> {
        self.resources.write().unwrap().push(resource.clone());
        Ok(())
    }

    async fn update_resource(&self, resource: &Resource) -> Result<()> {
        let mut table = self.resources.write().unwrap();
        if let Some(slot) = table.iter_mut().find(|r| r.id == resource.id) {
            *slot = resource.clone();
        }
        Ok(())
    }

    async fn delete_resource(&self, id: Uuid) -> Result<()> {
        self.resources.write().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn content_author(&self, target: TargetRef) -> Result<Option<Uuid>> {
        let id = target.target_id;
        let author = match target.target_type {
            TargetType::Post => self
                .posts
                .read()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.author_id),
            TargetType::Project => self
                .projects
                .read()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.author_id),
            TargetType::Research => self
                .research
                .read()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.author_id),
            TargetType::News => self
                .news
                .read()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.author_id),
            TargetType::Job => self
                .jobs
                .read()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.author_id),
            TargetType::Competition => self
                .competitions
                .read()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.author_id),
            TargetType::Book | TargetType::Tool | TargetType::Course | TargetType::Plugin => self
                .resources
                .read()
                .unwrap()
                .iter()
                .find(|r| r.id == id && r.kind.target_type() == target.target_type)
                .map(|r| r.author_id),
        };
        Ok(author)
    }
}

#[async_trait]
impl ApplicationStore for MemStores {
    async fn insert_application(&self, application: &JobApplication) -> Result<()> {
        self.applications.write().unwrap().push(application.clone());
        Ok(())
    }

    async fn get_application_for(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> Result<Option<JobApplication>> {
        Ok(self
            .applications
            .read()
            .unwrap()
            .iter()
            .find(|a| a.job_id == job_id && a.applicant_id == applicant_id)
            .cloned())
    }

    async fn list_applications_for_job(&self, job_id: Uuid) -> Result<Vec<JobApplication>> {
        let rows: Vec<JobApplication> = self
            .applications
            .read()
            .unwrap()
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |a| a.created_at, i64::MAX))
    }

    async fn list_applications_for_user(
        &self,
        applicant_id: Uuid,
    ) -> Result<Vec<JobApplication>> {
        let rows: Vec<JobApplication> = self
            .applications
            .read()
            .unwrap()
            .iter()
            .filter(|a| a.applicant_id == applicant_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |a| a.created_at, i64::MAX))
    }
}

#[async_trait]
impl EngagementStore for MemStores {
    async fn get_like(&self, user_id: Uuid, target: TargetRef) -> Result<Option<Like>> {
        Ok(self
            .likes
            .read()
            .unwrap()
            .iter()
            .find(|l| l.user_id == user_id && l.target == target)
            .cloned())
    }

    async fn insert_like(&self, like: &Like) -> Result<()> {
        self.likes.write().unwrap().push(like.clone());
        Ok(())
    }

    async fn delete_like(&self, id: Uuid) -> Result<()> {
        self.likes.write().unwrap().retain(|l| l.id != id);
        Ok(())
    }

    async fn count_likes(&self, target: TargetRef) -> Result<i64> {
        Ok(self
            .likes
            .read()
            .unwrap()
            .iter()
            .filter(|l| l.target == target)
            .count() as i64)
    }

    async fn get_saved(&self, user_id: Uuid, target: TargetRef) -> Result<Option<SavedItem>> {
        Ok(self
            .saved
            .read()
            .unwrap()
            .iter()
            .find(|s| s.user_id == user_id && s.target == target)
            .cloned())
    }

    async fn insert_saved(&self, item: &SavedItem) -> Result<()> {
        self.saved.write().unwrap().push(item.clone());
        Ok(())
    }

    async fn delete_saved(&self, id: Uuid) -> Result<()> {
        self.saved.write().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn list_saved(&self, user_id: Uuid) -> Result<Vec<SavedItem>> {
        let rows: Vec<SavedItem> = self
            .saved
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |s| s.created_at, i64::MAX))
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        self.comments.write().unwrap().push(comment.clone());
        Ok(())
    }

    async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>> {
        Ok(self
            .comments
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_comments(&self, target: TargetRef) -> Result<Vec<Comment>> {
        let mut rows: Vec<Comment> = self
            .comments
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.target == target)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.created_at);
        Ok(rows)
    }

    async fn update_comment(&self, comment: &Comment) -> Result<()> {
        let mut table = self.comments.write().unwrap();
        if let Some(slot) = table.iter_mut().find(|c| c.id == comment.id) {
            *slot = comment.clone();
        }
        Ok(())
    }

    async fn delete_comment(&self, id: Uuid) -> Result<()> {
        self.comments
            .write()
            .unwrap()
            .retain(|c| c.id != id && c.parent_id != Some(id));
        Ok(())
    }

    async fn insert_report(&self, report: &Report) -> Result<()> {
        self.reports.write().unwrap().push(report.clone());
        Ok(())
    }
}

#[async_trait]
impl SocialGraphStore for MemStores {
    async fn get_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<Option<Follow>> {
        Ok(self
            .follows
            .read()
            .unwrap()
            .iter()
            .find(|f| f.follower_id == follower_id && f.followee_id == followee_id)
            .cloned())
    }

    async fn get_follow_by_id(&self, id: Uuid) -> Result<Option<Follow>> {
        Ok(self
            .follows
            .read()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned())
    }

    async fn insert_follow(&self, follow: &Follow) -> Result<()> {
        self.follows.write().unwrap().push(follow.clone());
        Ok(())
    }

    async fn set_follow_status(&self, id: Uuid, status: FollowStatus) -> Result<()> {
        let mut follows = self.follows.write().unwrap();
        if let Some(f) = follows.iter_mut().find(|f| f.id == id) {
            f.status = status;
        }
        Ok(())
    }

    async fn delete_follow(&self, id: Uuid) -> Result<()> {
        self.follows.write().unwrap().retain(|f| f.id != id);
        Ok(())
    }

    async fn delete_follows_between(&self, a: Uuid, b: Uuid) -> Result<()> {
        self.follows.write().unwrap().retain(|f| {
            !((f.follower_id == a && f.followee_id == b)
                || (f.follower_id == b && f.followee_id == a))
        });
        Ok(())
    }

    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .follows
            .read()
            .unwrap()
            .iter()
            .filter(|f| f.followee_id == user_id && f.status == FollowStatus::Accepted)
            .map(|f| f.follower_id)
            .collect())
    }

    async fn list_following(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .follows
            .read()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == user_id && f.status == FollowStatus::Accepted)
            .map(|f| f.followee_id)
            .collect())
    }

    async fn count_followers(&self, user_id: Uuid) -> Result<i64> {
        Ok(self.list_followers(user_id).await?.len() as i64)
    }

    async fn count_following(&self, user_id: Uuid) -> Result<i64> {
        Ok(self.list_following(user_id).await?.len() as i64)
    }

    async fn list_incoming_requests(&self, user_id: Uuid) -> Result<Vec<Follow>> {
        let rows: Vec<Follow> = self
            .follows
            .read()
            .unwrap()
            .iter()
            .filter(|f| f.followee_id == user_id && f.status == FollowStatus::Pending)
            .cloned()
            .collect();
        Ok(newest_first(rows, |f| f.created_at, i64::MAX))
    }

    async fn get_block(
        &self,
        user_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<Option<BlockedUser>> {
        Ok(self
            .blocks
            .read()
            .unwrap()
            .iter()
            .find(|b| b.user_id == user_id && b.target_user_id == target_user_id)
            .cloned())
    }

    async fn insert_block(&self, block: &BlockedUser) -> Result<()> {
        self.blocks.write().unwrap().push(block.clone());
        Ok(())
    }

    async fn delete_block(&self, user_id: Uuid, target_user_id: Uuid) -> Result<bool> {
        let mut blocks = self.blocks.write().unwrap();
        let before = blocks.len();
        blocks.retain(|b| !(b.user_id == user_id && b.target_user_id == target_user_id));
        Ok(blocks.len() != before)
    }

    async fn list_blocks(&self, user_id: Uuid) -> Result<Vec<BlockedUser>> {
        Ok(self
            .blocks
            .read()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn is_blocked_between(&self, a: Uuid, b: Uuid) -> Result<bool> {
        Ok(self.blocks.read().unwrap().iter().any(|x| {
            (x.user_id == a && x.target_user_id == b) || (x.user_id == b && x.target_user_id == a)
        }))
    }

    async fn get_mute(&self, user_id: Uuid, target_user_id: Uuid) -> Result<Option<MutedUser>> {
        Ok(self
            .mutes
            .read()
            .unwrap()
            .iter()
            .find(|m| m.user_id == user_id && m.target_user_id == target_user_id)
            .cloned())
    }

    async fn insert_mute(&self, mute: &MutedUser) -> Result<()> {
        self.mutes.write().unwrap().push(mute.clone());
        Ok(())
    }

    async fn delete_mute(&self, user_id: Uuid, target_user_id: Uuid) -> Result<bool> {
        let mut mutes = self.mutes.write().unwrap();
        let before = mutes.len();
        mutes.retain(|m| !(m.user_id == user_id && m.target_user_id == target_user_id));
        Ok(mutes.len() != before)
    }

    async fn list_mutes(&self, user_id: Uuid) -> Result<Vec<MutedUser>> {
        Ok(self
            .mutes
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn muted_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .mutes
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.target_user_id)
            .collect())
    }
}

#[async_trait]
impl MessageStore for MemStores {
    async fn insert_message(&self, message: &Message) -> Result<()> {
        self.messages.write().unwrap().push(message.clone());
        Ok(())
    }

    async fn get_message(&self, id: Uuid) -> Result<Option<Message>> {
        Ok(self
            .messages
            .read()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn list_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>> {
        let mut rows: Vec<Message> = self
            .messages
            .read()
            .unwrap()
            .iter()
            .filter(|m| !m.deleted)
            .filter(|m| {
                (m.sender_id == a && m.receiver_id == b)
                    || (m.sender_id == b && m.receiver_id == a)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.created_at);
        Ok(rows)
    }

    async fn conversations(&self, user_id: Uuid) -> Result<Vec<ConversationRow>> {
        let messages = self.messages.read().unwrap();
        let mut by_peer: std::collections::HashMap<Uuid, ConversationRow> =
            std::collections::HashMap::new();
        for m in messages.iter().filter(|m| !m.deleted) {
            let peer = if m.sender_id == user_id {
                m.receiver_id
            } else if m.receiver_id == user_id {
                m.sender_id
            } else {
                continue;
            };
            let unread = (m.receiver_id == user_id && !m.read) as i64;
            by_peer
                .entry(peer)
                .and_modify(|row| {
                    row.unread_count += unread;
                    if m.created_at > row.last_message.created_at {
                        row.last_message = m.clone();
                    }
                })
                .or_insert_with(|| ConversationRow {
                    peer_id: peer,
                    last_message: m.clone(),
                    unread_count: unread,
                });
        }
        let mut rows: Vec<ConversationRow> = by_peer.into_values().collect();
        rows.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));
        Ok(rows)
    }

    async fn update_message(&self, message: &Message) -> Result<()> {
        let mut table = self.messages.write().unwrap();
        if let Some(slot) = table.iter_mut().find(|m| m.id == message.id) {
            *slot = message.clone();
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for MemStores {
    async fn insert_notification(&self, notification: &Notification) -> Result<()> {
        self.notifications.write().unwrap().push(notification.clone());
        Ok(())
    }

    async fn list_notifications(&self, user_id: Uuid, limit: i64) -> Result<Vec<Notification>> {
        let rows: Vec<Notification> = self
            .notifications
            .read()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |n| n.created_at, limit))
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<i64> {
        Ok(self
            .notifications
            .read()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id == user_id && !n.read)
            .count() as i64)
    }

    async fn get_notification(&self, id: Uuid) -> Result<Option<Notification>> {
        Ok(self
            .notifications
            .read()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn mark_read(&self, id: Uuid) -> Result<()> {
        let mut table = self.notifications.write().unwrap();
        if let Some(n) = table.iter_mut().find(|n| n.id == id) {
            n.read = true;
        }
        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<()> {
        let mut table = self.notifications.write().unwrap();
        for n in table.iter_mut().filter(|n| n.recipient_id == user_id) {
            n.read = true;
        }
        Ok(())
    }
}

#[async_trait]
impl UniversityStore for MemStores {
    async fn insert_membership(&self, membership: &UniversityMembership) -> Result<()> {
        self.memberships.write().unwrap().push(membership.clone());
        Ok(())
    }

    async fn get_membership(&self, id: Uuid) -> Result<Option<UniversityMembership>> {
        Ok(self
            .memberships
            .read()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn find_membership(
        &self,
        user_id: Uuid,
        university: &str,
    ) -> Result<Option<UniversityMembership>> {
        Ok(self
            .memberships
            .read()
            .unwrap()
            .iter()
            .filter(|m| {
                m.user_id == user_id
                    && m.university.eq_ignore_ascii_case(university)
                    && m.status != MembershipStatus::Rejected
            })
            .max_by_key(|m| m.created_at)
            .cloned())
    }

    async fn list_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UniversityMembership>> {
        let rows: Vec<UniversityMembership> = self
            .memberships
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |m| m.created_at, i64::MAX))
    }

    async fn set_membership_status(&self, id: Uuid, status: MembershipStatus) -> Result<()> {
        let mut table = self.memberships.write().unwrap();
        if let Some(m) = table.iter_mut().find(|m| m.id == id) {
            m.status = status;
        }
        Ok(())
    }
}
