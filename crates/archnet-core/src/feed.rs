//! Unified feed aggregation.
//!
//! Fans out to the six feed sources, normalizes each row into a tagged
//! `FeedItem`, drops items from muted authors, merges by `created_at`
//! descending and truncates. Authors are hydrated with one batched lookup.
//! No snapshot isolation spans the source queries; the merge is best-effort
//! by design.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::ports::{ContentStore, SocialGraphStore, Stores, UserStore};
use crate::proto::{FeedItem, PublicUser};
use crate::types::TargetType;

const SUMMARY_MAX: usize = 280;

struct RawItem {
    feed_type: TargetType,
    id: Uuid,
    author_id: Uuid,
    title: Option<String>,
    summary: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

fn summarize(text: &str) -> String {
    if text.chars().count() <= SUMMARY_MAX {
        return text.to_string();
    }
    let cut: String = text.chars().take(SUMMARY_MAX).collect();
    format!("{cut}…")
}

/// Build the unified feed for `requester`.
pub async fn build_feed(stores: &Stores, requester: Uuid, limit: i64) -> Result<Vec<FeedItem>> {
    let muted: HashSet<Uuid> = stores
        .social
        .muted_ids(requester)
        .await?
        .into_iter()
        .collect();

    let mut raw: Vec<RawItem> = Vec::new();

    for post in stores.content.list_posts(None, limit).await? {
        raw.push(RawItem {
            feed_type: TargetType::Post,
            id: post.id,
            author_id: post.author_id,
            title: None,
            summary: summarize(&post.content),
            image_url: post.image_url,
            created_at: post.created_at,
        });
    }
    for project in stores.content.list_projects(None, limit).await? {
        raw.push(RawItem {
            feed_type: TargetType::Project,
            id: project.id,
            author_id: project.author_id,
            title: Some(project.title),
            summary: summarize(&project.description),
            image_url: project.cover_url,
            created_at: project.created_at,
        });
    }
    for research in stores.content.list_research(None, limit).await? {
        raw.push(RawItem {
            feed_type: TargetType::Research,
            id: research.id,
            author_id: research.author_id,
            title: Some(research.title),
            summary: summarize(&research.abstract_text),
            image_url: None,
            created_at: research.created_at,
        });
    }
    for news in stores.content.list_news(None, false, limit).await? {
        raw.push(RawItem {
            feed_type: TargetType::News,
            id: news.id,
            author_id: news.author_id,
            title: Some(news.title),
            summary: summarize(&news.body),
            image_url: None,
            created_at: news.created_at,
        });
    }
    for job in stores.content.list_jobs(None, limit).await? {
        raw.push(RawItem {
            feed_type: TargetType::Job,
            id: job.id,
            author_id: job.author_id,
            title: Some(job.title),
            summary: summarize(&job.description),
            image_url: None,
            created_at: job.created_at,
        });
    }
    for competition in stores.content.list_competitions(None, limit).await? {
        raw.push(RawItem {
            feed_type: TargetType::Competition,
            id: competition.id,
            author_id: competition.author_id,
            title: Some(competition.title),
            summary: summarize(&competition.description),
            image_url: None,
            created_at: competition.created_at,
        });
    }

    raw.retain(|item| !muted.contains(&item.author_id));
    raw.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    raw.truncate(limit as usize);

    // Batched author hydration; one lookup for all distinct ids.
    let author_ids: Vec<Uuid> = {
        let distinct: HashSet<Uuid> = raw.iter().map(|i| i.author_id).collect();
        distinct.into_iter().collect()
    };
    let authors: HashMap<Uuid, PublicUser> = stores
        .users
        .get_users_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, PublicUser::from(u)))
        .collect();

    // Rows whose author has been deleted drop out of the feed.
    Ok(raw
        .into_iter()
        .filter_map(|item| {
            let author = authors.get(&item.author_id)?.clone();
            Some(FeedItem {
                feed_type: item.feed_type,
                id: item.id,
                author,
                title: item.title,
                summary: item.summary,
                image_url: item.image_url,
                created_at: item.created_at,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::MemStores;
    use crate::types::*;
    use chrono::{Duration, Utc};

    fn user(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.into(),
            email: format!("{username}@archnet.jo"),
            password_hash: "x".into(),
            full_name: username.into(),
            role: Role::Engineer,
            bio: None,
            location: None,
            website: None,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    fn post(author: Uuid, age_minutes: i64) -> Post {
        let at = Utc::now() - Duration::minutes(age_minutes);
        Post {
            id: Uuid::new_v4(),
            author_id: author,
            content: "site visit notes".into(),
            image_url: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn project(author: Uuid, age_minutes: i64) -> Project {
        let at = Utc::now() - Duration::minutes(age_minutes);
        Project {
            id: Uuid::new_v4(),
            author_id: author,
            title: "Wadi Rum visitor centre".into(),
            description: "rammed earth study".into(),
            location: None,
            year: Some(2025),
            cover_url: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn feed_merges_sources_newest_first() {
        let stores = MemStores::stores();
        let reader = user("reader");
        let author = user("author");
        stores.users.insert_user(&reader).await.unwrap();
        stores.users.insert_user(&author).await.unwrap();

        stores.content.insert_post(&post(author.id, 30)).await.unwrap();
        let newest = post(author.id, 1);
        stores.content.insert_post(&newest).await.unwrap();
        stores
            .content
            .insert_project(&project(author.id, 10))
            .await
            .unwrap();

        let feed = build_feed(&stores, reader.id, 20).await.unwrap();
        assert_eq!(feed.len(), 3);
        assert_eq!(feed[0].id, newest.id);
        assert_eq!(feed[1].feed_type, TargetType::Project);
        assert!(feed
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn feed_excludes_muted_authors() {
        let stores = MemStores::stores();
        let reader = user("reader");
        let loud = user("loud");
        let quiet = user("quiet");
        for u in [&reader, &loud, &quiet] {
            stores.users.insert_user(u).await.unwrap();
        }
        stores.content.insert_post(&post(loud.id, 1)).await.unwrap();
        stores.content.insert_post(&post(quiet.id, 2)).await.unwrap();
        stores
            .social
            .insert_mute(&MutedUser {
                id: Uuid::new_v4(),
                user_id: reader.id,
                target_user_id: loud.id,
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let feed = build_feed(&stores, reader.id, 20).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].author.id, quiet.id);
    }

    #[tokio::test]
    async fn feed_truncates_to_limit() {
        let stores = MemStores::stores();
        let reader = user("reader");
        let author = user("author");
        stores.users.insert_user(&reader).await.unwrap();
        stores.users.insert_user(&author).await.unwrap();
        for age in 0..10 {
            stores.content.insert_post(&post(author.id, age)).await.unwrap();
        }
        let feed = build_feed(&stores, reader.id, 4).await.unwrap();
        assert_eq!(feed.len(), 4);
    }

    #[test]
    fn long_summaries_are_cut() {
        let long = "م".repeat(400);
        let s = summarize(&long);
        assert!(s.chars().count() <= SUMMARY_MAX + 1);
        assert!(s.ends_with('…'));
    }
}
