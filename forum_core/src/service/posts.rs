use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::cascade::HierarchyDenormalizer;
use crate::{
    config::ForumSettings,
    content::{is_blank, strip_tags, ContentRenderer, EscapingRenderer},
    entity::prelude::*,
    error::StorageError,
    flood::{check_flood_interval, check_hourly_limit},
    ids::{ForumId, PostId, TopicId, UserId},
    repo::{
        ForumRepo, NewPost, PostForEdit, PostRepo, PostWithTopic, Quote, SeaOrmStore, TopicRepo,
    },
    session::ActorContext,
};

/// How many of a user's posts profile pages show.
pub const DEFAULT_LATEST_LIMIT: u64 = 5;
/// How many posts the reply form shows underneath.
pub const DEFAULT_REVIEW_LIMIT: u64 = 10;

#[derive(Debug, Error)]
pub enum PostsServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("You must wait {seconds_remaining} more second(s) till you can post a reply")]
    Flood { seconds_remaining: u64 },

    #[error("You are only allowed to post {max_per_hour} time(s) per hour")]
    RateLimit { max_per_hour: u32 },

    #[error("topic not found")]
    TopicNotFound,

    #[error("post not found")]
    PostNotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PostsServiceError {
    /// Rejections are the user's to fix; everything else is ours.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            PostsServiceError::Validation(_)
                | PostsServiceError::Flood { .. }
                | PostsServiceError::RateLimit { .. }
        )
    }
}

fn topic_lookup(error: StorageError) -> PostsServiceError {
    if error.is_not_found() {
        PostsServiceError::TopicNotFound
    } else {
        error.into()
    }
}

/// A reply as submitted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub content: String,
    pub topic_id: TopicId,
    pub user_id: UserId,
    pub user_ip: String,
}

/// The opening post of a freshly created topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstPost {
    pub forum_id: ForumId,
    pub user_id: UserId,
    pub user_ip: String,
    pub content: String,
}

#[derive(Clone)]
pub struct PostsService {
    posts: Arc<dyn PostRepo>,
    topics: Arc<dyn TopicRepo>,
    renderer: Arc<dyn ContentRenderer>,
    cascade: HierarchyDenormalizer,
    settings: ForumSettings,
}

impl PostsService {
    pub fn new(db: DatabaseConnection, settings: ForumSettings) -> Self {
        let store = Arc::new(SeaOrmStore::new(db));
        Self::with_repos(store.clone(), store.clone(), store, settings)
    }

    pub fn with_repos(
        posts: Arc<dyn PostRepo>,
        topics: Arc<dyn TopicRepo>,
        forums: Arc<dyn ForumRepo>,
        settings: ForumSettings,
    ) -> Self {
        let cascade = HierarchyDenormalizer::new(posts.clone(), topics.clone(), forums);
        Self {
            posts,
            topics,
            renderer: Arc::new(EscapingRenderer),
            cascade,
            settings,
        }
    }

    /// Swaps the default HTML-escaping renderer for another markup.
    pub fn with_renderer(mut self, renderer: Arc<dyn ContentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn settings(&self) -> ForumSettings {
        self.settings
    }

    /// Validates, rate-limits and stores a reply, then refreshes the
    /// topic/forum "latest post" pointers.
    ///
    /// Rejections are checked in order: empty content, flood interval, hourly
    /// cap. Admins skip the last two. When the pointer refresh fails the post
    /// is already stored and the error is still returned.
    pub async fn submit_post(
        &self,
        draft: PostDraft,
        actor: &ActorContext,
        now: DateTime<Utc>,
    ) -> Result<PostId, PostsServiceError> {
        self.admit(&draft.content, actor, now)?;

        let topic = self
            .topics
            .find(draft.topic_id)
            .await
            .map_err(topic_lookup)?;

        let content = strip_tags(&draft.content);
        let content_html = self.renderer.render(&self.renderer.clean(&content));

        let post_id = self
            .posts
            .insert(NewPost {
                topic_id: topic.id,
                forum_id: Some(topic.forum_id),
                user_id: draft.user_id,
                user_ip: draft.user_ip,
                content,
                content_html,
                created_at: now,
            })
            .await
            .map_err(topic_lookup)?;

        info!(%post_id, topic_id = %topic.id, user_id = %draft.user_id, "post created");

        self.cascade
            .propagate(topic.id, post_id, draft.user_id)
            .await?;

        Ok(post_id)
    }

    fn admit(
        &self,
        content: &str,
        actor: &ActorContext,
        now: DateTime<Utc>,
    ) -> Result<(), PostsServiceError> {
        if is_blank(content) {
            debug!("post rejected: empty content");
            return Err(PostsServiceError::Validation("content required".to_string()));
        }

        if actor.is_admin {
            return Ok(());
        }

        let seconds_remaining =
            check_flood_interval(&actor.history, self.settings.post_flood_interval, now);
        if seconds_remaining > 0 {
            debug!(seconds_remaining, "post rejected: flood interval");
            return Err(PostsServiceError::Flood { seconds_remaining });
        }

        if check_hourly_limit(&actor.history, self.settings.posts_per_hour, now) {
            debug!(max_per_hour = self.settings.posts_per_hour, "post rejected: hourly limit");
            return Err(PostsServiceError::RateLimit {
                max_per_hour: self.settings.posts_per_hour,
            });
        }

        Ok(())
    }

    /// Stores the opening post of a topic created by the caller.
    ///
    /// No rate limiting and no pointer refresh: topic creation owns both. The
    /// insert still refreshes the topic and forum post counters.
    pub async fn add_first_post(
        &self,
        topic_id: TopicId,
        first: FirstPost,
        now: DateTime<Utc>,
    ) -> Result<PostId, PostsServiceError> {
        let content = self.renderer.clean(&first.content);
        let content_html = self.renderer.render(&content);

        let post_id = self
            .posts
            .insert(NewPost {
                topic_id,
                forum_id: Some(first.forum_id),
                user_id: first.user_id,
                user_ip: first.user_ip,
                content,
                content_html,
                created_at: now,
            })
            .await
            .map_err(topic_lookup)?;

        info!(%post_id, %topic_id, user_id = %first.user_id, "first post created");
        Ok(post_id)
    }

    /// Newest posts by a user, each with its topic.
    pub async fn latest_by_user(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<PostWithTopic>, PostsServiceError> {
        Ok(self.posts.latest_by_user(user_id, limit).await?)
    }

    pub async fn post_for_edit(&self, post_id: PostId) -> Result<PostForEdit, PostsServiceError> {
        self.posts
            .find_for_edit(post_id)
            .await?
            .ok_or(PostsServiceError::PostNotFound)
    }

    pub async fn quote(&self, post_id: PostId) -> Result<Quote, PostsServiceError> {
        self.posts
            .find_quote(post_id)
            .await?
            .ok_or(PostsServiceError::PostNotFound)
    }

    /// Most recent posts of a topic, newest first.
    pub async fn topic_review(
        &self,
        topic_id: TopicId,
        limit: u64,
    ) -> Result<Vec<ForumPostModel>, PostsServiceError> {
        Ok(self.posts.topic_review(topic_id, limit).await?)
    }

    /// All post ids of a topic in reading order, for page calculations.
    pub async fn ids_for_paging(&self, topic_id: TopicId) -> Result<Vec<PostId>, PostsServiceError> {
        Ok(self.posts.ids_for_topic(topic_id).await?)
    }
}
