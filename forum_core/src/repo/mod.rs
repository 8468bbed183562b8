//! Narrow storage ports for the forum hierarchy.
//!
//! Each trait carries only the reads and writes the services actually perform.
//! [`SeaOrmStore`] implements all of them over one database connection.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entity::prelude::*,
    error::StorageError,
    ids::{ForumId, PostId, TopicId, UserId},
};

mod store;

pub use store::SeaOrmStore;

/// A post ready to be written. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub topic_id: TopicId,
    pub forum_id: Option<ForumId>,
    pub user_id: UserId,
    pub user_ip: String,
    pub content: String,
    pub content_html: String,
    pub created_at: DateTime<Utc>,
}

/// The "latest activity" pointers copied onto forums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastActivity {
    pub topic_id: TopicId,
    pub post_id: PostId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub id: TopicId,
    pub title: String,
    pub slug: String,
    pub user_id: UserId,
}

impl From<ForumTopicModel> for TopicSummary {
    fn from(topic: ForumTopicModel) -> Self {
        Self {
            id: topic.id,
            title: topic.title,
            slug: topic.slug,
            user_id: topic.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithTopic {
    pub post: ForumPostModel,
    pub topic: TopicSummary,
}

/// Everything the edit form needs to render breadcrumbs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForEdit {
    pub post: ForumPostModel,
    pub topic: ForumTopicModel,
    pub forum: ForumModel,
    pub parent: Option<ForumModel>,
}

/// What the reply form needs to quote a post.
///
/// Carries the author's id; resolving it to a display name belongs to the
/// user directory, which this crate does not own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub content: String,
    pub created_at: String,
    pub user_id: UserId,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    /// Writes the post and refreshes the post counters of its topic and, when
    /// `forum_id` is set, its forum. A missing topic is `NotFound`.
    async fn insert(&self, post: NewPost) -> Result<PostId, StorageError>;

    /// Posts whose topic belongs to `forum_id`.
    async fn count_in_forum(&self, forum_id: ForumId) -> Result<u64, StorageError>;

    async fn latest_by_user(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<PostWithTopic>, StorageError>;

    async fn find_for_edit(&self, post_id: PostId) -> Result<Option<PostForEdit>, StorageError>;

    async fn find_quote(&self, post_id: PostId) -> Result<Option<Quote>, StorageError>;

    /// Newest posts of a topic first.
    async fn topic_review(
        &self,
        topic_id: TopicId,
        limit: u64,
    ) -> Result<Vec<ForumPostModel>, StorageError>;

    /// Every post id of a topic, oldest first.
    async fn ids_for_topic(&self, topic_id: TopicId) -> Result<Vec<PostId>, StorageError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepo: Send + Sync {
    async fn find(&self, topic_id: TopicId) -> Result<ForumTopicModel, StorageError>;

    async fn set_last_post(
        &self,
        topic_id: TopicId,
        post_id: PostId,
        user_id: UserId,
    ) -> Result<(), StorageError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForumRepo: Send + Sync {
    async fn find(&self, forum_id: ForumId) -> Result<ForumModel, StorageError>;

    /// Copies `activity` onto the forum. `post_count` is left alone when `None`.
    async fn set_last_activity(
        &self,
        forum_id: ForumId,
        activity: LastActivity,
        post_count: Option<u64>,
    ) -> Result<(), StorageError>;
}

/// Stored timestamps are fixed-width RFC 3339 so they sort as text.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
