use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::StorageError,
    ids::{PostId, TopicId, UserId},
    repo::{ForumRepo, LastActivity, PostRepo, TopicRepo},
};

/// Pushes "latest post" pointers up topic -> forum -> parent forum.
///
/// Steps run one after another with no transaction around them. The first
/// failing step aborts the rest and whatever was already written stays.
#[derive(Clone)]
pub struct HierarchyDenormalizer {
    posts: Arc<dyn PostRepo>,
    topics: Arc<dyn TopicRepo>,
    forums: Arc<dyn ForumRepo>,
}

impl HierarchyDenormalizer {
    pub fn new(
        posts: Arc<dyn PostRepo>,
        topics: Arc<dyn TopicRepo>,
        forums: Arc<dyn ForumRepo>,
    ) -> Self {
        Self {
            posts,
            topics,
            forums,
        }
    }

    pub async fn propagate(
        &self,
        topic_id: TopicId,
        post_id: PostId,
        user_id: UserId,
    ) -> Result<(), StorageError> {
        let result = self.run(topic_id, post_id, user_id).await;

        if let Err(error) = &result {
            warn!(%topic_id, %post_id, %error, "denormalization cascade aborted");
        }

        result
    }

    async fn run(
        &self,
        topic_id: TopicId,
        post_id: PostId,
        user_id: UserId,
    ) -> Result<(), StorageError> {
        self.topics.set_last_post(topic_id, post_id, user_id).await?;
        debug!(%topic_id, %post_id, "topic last post updated");

        let topic = self.topics.find(topic_id).await?;
        let forum = self.forums.find(topic.forum_id).await?;

        let post_count = self.posts.count_in_forum(forum.id).await?;

        let activity = LastActivity {
            topic_id,
            post_id,
            user_id,
        };
        self.forums
            .set_last_activity(forum.id, activity, Some(post_count))
            .await?;
        debug!(forum_id = %forum.id, post_count, "forum activity updated");

        // Parent forums only receive the pointers; their post_count is not recomputed.
        if let Some(parent_id) = forum.parent() {
            self.forums
                .set_last_activity(parent_id, activity, None)
                .await?;
            debug!(%parent_id, "parent forum activity updated");
        }

        Ok(())
    }
}
