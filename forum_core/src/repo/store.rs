use async_trait::async_trait;
use sea_orm::sea_query::Expr;

use super::{
    timestamp, ForumRepo, LastActivity, NewPost, PostForEdit, PostRepo, PostWithTopic, Quote,
    TopicRepo,
};
use crate::{
    entity::prelude::*,
    error::StorageError,
    ids::{ForumId, PostId, TopicId, UserId},
};

#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn count_value(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

async fn posts_in_forum<C: ConnectionTrait>(conn: &C, forum_id: ForumId) -> Result<u64, DbErr> {
    ForumPost::find()
        .inner_join(ForumTopic)
        .filter(ForumTopicColumn::ForumId.eq(forum_id))
        .count(conn)
        .await
}

#[async_trait]
impl PostRepo for SeaOrmStore {
    async fn insert(&self, post: NewPost) -> Result<PostId, StorageError> {
        let txn = self.db.begin().await?;

        // Checked up front so a missing topic is NotFound rather than a foreign key failure.
        if ForumTopic::find_by_id(post.topic_id).one(&txn).await?.is_none() {
            return Err(StorageError::not_found("topic", post.topic_id));
        }

        let post_id = PostId::new();
        let model = ForumPostActiveModel {
            id: Set(post_id),
            topic_id: Set(post.topic_id),
            forum_id: Set(post.forum_id),
            user_id: Set(post.user_id),
            user_ip: Set(post.user_ip),
            content: Set(post.content),
            content_html: Set(post.content_html),
            created_at: Set(timestamp(post.created_at)),
        };
        ForumPost::insert(model).exec(&txn).await?;

        // Counter caches
        let topic_posts = ForumPost::find()
            .filter(ForumPostColumn::TopicId.eq(post.topic_id))
            .count(&txn)
            .await?;

        ForumTopic::update_many()
            .col_expr(ForumTopicColumn::PostCount, Expr::value(count_value(topic_posts)))
            .filter(ForumTopicColumn::Id.eq(post.topic_id))
            .exec(&txn)
            .await?;

        if let Some(forum_id) = post.forum_id {
            let forum_posts = posts_in_forum(&txn, forum_id).await?;

            let updated = Forum::update_many()
                .col_expr(ForumColumn::PostCount, Expr::value(count_value(forum_posts)))
                .filter(ForumColumn::Id.eq(forum_id))
                .exec(&txn)
                .await?;

            if updated.rows_affected == 0 {
                // dropping txn rolls the insert back
                return Err(StorageError::not_found("forum", forum_id));
            }
        }

        txn.commit().await?;
        Ok(post_id)
    }

    async fn count_in_forum(&self, forum_id: ForumId) -> Result<u64, StorageError> {
        Ok(posts_in_forum(&self.db, forum_id).await?)
    }

    async fn latest_by_user(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<PostWithTopic>, StorageError> {
        let rows = ForumPost::find()
            .filter(ForumPostColumn::UserId.eq(user_id))
            .order_by_desc(ForumPostColumn::CreatedAt)
            .order_by_desc(ForumPostColumn::Id)
            .limit(limit)
            .find_also_related(ForumTopic)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(post, topic)| {
                topic.map(|topic| PostWithTopic {
                    post,
                    topic: topic.into(),
                })
            })
            .collect())
    }

    async fn find_for_edit(&self, post_id: PostId) -> Result<Option<PostForEdit>, StorageError> {
        let Some(post) = ForumPost::find_by_id(post_id).one(&self.db).await? else {
            return Ok(None);
        };

        let topic = TopicRepo::find(self, post.topic_id).await?;
        let forum = ForumRepo::find(self, topic.forum_id).await?;
        let parent = match forum.parent() {
            Some(parent_id) => Forum::find_by_id(parent_id).one(&self.db).await?,
            None => None,
        };

        Ok(Some(PostForEdit {
            post,
            topic,
            forum,
            parent,
        }))
    }

    async fn find_quote(&self, post_id: PostId) -> Result<Option<Quote>, StorageError> {
        let quote = ForumPost::find_by_id(post_id)
            .one(&self.db)
            .await?
            .map(|post| Quote {
                content: post.content,
                created_at: post.created_at,
                user_id: post.user_id,
            });

        Ok(quote)
    }

    async fn topic_review(
        &self,
        topic_id: TopicId,
        limit: u64,
    ) -> Result<Vec<ForumPostModel>, StorageError> {
        let posts = ForumPost::find()
            .filter(ForumPostColumn::TopicId.eq(topic_id))
            .order_by_desc(ForumPostColumn::CreatedAt)
            .order_by_desc(ForumPostColumn::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(posts)
    }

    async fn ids_for_topic(&self, topic_id: TopicId) -> Result<Vec<PostId>, StorageError> {
        let ids = ForumPost::find()
            .select_only()
            .column(ForumPostColumn::Id)
            .filter(ForumPostColumn::TopicId.eq(topic_id))
            .order_by_asc(ForumPostColumn::CreatedAt)
            .order_by_asc(ForumPostColumn::Id)
            .into_tuple::<PostId>()
            .all(&self.db)
            .await?;

        Ok(ids)
    }
}

#[async_trait]
impl TopicRepo for SeaOrmStore {
    async fn find(&self, topic_id: TopicId) -> Result<ForumTopicModel, StorageError> {
        ForumTopic::find_by_id(topic_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StorageError::not_found("topic", topic_id))
    }

    async fn set_last_post(
        &self,
        topic_id: TopicId,
        post_id: PostId,
        user_id: UserId,
    ) -> Result<(), StorageError> {
        let updated = ForumTopic::update_many()
            .col_expr(ForumTopicColumn::LastPostId, Expr::value(post_id))
            .col_expr(ForumTopicColumn::LastUserId, Expr::value(user_id))
            .filter(ForumTopicColumn::Id.eq(topic_id))
            .exec(&self.db)
            .await?;

        if updated.rows_affected == 0 {
            return Err(StorageError::not_found("topic", topic_id));
        }
        Ok(())
    }
}

#[async_trait]
impl ForumRepo for SeaOrmStore {
    async fn find(&self, forum_id: ForumId) -> Result<ForumModel, StorageError> {
        Forum::find_by_id(forum_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StorageError::not_found("forum", forum_id))
    }

    async fn set_last_activity(
        &self,
        forum_id: ForumId,
        activity: LastActivity,
        post_count: Option<u64>,
    ) -> Result<(), StorageError> {
        let mut update = Forum::update_many()
            .col_expr(ForumColumn::LastTopicId, Expr::value(activity.topic_id))
            .col_expr(ForumColumn::LastPostId, Expr::value(activity.post_id))
            .col_expr(ForumColumn::LastUserId, Expr::value(activity.user_id));

        if let Some(count) = post_count {
            update = update.col_expr(ForumColumn::PostCount, Expr::value(count_value(count)));
        }

        let updated = update
            .filter(ForumColumn::Id.eq(forum_id))
            .exec(&self.db)
            .await?;

        if updated.rows_affected == 0 {
            return Err(StorageError::not_found("forum", forum_id));
        }
        Ok(())
    }
}
