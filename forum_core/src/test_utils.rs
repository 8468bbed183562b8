use chrono::Utc;
use sea_orm_migration::MigratorTrait;

use crate::{
    entity::prelude::*,
    ids::{ForumId, TopicId, UserId},
    models::migrator::Migrator,
    repo::{timestamp, NewPost},
};

/// Fresh in-memory database with every migration applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn create_test_forum(db: &DatabaseConnection, parent_id: Option<ForumId>) -> ForumId {
    let forum_id = ForumId::new();
    let forum = ForumActiveModel {
        id: Set(forum_id),
        parent_id: Set(parent_id),
        title: Set(format!("Forum {forum_id}")),
        slug: Set(format!("forum-{forum_id}")),
        last_topic_id: Set(None),
        last_post_id: Set(None),
        last_user_id: Set(None),
        post_count: Set(0),
        created_at: Set(timestamp(Utc::now())),
    };
    Forum::insert(forum).exec(db).await.unwrap();
    forum_id
}

pub async fn create_test_topic(db: &DatabaseConnection, forum_id: ForumId) -> TopicId {
    let topic_id = TopicId::new();
    let topic = ForumTopicActiveModel {
        id: Set(topic_id),
        forum_id: Set(forum_id),
        user_id: Set(UserId::new()),
        title: Set("Test Topic".to_string()),
        slug: Set(format!("test-topic-{topic_id}")),
        last_post_id: Set(None),
        last_user_id: Set(None),
        post_count: Set(0),
        created_at: Set(timestamp(Utc::now())),
    };
    ForumTopic::insert(topic).exec(db).await.unwrap();
    topic_id
}

/// Sets a forum's stored post count directly, bypassing the cascade.
pub async fn set_forum_post_count(db: &DatabaseConnection, forum_id: ForumId, count: i64) {
    let forum = Forum::find_by_id(forum_id).one(db).await.unwrap().unwrap();
    let mut forum: ForumActiveModel = forum.into();
    forum.post_count = Set(count);
    forum.update(db).await.unwrap();
}

pub fn new_post(topic_id: TopicId, forum_id: Option<ForumId>, content: &str) -> NewPost {
    NewPost {
        topic_id,
        forum_id,
        user_id: UserId::new(),
        user_ip: "127.0.0.1".to_string(),
        content: content.to_string(),
        content_html: content.to_string(),
        created_at: Utc::now(),
    }
}
