#[cfg(test)]
mod entity_tests {
    use crate::entity::prelude::*;
    use crate::ids::*;
    use crate::test_utils::{create_test_forum, create_test_topic, setup_test_db};

    fn post_model(topic_id: TopicId, user_id: UserId, created_at: &str) -> ForumPostActiveModel {
        ForumPostActiveModel {
            id: Set(PostId::new()),
            topic_id: Set(topic_id),
            forum_id: Set(None),
            user_id: Set(user_id),
            user_ip: Set("127.0.0.1".to_string()),
            content: Set("body".to_string()),
            content_html: Set("body".to_string()),
            created_at: Set(created_at.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_forum() {
        let db = setup_test_db().await;

        let forum_id = ForumId::new();
        let forum = ForumActiveModel {
            id: Set(forum_id),
            parent_id: Set(None),
            title: Set("General".to_string()),
            slug: Set("general".to_string()),
            last_topic_id: Set(None),
            last_post_id: Set(None),
            last_user_id: Set(None),
            post_count: Set(0),
            created_at: Set("2026-10-19T12:00:00.000000Z".to_string()),
        };

        Forum::insert(forum)
            .exec(&db)
            .await
            .expect("Failed to insert forum");

        let found = Forum::find_by_id(forum_id)
            .one(&db)
            .await
            .expect("Failed to query forum")
            .expect("forum missing");

        assert_eq!(found.title, "General");
        assert_eq!(found.slug, "general");
        assert_eq!(found.post_count, 0);
        assert_eq!(found.parent(), None);
    }

    #[tokio::test]
    async fn test_nil_parent_is_top_level() {
        let db = setup_test_db().await;

        let parent_id = create_test_forum(&db, None).await;
        let child_id = create_test_forum(&db, Some(parent_id)).await;
        let legacy_id = create_test_forum(&db, Some(ForumId::nil())).await;

        let child = Forum::find_by_id(child_id).one(&db).await.unwrap().unwrap();
        assert_eq!(child.parent(), Some(parent_id));

        let legacy = Forum::find_by_id(legacy_id).one(&db).await.unwrap().unwrap();
        assert_eq!(legacy.parent_id, Some(ForumId::nil()));
        assert_eq!(legacy.parent(), None);
    }

    #[tokio::test]
    async fn test_topic_belongs_to_forum() {
        let db = setup_test_db().await;

        let forum_id = create_test_forum(&db, None).await;
        let topic_id = create_test_topic(&db, forum_id).await;

        let topic = ForumTopic::find_by_id(topic_id).one(&db).await.unwrap().unwrap();
        let forum = topic
            .find_related(Forum)
            .one(&db)
            .await
            .unwrap()
            .expect("topic without forum");

        assert_eq!(forum.id, forum_id);

        let topics = forum.find_related(ForumTopic).all(&db).await.unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].id, topic_id);
    }

    #[tokio::test]
    async fn test_posts_of_topic_in_order() {
        let db = setup_test_db().await;

        let forum_id = create_test_forum(&db, None).await;
        let topic_id = create_test_topic(&db, forum_id).await;
        let user_id = UserId::new();

        for created_at in [
            "2026-10-19T12:00:02.000000Z",
            "2026-10-19T12:00:00.000000Z",
            "2026-10-19T12:00:01.000000Z",
        ] {
            ForumPost::insert(post_model(topic_id, user_id, created_at))
                .exec(&db)
                .await
                .unwrap();
        }

        let posts = ForumPost::find()
            .filter(ForumPostColumn::TopicId.eq(topic_id))
            .order_by_asc(ForumPostColumn::CreatedAt)
            .all(&db)
            .await
            .unwrap();

        let stamps: Vec<_> = posts.iter().map(|post| post.created_at.as_str()).collect();
        assert_eq!(
            stamps,
            vec![
                "2026-10-19T12:00:00.000000Z",
                "2026-10-19T12:00:01.000000Z",
                "2026-10-19T12:00:02.000000Z",
            ]
        );

        let topic = posts[0]
            .find_related(ForumTopic)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(topic.id, topic_id);
    }

    #[tokio::test]
    async fn test_update_forum_pointers() {
        let db = setup_test_db().await;

        let forum_id = create_test_forum(&db, None).await;
        let topic_id = TopicId::new();
        let post_id = PostId::new();

        let forum = Forum::find_by_id(forum_id).one(&db).await.unwrap().unwrap();
        let mut forum: ForumActiveModel = forum.into();
        forum.last_topic_id = Set(Some(topic_id));
        forum.last_post_id = Set(Some(post_id));
        forum.post_count = Set(12);
        forum.update(&db).await.unwrap();

        let found = Forum::find_by_id(forum_id).one(&db).await.unwrap().unwrap();
        assert_eq!(found.last_topic_id, Some(topic_id));
        assert_eq!(found.last_post_id, Some(post_id));
        assert_eq!(found.last_user_id, None);
        assert_eq!(found.post_count, 12);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let db = setup_test_db().await;

        let forum_id = create_test_forum(&db, None).await;
        let topic_id = create_test_topic(&db, forum_id).await;

        let post = post_model(topic_id, UserId::new(), "2026-10-19T12:00:00.000000Z");
        let post_id = post.id.clone().unwrap();
        ForumPost::insert(post).exec(&db).await.unwrap();

        ForumPost::delete_by_id(post_id).exec(&db).await.unwrap();

        let found = ForumPost::find_by_id(post_id).one(&db).await.unwrap();
        assert!(found.is_none());
    }
}
