use sea_orm_migration::{prelude::*, schema::*};

use super::m20261019_000002_create_forum_topic_table::ForumTopic;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumPost::Table)
                    .col(pk_uuid(ForumPost::Id))
                    .col(uuid(ForumPost::TopicId))
                    .col(uuid_null(ForumPost::ForumId))
                    .col(uuid(ForumPost::UserId))
                    .col(string(ForumPost::UserIp))
                    .col(text(ForumPost::Content))
                    .col(text(ForumPost::ContentHtml))
                    .col(string(ForumPost::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-forum-post-topic_id")
                            .from(ForumPost::Table, ForumPost::TopicId)
                            .to(ForumTopic::Table, ForumTopic::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on topic_id
        manager
            .create_index(
                Index::create()
                    .name("idx_forum_post_topic_id")
                    .table(ForumPost::Table)
                    .col(ForumPost::TopicId)
                    .to_owned(),
            )
            .await?;

        // Create index on user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_forum_post_user_id")
                    .table(ForumPost::Table)
                    .col(ForumPost::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_post_created_at")
                    .table(ForumPost::Table)
                    .col(ForumPost::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForumPost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ForumPost {
    Table,
    Id,
    TopicId,
    ForumId,
    UserId,
    UserIp,
    Content,
    ContentHtml,
    CreatedAt,
}
