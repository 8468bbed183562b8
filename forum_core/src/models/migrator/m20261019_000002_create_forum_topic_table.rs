use sea_orm_migration::{prelude::*, schema::*};

use super::m20261019_000001_create_forum_table::Forum;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumTopic::Table)
                    .col(pk_uuid(ForumTopic::Id))
                    .col(uuid(ForumTopic::ForumId))
                    .col(uuid(ForumTopic::UserId))
                    .col(string(ForumTopic::Title))
                    .col(string(ForumTopic::Slug))
                    .col(uuid_null(ForumTopic::LastPostId))
                    .col(uuid_null(ForumTopic::LastUserId))
                    .col(big_integer(ForumTopic::PostCount).default(0))
                    .col(string(ForumTopic::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-forum-topic-forum_id")
                            .from(ForumTopic::Table, ForumTopic::ForumId)
                            .to(Forum::Table, Forum::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_topic_forum_id")
                    .table(ForumTopic::Table)
                    .col(ForumTopic::ForumId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForumTopic::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ForumTopic {
    Table,
    Id,
    ForumId,
    UserId,
    Title,
    Slug,
    LastPostId,
    LastUserId,
    PostCount,
    CreatedAt,
}
