use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Forum::Table)
                    .col(pk_uuid(Forum::Id))
                    .col(uuid_null(Forum::ParentId))
                    .col(string(Forum::Title))
                    .col(string(Forum::Slug))
                    .col(uuid_null(Forum::LastTopicId))
                    .col(uuid_null(Forum::LastPostId))
                    .col(uuid_null(Forum::LastUserId))
                    .col(big_integer(Forum::PostCount).default(0))
                    .col(string(Forum::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_parent_id")
                    .table(Forum::Table)
                    .col(Forum::ParentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Forum::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Forum {
    Table,
    Id,
    ParentId,
    Title,
    Slug,
    LastTopicId,
    LastPostId,
    LastUserId,
    PostCount,
    CreatedAt,
}
