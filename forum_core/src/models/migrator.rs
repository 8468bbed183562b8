use sea_orm_migration::prelude::*;

mod m20261019_000001_create_forum_table;
mod m20261019_000002_create_forum_topic_table;
mod m20261019_000003_create_forum_post_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_forum_table::Migration),
            Box::new(m20261019_000002_create_forum_topic_table::Migration),
            Box::new(m20261019_000003_create_forum_post_table::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Database;

    #[tokio::test]
    async fn test_migrations_okay() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let schema_manager = SchemaManager::new(&db);

        Migrator::refresh(&db).await?;

        assert!(schema_manager.has_table("forum").await?);
        assert!(schema_manager.has_table("forum_topic").await?);
        assert!(schema_manager.has_table("forum_post").await?);
        assert!(schema_manager.has_column("forum", "post_count").await?);
        assert!(schema_manager.has_column("forum_post", "content_html").await?);

        Ok(())
    }
}
