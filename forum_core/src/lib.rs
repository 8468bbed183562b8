use sea_orm::DatabaseConnection;
use tracing::info;

use crate::{config::ForumSettings, error::CoreError, service::posts::PostsService};

pub mod entity;
pub mod ids;
pub mod models;

pub mod content;
pub mod flood;
pub mod repo;
pub mod session;

pub mod service;

pub mod error;

pub mod config;

pub mod telemetry;

#[cfg(test)]
mod test_utils;

/// Main runtime handle for the forum core.
pub struct ForumCore {
    /// Settings in effect; `None` when built around an existing connection.
    pub config: Option<config::ForumConfig>,

    pub db: DatabaseConnection,

    pub posts: PostsService,
}

impl ForumCore {
    pub async fn start() -> Result<Self, CoreError> {
        telemetry::init();

        let config = config::get_or_init().await?;
        info!(database = %config.database_path.display(), "starting forum core");

        // DB + migrations
        let db = models::open_or_create_db(&config).await?;
        models::migrate_up(&db).await?;

        let posts = PostsService::new(db.clone(), config.settings);

        Ok(Self {
            config: Some(config),
            db,
            posts,
        })
    }

    /// Runs migrations on `db` and wires the services around it.
    pub async fn with_connection(
        db: DatabaseConnection,
        settings: ForumSettings,
    ) -> Result<Self, CoreError> {
        models::migrate_up(&db).await?;

        let posts = PostsService::new(db.clone(), settings);

        Ok(Self {
            config: None,
            db,
            posts,
        })
    }

    pub fn settings(&self) -> ForumSettings {
        self.posts.settings()
    }
}

pub mod prelude {
    pub use super::ids;
    pub use super::entity;
    pub use super::models;

    pub use super::service;

    pub use super::error;

    pub use super::config;

    pub use super::flood::{check_flood_interval, check_hourly_limit, PostingHistory};
    pub use super::service::posts::{FirstPost, PostDraft, PostsService, PostsServiceError};
    pub use super::session::{ActorContext, SessionStore};
    pub use super::ForumCore;
}
