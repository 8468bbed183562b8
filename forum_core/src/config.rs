use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

use crate::error::ConfigError;

static DATA_DIR_NAME: &str = "forum_next";
static FORUM_DB_NAME: &str = "forum_db.sqlite";
static CONFIG_FILE_NAME: &str = "config.json";

// data_dir_path
// |- forum_next
//    |- forum_db.sqlite
//    |- config.json

/// Posting limits applied to non-admin users.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ForumSettings {
    /// Minimum seconds between two posts by the same user.
    pub post_flood_interval: u64,
    /// Maximum posts a user may make in a trailing hour.
    pub posts_per_hour: u32,
}

impl Default for ForumSettings {
    fn default() -> Self {
        Self {
            post_flood_interval: 30,
            posts_per_hour: 15,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumConfig {
    pub database_path: PathBuf,

    /// `serde(default)` keeps older config.json files loading.
    #[serde(default)]
    pub settings: ForumSettings,
}

impl ForumConfig {
    fn new(data_dir: &Path) -> Self {
        ForumConfig {
            database_path: data_dir.join(FORUM_DB_NAME),
            settings: ForumSettings::default(),
        }
    }
}

/// Gets the existing config from the platform data directory or writes a default one.
pub async fn get_or_init() -> Result<ForumConfig, ConfigError> {
    let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    load_or_init(&data_dir.join(DATA_DIR_NAME)).await
}

/// Same as [`get_or_init`] but rooted at an explicit directory.
pub async fn load_or_init(forum_dir: &Path) -> Result<ForumConfig, ConfigError> {
    let config_path = forum_dir.join(CONFIG_FILE_NAME);

    fs::create_dir_all(forum_dir).await?;

    if fs::try_exists(&config_path).await? {
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let config: ForumConfig = serde_json::from_str(&contents)?;
        Ok(config)
    } else {
        let config = ForumConfig::new(forum_dir);

        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;
        info!(path = %config_path.display(), "wrote default forum config");

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("forum_next_{name}_{}", uuid::Uuid::now_v7()))
    }

    #[tokio::test]
    async fn writes_defaults_then_reads_them_back() {
        let dir = scratch_dir("defaults");

        let created = load_or_init(&dir).await.unwrap();
        assert_eq!(created.settings, ForumSettings::default());
        assert_eq!(created.database_path, dir.join(FORUM_DB_NAME));
        assert!(dir.join(CONFIG_FILE_NAME).exists());

        let loaded = load_or_init(&dir).await.unwrap();
        assert_eq!(loaded.database_path, created.database_path);
        assert_eq!(loaded.settings, created.settings);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn missing_settings_fall_back_to_defaults() {
        let dir = scratch_dir("partial");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"{ "database_path": "/tmp/forum.sqlite", "settings": { "posts_per_hour": 3 } }"#,
        )
        .unwrap();

        let config = load_or_init(&dir).await.unwrap();
        assert_eq!(config.settings.posts_per_hour, 3);
        assert_eq!(config.settings.post_flood_interval, 30);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn malformed_config_is_an_error() {
        let dir = scratch_dir("broken");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), "{ not json").unwrap();

        let result = load_or_init(&dir).await;
        assert!(matches!(result, Err(ConfigError::Json(_))));

        std::fs::remove_dir_all(&dir).ok();
    }
}
