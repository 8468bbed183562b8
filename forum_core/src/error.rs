use sea_orm::DbErr;
use thiserror::Error;

/// Failure of a read or write against the forum store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("fatal database error")]
    Db(#[from] DbErr),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StorageError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data directory on this platform")]
    NoDataDir,
    #[error("config i/o failed")]
    Io(#[from] std::io::Error),
    #[error("malformed config file")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("data store unavailable")]
    Db(#[from] DbErr),
}
