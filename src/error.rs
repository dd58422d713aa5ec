//! Error types for essence-store

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Invalid backup file: {0}")]
    InvalidBackup(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
