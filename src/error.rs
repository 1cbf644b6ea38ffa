//! Error handling for the song-library service
//!
//! This module provides a hierarchical error system. Every error that reaches
//! the HTTP boundary is turned into a status code and a `{"Error": "..."}`
//! body by the `ResponseError` implementation at the bottom of this file.

use std::path::PathBuf;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongLibraryError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl SongLibraryError {
    pub fn song_not_found(id: i64) -> Self {
        SongLibraryError::NotFound {
            what: format!("Song {}", id),
        }
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Transaction failed: {0}")]
    Transaction(#[source] rusqlite::Error),

    #[error("Database corruption detected")]
    Corruption,
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Lookup service responded with {status}")]
    UpstreamStatus { status: u16 },

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },

    #[error("Invalid lookup URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

pub type Result<T> = std::result::Result<T, SongLibraryError>;

use rusqlite::ffi;

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ffi::Error { code: ffi::ErrorCode::DatabaseCorrupt, .. }, _) => {
                DatabaseError::Corruption
            }
            _ => DatabaseError::Query(err),
        }
    }
}

impl From<rusqlite::Error> for SongLibraryError {
    fn from(err: rusqlite::Error) -> Self {
        SongLibraryError::Database(err.into())
    }
}

impl From<reqwest::Error> for SongLibraryError {
    fn from(err: reqwest::Error) -> Self {
        SongLibraryError::Network(NetworkError::Http(err))
    }
}

impl From<toml::de::Error> for SongLibraryError {
    fn from(err: toml::de::Error) -> Self {
        SongLibraryError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<std::io::Error> for SongLibraryError {
    fn from(err: std::io::Error) -> Self {
        SongLibraryError::Internal(err.into())
    }
}

impl ResponseError for SongLibraryError {
    fn status_code(&self) -> StatusCode {
        match self {
            SongLibraryError::NotFound { .. } => StatusCode::NOT_FOUND,
            SongLibraryError::Validation(_) => StatusCode::BAD_REQUEST,
            // Storage failures are reported as client errors, matching the
            // behavior existing API consumers rely on.
            SongLibraryError::Database(_) => StatusCode::BAD_REQUEST,
            SongLibraryError::Network(NetworkError::UpstreamStatus { status }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            SongLibraryError::Network(_) => StatusCode::BAD_REQUEST,
            SongLibraryError::Config(_) | SongLibraryError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "Error": self.to_string() }))
    }
}
