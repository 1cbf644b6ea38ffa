//! Data layer modules
//!
//! - `database`: SQLite connection and schema
//! - `songs`: the `SongRepository` trait and its SQLite implementation

pub mod database;
pub mod songs;

// Re-export main types
pub use database::Database;
pub use songs::SongRepository;
