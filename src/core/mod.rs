//! Core functionality modules
//!
//! - `data`: SQLite storage and the song repository
//! - `services`: external API integrations
//! - `filter`: listing filters turned into SQL predicates
//! - `paging`: listing and lyrics pagination
//! - `models`: songs, groups and lookup payloads

pub mod data;
pub mod filter;
pub mod models;
pub mod paging;
pub mod services;
