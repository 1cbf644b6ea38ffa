//! Command Line Interface module
//!
//! - `serve`: run the HTTP server (the default)
//! - `init`: create the database schema and exit
//! - `config`: print the effective configuration

pub mod config;
pub mod init;
pub mod serve;
