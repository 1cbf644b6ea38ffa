//! Service layer for dependency injection
//!
//! `SimpleServices` bundles the configuration, the song repository and the
//! lookup client so they can be handed to the HTTP server as one value.

pub mod simple_container;

pub use simple_container::SimpleServices;
