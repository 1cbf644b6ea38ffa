//! External service clients
//!
//! - `lookup`: song info lookup (release date, lyrics, link)

pub mod lookup;
