use std::env;
use std::path::PathBuf;
use crate::error::{Result, SongLibraryError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const ENVIRONMENT: &'static str = "SONG_LIBRARY_ENV";
    pub const ADDRESS: &'static str = "SONG_LIBRARY_ADDRESS";
    pub const DATABASE_PATH: &'static str = "SONG_LIBRARY_DATABASE_PATH";
    pub const LOOKUP_URL: &'static str = "SONG_LIBRARY_LOOKUP_URL";
    pub const LOOKUP_TIMEOUT_SECONDS: &'static str = "SONG_LIBRARY_LOOKUP_TIMEOUT_SECONDS";
    pub const SHUTDOWN_TIMEOUT_SECONDS: &'static str = "SONG_LIBRARY_SHUTDOWN_TIMEOUT_SECONDS";
}

/// Environment variable parsing utilities
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as a trimmed string; blank counts as unset
    pub fn parse_string(var_name: &str) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(SongLibraryError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Parse environment variable as PathBuf
    pub fn parse_path(var_name: &str) -> Result<Option<PathBuf>> {
        Ok(Self::parse_string(var_name)?.map(PathBuf::from))
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                SongLibraryError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a positive integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(SongLibraryError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }
}
