use std::path::{Path, PathBuf};
use crate::error::Result;
use crate::config::validation::ConfigValidator;
use crate::config::env::{EnvVars, EnvParser};
use crate::config::{
    default_data_path, Config, Environment, DEFAULT_ADDRESS, DEFAULT_LOOKUP_TIMEOUT_SECONDS,
    DEFAULT_LOOKUP_URL, DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
};

const LOOKUP_TIMEOUT_RANGE: (u64, u64) = (1, 300);
const SHUTDOWN_TIMEOUT_RANGE: (u64, u64) = (1, 120);

/// Configuration builder with validation and type safety
#[derive(Default)]
pub struct ConfigBuilder {
    environment: Option<Environment>,
    address: Option<String>,
    database_path: Option<PathBuf>,
    lookup_url: Option<String>,
    lookup_timeout_seconds: Option<u64>,
    shutdown_timeout_seconds: Option<u64>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already loaded configuration (e.g. a config file)
    pub fn from_config(config: Config) -> Self {
        Self {
            environment: Some(config.environment),
            address: Some(config.address),
            database_path: Some(config.database_path),
            lookup_url: Some(config.lookup_url),
            lookup_timeout_seconds: Some(config.lookup_timeout_seconds),
            shutdown_timeout_seconds: Some(config.shutdown_timeout_seconds),
        }
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set listen address with validation
    pub fn address<S: Into<String>>(mut self, address: S) -> Result<Self> {
        let address = address.into();
        ConfigValidator::validate_address(&address)?;
        self.address = Some(address);
        Ok(self)
    }

    /// Set database path with validation
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        ConfigValidator::validate_db_path(&path)?;
        self.database_path = Some(path);
        Ok(self)
    }

    /// Set lookup service URL with validation
    pub fn lookup_url<S: Into<String>>(mut self, url: S) -> Result<Self> {
        let url = url.into();
        ConfigValidator::validate_url(&url, "lookup service")?;
        self.lookup_url = Some(url);
        Ok(self)
    }

    /// Set lookup timeout with validation
    pub fn lookup_timeout_seconds(mut self, seconds: u64) -> Result<Self> {
        let (min, max) = LOOKUP_TIMEOUT_RANGE;
        ConfigValidator::validate_range(seconds, min, max, "lookup timeout seconds")?;
        self.lookup_timeout_seconds = Some(seconds);
        Ok(self)
    }

    /// Set shutdown grace period with validation
    pub fn shutdown_timeout_seconds(mut self, seconds: u64) -> Result<Self> {
        let (min, max) = SHUTDOWN_TIMEOUT_RANGE;
        ConfigValidator::validate_range(seconds, min, max, "shutdown timeout seconds")?;
        self.shutdown_timeout_seconds = Some(seconds);
        Ok(self)
    }

    /// Load values from environment variables with validation
    pub fn load_from_env(mut self) -> Result<Self> {
        if let Some(environment) = EnvParser::parse_string(EnvVars::ENVIRONMENT)? {
            self = self.environment(environment.parse()?);
        }

        if let Some(address) = EnvParser::parse_string(EnvVars::ADDRESS)? {
            self = self.address(address)?;
        }

        if let Some(path) = EnvParser::parse_path(EnvVars::DATABASE_PATH)? {
            self = self.database_path(path)?;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::LOOKUP_URL)? {
            self = self.lookup_url(url)?;
        }

        let (min, max) = LOOKUP_TIMEOUT_RANGE;
        if let Some(seconds) = EnvParser::parse_u64(EnvVars::LOOKUP_TIMEOUT_SECONDS, min, max)? {
            self = self.lookup_timeout_seconds(seconds)?;
        }

        let (min, max) = SHUTDOWN_TIMEOUT_RANGE;
        if let Some(seconds) = EnvParser::parse_u64(EnvVars::SHUTDOWN_TIMEOUT_SECONDS, min, max)? {
            self = self.shutdown_timeout_seconds(seconds)?;
        }

        Ok(self)
    }

    /// Build the configuration with defaults
    pub fn build(self) -> Result<Config> {
        let config = Config {
            environment: self.environment.unwrap_or_default(),
            address: self.address
                .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            database_path: self.database_path
                .unwrap_or_else(|| default_data_path().join("songs.db")),
            lookup_url: self.lookup_url
                .unwrap_or_else(|| DEFAULT_LOOKUP_URL.to_string()),
            lookup_timeout_seconds: self.lookup_timeout_seconds
                .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECONDS),
            shutdown_timeout_seconds: self.shutdown_timeout_seconds
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECONDS),
        };

        // Final validation
        config.validate()?;

        Ok(config)
    }
}

impl Config {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_address(&self.address)?;

        ConfigValidator::validate_db_path(&self.database_path)?;

        ConfigValidator::validate_url(&self.lookup_url, "lookup service")?;

        let (min, max) = LOOKUP_TIMEOUT_RANGE;
        ConfigValidator::validate_range(self.lookup_timeout_seconds, min, max, "lookup timeout seconds")?;

        let (min, max) = SHUTDOWN_TIMEOUT_RANGE;
        ConfigValidator::validate_range(self.shutdown_timeout_seconds, min, max, "shutdown timeout seconds")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SongLibraryError;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_config_builder_basic() {
        let config = ConfigBuilder::new()
            .lookup_url("https://lookup.example.com")
            .unwrap()
            .address("0.0.0.0:9090")
            .unwrap()
            .environment(Environment::Prod)
            .build()
            .unwrap();

        assert_eq!(config.lookup_url, "https://lookup.example.com");
        assert_eq!(config.address, "0.0.0.0:9090");
        assert_eq!(config.environment, Environment::Prod);
        assert_eq!(config.lookup_timeout_seconds, 10);
    }

    #[test]
    fn test_config_builder_validation() {
        let result = ConfigBuilder::new()
            .lookup_url("not-a-url")
            .err()
            .unwrap();
        assert!(matches!(result, SongLibraryError::Validation(_)));

        assert!(ConfigBuilder::new().lookup_timeout_seconds(0).is_err());
        assert!(ConfigBuilder::new().shutdown_timeout_seconds(500).is_err());
        assert!(ConfigBuilder::new().database_path("songs.json").is_err());
    }

    #[test]
    #[serial]
    fn test_config_builder_from_env() {
        env::set_var("SONG_LIBRARY_LOOKUP_URL", "https://env.example.com");
        env::set_var("SONG_LIBRARY_ENV", "dev");
        env::set_var("SONG_LIBRARY_LOOKUP_TIMEOUT_SECONDS", "30");

        let config = ConfigBuilder::from_config(Config::default())
            .load_from_env()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.lookup_url, "https://env.example.com");
        assert_eq!(config.environment, Environment::Dev);
        assert_eq!(config.lookup_timeout_seconds, 30);

        env::remove_var("SONG_LIBRARY_LOOKUP_URL");
        env::remove_var("SONG_LIBRARY_ENV");
        env::remove_var("SONG_LIBRARY_LOOKUP_TIMEOUT_SECONDS");
    }

    #[test]
    #[serial]
    fn test_config_builder_rejects_bad_env() {
        env::set_var("SONG_LIBRARY_ADDRESS", "nowhere");
        assert!(ConfigBuilder::new().load_from_env().is_err());
        env::remove_var("SONG_LIBRARY_ADDRESS");

        env::set_var("SONG_LIBRARY_ENV", "staging");
        assert!(ConfigBuilder::new().load_from_env().is_err());
        env::remove_var("SONG_LIBRARY_ENV");
    }
}
