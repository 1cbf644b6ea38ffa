use std::sync::Arc;
use crate::config::Config;
use crate::core::data::{Database, SongRepository};
use crate::core::services::lookup::{SongInfoClient, SongInfoProvider};
use crate::error::Result;

/// Everything a request handler needs, shared across server workers.
#[derive(Clone)]
pub struct SimpleServices {
    config: Arc<Config>,
    songs: Arc<dyn SongRepository>,
    song_info: Arc<dyn SongInfoProvider>,
}

impl SimpleServices {
    pub fn new(
        config: Config,
        songs: Arc<dyn SongRepository>,
        song_info: Arc<dyn SongInfoProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            songs,
            song_info,
        }
    }

    /// Open the configured database and build the lookup client.
    pub async fn from_config(config: Config) -> Result<Self> {
        let database = Self::create_database(&config).await?;
        let song_info = SongInfoClient::new(&config.lookup_url, config.lookup_timeout())?;

        Ok(Self::new(config, Arc::new(database), Arc::new(song_info)))
    }

    pub async fn create_database(config: &Config) -> Result<Database> {
        Database::new(&config.database_path).await
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn songs(&self) -> &dyn SongRepository {
        self.songs.as_ref()
    }

    pub fn song_info(&self) -> &dyn SongInfoProvider {
        self.song_info.as_ref()
    }
}
