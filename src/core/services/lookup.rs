use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::core::models::SongDetail;
use crate::error::{NetworkError, Result};

/// Source of release date, lyrics and link for a band/song pair.
#[async_trait::async_trait]
pub trait SongInfoProvider: Send + Sync {
    async fn fetch_info(&self, band: &str, song: &str) -> Result<SongDetail>;
}

/// HTTP client for the external song info service (`GET /info?group=..&song=..`).
#[derive(Clone)]
pub struct SongInfoClient {
    client: reqwest::Client,
    info_url: Url,
}

impl SongInfoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("song-library v{}", version);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            client,
            info_url: Self::info_url(base_url)?,
        })
    }

    fn info_url(base_url: &str) -> Result<Url> {
        let base = format!("{}/", base_url.trim_end_matches('/'));
        let url = Url::parse(&base)
            .and_then(|base| base.join("info"))
            .map_err(NetworkError::InvalidUrl)?;
        Ok(url)
    }
}

#[async_trait::async_trait]
impl SongInfoProvider for SongInfoClient {
    async fn fetch_info(&self, band: &str, song: &str) -> Result<SongDetail> {
        info!("Looking up song info for: {} - {}", band, song);

        let response = self
            .client
            .get(self.info_url.clone())
            .query(&[("group", band), ("song", song)])
            .send()
            .await
            .map_err(|e| {
                warn!("Song info request failed: {}", e);
                NetworkError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Song info service responded with {} for: {} - {}", status, band, song);
            return Err(NetworkError::UpstreamStatus { status: status.as_u16() }.into());
        }

        let body = response.bytes().await.map_err(NetworkError::Http)?;
        let detail: SongDetail = serde_json::from_slice(&body).map_err(|e| NetworkError::InvalidResponse {
            reason: e.to_string(),
        })?;

        debug!("Song info for {} - {}: release date {:?}", band, song, detail.release_date);
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SongLibraryError;
    use actix_web::{web, App, HttpResponse, HttpServer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct InfoQuery {
        group: String,
        song: String,
    }

    async fn info(query: web::Query<InfoQuery>) -> HttpResponse {
        match (query.group.as_str(), query.song.as_str()) {
            ("Muse", "Supermassive Black Hole") => HttpResponse::Ok().json(serde_json::json!({
                "releaseDate": "16.07.2006",
                "text": "Ooh baby, don't you know I suffer?\n\nOoh\nYou set my soul alight",
                "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw",
            })),
            ("Broken", _) => HttpResponse::Ok().body("not json"),
            _ => HttpResponse::NotFound().finish(),
        }
    }

    /// Serve `/info` on an ephemeral port and return its base URL.
    fn spawn_info_server() -> (String, actix_web::dev::ServerHandle) {
        let server = HttpServer::new(|| App::new().route("/info", web::get().to(info)))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_info_url_joins_path() {
        let url = SongInfoClient::info_url("http://localhost:8080").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/info");

        let url = SongInfoClient::info_url("http://localhost:8080/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/info");

        assert!(SongInfoClient::info_url("not a url").is_err());
    }

    #[actix_web::test]
    async fn test_fetch_info_decodes_detail() {
        let (base_url, handle) = spawn_info_server();
        let client = SongInfoClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let detail = client.fetch_info("Muse", "Supermassive Black Hole").await.unwrap();
        assert_eq!(detail.release_date, "16.07.2006");
        assert!(detail.text.contains("\n\n"));
        assert_eq!(detail.link, "https://www.youtube.com/watch?v=Xsp3_a-PMTw");

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_fetch_info_surfaces_upstream_status() {
        let (base_url, handle) = spawn_info_server();
        let client = SongInfoClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let err = client.fetch_info("Nobody", "Nothing").await.unwrap_err();
        assert!(matches!(
            err,
            SongLibraryError::Network(NetworkError::UpstreamStatus { status: 404 })
        ));

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_fetch_info_rejects_undecodable_body() {
        let (base_url, handle) = spawn_info_server();
        let client = SongInfoClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let err = client.fetch_info("Broken", "Anything").await.unwrap_err();
        assert!(matches!(
            err,
            SongLibraryError::Network(NetworkError::InvalidResponse { .. })
        ));

        handle.stop(false).await;
    }
}
