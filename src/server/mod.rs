//! HTTP server for the song library
//!
//! Routes:
//! - `GET /get-songs`: filtered, paginated listing
//! - `GET /get-song-text`: lyrics split into couplets
//! - `DELETE /delete-song`
//! - `POST /update-song`
//! - `POST /add-song`: enriches the new song from the lookup service
//! - `GET /swagger/`: Swagger UI over `GET /api-docs/openapi.json`
//!
//! The local environment also serves `GET /info`, a canned lookup response,
//! so the server can point its lookup URL at itself during development.

pub mod handlers;
pub mod middleware;
pub mod openapi;

use actix_web::{middleware::from_fn, web, App, HttpServer};
use tracing::info;

use crate::config::Environment;
use crate::error::Result;
use crate::services::SimpleServices;
use crate::signal_handler;

/// Register the routes available in `environment`.
pub fn configure(cfg: &mut web::ServiceConfig, environment: Environment) {
    handlers::bind_services(cfg);
    openapi::bind_services(cfg);

    if environment == Environment::Local {
        cfg.service(handlers::debug_info_endpoint);
    }
}

/// Serve until SIGINT or SIGTERM, then drain in-flight requests.
pub async fn run(services: SimpleServices) -> Result<()> {
    let config = services.config();
    let environment = config.environment;
    let data = web::Data::new(services);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(from_fn(middleware::log_requests))
            .app_data(data.clone())
            .configure(|cfg| configure(cfg, environment))
    })
    .disable_signals()
    .shutdown_timeout(config.shutdown_timeout_seconds)
    .bind(config.address.as_str())?
    .run();

    info!(
        address = %config.address,
        environment = %environment,
        "Song library listening"
    );

    let signals = actix_web::rt::spawn(signal_handler::stop_on_signal(server.handle()));

    server.await?;
    signals.abort();

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{
        http::StatusCode,
        test::{call_service, init_service, TestRequest},
    };

    use crate::config::Config;
    use crate::core::data::Database;
    use crate::core::services::lookup::SongInfoClient;

    fn services() -> SimpleServices {
        let config = Config::default();
        let song_info =
            SongInfoClient::new(&config.lookup_url, config.lookup_timeout()).unwrap();
        SimpleServices::new(config, Arc::new(Database::in_memory().unwrap()), Arc::new(song_info))
    }

    #[actix_web::test]
    async fn test_info_route_only_in_local() {
        for (environment, expected) in [
            (Environment::Local, StatusCode::OK),
            (Environment::Dev, StatusCode::NOT_FOUND),
            (Environment::Prod, StatusCode::NOT_FOUND),
        ] {
            let app = init_service(
                App::new()
                    .app_data(web::Data::new(services()))
                    .configure(|cfg| configure(cfg, environment)),
            )
            .await;

            let resp = call_service(&app, TestRequest::get().uri("/info").to_request()).await;
            assert_eq!(resp.status(), expected, "environment {}", environment);

            let resp = call_service(&app, TestRequest::get().uri("/get-songs").to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let resp = call_service(&app, TestRequest::get().uri(openapi::OPENAPI_JSON_PATH).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }
}
