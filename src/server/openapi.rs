//! OpenAPI document for the song endpoints, served through Swagger UI.

use actix_web::web;
use utoipa::{openapi::OpenApi, OpenApi as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::models::{NewSongRequest, Song};
use crate::server::handlers::{self, Couplet, SongTextResponse};

pub const SWAGGER_PATH: &str = "/swagger/{_:.*}";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(utoipa::OpenApi)]
#[openapi(
    info(title = "Song library", description = "Manage songs and page through their lyrics"),
    tags((name = "Songs")),
    paths(
        handlers::get_songs_endpoint,
        handlers::get_song_text_endpoint,
        handlers::delete_song_endpoint,
        handlers::update_song_endpoint,
        handlers::add_song_endpoint,
    ),
    components(schemas(Song, NewSongRequest, SongTextResponse, Couplet))
)]
pub struct Api;

pub fn init() -> OpenApi {
    Api::openapi()
}

/// Mount Swagger UI under `/swagger/` and the raw document beside it.
pub fn bind_services(cfg: &mut web::ServiceConfig) {
    cfg.service(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_JSON_PATH, init()));
}
