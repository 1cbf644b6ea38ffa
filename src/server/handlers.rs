//! HTTP endpoints for the song library.
//!
//! Every endpoint returns `Result<_, SongLibraryError>`; failures are turned
//! into a status code and a `{"Error": "..."}` body by the error type itself.

use std::collections::HashMap;

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    route,
    web::{self, Json},
    HttpRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;
use tracing::debug;

use crate::core::models::{NewSong, NewSongRequest, Song, SongDetail};
use crate::core::paging::{paginate_text, resolve_offset_limit, resolve_text_page};
use crate::error::SongLibraryError;
use crate::services::SimpleServices;

type Result<T> = std::result::Result<T, SongLibraryError>;

/// Bind all song endpoints to a service config.
pub fn bind_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(get_songs_endpoint)
        .service(get_song_text_endpoint)
        .service(delete_song_endpoint)
        .service(update_song_endpoint)
        .service(add_song_endpoint);
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    SongLibraryError::Validation(err.to_string()).into()
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    SongLibraryError::Validation(err.to_string()).into()
}

fn parse_song_id(raw: Option<&str>) -> Result<i64> {
    let raw = raw
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| SongLibraryError::Validation("songId is required".to_string()))?;

    raw.parse::<i64>()
        .map_err(|_| SongLibraryError::Validation(format!("songId must be an integer, got '{}'", raw)))
}

/// Collapse query pairs into a map, keeping the first value of a repeated key.
fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut values = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        values.entry(key).or_insert(value);
    }
    values
}

#[utoipa::path(
    tags = ["Songs"],
    get,
    path = "/get-songs",
    description = "List songs matching every filter, ordered by id",
    params(
        ("page" = Option<String>, Query, description = "Page number, defaults to 1"),
        ("limit" = Option<String>, Query, description = "Page size, defaults to 10, at most 100"),
        ("band" = Option<String>, Query, description = "Exact band name"),
        ("song" = Option<String>, Query, description = "Exact song title"),
        ("releaseDate" = Option<String>, Query, description = "Exact release date"),
        ("text" = Option<String>, Query, description = "Case-sensitive substring of the lyrics"),
        ("link" = Option<String>, Query, description = "Exact link"),
    ),
    responses(
        (status = 200, description = "The matching page of songs", body = Vec<Song>),
        (status = 400, description = "Storage failure"),
    )
)]
#[route("/get-songs", method = "GET")]
pub async fn get_songs_endpoint(
    query: web::Query<Vec<(String, String)>>,
    services: web::Data<SimpleServices>,
) -> Result<Json<Vec<Song>>> {
    let query = first_values(query.into_inner());
    let page = query.get("page").map_or("", String::as_str);
    let limit = query.get("limit").map_or("", String::as_str);
    let window = resolve_offset_limit(page, limit);

    let songs = services.songs().get_songs(&query, window).await?;
    debug!("Returning {} songs", songs.len());

    Ok(Json(songs))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongTextQuery {
    song_id: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Couplet {
    pub couplet: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SongTextResponse {
    pub song_text: Vec<Couplet>,
}

#[utoipa::path(
    tags = ["Songs"],
    get,
    path = "/get-song-text",
    description = "Get one page of a song's lyrics, split into couplets",
    params(
        ("songId" = i64, Query, description = "Id of the song"),
        ("page" = Option<String>, Query, description = "Page number, defaults to 1"),
        ("limit" = Option<String>, Query, description = "Couplets per page, defaults to 2"),
    ),
    responses(
        (status = 200, description = "The requested couplets", body = SongTextResponse),
        (status = 400, description = "Missing or malformed songId"),
        (status = 404, description = "No song with that id"),
    )
)]
#[route("/get-song-text", method = "GET")]
pub async fn get_song_text_endpoint(
    query: web::Query<SongTextQuery>,
    services: web::Data<SimpleServices>,
) -> Result<Json<SongTextResponse>> {
    let id = parse_song_id(query.song_id.as_deref())?;
    let (page, limit) = resolve_text_page(query.page.as_deref(), query.limit.as_deref());

    let text = services.songs().get_song_text(id).await?;
    let song_text = paginate_text(&text, page, limit)
        .into_iter()
        .map(|couplet| Couplet { couplet: couplet.to_string() })
        .collect();

    Ok(Json(SongTextResponse { song_text }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongIdQuery {
    song_id: Option<String>,
}

#[utoipa::path(
    tags = ["Songs"],
    delete,
    path = "/delete-song",
    description = "Delete a song",
    params(
        ("songId" = i64, Query, description = "Id of the song"),
    ),
    responses(
        (status = 200, description = "Song deleted"),
        (status = 400, description = "Missing or malformed songId"),
        (status = 404, description = "No song with that id"),
    )
)]
#[route("/delete-song", method = "DELETE")]
pub async fn delete_song_endpoint(
    query: web::Query<SongIdQuery>,
    services: web::Data<SimpleServices>,
) -> Result<Json<Value>> {
    let id = parse_song_id(query.song_id.as_deref())?;
    services.songs().delete_song(id).await?;

    Ok(Json(json!({ "OK": "Song deleted" })))
}

#[utoipa::path(
    tags = ["Songs"],
    post,
    path = "/update-song",
    description = "Overwrite every field of an existing song except its id",
    request_body = Song,
    responses(
        (status = 200, description = "Song updated"),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "No song with that id"),
    )
)]
#[route("/update-song", method = "POST")]
pub async fn update_song_endpoint(
    song: Json<Song>,
    services: web::Data<SimpleServices>,
) -> Result<Json<Value>> {
    services.songs().update_song(&song).await?;

    Ok(Json(json!({ "OK": "Song updated" })))
}

#[utoipa::path(
    tags = ["Songs"],
    post,
    path = "/add-song",
    description = "Create a song, filling release date, lyrics and link from the lookup service",
    request_body = NewSongRequest,
    responses(
        (status = 200, description = "Song created, with its new id"),
        (status = 400, description = "Empty band or song, or the lookup failed"),
    )
)]
#[route("/add-song", method = "POST")]
pub async fn add_song_endpoint(
    request: Json<NewSongRequest>,
    services: web::Data<SimpleServices>,
) -> Result<Json<Value>> {
    let request = request.into_inner();
    if request.band.trim().is_empty() || request.song.trim().is_empty() {
        return Err(SongLibraryError::Validation(
            "band and song must not be empty".to_string(),
        ));
    }

    let detail = services.song_info().fetch_info(&request.band, &request.song).await?;
    let id = services.songs().add_song(&NewSong::from_lookup(request, detail)).await?;

    Ok(Json(json!({ "OK": "Song created", "id": id })))
}

/// Stand-in for the lookup service's `/info`, mounted in the local environment.
#[route("/info", method = "GET")]
pub async fn debug_info_endpoint() -> Json<SongDetail> {
    Json(SongDetail {
        release_date: "16.07.2006".to_string(),
        text: "Ooh baby, don't you know I suffer?\nOoh baby, can you hear me moan?\nYou caught me under false pretenses\nHow long before you let me go?\n\nOoh\nYou set my soul alight\nOoh\nYou set my soul alight".to_string(),
        link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_string(),
    })
}
