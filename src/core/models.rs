use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A song as stored in the library and exchanged over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i64,
    #[serde(alias = "group")]
    pub band: String,
    pub song: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

/// Request body for creating a song; the rest is filled in by the lookup service.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewSongRequest {
    #[serde(alias = "group")]
    pub band: String,
    pub song: String,
}

/// Details returned by the lookup service for a band/song pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetail {
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

/// A song that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub band: String,
    pub song: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}

impl NewSong {
    pub fn from_lookup(request: NewSongRequest, detail: SongDetail) -> Self {
        Self {
            band: request.band,
            song: request.song,
            release_date: detail.release_date,
            text: detail.text,
            link: detail.link,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_json_uses_camel_case() {
        let song = Song {
            id: 3,
            band: "Muse".into(),
            song: "Supermassive Black Hole".into(),
            release_date: "16.07.2006".into(),
            text: "Ooh baby".into(),
            link: "https://example.com".into(),
        };

        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["releaseDate"], "16.07.2006");
        assert_eq!(value["band"], "Muse");
    }

    #[test]
    fn test_song_accepts_group_alias_and_missing_optionals() {
        let song: Song = serde_json::from_str(r#"{"id": 1, "group": "Muse", "song": "Uprising"}"#).unwrap();
        assert_eq!(song.band, "Muse");
        assert_eq!(song.text, "");
    }
}
