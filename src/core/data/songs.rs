//! Song repository
//!
//! `SongRepository` is the only way request handlers touch stored songs.
//! The SQLite implementation lives on [`Database`].

use std::collections::HashMap;

use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::core::data::database::Database;
use crate::core::filter::{build_predicates, where_clause, Predicate};
use crate::core::models::{Group, NewSong, Song};
use crate::core::paging::PageWindow;
use crate::error::{Result, SongLibraryError};

#[async_trait::async_trait]
pub trait SongRepository: Send + Sync {
    /// Songs matching every filter, ordered by ascending id, limited to `window`.
    async fn get_songs(&self, filters: &HashMap<String, String>, window: PageWindow) -> Result<Vec<Song>>;

    /// Raw lyrics of a song.
    async fn get_song_text(&self, id: i64) -> Result<String>;

    async fn delete_song(&self, id: i64) -> Result<()>;

    /// Overwrite every field of an existing song except its id.
    async fn update_song(&self, song: &Song) -> Result<()>;

    /// Persist a new song under its band's group and return the assigned id.
    async fn add_song(&self, song: &NewSong) -> Result<i64>;
}

const SONG_COLUMNS: &str = "id, band, song, release_date, text, link";

fn song_from_row(row: &Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        band: row.get(1)?,
        song: row.get(2)?,
        release_date: row.get(3)?,
        text: row.get(4)?,
        link: row.get(5)?,
    })
}

/// Look up a group by name, creating it when it does not exist yet.
fn find_or_create_group(conn: &Connection, name: &str) -> Result<Group> {
    const OP: &str = "songs::find_or_create_group";

    let existing = conn
        .query_row(
            "SELECT id, name FROM groups WHERE name = ?1",
            params![name],
            |row| Ok(Group { id: row.get(0)?, name: row.get(1)? }),
        )
        .optional()?;

    if let Some(group) = existing {
        return Ok(group);
    }

    info!(op = OP, group = name, "Group not found, creating");
    conn.execute("INSERT INTO groups (name) VALUES (?1)", params![name])?;

    Ok(Group {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

#[async_trait::async_trait]
impl SongRepository for Database {
    async fn get_songs(&self, filters: &HashMap<String, String>, window: PageWindow) -> Result<Vec<Song>> {
        let predicates = build_predicates(filters);
        let sql = format!(
            "SELECT {} FROM songs {} ORDER BY id ASC LIMIT ? OFFSET ?",
            SONG_COLUMNS,
            where_clause(&predicates)
        );
        debug!(
            filters = ?predicates.iter().map(|p| p.field().key()).collect::<Vec<_>>(),
            offset = window.offset,
            limit = window.limit,
            "Listing songs"
        );

        let mut values: Vec<Value> = predicates
            .iter()
            .map(Predicate::value)
            .map(|v| Value::Text(v.to_string()))
            .collect();
        values.push(Value::Integer(window.limit));
        values.push(Value::Integer(window.offset));

        self.run(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let songs = stmt
                .query_map(params_from_iter(values), song_from_row)?
                .collect::<std::result::Result<Vec<Song>, _>>()?;
            Ok(songs)
        })
        .await
    }

    async fn get_song_text(&self, id: i64) -> Result<String> {
        self.run(move |conn| {
            conn.query_row("SELECT text FROM songs WHERE id = ?1", params![id], |row| row.get(0))
                .optional()?
                .ok_or_else(|| SongLibraryError::song_not_found(id))
        })
        .await
    }

    async fn delete_song(&self, id: i64) -> Result<()> {
        self.run(move |conn| {
            let affected = conn.execute("DELETE FROM songs WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(SongLibraryError::song_not_found(id));
            }

            info!("Deleted song {}", id);
            Ok(())
        })
        .await
    }

    async fn update_song(&self, song: &Song) -> Result<()> {
        let song = song.clone();

        self.run(move |conn| {
            let tx = conn.transaction()?;

            let exists = tx
                .query_row("SELECT 1 FROM songs WHERE id = ?1", params![song.id], |_| Ok(()))
                .optional()?
                .is_some();
            if !exists {
                return Err(SongLibraryError::song_not_found(song.id));
            }

            let group = find_or_create_group(&tx, &song.band)?;
            tx.execute(
                r#"
                UPDATE songs
                SET band = ?1, song = ?2, release_date = ?3, text = ?4, link = ?5, group_id = ?6
                WHERE id = ?7
                "#,
                params![song.band, song.song, song.release_date, song.text, song.link, group.id, song.id],
            )?;
            tx.commit()?;

            info!("Updated song {}", song.id);
            Ok(())
        })
        .await
    }

    async fn add_song(&self, song: &NewSong) -> Result<i64> {
        let song = song.clone();

        self.run(move |conn| {
            let tx = conn.transaction()?;

            let group = find_or_create_group(&tx, &song.band)?;
            tx.execute(
                r#"
                INSERT INTO songs (band, song, release_date, text, link, group_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![song.band, song.song, song.release_date, song.text, song.link, group.id],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;

            info!("Created song {} ({} - {})", id, song.band, song.song);
            Ok(id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paging::resolve_offset_limit;
    use pretty_assertions::assert_eq;

    fn new_song(band: &str, title: &str, text: &str) -> NewSong {
        NewSong {
            band: band.to_string(),
            song: title.to_string(),
            release_date: "01.01.1970".to_string(),
            text: text.to_string(),
            link: format!("https://example.com/{}", title),
        }
    }

    fn filters(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    async fn seeded() -> Database {
        let db = Database::in_memory().unwrap();
        db.add_song(&new_song("John Lennon", "Imagine", "Imagine there's no heaven\n\nYou may say I'm a dreamer"))
            .await
            .unwrap();
        db.add_song(&new_song("Muse", "Uprising", "Paranoia is in bloom")).await.unwrap();
        db.add_song(&new_song("Muse", "Imagine", "A Dream within a dream")).await.unwrap();
        db
    }

    async fn group_count(db: &Database) -> i64 {
        db.run(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM groups", [], |row| row.get(0))?))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_song_creates_group_once() {
        let db = Database::in_memory().unwrap();

        let first = db.add_song(&new_song("Muse", "Uprising", "")).await.unwrap();
        assert_eq!(group_count(&db).await, 1);

        let second = db.add_song(&new_song("Muse", "Resistance", "")).await.unwrap();
        assert_eq!(group_count(&db).await, 1);
        assert!(second > first);

        let group_ids: Vec<i64> = db
            .run(|conn| {
                let ids = conn
                    .prepare("SELECT group_id FROM songs ORDER BY id")?
                    .query_map([], |row| row.get(0))?
                    .collect::<std::result::Result<_, _>>()?;
                Ok(ids)
            })
            .await
            .unwrap();
        assert_eq!(group_ids[0], group_ids[1]);
    }

    #[tokio::test]
    async fn test_add_song_with_new_band_links_new_group() {
        let db = seeded().await;
        let before = group_count(&db).await;

        let id = db.add_song(&new_song("Queen", "Bohemian Rhapsody", "")).await.unwrap();
        assert_eq!(group_count(&db).await, before + 1);

        let group_name: String = db
            .run(move |conn| {
                Ok(conn.query_row(
                    "SELECT g.name FROM songs s JOIN groups g ON g.id = s.group_id WHERE s.id = ?1",
                    params![id],
                    |row| row.get(0),
                )?)
            })
            .await
            .unwrap();
        assert_eq!(group_name, "Queen");
    }

    #[tokio::test]
    async fn test_get_songs_orders_by_id_and_pages() {
        let db = seeded().await;

        let all = db.get_songs(&HashMap::new(), resolve_offset_limit("1", "10")).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let second_page = db.get_songs(&HashMap::new(), resolve_offset_limit("2", "2")).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].id, 3);

        let past_end = db.get_songs(&HashMap::new(), resolve_offset_limit("9", "2")).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_get_songs_exact_song_filter() {
        let db = seeded().await;

        let songs = db
            .get_songs(&filters(&[("song", "Imagine")]), resolve_offset_limit("", ""))
            .await
            .unwrap();
        assert_eq!(songs.len(), 2);
        assert!(songs.iter().all(|s| s.song == "Imagine"));

        let none = db
            .get_songs(&filters(&[("song", "imagine")]), resolve_offset_limit("", ""))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_get_songs_text_filter_is_case_sensitive_substring() {
        let db = seeded().await;

        let songs = db
            .get_songs(&filters(&[("text", "dream")]), resolve_offset_limit("", ""))
            .await
            .unwrap();
        let ids: Vec<i64> = songs.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let upper = db
            .get_songs(&filters(&[("text", "Dream")]), resolve_offset_limit("", ""))
            .await
            .unwrap();
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].id, 3);
    }

    #[tokio::test]
    async fn test_get_songs_combines_filters_with_and() {
        let db = seeded().await;

        let songs = db
            .get_songs(
                &filters(&[("band", "Muse"), ("song", "Imagine"), ("page", "1")]),
                resolve_offset_limit("", ""),
            )
            .await
            .unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, 3);
    }

    #[tokio::test]
    async fn test_get_song_text() {
        let db = seeded().await;

        let text = db.get_song_text(2).await.unwrap();
        assert_eq!(text, "Paranoia is in bloom");

        let err = db.get_song_text(42).await.unwrap_err();
        assert!(matches!(err, SongLibraryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_song() {
        let db = seeded().await;

        db.delete_song(2).await.unwrap();
        assert!(matches!(db.get_song_text(2).await, Err(SongLibraryError::NotFound { .. })));

        let err = db.delete_song(2).await.unwrap_err();
        assert!(matches!(err, SongLibraryError::NotFound { .. }));
        let err = db.delete_song(999).await.unwrap_err();
        assert!(matches!(err, SongLibraryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_song_overwrites_fields() {
        let db = seeded().await;

        let updated = Song {
            id: 2,
            band: "Queen".into(),
            song: "Under Pressure".into(),
            release_date: "1981".into(),
            text: "Pressure pushing down on me".into(),
            link: "https://example.com/pressure".into(),
        };
        db.update_song(&updated).await.unwrap();

        let songs = db
            .get_songs(&filters(&[("band", "Queen")]), resolve_offset_limit("", ""))
            .await
            .unwrap();
        assert_eq!(songs, vec![updated]);
        assert_eq!(group_count(&db).await, 3);
    }

    #[tokio::test]
    async fn test_update_missing_song_is_not_found() {
        let db = seeded().await;
        let song = Song {
            id: 77,
            band: "Nobody".into(),
            song: "Nothing".into(),
            release_date: String::new(),
            text: String::new(),
            link: String::new(),
        };

        let err = db.update_song(&song).await.unwrap_err();
        assert!(matches!(err, SongLibraryError::NotFound { .. }));
        assert_eq!(group_count(&db).await, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let db = seeded().await;
        db.delete_song(3).await.unwrap();

        let id = db.add_song(&new_song("Muse", "Starlight", "")).await.unwrap();
        assert_eq!(id, 4);
    }
}
