//! Song catalog documents: one song, and its artist, per file.

use super::error::{LoadError, ParseError};
use crate::warehouse::{Artist, Song, WarehouseStatements};
use rusqlite::Connection;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SongRecord {
    num_songs: Option<u64>,
    artist_id: String,
    artist_name: String,
    artist_location: Option<String>,
    artist_latitude: Option<f64>,
    artist_longitude: Option<f64>,
    song_id: String,
    title: String,
    year: i32,
    duration: f64,
}

impl SongRecord {
    fn into_rows(self) -> (Artist, Song) {
        let artist = Artist {
            artist_id: self.artist_id.clone(),
            name: self.artist_name,
            location: self.artist_location,
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        };
        let song = Song {
            song_id: self.song_id,
            title: self.title,
            artist_id: self.artist_id,
            year: self.year,
            duration: self.duration,
        };
        (artist, song)
    }
}

/// Parses a catalog document into its artist and song rows, artist first.
pub fn parse(content: &str) -> Result<(Artist, Song), ParseError> {
    let mut records = serde_json::Deserializer::from_str(content).into_iter::<SongRecord>();

    let record = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(source)) => {
            return Err(ParseError::Json {
                line: source.line(),
                source,
            })
        }
        None => return Err(ParseError::MultipleRecords(0)),
    };

    let trailing = records.count() as u64;
    if trailing > 0 {
        return Err(ParseError::MultipleRecords(trailing + 1));
    }
    match record.num_songs {
        Some(1) | None => Ok(record.into_rows()),
        Some(n) => Err(ParseError::MultipleRecords(n)),
    }
}

/// Upserts the document's artist, then its song.
pub fn load(
    conn: &Connection,
    statements: &WarehouseStatements,
    content: &str,
) -> Result<(), LoadError> {
    let (artist, song) = parse(content)?;
    statements.upsert_artist(conn, &artist)?;
    statements.upsert_song(conn, &song)?;
    debug!("Loaded song {} by artist {}", song.song_id, artist.artist_id);
    Ok(())
}
