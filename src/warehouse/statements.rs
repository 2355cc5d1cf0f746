//! Parameterized statement templates for loading the warehouse.
//!
//! `WarehouseStatements` is plain configuration: the loader receives one at
//! construction and every write goes through it, against whatever connection
//! (usually an open transaction) the caller hands in.

use super::models::{Artist, Song, SongMatch, SongplayFact, TimeRow, User};
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarehouseStatements {
    pub artist_upsert: &'static str,
    pub song_upsert: &'static str,
    pub time_insert: &'static str,
    pub user_upsert: &'static str,
    pub song_select: &'static str,
    pub songplay_insert: &'static str,
}

impl Default for WarehouseStatements {
    fn default() -> Self {
        WarehouseStatements {
            artist_upsert: "INSERT INTO artists (artist_id, name, location, latitude, longitude)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(artist_id) DO UPDATE SET
                    name = excluded.name,
                    location = excluded.location,
                    latitude = excluded.latitude,
                    longitude = excluded.longitude",
            song_upsert: "INSERT INTO songs (song_id, title, artist_id, year, duration)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(song_id) DO UPDATE SET
                    title = excluded.title,
                    artist_id = excluded.artist_id,
                    year = excluded.year,
                    duration = excluded.duration",
            time_insert: "INSERT INTO time (start_time, hour, day, week_of_year, month, year, is_weekday)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            user_upsert: "INSERT INTO users (user_id, first_name, last_name, gender, level)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(user_id) DO UPDATE SET
                    first_name = excluded.first_name,
                    last_name = excluded.last_name,
                    gender = excluded.gender,
                    level = excluded.level",
            song_select: "SELECT s.song_id, a.artist_id
                FROM songs s
                JOIN artists a ON s.artist_id = a.artist_id
                WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3
                ORDER BY s.song_id
                LIMIT 1",
            songplay_insert: "INSERT INTO songplays (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        }
    }
}

impl WarehouseStatements {
    pub fn upsert_artist(&self, conn: &Connection, artist: &Artist) -> rusqlite::Result<()> {
        conn.execute(
            self.artist_upsert,
            params![
                &artist.artist_id,
                &artist.name,
                &artist.location,
                artist.latitude,
                artist.longitude
            ],
        )?;
        Ok(())
    }

    pub fn upsert_song(&self, conn: &Connection, song: &Song) -> rusqlite::Result<()> {
        conn.execute(
            self.song_upsert,
            params![
                &song.song_id,
                &song.title,
                &song.artist_id,
                song.year,
                song.duration
            ],
        )?;
        Ok(())
    }

    /// Writes all rows with a single prepared statement.
    pub fn bulk_insert_time(&self, conn: &Connection, rows: &[TimeRow]) -> rusqlite::Result<usize> {
        let mut stmt = conn.prepare_cached(self.time_insert)?;
        for row in rows {
            stmt.execute(params![
                row.start_time,
                row.hour,
                row.day,
                row.week_of_year,
                row.month,
                row.year,
                row.is_weekday
            ])?;
        }
        Ok(rows.len())
    }

    pub fn upsert_user(&self, conn: &Connection, user: &User) -> rusqlite::Result<()> {
        conn.execute(
            self.user_upsert,
            params![
                &user.user_id,
                &user.first_name,
                &user.last_name,
                &user.gender,
                &user.level
            ],
        )?;
        Ok(())
    }

    /// Exact match on title, artist name and duration.
    pub fn select_song(
        &self,
        conn: &Connection,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> rusqlite::Result<Option<SongMatch>> {
        conn.query_row(self.song_select, params![title, artist_name, duration], |r| {
            Ok(SongMatch {
                song_id: r.get(0)?,
                artist_id: r.get(1)?,
            })
        })
        .optional()
    }

    pub fn insert_songplay(&self, conn: &Connection, fact: &SongplayFact) -> rusqlite::Result<()> {
        conn.execute(
            self.songplay_insert,
            params![
                fact.start_time,
                &fact.user_id,
                &fact.level,
                &fact.song_id,
                &fact.artist_id,
                fact.session_id,
                &fact.location,
                &fact.user_agent
            ],
        )?;
        Ok(())
    }
}
