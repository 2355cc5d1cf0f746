//! SQLite schema of the Sparkify star-schema warehouse.
//!
//! `songplays` is the fact table; `artists`, `songs`, `users` and `time` are
//! its dimensions. Timestamps are milliseconds since the Unix epoch.

use crate::sqlite_column;
use crate::sqlite_persistence::{ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema};

const ARTIST_KEY: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "artist_id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const SONG_KEY: ForeignKey = ForeignKey {
    foreign_table: "songs",
    foreign_column: "song_id",
    on_delete: ForeignKeyOnChange::SetNull,
};

const SONGPLAY_ARTIST_KEY: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "artist_id",
    on_delete: ForeignKeyOnChange::SetNull,
};

// =============================================================================
// Dimension Tables
// =============================================================================

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("artist_id", SqlType::Text, is_primary_key = true),
        sqlite_column!("name", SqlType::Text, non_null = true),
        sqlite_column!("location", SqlType::Text),
        sqlite_column!("latitude", SqlType::Real),
        sqlite_column!("longitude", SqlType::Real),
    ],
    indices: &[("idx_artists_name", "name")],
};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("song_id", SqlType::Text, is_primary_key = true),
        sqlite_column!("title", SqlType::Text, non_null = true),
        sqlite_column!(
            "artist_id",
            SqlType::Text,
            non_null = true,
            foreign_key = Some(&ARTIST_KEY)
        ),
        sqlite_column!("year", SqlType::Integer, non_null = true), // 0 when unknown
        sqlite_column!("duration", SqlType::Real, non_null = true), // seconds
    ],
    indices: &[
        ("idx_songs_title", "title"),
        ("idx_songs_artist", "artist_id"),
    ],
};

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("user_id", SqlType::Text, is_primary_key = true),
        sqlite_column!("first_name", SqlType::Text),
        sqlite_column!("last_name", SqlType::Text),
        sqlite_column!("gender", SqlType::Text),
        sqlite_column!("level", SqlType::Text, non_null = true), // 'free', 'paid'
    ],
    indices: &[],
};

/// No uniqueness on `start_time`: one row is kept per listening event.
const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        sqlite_column!("start_time", SqlType::Integer, non_null = true),
        sqlite_column!("hour", SqlType::Integer, non_null = true),
        sqlite_column!("day", SqlType::Integer, non_null = true),
        sqlite_column!("week_of_year", SqlType::Integer, non_null = true),
        sqlite_column!("month", SqlType::Integer, non_null = true),
        sqlite_column!("year", SqlType::Integer, non_null = true),
        sqlite_column!("is_weekday", SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_time_start_time", "start_time")],
};

// =============================================================================
// Fact Table
// =============================================================================

const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!("songplay_id", SqlType::Integer, is_primary_key = true),
        sqlite_column!("start_time", SqlType::Integer, non_null = true),
        sqlite_column!("user_id", SqlType::Text, non_null = true),
        sqlite_column!("level", SqlType::Text, non_null = true),
        sqlite_column!("song_id", SqlType::Text, foreign_key = Some(&SONG_KEY)),
        sqlite_column!(
            "artist_id",
            SqlType::Text,
            foreign_key = Some(&SONGPLAY_ARTIST_KEY)
        ),
        sqlite_column!("session_id", SqlType::Integer, non_null = true),
        sqlite_column!("location", SqlType::Text, non_null = true),
        sqlite_column!("user_agent", SqlType::Text, non_null = true),
    ],
    indices: &[
        ("idx_songplays_start_time", "start_time"),
        ("idx_songplays_user", "user_id"),
    ],
};

pub const WAREHOUSE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTISTS_TABLE,
        SONGS_TABLE,
        USERS_TABLE,
        TIME_TABLE,
        SONGPLAYS_TABLE,
    ],
}];

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn create_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", true).unwrap();
        WAREHOUSE_VERSIONED_SCHEMAS[0].create(&conn).unwrap();
        conn
    }

    #[test]
    fn test_schema_creates_and_validates() {
        let conn = create_schema();
        WAREHOUSE_VERSIONED_SCHEMAS[0].validate(&conn).unwrap();
    }

    #[test]
    fn test_song_requires_existing_artist() {
        let conn = create_schema();
        let result = conn.execute(
            "INSERT INTO songs (song_id, title, artist_id, year, duration) VALUES ('S1', 'T', 'A1', 2000, 180.0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_time_accepts_duplicate_start_times() {
        let conn = create_schema();
        for _ in 0..2 {
            conn.execute(
                "INSERT INTO time (start_time, hour, day, week_of_year, month, year, is_weekday) VALUES (1541903636796, 2, 11, 45, 11, 2018, 0)",
                [],
            )
            .unwrap();
        }
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM time", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_songplay_allows_null_song_and_artist() {
        let conn = create_schema();
        conn.execute(
            "INSERT INTO songplays (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
             VALUES (1541903636796, '26', 'free', NULL, NULL, 583, 'Somewhere', 'Mozilla/5.0')",
            [],
        )
        .unwrap();
        let songplay_id: i64 = conn
            .query_row("SELECT songplay_id FROM songplays", [], |r| r.get(0))
            .unwrap();
        assert_eq!(songplay_id, 1);
    }

    #[test]
    fn test_foreign_key_delete_actions() {
        assert!(SONGS_TABLE
            .create_sql()
            .contains("REFERENCES artists(artist_id) ON DELETE NO ACTION"));
        let songplays = SONGPLAYS_TABLE.create_sql();
        assert!(songplays.contains("REFERENCES songs(song_id) ON DELETE SET NULL"));
        assert!(songplays.contains("REFERENCES artists(artist_id) ON DELETE SET NULL"));
    }
}
