//! Test fixtures for source documents and the warehouse.

use super::constants::*;
use rusqlite::Row;
use serde_json::{json, Value};
use sparkify_warehouse::{
    BatchLoader, LoadOutcome, SourceKind, SqliteWarehouse, WarehouseStatements,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A song catalog document as found in the dataset.
pub fn song_document(
    artist_id: &str,
    artist_name: &str,
    song_id: &str,
    title: &str,
    duration: f64,
) -> String {
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 0,
    })
    .to_string()
}

/// A log event for user `USER_ID` playing `song` by `artist`.
pub fn log_event(page: &str, ts: i64, level: &str, song: &str, artist: &str, length: f64) -> Value {
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": "Jayden",
        "gender": "M",
        "itemInSession": 0,
        "lastName": "Fox",
        "length": length,
        "level": level,
        "location": LOCATION,
        "method": "PUT",
        "page": page,
        "registration": 1541033612796.0,
        "sessionId": SESSION_ID,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": USER_AGENT,
        "userId": USER_ID,
    })
}

pub fn log_document(events: &[Value]) -> String {
    events
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A temporary source document tree.
pub struct TestDataTree {
    dir: TempDir,
}

impl TestDataTree {
    pub fn new() -> Self {
        TestDataTree {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// A songplay row as stored, without its surrogate key.
#[derive(Debug, PartialEq)]
pub struct StoredSongplay {
    pub start_time: i64,
    pub user_id: String,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: String,
    pub user_agent: String,
}

impl StoredSongplay {
    fn from_row(r: &Row) -> rusqlite::Result<Self> {
        Ok(StoredSongplay {
            start_time: r.get(0)?,
            user_id: r.get(1)?,
            level: r.get(2)?,
            song_id: r.get(3)?,
            artist_id: r.get(4)?,
            session_id: r.get(5)?,
            location: r.get(6)?,
            user_agent: r.get(7)?,
        })
    }
}

/// An in-memory warehouse plus query helpers.
pub struct TestWarehouse {
    pub warehouse: SqliteWarehouse,
    loader: BatchLoader,
}

impl TestWarehouse {
    pub fn new() -> Self {
        TestWarehouse {
            warehouse: SqliteWarehouse::open_in_memory().unwrap(),
            loader: BatchLoader::new(WarehouseStatements::default()),
        }
    }

    pub fn load(&mut self, root: &Path, kind: SourceKind) -> LoadOutcome {
        self.loader
            .run(self.warehouse.conn_mut(), root, "json", kind)
            .unwrap()
    }

    pub fn count(&self, table: &str) -> i64 {
        self.warehouse
            .conn()
            .query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |r| {
                r.get(0)
            })
            .unwrap()
    }

    pub fn ids(&self, query: &str) -> Vec<String> {
        let conn = self.warehouse.conn();
        let mut stmt = conn.prepare(query).unwrap();
        let ids = stmt
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap();
        ids
    }

    pub fn songplays(&self) -> Vec<StoredSongplay> {
        let conn = self.warehouse.conn();
        let mut stmt = conn
            .prepare(
                "SELECT start_time, user_id, level, song_id, artist_id, session_id, location, user_agent
                 FROM songplays ORDER BY songplay_id",
            )
            .unwrap();
        let rows = stmt
            .query_map([], StoredSongplay::from_row)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        rows
    }

    pub fn user_level(&self, user_id: &str) -> Option<String> {
        self.warehouse
            .conn()
            .query_row(
                "SELECT level FROM users WHERE user_id = ?1",
                [user_id],
                |r| r.get(0),
            )
            .ok()
    }
}

/// Writes both catalog songs under `tree` in the dataset's A/B/C layout.
pub fn write_song_catalog(tree: &TestDataTree) {
    tree.write(
        "A/A/A/TRAAAAW128F429D538.json",
        &song_document(
            ARTIST_1_ID,
            ARTIST_1_NAME,
            SONG_1_ID,
            SONG_1_TITLE,
            SONG_1_DURATION,
        ),
    );
    tree.write(
        "A/A/B/TRAABJL12903CDCF1A.json",
        &song_document(
            ARTIST_2_ID,
            ARTIST_2_NAME,
            SONG_2_ID,
            SONG_2_TITLE,
            SONG_2_DURATION,
        ),
    );
}
