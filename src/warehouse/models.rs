//! Row types for the warehouse tables.
//!
//! These are what the transformers produce and what the statements write.
//! They carry no store handles.

#[derive(Clone, Debug, PartialEq)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

/// A decomposed event timestamp. Not unique: one row per listening event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeRow {
    /// Milliseconds since the Unix epoch.
    pub start_time: i64,
    pub hour: u32,
    pub day: u32,
    /// ISO 8601 week number.
    pub week_of_year: u32,
    pub month: u32,
    pub year: i32,
    pub is_weekday: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
}

/// A listening event waiting for its song/artist keys to be resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct SongplayCandidate {
    pub start_time: i64,
    pub user_id: String,
    pub level: String,
    pub song_title: Option<String>,
    pub artist_name: Option<String>,
    pub duration: Option<f64>,
    pub session_id: i64,
    pub location: String,
    pub user_agent: String,
}

/// Keys of the song and artist a candidate resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongplayFact {
    pub start_time: i64,
    pub user_id: String,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: String,
    pub user_agent: String,
}

impl SongplayFact {
    /// Builds the fact row; the song and artist keys are both set or both null.
    pub fn from_candidate(candidate: SongplayCandidate, song_match: Option<SongMatch>) -> Self {
        let (song_id, artist_id) = match song_match {
            Some(SongMatch { song_id, artist_id }) => (Some(song_id), Some(artist_id)),
            None => (None, None),
        };
        SongplayFact {
            start_time: candidate.start_time,
            user_id: candidate.user_id,
            level: candidate.level,
            song_id,
            artist_id,
            session_id: candidate.session_id,
            location: candidate.location,
            user_agent: candidate.user_agent,
        }
    }
}

/// Everything one activity log file contributes to the warehouse, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityBatch {
    pub time_rows: Vec<TimeRow>,
    pub users: Vec<User>,
    pub candidates: Vec<SongplayCandidate>,
    /// Events dropped because they were not song plays.
    pub skipped_events: usize,
}

/// Row counts per warehouse table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub artists: usize,
    pub songs: usize,
    pub users: usize,
    pub time: usize,
    pub songplays: usize,
}
