//! Activity log documents: newline-delimited listening events.
//!
//! Only `NextSong` events are song plays; everything else (logins, page
//! navigation, settings) is dropped before any row is derived. Each retained
//! event yields one time row, one user upsert and one songplay candidate, all
//! in file order.

use super::error::{LoadError, ParseError};
use super::resolver::SongplayResolver;
use crate::warehouse::{
    ActivityBatch, SongplayCandidate, SongplayFact, TimeRow, User, WarehouseStatements,
};
use chrono::{DateTime, Datelike, Timelike};
use rusqlite::Connection;
use serde::Deserialize;
use tracing::debug;

/// Page value marking a song play.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// The dataset writes ids as strings, and `""` for logged out users.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserIdValue {
    Text(String),
    Number(i64),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogEvent {
    page: String,
    ts: Option<i64>,
    user_id: Option<UserIdValue>,
    first_name: Option<String>,
    last_name: Option<String>,
    gender: Option<String>,
    level: Option<String>,
    song: Option<String>,
    artist: Option<String>,
    length: Option<f64>,
    session_id: Option<i64>,
    location: Option<String>,
    user_agent: Option<String>,
}

fn required<T>(value: Option<T>, line: usize, field: &'static str) -> Result<T, ParseError> {
    value.ok_or(ParseError::MissingField { line, field })
}

/// A `NextSong` event with every field the fact table needs.
struct ListenEvent {
    ts: i64,
    user_id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    gender: Option<String>,
    level: String,
    song: Option<String>,
    artist: Option<String>,
    length: Option<f64>,
    session_id: i64,
    location: String,
    user_agent: String,
}

impl LogEvent {
    fn into_listen_event(self, line: usize) -> Result<ListenEvent, ParseError> {
        let user_id = match self.user_id {
            Some(UserIdValue::Text(id)) if !id.is_empty() => Some(id),
            Some(UserIdValue::Number(id)) => Some(id.to_string()),
            _ => None,
        };
        Ok(ListenEvent {
            ts: required(self.ts, line, "ts")?,
            user_id: required(user_id, line, "userId")?,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            level: required(self.level, line, "level")?,
            song: self.song,
            artist: self.artist,
            length: self.length,
            session_id: required(self.session_id, line, "sessionId")?,
            location: required(self.location, line, "location")?,
            user_agent: required(self.user_agent, line, "userAgent")?,
        })
    }
}

/// Decomposes a millisecond epoch timestamp, in UTC.
pub fn derive_time_row(ts: i64) -> Option<TimeRow> {
    let moment = DateTime::from_timestamp_millis(ts)?;
    Some(TimeRow {
        start_time: ts,
        hour: moment.hour(),
        day: moment.day(),
        week_of_year: moment.iso_week().week(),
        month: moment.month(),
        year: moment.year(),
        is_weekday: moment.weekday().number_from_monday() <= 5,
    })
}

pub fn parse(content: &str) -> Result<ActivityBatch, ParseError> {
    let mut batch = ActivityBatch::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line = index + 1;
        if raw_line.trim().is_empty() {
            continue;
        }
        let event: LogEvent =
            serde_json::from_str(raw_line).map_err(|source| ParseError::Json { line, source })?;
        if event.page != NEXT_SONG_PAGE {
            batch.skipped_events += 1;
            continue;
        }

        let event = event.into_listen_event(line)?;
        let time_row =
            derive_time_row(event.ts).ok_or(ParseError::InvalidTimestamp { line, ts: event.ts })?;

        batch.time_rows.push(time_row);
        batch.users.push(User {
            user_id: event.user_id.clone(),
            first_name: event.first_name,
            last_name: event.last_name,
            gender: event.gender,
            level: event.level.clone(),
        });
        batch.candidates.push(SongplayCandidate {
            start_time: event.ts,
            user_id: event.user_id,
            level: event.level,
            song_title: event.song,
            artist_name: event.artist,
            duration: event.length,
            session_id: event.session_id,
            location: event.location,
            user_agent: event.user_agent,
        });
    }
    Ok(batch)
}

/// Writes time rows in bulk, then users, then one resolved fact per candidate.
pub fn load(
    conn: &Connection,
    statements: &WarehouseStatements,
    content: &str,
) -> Result<(), LoadError> {
    let batch = parse(content)?;

    statements.bulk_insert_time(conn, &batch.time_rows)?;
    for user in &batch.users {
        statements.upsert_user(conn, user)?;
    }

    let resolver = SongplayResolver::new(statements);
    let mut resolved = 0;
    let total = batch.candidates.len();
    for candidate in batch.candidates {
        let song_match = resolver.resolve(conn, &candidate)?;
        if song_match.is_some() {
            resolved += 1;
        }
        statements.insert_songplay(conn, &SongplayFact::from_candidate(candidate, song_match))?;
    }

    debug!(
        "Loaded {} songplays ({} resolved), skipped {} other events",
        total, resolved, batch.skipped_events
    );
    Ok(())
}
