use crate::warehouse::{SongMatch, SongplayCandidate, WarehouseStatements};
use rusqlite::Connection;

/// Finds the song and artist keys of a songplay candidate by content.
///
/// A candidate matches a song when the title, the artist name and the
/// duration are all exactly equal. No match is a normal outcome: the event
/// refers to a song the catalog never had.
pub struct SongplayResolver<'a> {
    statements: &'a WarehouseStatements,
}

impl<'a> SongplayResolver<'a> {
    pub fn new(statements: &'a WarehouseStatements) -> Self {
        SongplayResolver { statements }
    }

    pub fn resolve(
        &self,
        conn: &Connection,
        candidate: &SongplayCandidate,
    ) -> rusqlite::Result<Option<SongMatch>> {
        match (
            candidate.song_title.as_deref(),
            candidate.artist_name.as_deref(),
            candidate.duration,
        ) {
            (Some(title), Some(artist_name), Some(duration)) => {
                self.statements
                    .select_song(conn, title, artist_name, duration)
            }
            _ => Ok(None),
        }
    }
}
