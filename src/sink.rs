//! Playlist records and the local SQLite store.
//!
//! Every created playlist leaves one row per track in `my_playlists`. Rows are
//! only ever appended. The pair `(playlist_id, song_uri)` is unique, so
//! writing the same run twice is rejected by SQLite and reported as
//! [`PersistOutcome::AlreadyStored`] instead of duplicating rows.

use std::path::Path;

use rusqlite::{Connection, ffi, params, types::Type};

use crate::{
    Error, Res,
    types::{PlaylistRecord, Track},
};

const DB_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS my_playlists (
        song_name TEXT,
        song_uri TEXT,
        artist_name TEXT,
        playlist_id TEXT,
        date TEXT,
        creation_id TEXT,
        UNIQUE (playlist_id, song_uri)
    );
"#;

/// Result of writing a batch of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// All rows were appended.
    Inserted(usize),
    /// At least one row already existed; nothing was written.
    AlreadyStored,
}

/// One record per track, all sharing playlist, date and creation id.
pub fn build_records(
    tracks: &[Track],
    artist_name: &str,
    playlist_id: &str,
    date: &str,
    creation_id: i64,
) -> Vec<PlaylistRecord> {
    tracks
        .iter()
        .map(|t| PlaylistRecord {
            song_name: t.name.clone(),
            song_uri: t.uri.clone(),
            artist_name: artist_name.to_string(),
            playlist_id: playlist_id.to_string(),
            date: date.to_string(),
            creation_id,
        })
        .collect()
}

/// Checks records before they are written.
///
/// Returns `Ok(false)` for an empty batch, which means there is nothing to
/// store. Empty text fields count as null.
///
/// # Errors
///
/// [`Error::NullField`] for the first row with an empty field.
pub fn validate(rows: &[PlaylistRecord]) -> Res<bool> {
    if rows.is_empty() {
        return Ok(false);
    }

    for (i, r) in rows.iter().enumerate() {
        let fields = [
            ("song_name", &r.song_name),
            ("song_uri", &r.song_uri),
            ("artist_name", &r.artist_name),
            ("playlist_id", &r.playlist_id),
            ("date", &r.date),
        ];
        if let Some(&(column, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(Error::NullField { row: i, column });
        }
    }

    Ok(true)
}

pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Opens (or creates) the database and makes sure the table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Res<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(DB_SCHEMA)?;
        Ok(Self { conn })
    }

    /// Appends rows in a single transaction.
    ///
    /// A uniqueness violation rolls the whole batch back and yields
    /// [`PersistOutcome::AlreadyStored`]. Any other database error, other
    /// constraint kinds included, is returned.
    pub fn persist(&mut self, rows: &[PlaylistRecord]) -> Res<PersistOutcome> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO my_playlists (
                    song_name, song_uri, artist_name, playlist_id, date, creation_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            for r in rows {
                let inserted = stmt.execute(params![
                    r.song_name,
                    r.song_uri,
                    r.artist_name,
                    r.playlist_id,
                    r.date,
                    r.creation_id.to_string(),
                ]);

                match inserted {
                    Ok(_) => {}
                    Err(e) if is_unique_violation(&e) => {
                        return Ok(PersistOutcome::AlreadyStored);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        tx.commit()?;

        Ok(PersistOutcome::Inserted(rows.len()))
    }

    /// Stored records, newest run first.
    pub fn history(&self, limit: usize) -> Res<Vec<PlaylistRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT song_name, song_uri, artist_name, playlist_id, date, creation_id
             FROM my_playlists
             ORDER BY CAST(creation_id AS INTEGER) DESC, rowid ASC
             LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                let creation_id: String = row.get(5)?;
                Ok(PlaylistRecord {
                    song_name: row.get(0)?,
                    song_uri: row.get(1)?,
                    artist_name: row.get(2)?,
                    playlist_id: row.get(3)?,
                    date: row.get(4)?,
                    creation_id: creation_id.parse().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
                    })?,
                })
            })?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;

        Ok(rows)
    }

    pub fn count(&self) -> Res<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM my_playlists", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
