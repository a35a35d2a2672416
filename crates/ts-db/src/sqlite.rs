//! `SQLite` backing for the log document.
//!
//! # Schema
//!
//! - `entries`: one row per entry; `position` keeps insertion order.
//! - `counters`: named integers; `next_record_number` holds the last record number handed out.
//!
//! Timestamps are stored as RFC 3339 TEXT with the local offset (e.g.
//! `2009-12-01T09:00:00-05:00`) and read back as local time.

use std::path::Path;

use chrono::{DateTime, Local, SecondsFormat};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use ts_core::TimeEntry;

use crate::StoreError;
use crate::document::{DocumentStore, LogDocument};

const NEXT_RECORD_NUMBER: &str = "next_record_number";

/// Database connection wrapper.
///
/// `rusqlite::Connection` is `Send` but not `Sync`; a store is meant to be owned by
/// a single command invocation.
pub struct SqliteStore {
    conn: Connection,
}

/// An entry row before its timestamps are parsed.
struct EntryRow {
    record_number: Option<u64>,
    project: String,
    start_time: String,
    end_time: String,
    comment: Option<String>,
}

impl SqliteStore {
    /// Opens a store at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Opens an in-memory store. The data is gone once the connection closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Initializes the schema. Safe to call on an already-initialized database.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS entries (
                position INTEGER NOT NULL,
                record_number INTEGER,
                project TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                comment TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_entries_record_number ON entries(record_number);

            CREATE TABLE IF NOT EXISTS counters (
                name TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl DocumentStore for SqliteStore {
    fn transaction<T, F>(&mut self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut LogDocument) -> Result<T, StoreError>,
    {
        // IMMEDIATE takes the write lock up front so the read-check-write is exclusive.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let original = load_document(&tx)?;
        let mut document = original.clone();

        // Dropping `tx` on the error path rolls back.
        let result = f(&mut document)?;

        if document == original {
            tracing::trace!("document unchanged, nothing to write");
        } else {
            save_document(&tx, &document)?;
            tracing::debug!(
                entries = document.entries.len(),
                next_record_number = document.next_record_number,
                "document saved"
            );
        }
        tx.commit()?;
        Ok(result)
    }
}

fn load_document(conn: &Connection) -> Result<LogDocument, StoreError> {
    let next_record_number: u64 = conn
        .query_row(
            "SELECT value FROM counters WHERE name = ?",
            [NEXT_RECORD_NUMBER],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);

    let mut stmt = conn.prepare(
        "
        SELECT record_number, project, start_time, end_time, comment
        FROM entries
        ORDER BY position ASC
        ",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(EntryRow {
            record_number: row.get(0)?,
            project: row.get(1)?,
            start_time: row.get(2)?,
            end_time: row.get(3)?,
            comment: row.get(4)?,
        })
    })?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(entry_from_row(row?)?);
    }

    Ok(LogDocument {
        entries,
        next_record_number,
    })
}

fn save_document(conn: &Connection, document: &LogDocument) -> Result<(), StoreError> {
    conn.execute("DELETE FROM entries", [])?;
    {
        let mut stmt = conn.prepare(
            "
            INSERT INTO entries (position, record_number, project, start_time, end_time, comment)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )?;
        for (position, entry) in document.entries.iter().enumerate() {
            stmt.execute(params![
                position,
                entry.record_number,
                entry.project,
                format_timestamp(entry.start()),
                format_timestamp(entry.end()),
                entry.comment,
            ])?;
        }
    }
    conn.execute(
        "
        INSERT INTO counters (name, value) VALUES (?, ?)
        ON CONFLICT(name) DO UPDATE SET value = excluded.value
        ",
        params![NEXT_RECORD_NUMBER, document.next_record_number],
    )?;
    Ok(())
}

fn entry_from_row(row: EntryRow) -> Result<TimeEntry, StoreError> {
    let start = parse_timestamp(&row.start_time, row.record_number)?;
    let end = parse_timestamp(&row.end_time, row.record_number)?;
    let mut entry = TimeEntry::new(row.project, start, end, row.comment)?;
    entry.record_number = row.record_number;
    Ok(entry)
}

fn parse_timestamp(
    timestamp: &str,
    record_number: Option<u64>,
) -> Result<DateTime<Local>, StoreError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Local))
        .map_err(|source| StoreError::TimestampParse {
            record_number,
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Local>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}
