//! Storage layer for timesheet.
//!
//! The persisted log is a single document holding every entry plus the record
//! number counter. [`EntryStore`] owns the rules (no overlapping entries, record
//! numbers never reused) and runs each operation inside one transaction of a
//! [`DocumentStore`] backing:
//!
//! - [`SqliteStore`]: a `rusqlite` file, used by the CLI
//! - [`MemoryStore`]: an in-process document, useful for tests
//!
//! # Transactions
//!
//! A transaction loads the whole document, hands it to a closure, and writes it
//! back only if the closure returns `Ok`. An `Err` discards every change made to
//! the document, so a rejected add or update never leaves partial state behind.

mod document;
mod sqlite;
mod store;

use thiserror::Error;
use ts_core::RangeError;

pub use document::{DocumentStore, LogDocument, MemoryStore};
pub use sqlite::SqliteStore;
pub use store::EntryStore;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An entry's start would come after its end.
    #[error(transparent)]
    InvalidRange(#[from] RangeError),
    /// The entry overlaps an entry already in the log.
    #[error("the entry conflicts with existing entries")]
    Conflict {
        /// The overlapping entry's record number.
        record_number: Option<u64>,
    },
    /// No entry has the record number.
    #[error("cannot find an entry with record number {0}")]
    NotFound(u64),
    /// More than one entry has the record number; the log is corrupt.
    #[error("record number {0} is not unique in the database")]
    Corrupt(u64),
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored timestamp could not be parsed.
    #[error("invalid timestamp for record {record_number:?}: {timestamp}")]
    TimestampParse {
        record_number: Option<u64>,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}
