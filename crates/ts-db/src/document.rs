//! The persisted document and the transactional backing it lives in.

use ts_core::TimeEntry;

use crate::StoreError;

/// Everything the log persists, saved and loaded as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogDocument {
    /// Entries in insertion order.
    pub entries: Vec<TimeEntry>,
    /// The most recently assigned record number; `0` before the first add.
    pub next_record_number: u64,
}

/// A backing store that runs closures against the document atomically.
pub trait DocumentStore {
    /// Loads the document, runs `f` on it and commits the result if `f` succeeds.
    ///
    /// When `f` fails, nothing it did to the document is kept.
    fn transaction<T, F>(&mut self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut LogDocument) -> Result<T, StoreError>;
}

/// A document held in memory.
///
/// Each transaction works on a copy that replaces the stored document on success.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: LogDocument,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing document, as if it had been loaded from disk.
    pub const fn from_document(document: LogDocument) -> Self {
        Self { document }
    }

    pub const fn document(&self) -> &LogDocument {
        &self.document
    }
}

impl DocumentStore for MemoryStore {
    fn transaction<T, F>(&mut self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut LogDocument) -> Result<T, StoreError>,
    {
        let mut working = self.document.clone();
        let result = f(&mut working)?;
        self.document = working;
        Ok(result)
    }
}
