//! The conflict-free entry log.

use chrono::{DateTime, Local};
use ts_core::{EntryChanges, TimeEntry};

use crate::StoreError;
use crate::document::DocumentStore;

/// A durable collection of non-overlapping entries addressed by record number.
///
/// Every operation is one transaction on the backing store: the whole log is
/// loaded, checked, changed and (for mutations) saved before returning.
pub struct EntryStore<S> {
    backing: S,
}

impl<S: DocumentStore> EntryStore<S> {
    /// Opens the log, loading it once so unreadable data is reported up front.
    pub fn open(mut backing: S) -> Result<Self, StoreError> {
        let count = backing.transaction(|doc| Ok(doc.entries.len()))?;
        tracing::debug!(entries = count, "opened entry store");
        Ok(Self { backing })
    }

    pub const fn backing(&self) -> &S {
        &self.backing
    }

    pub fn count(&mut self) -> Result<usize, StoreError> {
        self.backing.transaction(|doc| Ok(doc.entries.len()))
    }

    /// Stores `entry` under the next record number, which is also written back into `entry`.
    pub fn add(&mut self, entry: &mut TimeEntry) -> Result<u64, StoreError> {
        let candidate: &TimeEntry = entry;
        let record_number = self.backing.transaction(|doc| {
            if let Some(existing) = doc.entries.iter().find(|e| e.conflicts_with(candidate)) {
                tracing::debug!(existing = ?existing.record_number, "add rejected, entry overlaps");
                return Err(StoreError::Conflict {
                    record_number: existing.record_number,
                });
            }
            doc.next_record_number += 1;
            let mut stored = candidate.clone();
            stored.record_number = Some(doc.next_record_number);
            doc.entries.push(stored);
            Ok(doc.next_record_number)
        })?;

        entry.record_number = Some(record_number);
        tracing::debug!(record_number, "entry added");
        Ok(record_number)
    }

    pub fn find(&mut self, record_number: u64) -> Result<TimeEntry, StoreError> {
        self.backing.transaction(|doc| {
            let index = locate(&doc.entries, record_number)?;
            Ok(doc.entries[index].clone())
        })
    }

    /// Applies `changes` to an entry and returns the updated entry.
    ///
    /// Fails without changing the log if a bound is out of order at any step or the
    /// updated span overlaps another entry.
    pub fn update(
        &mut self,
        record_number: u64,
        changes: &EntryChanges,
    ) -> Result<TimeEntry, StoreError> {
        self.backing.transaction(|doc| {
            let index = locate(&doc.entries, record_number)?;
            let mut updated = doc.entries[index].clone();
            changes.apply_to(&mut updated)?;

            let overlapping = doc
                .entries
                .iter()
                .enumerate()
                .find(|(i, other)| *i != index && other.conflicts_with(&updated));
            if let Some((_, existing)) = overlapping {
                tracing::debug!(
                    record_number,
                    existing = ?existing.record_number,
                    "update rejected, entry overlaps"
                );
                return Err(StoreError::Conflict {
                    record_number: existing.record_number,
                });
            }

            doc.entries[index].clone_from(&updated);
            Ok(updated)
        })
    }

    /// Removes an entry and returns it. Its record number is never reused.
    pub fn delete(&mut self, record_number: u64) -> Result<TimeEntry, StoreError> {
        self.backing.transaction(|doc| {
            let index = locate(&doc.entries, record_number)?;
            Ok(doc.entries.remove(index))
        })
    }

    /// Every entry, in stored order.
    pub fn all(&mut self) -> Result<Vec<TimeEntry>, StoreError> {
        self.backing.transaction(|doc| Ok(doc.entries.clone()))
    }

    /// Entries whose span touches `[start, end]`, both ends included, in stored order.
    pub fn extract(
        &mut self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.backing.transaction(|doc| {
            Ok(doc
                .entries
                .iter()
                .filter(|entry| entry.overlaps_window(start, end))
                .cloned()
                .collect())
        })
    }
}

/// Finds the index of the single entry with `record_number`.
fn locate(entries: &[TimeEntry], record_number: u64) -> Result<usize, StoreError> {
    let mut matches = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.record_number == Some(record_number))
        .map(|(index, _)| index);

    let index = matches.next().ok_or(StoreError::NotFound(record_number))?;
    if matches.next().is_some() {
        return Err(StoreError::Corrupt(record_number));
    }
    Ok(index)
}
