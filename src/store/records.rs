//! Record Store
//!
//! Holds the authoritative collection and mirrors it into a blob store.
//!
//! ## Responsibilities
//! - Restore the collection on open (malformed data → empty collection)
//! - Append imports, skipping duplicate IDs on request
//! - Delete and update by ID
//! - Persist after every mutation without failing the mutation

use std::collections::HashSet;

use crate::error::Result;
use crate::record::Record;

use super::BlobStore;

/// Counts reported by a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Records appended to the collection
    pub imported: usize,

    /// Records dropped because their ID already existed
    pub skipped: usize,
}

/// Owns the lead collection
///
/// One instance per session; the in-memory collection is authoritative and
/// the blob store is a best-effort mirror.
pub struct RecordStore<S: BlobStore> {
    /// Backing slot store
    blobs: S,

    /// Key of the collection slot
    key: String,

    /// The collection, in insertion order
    records: Vec<Record>,
}

impl<S: BlobStore> RecordStore<S> {
    /// Open a store and restore the collection stored under `key`
    pub fn open(blobs: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let records = Self::load(&blobs, &key);
        tracing::debug!("Loaded {} records from slot '{}'", records.len(), key);

        Self { blobs, key, records }
    }

    /// Read the collection from the blob store
    ///
    /// Absent, unreadable or malformed data yields an empty collection.
    pub fn load(blobs: &S, key: &str) -> Vec<Record> {
        let text = match blobs.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Stored leads in '{}' unreadable, starting empty: {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Record>>(&text) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Stored leads in '{}' malformed, starting empty: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Serialize the collection and write it to the blob store
    pub fn persist(&self) -> Result<()> {
        let text = serde_json::to_string(&self.records)?;
        self.blobs.set(&self.key, &text)
    }

    /// Append incoming records in order
    ///
    /// With `skip_duplicates`, a record whose ID is already present (including
    /// one appended earlier in this batch) is counted as skipped instead.
    pub fn merge(&mut self, incoming: Vec<Record>, skip_duplicates: bool) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        let mut known: HashSet<String> = if skip_duplicates {
            self.records.iter().map(|r| r.id().to_string()).collect()
        } else {
            HashSet::new()
        };

        for record in incoming {
            if skip_duplicates && !known.insert(record.id().to_string()) {
                outcome.skipped += 1;
                continue;
            }
            self.records.push(record);
            outcome.imported += 1;
        }

        tracing::info!(
            "Merged import: {} imported, {} skipped, {} total",
            outcome.imported,
            outcome.skipped,
            self.records.len()
        );
        self.persist_best_effort();
        outcome
    }

    /// Append a single record
    pub fn add(&mut self, record: Record) {
        self.records.push(record);
        self.persist_best_effort();
    }

    /// Remove every record whose ID equals `id`; returns how many were removed
    pub fn delete_by_id(&mut self, id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = before - self.records.len();

        if removed > 0 {
            tracing::info!("Deleted {} record(s) with ID {}", removed, id);
            self.persist_best_effort();
        }
        removed
    }

    /// Set `field` on every record whose ID equals `id`; returns how many changed
    pub fn update_field(&mut self, id: &str, field: &str, value: &str) -> usize {
        let mut updated = 0;
        for record in self.records.iter_mut().filter(|r| r.id() == id) {
            record.set(field, value);
            updated += 1;
        }

        if updated > 0 {
            self.persist_best_effort();
        }
        updated
    }

    /// First record with the given ID
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
        self.persist_best_effort();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The collection, in insertion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Key of the collection slot
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing blob store
    pub fn blobs(&self) -> &S {
        &self.blobs
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn persist_best_effort(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(
                "Failed to persist {} records to '{}': {}",
                self.records.len(),
                self.key,
                e
            );
        }
    }
}
