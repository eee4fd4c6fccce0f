//! Table controller
//!
//! Ties the record store, query engine and pager together.
//!
//! ## Responsibilities
//! - Own the store (injected, never global) plus filter, sort and page state
//! - Recompute the View explicitly after every change: mutate → View → Page
//! - Reset to page 1 whenever filter or sort changes
//! - Produce exports and stats for the front end

use chrono::NaiveDate;

use crate::config::Config;
use crate::csv;
use crate::error::Result;
use crate::import::ImportPreview;
use crate::pager::{self, Page};
use crate::query::{self, FilterCriteria, SortColumn, SortState};
use crate::record::{Field, Record};
use crate::stats::{self, Stats};
use crate::store::{BlobStore, MergeOutcome, RecordStore};

/// CSV export of the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Suggested file name, `leads_export_<YYYY-MM-DD>.csv`
    pub filename: String,

    /// CSV text
    pub contents: String,
}

/// Suggested export file name for a given day
pub fn export_filename(date: NaiveDate) -> String {
    format!("leads_export_{}.csv", date.format("%Y-%m-%d"))
}

/// The leads table: collection, current View and page position
pub struct LeadTable<S: BlobStore> {
    /// Authoritative collection
    store: RecordStore<S>,

    /// Active filters
    criteria: FilterCriteria,

    /// Active sort
    sort: SortState,

    /// 1-based current page
    page_number: usize,

    /// Records per page
    page_size: usize,

    /// Filtered and sorted records, rebuilt by `refresh`
    view: Vec<Record>,
}

impl<S: BlobStore> LeadTable<S> {
    /// Open a table over the collection stored in `blobs`
    pub fn open(blobs: S, config: &Config) -> Self {
        let store = RecordStore::open(blobs, config.storage_key.clone());
        Self::from_store(store, config.page_size)
    }

    /// Wrap an already opened record store
    pub fn from_store(store: RecordStore<S>, page_size: usize) -> Self {
        let mut table = Self {
            store,
            criteria: FilterCriteria::default(),
            sort: SortState::default(),
            page_number: 1,
            page_size: page_size.max(1),
            view: Vec::new(),
        };
        table.refresh();
        table
    }

    // =========================================================================
    // Filtering & Sorting
    // =========================================================================

    /// Replace the filter criteria
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.page_number = 1;
        self.refresh();
    }

    /// Change only the search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        let criteria = FilterCriteria {
            search_term: term.into(),
            ..self.criteria.clone()
        };
        self.set_criteria(criteria);
    }

    /// Drop every filter
    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Sort by a column key, flipping direction if it is already active
    ///
    /// Unknown keys leave the View untouched and return `false`.
    pub fn sort_by(&mut self, key: &str) -> bool {
        let Some(column) = SortColumn::from_key(key) else {
            tracing::debug!("Ignoring unknown sort key '{}'", key);
            return false;
        };

        self.sort.toggle(column);
        self.page_number = 1;
        self.refresh();
        true
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// The current page of the View
    pub fn current_page(&self) -> Page<'_> {
        pager::page(&self.view, self.page_number, self.page_size)
    }

    /// Number of pages in the View
    pub fn total_pages(&self) -> usize {
        pager::total_pages(self.view.len(), self.page_size)
    }

    /// Jump to a page; out-of-range pages are refused
    pub fn go_to_page(&mut self, page_number: usize) -> bool {
        if page_number < 1 || page_number > self.total_pages().max(1) {
            return false;
        }
        self.page_number = page_number;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page_number + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.page_number > 1 && self.go_to_page(self.page_number - 1)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Merge a confirmed import preview into the collection
    pub fn import(&mut self, preview: ImportPreview, skip_duplicates: bool) -> MergeOutcome {
        let outcome = self.store.merge(preview.into_records(), skip_duplicates);
        self.refresh_after_mutation();
        outcome
    }

    /// Append a single lead
    pub fn add(&mut self, record: Record) {
        self.store.add(record);
        self.refresh_after_mutation();
    }

    /// Set a field on every lead with the given ID
    pub fn update_field(&mut self, id: &str, field: &str, value: &str) -> usize {
        let updated = self.store.update_field(id, field, value);
        if updated > 0 {
            self.refresh_after_mutation();
        }
        updated
    }

    /// Delete every lead with the given ID
    pub fn delete(&mut self, id: &str) -> usize {
        let removed = self.store.delete_by_id(id);
        if removed > 0 {
            self.refresh_after_mutation();
        }
        removed
    }

    // =========================================================================
    // Derived Data
    // =========================================================================

    /// Stage counts over the whole collection
    pub fn stats(&self) -> Stats {
        stats::stats(self.store.records())
    }

    /// Distinct values of a field across the collection
    pub fn distinct_values(&self, field: Field) -> Vec<String> {
        query::distinct_values(self.store.records(), field)
    }

    /// Export the whole collection as CSV
    pub fn export(&self, today: NaiveDate) -> Result<Export> {
        let contents = csv::serialize(self.store.records())?;
        Ok(Export {
            filename: export_filename(today),
            contents,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The collection, in insertion order
    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    /// The filtered and sorted View
    pub fn view(&self) -> &[Record] {
        &self.view
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn refresh(&mut self) {
        self.view = query::view(self.store.records(), &self.criteria, &self.sort);
        tracing::debug!(
            "View rebuilt: {} of {} records",
            self.view.len(),
            self.store.len()
        );
    }

    /// Collection changed: rebuild and keep the page position in range
    fn refresh_after_mutation(&mut self) {
        self.refresh();
        self.page_number = self.page_number.min(self.total_pages().max(1));
    }
}
