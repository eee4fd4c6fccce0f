//! Query Module
//!
//! Derives the View (filtered, sorted records) from the collection.
//!
//! ## Responsibilities
//! - Composable filter: free-text search plus exact field filters and a day filter
//! - Stable, type-aware sort with ascending/descending toggling
//! - Distinct field values for building filter choices
//!
//! The collection is never mutated; every call produces a fresh View.

pub mod date;
mod sort;

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::record::{Field, Record};

pub use sort::{sort, SortColumn, SortDirection, SortState};

/// Filter criteria; empty strings and `None` disable a filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of `Lead Name` or `First Name`, plain substring of `ID`
    pub search_term: String,

    /// Exact `Stage`
    pub stage: Option<String>,

    /// Exact `Source`
    pub source: Option<String>,

    /// Exact `Responsible`
    pub responsible: Option<String>,

    /// Calendar day of `Created`
    pub date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = Some(responsible.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// True when no filter is active
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
            && is_unset(&self.stage)
            && is_unset(&self.source)
            && is_unset(&self.responsible)
            && self.date.is_none()
    }

    /// Check a record against every active filter
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record)
            && matches_exact(&self.stage, record.stage())
            && matches_exact(&self.source, record.source())
            && matches_exact(&self.responsible, record.responsible())
            && self.matches_date(record)
    }

    fn matches_search(&self, record: &Record) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        record.lead_name().to_lowercase().contains(&term)
            || record.first_name().to_lowercase().contains(&term)
            || record.id().contains(self.search_term.as_str())
    }

    fn matches_date(&self, record: &Record) -> bool {
        match self.date {
            None => true,
            Some(day) => record.created_date() == Some(day),
        }
    }
}

fn is_unset(filter: &Option<String>) -> bool {
    filter.as_deref().map_or(true, str::is_empty)
}

fn matches_exact(filter: &Option<String>, value: &str) -> bool {
    match filter.as_deref() {
        None | Some("") => true,
        Some(wanted) => wanted == value,
    }
}

/// Records matching `criteria`, in collection order
pub fn filter(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Filter then sort: the View for a collection
pub fn view(records: &[Record], criteria: &FilterCriteria, sort_state: &SortState) -> Vec<Record> {
    let mut view = filter(records, criteria);
    if let Some(column) = sort_state.column() {
        sort(&mut view, column, sort_state.direction());
    }
    view
}

/// Sorted distinct non-empty values of a field
pub fn distinct_values(records: &[Record], field: Field) -> Vec<String> {
    records
        .iter()
        .map(|record| record.field(field))
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
