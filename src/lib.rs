//! # leadtable
//!
//! A table manager for a leads dataset with:
//! - CSV import (quote-aware, with preview) and export
//! - Free-text and field filters, type-aware stable sorting
//! - Pagination with range metadata
//! - Stage statistics
//! - A persisted collection mirrored into a key-value blob store
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Front end (CLI / view)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ explicit calls
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      LeadTable                               │
//! │        (criteria, sort state, page position, View)           │
//! └──────┬──────────────────┬───────────────────────┬───────────┘
//!        │                  │                       │
//!        ▼                  ▼                       ▼
//!  ┌───────────┐     ┌─────────────┐        ┌──────────────┐
//!  │  Import   │     │ Query/Pager │        │ RecordStore  │
//!  │ (CSV in)  │     │   /Stats    │        │ (collection) │
//!  └───────────┘     └─────────────┘        └──────┬───────┘
//!                                                  │
//!                                                  ▼
//!                                           ┌──────────────┐
//!                                           │  BlobStore   │
//!                                           │ (memory/file)│
//!                                           └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod csv;
pub mod store;
pub mod query;
pub mod pager;
pub mod stats;
pub mod import;
pub mod table;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LeadError, Result};
pub use config::Config;
pub use record::{Field, Record};
pub use query::{FilterCriteria, SortColumn, SortDirection, SortState};
pub use store::{BlobStore, FileBlobStore, MemoryBlobStore, MergeOutcome, RecordStore};
pub use table::{Export, LeadTable};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of leadtable
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
