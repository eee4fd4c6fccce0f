//! Store Module
//!
//! Persistence for the lead collection.
//!
//! ## Responsibilities
//! - Abstract the single key-value slot holding the collection ([`BlobStore`])
//! - Keep the authoritative in-memory collection ([`RecordStore`])
//! - Merge imports with optional duplicate skipping, delete by ID
//! - Persist after every mutation, best effort
//!
//! ## Blob File Format ([`FileBlobStore`])
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Header                                 │
//! │ ┌──────────┬──────────┬──────┬───────┐ │
//! │ │Magic (4) │Version(2)│CRC(4)│Len (4)│ │
//! │ └──────────┴──────────┴──────┴───────┘ │
//! ├────────────────────────────────────────┤
//! │ Payload (UTF-8 JSON array of records)  │
//! └────────────────────────────────────────┘
//! ```

mod blob;
mod records;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore, HEADER_SIZE, MAGIC, VERSION};
pub use records::{MergeOutcome, RecordStore};
