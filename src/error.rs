//! Error types for leadtable
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LeadError
pub type Result<T> = std::result::Result<T, LeadError>;

/// Unified error type for leadtable operations
#[derive(Debug, Error)]
pub enum LeadError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Malformed stored data: {0}")]
    MalformedStoredData(String),

    #[error("Persist failed: {0}")]
    PersistFailure(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Import / Export Errors
    // -------------------------------------------------------------------------
    #[error("Import parse failed: {0}")]
    ImportParseFailure(String),

    #[error("Import cancelled: {0}")]
    ImportCancelled(String),

    #[error("Nothing to export")]
    EmptyExport,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
