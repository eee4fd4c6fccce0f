//! Configuration for leadtable
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a leads table instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for the file-backed blob store
    /// Internal structure:
    ///   {data_dir}/
    ///     └── {storage_key}.blob   (the whole collection)
    pub data_dir: PathBuf,

    /// Key of the single slot holding the serialized collection
    pub storage_key: String,

    // -------------------------------------------------------------------------
    // View Configuration
    // -------------------------------------------------------------------------
    /// Records per page
    pub page_size: usize,

    // -------------------------------------------------------------------------
    // Import Configuration
    // -------------------------------------------------------------------------
    /// Drop incoming records whose ID already exists
    pub skip_duplicates: bool,

    /// Number of rows shown in an import preview
    pub preview_rows: usize,

    /// How long to wait for a staged file read (milliseconds)
    pub import_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./leadtable_data"),
            storage_key: "leadsData".to_string(),
            page_size: 10,
            skip_duplicates: true,
            preview_rows: 5,
            import_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for the file blob store)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the storage key of the collection blob
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Set the page size (values below 1 are raised to 1)
    pub fn page_size(mut self, size: usize) -> Self {
        self.config.page_size = size.max(1);
        self
    }

    /// Set whether imports skip records with an existing ID
    pub fn skip_duplicates(mut self, skip: bool) -> Self {
        self.config.skip_duplicates = skip;
        self
    }

    /// Set the number of preview rows
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.config.preview_rows = rows;
        self
    }

    /// Set the import read timeout (in milliseconds)
    pub fn import_timeout_ms(mut self, ms: u64) -> Self {
        self.config.import_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
