//! Blob stores
//!
//! Key-value slots holding serialized text.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{LeadError, Result};

/// Magic bytes at the start of every blob file
pub const MAGIC: &[u8; 4] = b"LDTB";

/// Blob file format version
pub const VERSION: u16 = 1;

/// Header size: magic (4) + version (2) + crc (4) + payload length (4)
pub const HEADER_SIZE: usize = 14;

/// A key-value slot store for textual blobs
///
/// Methods take `&self`; implementations use interior mutability.
pub trait BlobStore {
    /// Read the blob stored under `key`
    ///
    /// Returns:
    /// - `Ok(Some(text))`: blob present
    /// - `Ok(None)`: nothing stored under this key
    /// - `Err(_)`: the slot exists but could not be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: BlobStore + ?Sized> BlobStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Blob store kept in process memory
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File store
// =============================================================================

/// Blob store keeping one checksummed file per key
///
/// Writes go to a temp file that is renamed over the target, so a crash
/// mid-write leaves the previous blob intact.
#[derive(Debug)]
pub struct FileBlobStore {
    /// Directory holding the blob files
    dir: PathBuf,

    /// Serializes writers within this process
    write_lock: RwLock<()>,
}

impl FileBlobStore {
    const EXTENSION: &'static str = "blob";

    /// Open or create a store in the given directory
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: RwLock::new(()),
        })
    }

    /// Get the directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a key
    pub fn blob_path(&self, key: &str) -> Result<PathBuf> {
        Self::validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, Self::EXTENSION)))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Keys become file names, so they must be a single plain path component
    fn validate_key(key: &str) -> Result<()> {
        let bad = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\', '\0']);
        if bad {
            return Err(LeadError::Config(format!("Invalid storage key: {:?}", key)));
        }
        Ok(())
    }

    fn encode(value: &str) -> Vec<u8> {
        let payload = value.as_bytes();
        let crc = crc32fast::hash(payload);

        let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        bytes.extend_from_slice(&crc.to_le_bytes());
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    fn decode(bytes: &[u8]) -> Result<String> {
        if bytes.len() < HEADER_SIZE {
            return Err(LeadError::MalformedStoredData(format!(
                "Incomplete header: expected {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }
        if &bytes[0..4] != MAGIC {
            return Err(LeadError::MalformedStoredData("Bad magic bytes".to_string()));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(LeadError::MalformedStoredData(format!(
                "Unsupported blob version: {}",
                version
            )));
        }

        let crc = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        let len = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]) as usize;
        let payload = &bytes[HEADER_SIZE..];
        if payload.len() != len {
            return Err(LeadError::MalformedStoredData(format!(
                "Payload length mismatch: header says {}, found {}",
                len,
                payload.len()
            )));
        }
        if crc32fast::hash(payload) != crc {
            return Err(LeadError::MalformedStoredData("CRC mismatch".to_string()));
        }

        String::from_utf8(payload.to_vec())
            .map_err(|e| LeadError::MalformedStoredData(format!("Payload is not UTF-8: {}", e)))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        let _guard = self.write_lock.read();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Self::decode(&bytes).map(Some)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        let tmp_path = path.with_extension("tmp");
        let _guard = self.write_lock.write();

        let write = || -> std::io::Result<()> {
            let mut file: File = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)?;
            file.write_all(&Self::encode(value))?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            LeadError::PersistFailure(format!("{}: {}", path.display(), e))
        })
    }
}
