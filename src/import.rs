//! Import staging
//!
//! Turns a CSV payload into a preview the user confirms before anything is
//! merged into the collection.
//!
//! ## Read Model
//! File reads run on a background thread and report back over a channel.
//! Each read (or synchronous `stage_text`) bumps a generation counter; results
//! from older generations are discarded, so the latest upload always wins.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};

use crate::csv::{self, ParseReport};
use crate::error::{LeadError, Result};
use crate::record::Record;

/// Parsed import payload awaiting confirmation
#[derive(Debug, Clone)]
pub struct ImportPreview {
    report: ParseReport,
}

impl ImportPreview {
    /// Parse a CSV payload
    ///
    /// Fails with `ImportParseFailure` when no data row can be accepted.
    pub fn from_text(text: &str) -> Result<Self> {
        let report = csv::parse_with_report(text);

        if report.headers.is_empty() {
            return Err(LeadError::ImportParseFailure(
                "expected a header row and at least one data row".to_string(),
            ));
        }
        if report.records.is_empty() {
            return Err(LeadError::ImportParseFailure(format!(
                "no row matched the {} header fields ({} dropped)",
                report.headers.len(),
                report.dropped_rows
            )));
        }

        Ok(Self { report })
    }

    pub fn headers(&self) -> &[String] {
        &self.report.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.report.records
    }

    /// First `limit` records, for display
    pub fn rows(&self, limit: usize) -> &[Record] {
        let end = limit.min(self.report.records.len());
        &self.report.records[..end]
    }

    /// Rows dropped for arity mismatch
    pub fn dropped_rows(&self) -> usize {
        self.report.dropped_rows
    }

    pub fn len(&self) -> usize {
        self.report.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.report.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.report.records
    }
}

/// Result of a background file read
struct ReadOutcome {
    generation: u64,
    text: std::io::Result<String>,
}

/// Stages import payloads; the most recently started read wins
pub struct ImportStager {
    /// Generation of the latest staging request
    generation: Arc<AtomicU64>,

    /// Handed to reader threads
    sender: Sender<ReadOutcome>,

    receiver: Receiver<ReadOutcome>,

    /// A file read for the current generation has not been received yet
    pending: bool,

    preview: Option<ImportPreview>,
}

impl ImportStager {
    pub fn new() -> Self {
        let (sender, receiver) = channel::unbounded();
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            sender,
            receiver,
            pending: false,
            preview: None,
        }
    }

    /// Start reading a file in the background, superseding any earlier read
    ///
    /// Returns the generation of this read.
    pub fn begin(&mut self, path: impl Into<PathBuf>) -> u64 {
        let path = path.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.pending = true;
        self.preview = None;

        let sender = self.sender.clone();
        let current = Arc::clone(&self.generation);

        tracing::debug!("Reading import file {} (generation {})", path.display(), generation);
        thread::spawn(move || {
            let text = fs::read_to_string(&path);
            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!("Discarding superseded read of {}", path.display());
                return;
            }
            // Receiver gone means the stager was dropped
            let _ = sender.send(ReadOutcome { generation, text });
        });

        generation
    }

    /// Stage an in-memory payload, superseding any read in flight
    pub fn stage_text(&mut self, text: &str) -> Result<&ImportPreview> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.pending = false;
        self.preview = None;

        let preview = ImportPreview::from_text(text)?;
        Ok(&*self.preview.insert(preview))
    }

    /// Wait for the current read to finish and build its preview
    ///
    /// Results of superseded reads are dropped on the way.
    pub fn wait(&mut self, timeout: Duration) -> Result<&ImportPreview> {
        if !self.pending {
            return self
                .preview
                .as_ref()
                .ok_or_else(|| LeadError::ImportCancelled("no import staged".to_string()));
        }

        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(outcome) if outcome.generation != self.generation() => {
                    tracing::debug!("Dropping stale import read (generation {})", outcome.generation);
                }
                Ok(outcome) => {
                    self.pending = false;
                    let text = outcome.text?;
                    let preview = ImportPreview::from_text(&text)?;
                    tracing::info!(
                        "Staged import: {} rows, {} dropped",
                        preview.len(),
                        preview.dropped_rows()
                    );
                    return Ok(&*self.preview.insert(preview));
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(LeadError::ImportCancelled(format!(
                        "file read did not finish within {:?}",
                        timeout
                    )));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(LeadError::ImportCancelled("reader disconnected".to_string()));
                }
            }
        }
    }

    /// The staged preview, if any
    pub fn preview(&self) -> Option<&ImportPreview> {
        self.preview.as_ref()
    }

    /// Hand over the staged preview, leaving nothing staged
    pub fn take_preview(&mut self) -> Option<ImportPreview> {
        self.preview.take()
    }

    /// Generation of the latest staging request
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a file read is still outstanding
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl Default for ImportStager {
    fn default() -> Self {
        Self::new()
    }
}
