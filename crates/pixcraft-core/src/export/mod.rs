//! Batch export for the Pixcraft pipeline.
//!
//! This module provides functionality for:
//! - Pairing encoded bytes with derived output filenames ([`ExportItem`])
//! - Persisting a batch through a scoped directory session or sequential
//!   single-file downloads ([`ExportSink`])
//!
//! # Semantics
//!
//! Items are delivered in enqueue order. A dismissed directory chooser is a
//! neutral [`ExportOutcome::Cancelled`], distinct from I/O failures; an item
//! write failure aborts the remaining loop and surfaces as [`ExportError`].
//! Nothing is retried automatically.

mod item;
mod sink;

pub use item::{format_file_size, output_filename, ExportItem};
pub use sink::{
    DirDownloadDelivery, DirectoryPicker, DirectorySession, DownloadDelivery, DownloadFallback,
    ExportSink, Exporter, DOWNLOAD_DELAY,
};

use thiserror::Error;

/// Errors that abort an export batch.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing one item into the directory session failed.
    #[error("Failed to write {filename}: {source}")]
    Write {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// The directory capability failed outside of user cancellation.
    #[error("Directory access failed: {0}")]
    Directory(String),

    /// The fallback delivery for one item failed.
    #[error("Download delivery failed for {filename}: {reason}")]
    Delivery { filename: String, reason: String },
}

/// How an export batch ended (when it did not error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Every item was persisted.
    Saved { count: usize },
    /// The user dismissed the directory chooser. Not a failure; the
    /// processed items remain available for retry.
    Cancelled,
}
