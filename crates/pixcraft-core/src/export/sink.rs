//! Export sinks: directory session and download fallback.
//!
//! The two persistence modes sit behind one [`ExportSink`] trait and are
//! selected once by a capability probe ([`Exporter::detect`]), never by a
//! flag callers set per call site.

use super::{ExportError, ExportItem, ExportOutcome};
use std::path::PathBuf;
use std::time::Duration;

/// Fixed pause between successive fallback downloads.
///
/// Hosts treat rapid successive downloads as a popup/spam pattern and start
/// blocking them; the throttle keeps each trigger distinct. Not a
/// performance knob.
pub const DOWNLOAD_DELAY: Duration = Duration::from_millis(100);

/// Capability for asking the user for a writable output directory.
///
/// This is the single user-facing acquisition in the whole pipeline, one
/// prompt per save-all action. `Ok(None)` means the chooser was dismissed -
/// a neutral outcome, not an error.
pub trait DirectoryPicker {
    fn pick(&mut self) -> Result<Option<PathBuf>, ExportError>;
}

impl<F> DirectoryPicker for F
where
    F: FnMut() -> Option<PathBuf>,
{
    fn pick(&mut self) -> Result<Option<PathBuf>, ExportError> {
        Ok(self())
    }
}

/// Capability for handing a single file to the user outside a directory
/// session (in a browser: object-URL anchor click; natively: a downloads
/// directory write).
pub trait DownloadDelivery {
    fn deliver(&mut self, item: &ExportItem) -> Result<(), ExportError>;
}

impl<F> DownloadDelivery for F
where
    F: FnMut(&ExportItem) -> Result<(), ExportError>,
{
    fn deliver(&mut self, item: &ExportItem) -> Result<(), ExportError> {
        self(item)
    }
}

/// A download delivery that writes into a fixed directory, for native hosts
/// where "download" means the user's downloads folder.
#[derive(Debug, Clone)]
pub struct DirDownloadDelivery {
    dir: PathBuf,
}

impl DirDownloadDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadDelivery for DirDownloadDelivery {
    fn deliver(&mut self, item: &ExportItem) -> Result<(), ExportError> {
        std::fs::write(self.dir.join(&item.filename), &item.bytes).map_err(|source| {
            ExportError::Write {
                filename: item.filename.clone(),
                source,
            }
        })
    }
}

/// Persists a batch of export items.
///
/// The whole batch is attempted in enqueue order; the first item failure
/// aborts the remaining loop and surfaces to the caller. User cancellation
/// is reported as [`ExportOutcome::Cancelled`], never as an error.
pub trait ExportSink {
    fn export_batch(&mut self, items: Vec<ExportItem>) -> Result<ExportOutcome, ExportError>;

    /// Save a single file, sharing the batch cancellation semantics.
    fn export_single(&mut self, item: ExportItem) -> Result<ExportOutcome, ExportError> {
        self.export_batch(vec![item])
    }
}

/// Directory-session mode: one scoped write handle for the whole batch.
pub struct DirectorySession<P: DirectoryPicker> {
    picker: P,
}

impl<P: DirectoryPicker> DirectorySession<P> {
    pub fn new(picker: P) -> Self {
        Self { picker }
    }
}

impl<P: DirectoryPicker> ExportSink for DirectorySession<P> {
    fn export_batch(&mut self, items: Vec<ExportItem>) -> Result<ExportOutcome, ExportError> {
        // Acquired once per save-all, released when this call returns.
        let Some(dir) = self.picker.pick()? else {
            tracing::debug!("directory chooser dismissed, export skipped");
            return Ok(ExportOutcome::Cancelled);
        };

        for item in &items {
            // Create-or-overwrite by exact name.
            std::fs::write(dir.join(&item.filename), &item.bytes).map_err(|source| {
                ExportError::Write {
                    filename: item.filename.clone(),
                    source,
                }
            })?;
            tracing::trace!(filename = %item.filename, bytes = item.byte_size(), "wrote file");
        }

        Ok(ExportOutcome::Saved { count: items.len() })
    }
}

/// Fallback download mode: sequential single-file downloads with a fixed
/// inter-file delay.
pub struct DownloadFallback<D: DownloadDelivery> {
    delivery: D,
    delay: Duration,
}

impl<D: DownloadDelivery> DownloadFallback<D> {
    pub fn new(delivery: D) -> Self {
        Self {
            delivery,
            delay: DOWNLOAD_DELAY,
        }
    }

    /// Override the throttle. Intended for tests; production keeps
    /// [`DOWNLOAD_DELAY`].
    pub fn with_delay(delivery: D, delay: Duration) -> Self {
        Self { delivery, delay }
    }
}

impl<D: DownloadDelivery> ExportSink for DownloadFallback<D> {
    fn export_batch(&mut self, items: Vec<ExportItem>) -> Result<ExportOutcome, ExportError> {
        for item in &items {
            self.delivery.deliver(item)?;
            std::thread::sleep(self.delay);
        }
        Ok(ExportOutcome::Saved { count: items.len() })
    }
}

/// The capability probe: directory-write support present means a directory
/// session, otherwise sequential downloads.
pub enum Exporter<P: DirectoryPicker, D: DownloadDelivery> {
    Directory(DirectorySession<P>),
    Download(DownloadFallback<D>),
}

impl<P: DirectoryPicker, D: DownloadDelivery> Exporter<P, D> {
    /// Probe once at construction; callers never branch on the mode again.
    pub fn detect(directory: Option<P>, download: D) -> Self {
        match directory {
            Some(picker) => Exporter::Directory(DirectorySession::new(picker)),
            None => Exporter::Download(DownloadFallback::new(download)),
        }
    }
}

impl<P: DirectoryPicker, D: DownloadDelivery> ExportSink for Exporter<P, D> {
    fn export_batch(&mut self, items: Vec<ExportItem>) -> Result<ExportOutcome, ExportError> {
        match self {
            Exporter::Directory(session) => session.export_batch(items),
            Exporter::Download(fallback) => fallback.export_batch(items),
        }
    }
}
