//! Batch orchestration: load -> resize -> encode -> inject -> queue for
//! export.
//!
//! Items are processed strictly sequentially, each fully completing every
//! stage before the next begins. Concurrent decode of many large bitmaps
//! risks exhausting memory in a long-lived tab, so throughput is traded for
//! bounded memory use. Items come out in the same order they went in.
//!
//! Per-file decode/encode failures are caught at the batch loop and skip
//! that file; DPI-injection failures skip only the metadata step for that
//! file. The pipeline holds no state between calls - everything arrives in
//! [`PipelineConfig`].

use crate::decode::{self, DecodeError};
use crate::encode::{self, EncodeError};
use crate::export::{output_filename, ExportItem};
use crate::inject::{self, DpiOutcome};
use crate::resize::{self, ResizeError, ResizeRequest};
use crate::{ExportFormat, OutputSettings};
use thiserror::Error;

/// One uploaded file entering the pipeline.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Original filename, used to derive the output name.
    pub name: String,
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// Declared MIME type of the upload, if known.
    pub mime_hint: Option<String>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime_hint: None,
        }
    }

    pub fn with_mime_hint(mut self, hint: impl Into<String>) -> Self {
        self.mime_hint = Some(hint.into());
        self
    }
}

/// The operation a batch performs, determining the pipeline stages used and
/// the output filename suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Resize to the dimensions resolved by the request.
    Resize { request: ResizeRequest },
    /// Re-encode into the target format without resizing.
    Convert,
    /// Run the super-resolution service, then re-encode.
    Upscale { scale: u32 },
    /// Run the background-removal service, then re-encode.
    RemoveBackground,
}

impl Operation {
    /// Filename suffix describing the operation.
    pub fn suffix(&self) -> &'static str {
        match self {
            Operation::Resize { .. } => "resized",
            Operation::Convert => "converted",
            Operation::Upscale { .. } => "upscaled",
            Operation::RemoveBackground => "nobg",
        }
    }

    /// Whether this operation routes through an [`Enhancer`].
    pub fn uses_enhancer(&self) -> bool {
        matches!(self, Operation::Upscale { .. } | Operation::RemoveBackground)
    }
}

/// Full configuration for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub operation: Operation,
    pub output: OutputSettings,
}

/// Errors from an external AI inference service.
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// The operation needs an enhancement service and none was supplied.
    #[error("No enhancement service available")]
    Unavailable,

    /// The service reported a failure.
    #[error("Enhancement service failed: {0}")]
    Service(String),
}

/// An external AI inference service (background removal, super-resolution).
///
/// Treated as a black box: encoded image bytes in, encoded image bytes out,
/// with a progress fraction in [0, 1] along the way. The result re-enters
/// the pipeline at the loader.
pub trait Enhancer {
    fn process(
        &mut self,
        bytes: &[u8],
        on_progress: &mut dyn FnMut(f32),
    ) -> Result<Vec<u8>, EnhanceError>;
}

/// Why one file was skipped.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Resize(#[from] ResizeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Enhance(#[from] EnhanceError),
}

/// A skipped file and the stage that rejected it.
#[derive(Debug)]
pub struct FileFailure {
    pub filename: String,
    pub error: StageError,
}

/// A PNG substitution recorded for user-visible reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub filename: String,
    pub requested: ExportFormat,
}

/// A file whose DPI-injection step was skipped (bad signature or a format
/// with no density field). The unmodified encoded bytes are still exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpiSkip {
    pub filename: String,
    pub reason: String,
}

/// Everything a batch run produced, in enqueue order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully processed items, ready for an export sink.
    pub items: Vec<ExportItem>,
    /// Files skipped by a stage failure.
    pub failures: Vec<FileFailure>,
    /// PNG substitutions the caller must surface to the user.
    pub substitutions: Vec<Substitution>,
    /// Files whose metadata step did not run.
    pub dpi_skips: Vec<DpiSkip>,
}

impl BatchReport {
    /// True when every input file produced an item.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Process a batch of uploads into export-ready items.
///
/// `enhancer` is only consulted for [`Operation::Upscale`] and
/// [`Operation::RemoveBackground`]. `on_progress` receives an overall
/// fraction in [0, 1] covering the whole batch.
pub fn process_batch(
    files: Vec<SourceFile>,
    config: &PipelineConfig,
    mut enhancer: Option<&mut dyn Enhancer>,
    mut on_progress: impl FnMut(f32),
) -> BatchReport {
    let mut report = BatchReport::default();
    let total = files.len().max(1) as f32;

    for (index, file) in files.into_iter().enumerate() {
        on_progress(index as f32 / total);

        // Reborrow per iteration so the trait object outlives only this call.
        let enhancer = match enhancer {
            Some(ref mut e) => Some(&mut **e as &mut dyn Enhancer),
            None => None,
        };

        match process_one(
            &file,
            config,
            enhancer,
            &mut |stage_fraction| {
                on_progress((index as f32 + stage_fraction.clamp(0.0, 1.0)) / total);
            },
            &mut report,
        ) {
            Ok(item) => report.items.push(item),
            Err(error) => {
                tracing::warn!(file = %file.name, %error, "skipping file");
                report.failures.push(FileFailure {
                    filename: file.name,
                    error,
                });
            }
        }

        on_progress((index + 1) as f32 / total);
    }

    report
}

/// Run every stage for a single file. The enhancer stage owns the first
/// half of the per-file progress window; the raster stages are quick enough
/// to report as whole steps.
fn process_one(
    file: &SourceFile,
    config: &PipelineConfig,
    enhancer: Option<&mut dyn Enhancer>,
    on_progress: &mut dyn FnMut(f32),
    report: &mut BatchReport,
) -> Result<ExportItem, StageError> {
    let bytes = if config.operation.uses_enhancer() {
        let enhancer = enhancer.ok_or(EnhanceError::Unavailable)?;
        enhancer.process(&file.bytes, &mut |fraction| on_progress(fraction * 0.5))?
    } else {
        file.bytes.clone()
    };

    let buffer = decode::load(&bytes, file.mime_hint.as_deref())?;

    let (buffer, final_dims) = match config.operation {
        Operation::Resize { request } => {
            let (width, height) = request.target_for(buffer.width, buffer.height);
            let resized = resize::resample(&buffer, width, height)?;
            (resized, Some((width, height)))
        }
        _ => (buffer, None),
    };

    let outcome = encode::encode(&buffer, config.output.format, config.output.quality)?;
    let mut image = outcome.image;

    let filename = output_filename(
        &file.name,
        config.operation.suffix(),
        final_dims,
        match config.operation {
            Operation::Upscale { scale } => Some(scale),
            _ => None,
        },
        image.format,
    );

    if let Some(requested) = outcome.fallback_from {
        report.substitutions.push(Substitution {
            filename: filename.clone(),
            requested,
        });
    }

    if let Some(dpi) = config.output.dpi {
        match inject::inject_dpi(image.clone(), dpi) {
            Ok(DpiOutcome::Injected(injected)) => image = injected,
            Ok(DpiOutcome::Unsupported(unchanged)) => {
                image = unchanged;
                report.dpi_skips.push(DpiSkip {
                    filename: filename.clone(),
                    reason: "format has no density metadata field".to_string(),
                });
            }
            // Bad signature: skip only the metadata step, keep the bytes.
            Err(error) => {
                report.dpi_skips.push(DpiSkip {
                    filename: filename.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }

    Ok(ExportItem::new(filename, image))
}
