//! Encoding stage for the Pixcraft pipeline.
//!
//! This module provides functionality for:
//! - Serializing raster buffers into PNG, JPEG, or WebP bytes
//! - Recording a PNG substitution when the requested format has no encoder
//!
//! # Architecture
//!
//! Encoding is a pure function from buffer to bytes. The encoded stream is
//! what the DPI injector and the exporter operate on downstream; this module
//! guarantees the stream starts with the format's magic signature.

mod raster;

pub use raster::encode;

use crate::ExportFormat;
use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// A compressed byte stream plus its declared format.
///
/// Invariant: `bytes` begins with the format's magic signature (PNG: 8-byte
/// signature; JPEG: `FF D8`; WebP: RIFF container header).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// Format the bytes were encoded as.
    pub format: ExportFormat,
}

impl EncodedImage {
    /// Wrap encoded bytes with their format.
    pub fn new(bytes: Vec<u8>, format: ExportFormat) -> Self {
        Self { bytes, format }
    }

    /// Declared MIME type of the byte stream.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Size of the encoded stream in bytes.
    pub fn byte_size(&self) -> usize {
        self.bytes.len()
    }
}

/// Result of an encode call: the image plus an optional recorded
/// substitution.
///
/// `fallback_from` is `Some(requested)` when the requested format had no
/// native encoder and PNG was produced instead. The caller is responsible
/// for informing the user that a substitution occurred.
#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    /// The encoded image (in the effective format).
    pub image: EncodedImage,
    /// The originally requested format, when PNG was substituted for it.
    pub fallback_from: Option<ExportFormat>,
}
