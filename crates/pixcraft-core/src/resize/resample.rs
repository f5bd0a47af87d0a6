//! High-quality resampling between raster buffers.
//!
//! All functions return new [`RasterBuffer`] instances without modifying the
//! input. Interpolation is Catmull-Rom (bicubic class) regardless of scale
//! direction, matching a "high" smoothing-quality canvas draw.

use crate::decode::RasterBuffer;
use image::imageops::FilterType;
use thiserror::Error;

/// Errors that can occur during resampling.
#[derive(Debug, Error)]
pub enum ResizeError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The source buffer does not describe a valid RGBA image.
    #[error("Invalid source buffer: {0}")]
    InvalidBuffer(String),
}

/// Resample a buffer to exact target dimensions.
///
/// Always produces a new buffer; the input is left untouched. The caller is
/// responsible for the dimension policy (aspect lock, percentage,
/// do-not-enlarge) - by the time this runs, `width` and `height` are final.
///
/// # Errors
///
/// Returns `ResizeError` for zero dimensions or a malformed source buffer.
pub fn resample(
    source: &RasterBuffer,
    width: u32,
    height: u32,
) -> Result<RasterBuffer, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidDimensions { width, height });
    }

    // Fast path: nothing to do.
    if source.width == width && source.height == height {
        return Ok(source.clone());
    }

    let rgba = source
        .to_rgba_image()
        .ok_or_else(|| ResizeError::InvalidBuffer("pixel length mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, FilterType::CatmullRom);

    Ok(RasterBuffer::from_rgba_image(resized))
}

/// Generate a preview thumbnail that fits a `max_edge` bounding box.
///
/// Preserves the aspect ratio and never upscales: sources already inside the
/// box are returned as-is. Keeps preview memory bounded when hundreds of
/// uploads sit in a long-lived tab.
pub fn thumbnail(source: &RasterBuffer, max_edge: u32) -> Result<RasterBuffer, ResizeError> {
    if max_edge == 0 {
        return Err(ResizeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    if source.width <= max_edge && source.height <= max_edge {
        return Ok(source.clone());
    }

    let (width, height) = fit_dimensions(source.width, source.height, max_edge);
    resample(source, width, height)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}
