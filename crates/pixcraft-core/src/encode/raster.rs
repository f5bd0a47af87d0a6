//! Format encoding for export.
//!
//! Serializes a raster buffer into compressed bytes using the `image`
//! crate's encoders. Quality only applies to lossy output; PNG is always
//! lossless and WebP is written with the lossless encoder (the platform
//! codec here ships no lossy WebP path).

use super::{EncodeError, EncodeOutcome, EncodedImage};
use crate::decode::RasterBuffer;
use crate::ExportFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

/// Encode a raster buffer into the requested format.
///
/// Target formats with no native encoder (BMP, GIF, ICO, AVIF) are
/// substituted with PNG; the substitution is recorded on the returned
/// [`EncodeOutcome`] so the caller can inform the user. That is a recorded
/// limitation, not an error.
///
/// # Arguments
///
/// * `source` - The raster buffer to serialize
/// * `format` - Requested output format
/// * `quality` - 1-100, meaningful for lossy formats only (JPEG default: 90)
///
/// # Errors
///
/// Returns `EncodeError` for degenerate buffers or an internal encoder
/// failure.
pub fn encode(
    source: &RasterBuffer,
    format: ExportFormat,
    quality: u8,
) -> Result<EncodeOutcome, EncodeError> {
    if source.width == 0 || source.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: source.width,
            height: source.height,
        });
    }

    let expected_len = (source.width as usize) * (source.height as usize) * 4;
    if source.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: source.pixels.len(),
        });
    }

    let (effective, fallback_from) = if format.has_native_encoder() {
        (format, None)
    } else {
        tracing::warn!(
            requested = format.mime_type(),
            "no native encoder for requested format, substituting PNG"
        );
        (ExportFormat::Png, Some(format))
    };

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    let result = match effective {
        ExportFormat::Jpeg => {
            // JPEG carries no alpha channel; the encoder rejects Rgba8.
            let rgb = strip_alpha(&source.pixels);
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                &rgb,
                source.width,
                source.height,
                ExtendedColorType::Rgb8,
            )
        }
        ExportFormat::WebP => WebPEncoder::new_lossless(&mut buffer).write_image(
            &source.pixels,
            source.width,
            source.height,
            ExtendedColorType::Rgba8,
        ),
        _ => PngEncoder::new(&mut buffer).write_image(
            &source.pixels,
            source.width,
            source.height,
            ExtendedColorType::Rgba8,
        ),
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(EncodeOutcome {
        image: EncodedImage::new(buffer.into_inner(), effective),
        fallback_from,
    })
}

/// Drop the alpha byte from every RGBA sample.
fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn create_test_buffer(width: u32, height: u32) -> RasterBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        RasterBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_encode_png_signature() {
        let buf = create_test_buffer(10, 10);
        let out = encode(&buf, ExportFormat::Png, 90).unwrap();

        assert!(out.fallback_from.is_none());
        assert_eq!(out.image.format, ExportFormat::Png);
        assert_eq!(&out.image.bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_jpeg_signature() {
        let buf = create_test_buffer(10, 10);
        let out = encode(&buf, ExportFormat::Jpeg, 90).unwrap();

        assert_eq!(out.image.format, ExportFormat::Jpeg);
        assert_eq!(&out.image.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_webp_signature() {
        let buf = create_test_buffer(10, 10);
        let out = encode(&buf, ExportFormat::WebP, 90).unwrap();

        assert_eq!(out.image.format, ExportFormat::WebP);
        // RIFF....WEBP container header
        assert_eq!(&out.image.bytes[..4], b"RIFF");
        assert_eq!(&out.image.bytes[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_unsupported_falls_back_to_png() {
        let buf = create_test_buffer(10, 10);

        for requested in [
            ExportFormat::Bmp,
            ExportFormat::Gif,
            ExportFormat::Ico,
            ExportFormat::Avif,
        ] {
            let out = encode(&buf, requested, 90).unwrap();
            assert_eq!(out.fallback_from, Some(requested));
            assert_eq!(out.image.format, ExportFormat::Png);
            assert_eq!(&out.image.bytes[..8], &PNG_SIGNATURE);
        }
    }

    #[test]
    fn test_encode_quality_affects_jpeg_size() {
        let buf = create_test_buffer(64, 64);

        let low = encode(&buf, ExportFormat::Jpeg, 20).unwrap();
        let high = encode(&buf, ExportFormat::Jpeg, 95).unwrap();

        assert!(high.image.bytes.len() > low.image.bytes.len());
    }

    #[test]
    fn test_encode_quality_clamped() {
        let buf = create_test_buffer(8, 8);
        assert!(encode(&buf, ExportFormat::Jpeg, 0).is_ok());
        assert!(encode(&buf, ExportFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_encode_invalid_buffer() {
        let bad = RasterBuffer {
            width: 10,
            height: 10,
            pixels: vec![0u8; 17],
        };
        assert!(matches!(
            encode(&bad, ExportFormat::Png, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_zero_dimensions() {
        let bad = RasterBuffer {
            width: 0,
            height: 10,
            pixels: vec![],
        };
        assert!(matches!(
            encode(&bad, ExportFormat::Png, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        // Non-opaque alpha must not break JPEG encoding; the channel is
        // simply discarded.
        let mut buf = create_test_buffer(12, 12);
        for px in buf.pixels.chunks_exact_mut(4) {
            px[3] = 128;
        }

        let out = encode(&buf, ExportFormat::Jpeg, 90).unwrap();
        assert_eq!(&out.image.bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&out.image.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 12));
    }

    #[test]
    fn test_strip_alpha_layout() {
        let rgba = [1u8, 2, 3, 255, 4, 5, 6, 0];
        assert_eq!(strip_alpha(&rgba), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_encode_one_pixel() {
        let buf = RasterBuffer::new(1, 1, vec![255, 0, 0, 255]);
        let out = encode(&buf, ExportFormat::Jpeg, 90).unwrap();
        assert_eq!(&out.image.bytes[..2], &[0xFF, 0xD8]);
    }
}
