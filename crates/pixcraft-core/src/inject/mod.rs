//! DPI metadata injection - the binary-protocol core.
//!
//! This stage edits the *encoded* byte stream directly; it never touches raw
//! pixels and is independent of whichever encoder produced the bytes. Two
//! protocols are understood:
//!
//! - PNG: a 21-byte `pHYs` chunk is spliced in after IHDR ([`png`]).
//! - JPEG: the JFIF APP0 density fields are overwritten, or a whole APP0
//!   segment is synthesized ([`jpeg`]).
//!
//! WebP and every other format are an explicit no-op: WebP has no
//! universally respected density field, so the bytes come back unchanged as
//! [`DpiOutcome::Unsupported`] and the caller can tell the user.
//!
//! Injection failures never abort a batch; callers skip the metadata step
//! for that one image and export the unmodified bytes.

pub mod jpeg;
pub mod png;

use crate::encode::EncodedImage;
use crate::{Dpi, ExportFormat};
use thiserror::Error;

/// Errors from DPI injection: the bytes do not match the claimed format.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Declared PNG but the 8-byte signature is absent.
    #[error("Not a valid PNG file")]
    NotPng,

    /// Declared JPEG but the SOI marker is absent.
    #[error("Not a valid JPEG file")]
    NotJpeg,

    /// The stream ends before the header structure it declares.
    #[error("Encoded stream is truncated")]
    Truncated,
}

/// Result of a DPI injection attempt.
#[derive(Debug, Clone)]
pub enum DpiOutcome {
    /// Metadata was written; the byte stream changed (or was edited in
    /// place for an existing JFIF segment).
    Injected(EncodedImage),
    /// The format carries no injectable density field; bytes returned
    /// unchanged. This is an explicit codepath, not a silent one.
    Unsupported(EncodedImage),
}

impl DpiOutcome {
    /// Unwrap to the encoded image regardless of outcome.
    pub fn into_image(self) -> EncodedImage {
        match self {
            DpiOutcome::Injected(img) | DpiOutcome::Unsupported(img) => img,
        }
    }

    /// Whether metadata was actually written.
    pub fn was_injected(&self) -> bool {
        matches!(self, DpiOutcome::Injected(_))
    }
}

/// Inject a DPI hint into an encoded image's byte stream.
///
/// # Errors
///
/// Returns [`FormatError`] when the image declares PNG or JPEG but its bytes
/// do not match the expected signature. No recovery is performed.
pub fn inject_dpi(image: EncodedImage, dpi: Dpi) -> Result<DpiOutcome, FormatError> {
    match image.format {
        ExportFormat::Png => {
            let bytes = png::inject(&image.bytes, dpi)?;
            Ok(DpiOutcome::Injected(EncodedImage::new(
                bytes,
                ExportFormat::Png,
            )))
        }
        ExportFormat::Jpeg => {
            let bytes = jpeg::inject(&image.bytes, dpi)?;
            Ok(DpiOutcome::Injected(EncodedImage::new(
                bytes,
                ExportFormat::Jpeg,
            )))
        }
        other => {
            tracing::debug!(
                format = other.mime_type(),
                "format has no density metadata field, skipping DPI injection"
            );
            Ok(DpiOutcome::Unsupported(image))
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn minimal_png_with_ihdr_len(ihdr_len: usize, trailer: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&png::PNG_SIGNATURE);
        bytes.extend_from_slice(&(ihdr_len as u32).to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend(std::iter::repeat(0x5A).take(ihdr_len));
        bytes.extend_from_slice(&[0u8; 4]); // CRC
        bytes.extend_from_slice(trailer);
        bytes
    }

    proptest! {
        /// Property: output is signature + original IHDR + 21-byte pHYs
        /// whose CRC covers its preceding 13 bytes + untouched remainder.
        #[test]
        fn prop_png_stream_structure(
            dpi in 1u16..=1200,
            ihdr_len in 0usize..=64,
            trailer in prop::collection::vec(any::<u8>(), 0..128),
        ) {
            let input = minimal_png_with_ihdr_len(ihdr_len, &trailer);
            let out = png::inject(&input, Dpi::new(dpi).unwrap()).unwrap();

            prop_assert_eq!(out.len(), input.len() + 21);

            let ihdr_end = 8 + 12 + ihdr_len;
            prop_assert_eq!(&out[..ihdr_end], &input[..ihdr_end]);
            prop_assert_eq!(&out[ihdr_end + 4..ihdr_end + 8], b"pHYs");

            let chunk = &out[ihdr_end..ihdr_end + 21];
            let crc = png::crc32(&chunk[4..17]).to_be_bytes();
            prop_assert_eq!(&chunk[17..21], &crc[..]);

            prop_assert_eq!(&out[ihdr_end + 21..], &input[ihdr_end..]);
        }

        /// Property: pixels-per-meter equals round(dpi * 39.3701) and the
        /// X and Y fields are always identical.
        #[test]
        fn prop_png_density_fields(dpi in 1u16..=u16::MAX) {
            let tag = Dpi::new(dpi).unwrap();
            let input = minimal_png_with_ihdr_len(13, &[]);
            let out = png::inject(&input, tag).unwrap();

            let chunk = &out[33..54];
            let expected = ((dpi as f64) * 39.3701).round() as u32;
            prop_assert_eq!(&chunk[8..12], &expected.to_be_bytes());
            prop_assert_eq!(&chunk[8..12], &chunk[12..16]);
            prop_assert_eq!(tag.pixels_per_meter(), expected);
        }

        /// Property: JPEG synthesis grows the stream by exactly 18 bytes
        /// and leaves everything after SOI shifted but intact.
        #[test]
        fn prop_jpeg_synthesis_shifts_intact(
            dpi in 1u16..=1200,
            // Arbitrary non-APP0 body; keep FF E0 out of it
            body in prop::collection::vec(0u8..=0xDF, 0..256),
        ) {
            let mut input = vec![0xFF, 0xD8];
            input.extend_from_slice(&body);

            let out = jpeg::inject(&input, Dpi::new(dpi).unwrap()).unwrap();
            prop_assert_eq!(out.len(), input.len() + 18);
            prop_assert_eq!(&out[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&out[2..4], &[0xFF, 0xE0]);
            prop_assert_eq!(&out[20..], &input[2..]);
        }
    }
}
