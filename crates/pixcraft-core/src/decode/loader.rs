//! Raster loading from encoded file bytes.
//!
//! Decoding is delegated to the `image` crate; the loader's only job is
//! wrapping the decoded pixels into a [`RasterBuffer`] carrying the natural
//! dimensions. Failures are reported per file so a batch of N files can
//! partially succeed.

use super::{DecodeError, RasterBuffer};
use image::ImageFormat;

/// Decode an image file into a raster buffer.
///
/// # Arguments
///
/// * `bytes` - The encoded file contents
/// * `mime_hint` - Declared MIME type of the upload, if known. Used to pick
///   the decoder directly; content sniffing is the fallback, so a wrong or
///   missing hint is not fatal.
///
/// # Errors
///
/// Returns `DecodeError` when the byte stream cannot be decoded as an image
/// (corrupt file, unsupported codec). No retry is attempted.
pub fn load(bytes: &[u8], mime_hint: Option<&str>) -> Result<RasterBuffer, DecodeError> {
    let decoded = match mime_hint.and_then(ImageFormat::from_mime_type) {
        Some(format) => match image::load_from_memory_with_format(bytes, format) {
            Ok(img) => img,
            // A mislabeled upload still decodes if sniffing finds the real format.
            Err(_) => sniff(bytes)?,
        },
        None => sniff(bytes)?,
    };

    Ok(RasterBuffer::from_rgba_image(decoded.into_rgba8()))
}

fn sniff(bytes: &[u8]) -> Result<image::DynamicImage, DecodeError> {
    image::load_from_memory(bytes).map_err(|e| match e {
        image::ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        image::ImageError::Decoding(err) => DecodeError::CorruptedFile(err.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};
    use std::io::Cursor;

    fn encode_test_png(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![200u8; (width * height * 4) as usize];
        let mut out = Cursor::new(Vec::new());
        PngEncoder::new(&mut out)
            .write_image(&pixels, width, height, ExtendedColorType::Rgba8)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_load_png() {
        let png = encode_test_png(16, 9);
        let buf = load(&png, Some("image/png")).unwrap();

        assert_eq!(buf.width, 16);
        assert_eq!(buf.height, 9);
        assert_eq!(buf.byte_size(), 16 * 9 * 4);
    }

    #[test]
    fn test_load_without_hint_sniffs() {
        let png = encode_test_png(4, 4);
        let buf = load(&png, None).unwrap();
        assert_eq!((buf.width, buf.height), (4, 4));
    }

    #[test]
    fn test_load_with_wrong_hint_still_decodes() {
        // Declared JPEG, actually PNG: sniffing recovers.
        let png = encode_test_png(4, 4);
        let buf = load(&png, Some("image/jpeg")).unwrap();
        assert_eq!((buf.width, buf.height), (4, 4));
    }

    #[test]
    fn test_load_garbage_fails() {
        let garbage = vec![0xAB; 64];
        assert!(load(&garbage, None).is_err());
        assert!(load(&garbage, Some("image/png")).is_err());
    }

    #[test]
    fn test_load_truncated_png_fails() {
        let mut png = encode_test_png(16, 16);
        png.truncate(png.len() / 2);
        assert!(load(&png, Some("image/png")).is_err());
    }

    #[test]
    fn test_load_empty_fails() {
        assert!(load(&[], None).is_err());
    }
}
