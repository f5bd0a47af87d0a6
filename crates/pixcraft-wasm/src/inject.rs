//! DPI injection WASM bindings.
//!
//! Exposes the byte-level metadata injector: encoded PNG or JPEG bytes in,
//! edited bytes out. Operates purely on the encoded stream, so it composes
//! with bytes produced by `canvas.toBlob` just as well as with
//! [`crate::encode_image`].
//!
//! # Example
//!
//! ```typescript
//! import { inject_dpi } from '@pixcraft/wasm';
//!
//! const bytes = new Uint8Array(await blob.arrayBuffer());
//! const stamped = inject_dpi(bytes, blob.type, 300); // POD mode
//! ```

use pixcraft_core::encode::EncodedImage;
use pixcraft_core::{inject, Dpi, ExportFormat};
use wasm_bindgen::prelude::*;

/// Inject a DPI hint into encoded PNG or JPEG bytes.
///
/// WebP and other formats are returned unchanged with a console warning -
/// WebP has no universally respected density field, and the skip must not
/// be silent.
///
/// # Arguments
///
/// * `bytes` - The encoded image bytes as a `Uint8Array`
/// * `mime_type` - The declared MIME type of the bytes
/// * `dpi` - Dots per inch, applied to both axes (72 screen, 300 print)
///
/// # Errors
///
/// Returns an error when `dpi` is zero, the MIME type is unknown, or the
/// bytes do not match the declared format's signature. Callers skip the
/// metadata step for that image and keep the unmodified bytes.
#[wasm_bindgen]
pub fn inject_dpi(bytes: &[u8], mime_type: &str, dpi: u16) -> Result<Vec<u8>, JsValue> {
    let dpi = Dpi::new(dpi).ok_or_else(|| JsValue::from_str("DPI must be a positive integer"))?;
    let format = ExportFormat::from_mime(mime_type)
        .ok_or_else(|| JsValue::from_str(&format!("Unsupported format: {mime_type}")))?;

    let image = EncodedImage::new(bytes.to_vec(), format);
    match inject::inject_dpi(image, dpi) {
        Ok(outcome) => {
            if !outcome.was_injected() {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "{mime_type} format does not support DPI metadata modification"
                )));
            }
            Ok(outcome.into_image().bytes)
        }
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}


/// WASM-specific tests that require JsValue. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_inject_dpi_jpeg() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xD9];
        let out = inject_dpi(&jpeg, "image/jpeg", 72).unwrap();
        assert_eq!(out.len(), jpeg.len() + 18);
        assert_eq!(&out[2..4], &[0xFF, 0xE0]);
    }

    #[wasm_bindgen_test]
    fn test_inject_dpi_zero_rejected() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xD9];
        assert!(inject_dpi(&jpeg, "image/jpeg", 0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_inject_dpi_webp_passthrough() {
        let webp = b"RIFF\x00\x00\x00\x00WEBP".to_vec();
        let out = inject_dpi(&webp, "image/webp", 300).unwrap();
        assert_eq!(out, webp);
    }
}
