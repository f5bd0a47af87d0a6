//! Raster loading WASM bindings.
//!
//! This module exposes the pixcraft-core loader to JavaScript: uploaded
//! file bytes in, RGBA raster image out.
//!
//! # Example
//!
//! ```typescript
//! import { load_image } from '@pixcraft/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = load_image(bytes, file.type);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsRasterImage;
use pixcraft_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded image file into an RGBA raster buffer.
///
/// # Arguments
///
/// * `bytes` - The encoded file contents as a `Uint8Array`
/// * `mime_hint` - The file's declared MIME type (`file.type`), or
///   `undefined`. A wrong hint is not fatal; content sniffing recovers.
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded as an image (corrupt
/// file, unsupported codec). Report it per file and keep the batch going.
#[wasm_bindgen]
pub fn load_image(bytes: &[u8], mime_hint: Option<String>) -> Result<JsRasterImage, JsValue> {
    decode::load(bytes, mime_hint.as_deref())
        .map(JsRasterImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for decode bindings.
///
/// Note: bindings returning `Result<T, JsValue>` only run on wasm32; the
/// underlying behavior is covered by `pixcraft_core::decode` tests.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_via_core() {
        let buffer = pixcraft_core::decode::RasterBuffer::new(2, 2, vec![200u8; 16]);
        let encoded = pixcraft_core::encode::encode(&buffer, pixcraft_core::ExportFormat::Png, 90)
            .unwrap()
            .image;

        let decoded = pixcraft_core::decode::load(&encoded.bytes, Some("image/png")).unwrap();
        let img = JsRasterImage::from_buffer(decoded);
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
    }
}

/// WASM-specific tests that require JsValue. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_load_image_garbage_fails() {
        let garbage = vec![0xABu8; 32];
        assert!(load_image(&garbage, None).is_err());
    }
}
