//! Format encoding WASM bindings.
//!
//! This module exposes the pixcraft-core encoder to JavaScript, turning a
//! raster image into compressed bytes for the export workflow.
//!
//! # Example
//!
//! ```typescript
//! import { encode_image, encode_with_settings } from '@pixcraft/wasm';
//!
//! const pngBytes = encode_image(image, 'image/png', 90);
//!
//! // Or the whole encode + DPI stage in one call
//! const podBytes = encode_with_settings(image, {
//!   format: 'png', quality: 90, dpi: 300,
//! });
//! ```

use crate::types::JsRasterImage;
use pixcraft_core::{encode, inject, ExportFormat, OutputSettings};
use wasm_bindgen::prelude::*;

/// Encode a raster image into the requested format.
///
/// Formats without a native encoder (BMP, GIF, ICO, AVIF) produce PNG
/// bytes instead; a warning is logged to the console so the substitution is
/// never silent. Use [`encode_with_settings`] to also stamp DPI metadata.
///
/// # Arguments
///
/// * `image` - The raster image to serialize
/// * `mime_type` - Target MIME type (e.g. `image/jpeg`)
/// * `quality` - 1-100, meaningful for lossy formats only (JPEG default: 90)
#[wasm_bindgen]
pub fn encode_image(
    image: &JsRasterImage,
    mime_type: &str,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    let format = ExportFormat::from_mime(mime_type)
        .ok_or_else(|| JsValue::from_str(&format!("Unsupported MIME type: {mime_type}")))?;

    let outcome = encode::encode(&image.to_buffer(), format, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    if let Some(requested) = outcome.fallback_from {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Format {} not supported by the encoder. Falling back to PNG.",
            requested.mime_type()
        )));
    }

    Ok(outcome.image.bytes)
}

/// Run the encode and DPI-injection stages in one call.
///
/// `settings` is a plain object matching the core `OutputSettings` shape:
/// `{ format: 'png' | 'jpeg' | 'webp' | ..., quality: 1-100, dpi: number | null }`.
/// When `dpi` is set but the effective format carries no density field, the
/// bytes come back unchanged and a console warning records the skip.
#[wasm_bindgen]
pub fn encode_with_settings(image: &JsRasterImage, settings: JsValue) -> Result<Vec<u8>, JsValue> {
    let settings: OutputSettings =
        serde_wasm_bindgen::from_value(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let outcome = encode::encode(&image.to_buffer(), settings.format, settings.quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    if let Some(requested) = outcome.fallback_from {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Format {} not supported by the encoder. Falling back to PNG.",
            requested.mime_type()
        )));
    }

    let image = outcome.image;
    match settings.dpi {
        Some(dpi) => match inject::inject_dpi(image, dpi) {
            Ok(outcome) => {
                if !outcome.was_injected() {
                    web_sys::console::warn_1(&JsValue::from_str(
                        "Format does not support DPI metadata modification",
                    ));
                }
                Ok(outcome.into_image().bytes)
            }
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        },
        None => Ok(image.bytes),
    }
}
