//! Resizing WASM bindings.
//!
//! Exposes both halves of the resize stage: the resampler, which takes
//! final integer dimensions, and the dimension policy, which resolves a
//! resize request (pixel mode, percentage mode, do-not-enlarge) against one
//! source image.
//!
//! # Example
//!
//! ```typescript
//! import { resample, resize_with_request, thumbnail } from '@pixcraft/wasm';
//!
//! // Exact dimensions (policy already applied by the UI)
//! const out = resample(image, 300, 150);
//!
//! // Or let the core resolve the policy per image
//! const resized = resize_with_request(image, {
//!   mode: 'exact', width: 4500, height: 5400, do_not_enlarge: true,
//! });
//! ```

use crate::types::JsRasterImage;
use pixcraft_core::resize::{self, ResizeRequest};
use wasm_bindgen::prelude::*;

/// Resample an image to exact target dimensions with high-quality
/// (bicubic-class) interpolation.
#[wasm_bindgen]
pub fn resample(image: &JsRasterImage, width: u32, height: u32) -> Result<JsRasterImage, JsValue> {
    resize::resample(&image.to_buffer(), width, height)
        .map(JsRasterImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resolve a resize request against this image and resample.
///
/// `request` is a plain object matching the core `ResizeRequest` shape:
/// `{ mode: 'exact', width, height, do_not_enlarge }` or
/// `{ mode: 'percent', percent }`.
#[wasm_bindgen]
pub fn resize_with_request(
    image: &JsRasterImage,
    request: JsValue,
) -> Result<JsRasterImage, JsValue> {
    let request: ResizeRequest =
        serde_wasm_bindgen::from_value(request).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let buffer = image.to_buffer();
    let (width, height) = request.target_for(buffer.width, buffer.height);
    resize::resample(&buffer, width, height)
        .map(JsRasterImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generate a preview thumbnail fitting a `max_edge` bounding box.
///
/// Never upscales; keeps preview memory bounded when many uploads are held
/// in a long-lived tab.
#[wasm_bindgen]
pub fn thumbnail(image: &JsRasterImage, max_edge: u32) -> Result<JsRasterImage, JsValue> {
    resize::thumbnail(&image.to_buffer(), max_edge)
        .map(JsRasterImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_via_core() {
        let img = JsRasterImage::new(10, 10, vec![128u8; 10 * 10 * 4]);
        let out = resize::resample(&img.to_buffer(), 5, 5).unwrap();
        assert_eq!((out.width, out.height), (5, 5));
    }

    #[test]
    fn test_request_shape_deserializes() {
        // The JSON shape documented for JS callers must keep matching the
        // core type.
        let request: ResizeRequest = serde_json::from_str(
            r#"{"mode":"exact","width":300,"height":150,"do_not_enlarge":false}"#,
        )
        .unwrap();
        assert_eq!(request.target_for(100, 50), (300, 150));

        let request: ResizeRequest =
            serde_json::from_str(r#"{"mode":"percent","percent":50.0}"#).unwrap();
        assert_eq!(request.target_for(100, 50), (50, 25));
    }
}

/// WASM-specific tests that require JsValue. Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_resample_basic() {
        let img = JsRasterImage::new(10, 10, vec![128u8; 10 * 10 * 4]);
        let out = resample(&img, 5, 5).unwrap();
        assert_eq!(out.width(), 5);
        assert_eq!(out.height(), 5);
    }

    #[wasm_bindgen_test]
    fn test_resample_zero_dimension_errors() {
        let img = JsRasterImage::new(10, 10, vec![128u8; 10 * 10 * 4]);
        assert!(resample(&img, 0, 5).is_err());
    }
}
