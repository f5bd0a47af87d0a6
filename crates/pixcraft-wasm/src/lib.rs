//! Pixcraft WASM - WebAssembly bindings for Pixcraft
//!
//! This crate provides WASM bindings to expose the pixcraft-core pipeline
//! stages to JavaScript/TypeScript applications. Each stage is an
//! independent export so the browser app can compose them per workflow:
//! load, resize, encode, and DPI injection.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Raster loading bindings (file bytes to RGBA)
//! - `resize` - Resampling and resize-policy bindings
//! - `encode` - Format encoding bindings (PNG, JPEG, WebP export)
//! - `inject` - Byte-level DPI metadata injection
//!
//! # Usage
//!
//! ```typescript
//! import init, { load_image, resample, encode_with_settings } from '@pixcraft/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = load_image(bytes, file.type);
//! const resized = resample(image, 300, 150);
//! const out = encode_with_settings(resized, { format: 'png', quality: 90, dpi: 300 });
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod inject;
mod resize;
mod types;

// Re-export public types
pub use decode::load_image;
pub use encode::{encode_image, encode_with_settings};
pub use inject::inject_dpi;
pub use resize::{resample, resize_with_request, thumbnail};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
