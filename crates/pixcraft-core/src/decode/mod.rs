//! Raster loading for the Pixcraft pipeline.
//!
//! This module provides functionality for:
//! - Decoding uploaded image files (PNG, JPEG, WebP) into RGBA buffers
//! - Carrying the natural dimensions alongside the pixel data
//!
//! # Architecture
//!
//! Decoding is the first pipeline stage and a pure function over bytes: file
//! contents in, [`RasterBuffer`] out. Pixel codecs are delegated to the
//! `image` crate; this module never parses compressed image data itself.
//!
//! Failures are per-file: a corrupt upload yields a [`DecodeError`] for that
//! file only, and the surrounding batch keeps going.

mod loader;
mod types;

pub use loader::load;
pub use types::{DecodeError, RasterBuffer};
