//! Pixcraft Core - Batch image pipeline library
//!
//! This crate provides the core processing functionality for Pixcraft,
//! including raster decoding, resizing, format encoding, DPI metadata
//! injection, and batched export.

pub mod decode;
pub mod encode;
pub mod export;
pub mod inject;
pub mod pipeline;
pub mod resize;

pub use decode::{load, RasterBuffer};
pub use encode::{encode, EncodeOutcome, EncodedImage};
pub use inject::{inject_dpi, DpiOutcome};
pub use pipeline::{process_batch, BatchReport, Operation, PipelineConfig, SourceFile};
pub use resize::{resample, AspectLock, ResizeRequest};

/// Output format selectable by the user.
///
/// Only PNG, JPEG, and WebP have a native encoder here; the remaining
/// formats are accepted as targets but encoding falls back to PNG with a
/// recorded substitution (see [`encode::EncodeOutcome`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
    WebP,
    Bmp,
    Gif,
    Ico,
    Avif,
}

impl ExportFormat {
    /// MIME type declared for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::WebP => "image/webp",
            ExportFormat::Bmp => "image/bmp",
            ExportFormat::Gif => "image/gif",
            ExportFormat::Ico => "image/x-icon",
            ExportFormat::Avif => "image/avif",
        }
    }

    /// Parse a MIME type string. `image/jpg` is accepted as an alias.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ExportFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ExportFormat::Jpeg),
            "image/webp" => Some(ExportFormat::WebP),
            "image/bmp" => Some(ExportFormat::Bmp),
            "image/gif" => Some(ExportFormat::Gif),
            "image/x-icon" | "image/ico" => Some(ExportFormat::Ico),
            "image/avif" => Some(ExportFormat::Avif),
            _ => None,
        }
    }

    /// File extension used in output filenames.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
            ExportFormat::Bmp => "bmp",
            ExportFormat::Gif => "gif",
            ExportFormat::Ico => "ico",
            ExportFormat::Avif => "avif",
        }
    }

    /// Whether a native encoder exists for this format.
    pub fn has_native_encoder(self) -> bool {
        matches!(
            self,
            ExportFormat::Png | ExportFormat::Jpeg | ExportFormat::WebP
        )
    }

    /// Whether this format is lossy (quality setting applies).
    pub fn is_lossy(self) -> bool {
        matches!(self, ExportFormat::Jpeg | ExportFormat::Avif)
    }
}

/// Resolution metadata hint in dots per inch.
///
/// Applied uniformly to both axes. Does not affect pixel content; print
/// pipelines read it to map pixels to physical size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u16")]
pub struct Dpi(u16);

impl TryFrom<u16> for Dpi {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Dpi::new(value).ok_or_else(|| "DPI must be a positive integer".to_string())
    }
}

impl Dpi {
    /// Screen default (72 DPI).
    pub const SCREEN: Dpi = Dpi(72);
    /// Print-on-demand preset (300 DPI).
    pub const PRINT: Dpi = Dpi(300);

    /// Create a DPI tag. Returns `None` for zero.
    pub fn new(dpi: u16) -> Option<Self> {
        if dpi == 0 {
            None
        } else {
            Some(Dpi(dpi))
        }
    }

    /// Raw dots-per-inch value.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Convert to the PNG pHYs pixels-per-meter field.
    ///
    /// 1 inch = 0.0254 m, so dots/inch * 39.3701 = dots/meter.
    pub fn pixels_per_meter(self) -> u32 {
        (self.0 as f64 * 39.3701).round() as u32
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Dpi::SCREEN
    }
}

/// Per-invocation output settings for the encode + inject stages.
///
/// The pipeline is stateless between calls; everything the stages need is
/// passed in here rather than held in ambient state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutputSettings {
    /// Requested output format.
    pub format: ExportFormat,
    /// Quality 1-100, meaningful for lossy formats only (JPEG default: 90).
    pub quality: u8,
    /// DPI metadata to stamp into the encoded bytes; `None` skips injection.
    pub dpi: Option<Dpi>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            quality: 90,
            dpi: None,
        }
    }
}

impl OutputSettings {
    /// Settings for print-on-demand output: force 300 DPI metadata.
    pub fn pod(format: ExportFormat) -> Self {
        Self {
            format,
            quality: 90,
            dpi: Some(Dpi::PRINT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mime_round_trip() {
        for format in [
            ExportFormat::Png,
            ExportFormat::Jpeg,
            ExportFormat::WebP,
            ExportFormat::Bmp,
            ExportFormat::Gif,
            ExportFormat::Ico,
            ExportFormat::Avif,
        ] {
            assert_eq!(ExportFormat::from_mime(format.mime_type()), Some(format));
        }
    }

    #[test]
    fn test_format_jpg_alias() {
        assert_eq!(
            ExportFormat::from_mime("image/jpg"),
            Some(ExportFormat::Jpeg)
        );
        assert_eq!(ExportFormat::from_mime("image/tiff"), None);
    }

    #[test]
    fn test_native_encoder_support() {
        assert!(ExportFormat::Png.has_native_encoder());
        assert!(ExportFormat::Jpeg.has_native_encoder());
        assert!(ExportFormat::WebP.has_native_encoder());
        assert!(!ExportFormat::Bmp.has_native_encoder());
        assert!(!ExportFormat::Gif.has_native_encoder());
        assert!(!ExportFormat::Ico.has_native_encoder());
        assert!(!ExportFormat::Avif.has_native_encoder());
    }

    #[test]
    fn test_dpi_presets() {
        assert_eq!(Dpi::SCREEN.get(), 72);
        assert_eq!(Dpi::PRINT.get(), 300);
        assert_eq!(Dpi::default(), Dpi::SCREEN);
    }

    #[test]
    fn test_dpi_zero_rejected() {
        assert!(Dpi::new(0).is_none());
        assert_eq!(Dpi::new(144).map(Dpi::get), Some(144));
    }

    #[test]
    fn test_dpi_zero_rejected_on_deserialize() {
        // Deserialization goes through the same positivity check as the
        // constructor; a host cannot smuggle a zero density through settings.
        assert!(serde_json::from_str::<Dpi>("0").is_err());
        assert_eq!(serde_json::from_str::<Dpi>("300").unwrap(), Dpi::PRINT);

        let settings = serde_json::from_str::<OutputSettings>(
            r#"{"format":"png","quality":90,"dpi":0}"#,
        );
        assert!(settings.is_err());
    }

    #[test]
    fn test_pixels_per_meter() {
        // round(300 * 39.3701) = 11811
        assert_eq!(Dpi::PRINT.pixels_per_meter(), 11811);
        // round(72 * 39.3701) = 2835
        assert_eq!(Dpi::SCREEN.pixels_per_meter(), 2835);
    }

    #[test]
    fn test_output_settings_default() {
        let settings = OutputSettings::default();
        assert_eq!(settings.format, ExportFormat::Png);
        assert_eq!(settings.quality, 90);
        assert!(settings.dpi.is_none());
    }

    #[test]
    fn test_output_settings_pod() {
        let settings = OutputSettings::pod(ExportFormat::Jpeg);
        assert_eq!(settings.dpi, Some(Dpi::PRINT));
    }
}
