//! Export items and output naming.

use crate::encode::EncodedImage;
use crate::ExportFormat;

/// One file queued for export: encoded bytes plus the target filename.
///
/// Created immediately before export; ownership moves to the exporter,
/// which is the last component to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportItem {
    /// Exact filename to create in the output directory (or suggest for a
    /// download).
    pub filename: String,
    /// Encoded file contents.
    pub bytes: Vec<u8>,
}

impl ExportItem {
    /// Pair an encoded image's bytes with a target filename.
    pub fn new(filename: impl Into<String>, image: EncodedImage) -> Self {
        Self {
            filename: filename.into(),
            bytes: image.bytes,
        }
    }

    /// Size of the encoded payload in bytes.
    pub fn byte_size(&self) -> usize {
        self.bytes.len()
    }
}

/// Derive an output filename from the source filename.
///
/// Convention: `{base}_{suffix}[_{w}x{h}][_x{scale}].{extension}`, where the
/// extension comes from the final format. The source extension (last
/// dot-segment) is stripped first.
pub fn output_filename(
    source_name: &str,
    suffix: &str,
    dimensions: Option<(u32, u32)>,
    scale: Option<u32>,
    format: ExportFormat,
) -> String {
    let base = source_name
        .rsplit_once('.')
        .map(|(base, _)| base)
        .unwrap_or(source_name);

    let mut name = format!("{base}_{suffix}");
    if let Some((width, height)) = dimensions {
        name.push_str(&format!("_{width}x{height}"));
    }
    if let Some(scale) = scale {
        name.push_str(&format!("_x{scale}"));
    }
    name.push('.');
    name.push_str(format.extension());
    name
}

/// Format a byte count for user-facing progress strings ("1.5 MB").
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}
