//! JPEG JFIF APP0 density injection.
//!
//! JFIF carries pixel density in its APP0 segment. When the stream already
//! has one we overwrite the density fields in place; otherwise a complete
//! 18-byte APP0 segment is synthesized and spliced in right after SOI.

use super::FormatError;
use crate::Dpi;

/// Size of a synthesized JFIF APP0 segment, marker included.
pub const JFIF_APP0_SIZE: usize = 18;

/// Inject DPI density fields into a JPEG byte stream.
///
/// The scan walks the stream one byte at a time looking for an `FF E0`
/// marker pair with a `JFIF\0` identifier; segment length fields are not
/// used to skip non-APP0 segments.
pub fn inject(bytes: &[u8], dpi: Dpi) -> Result<Vec<u8>, FormatError> {
    if bytes.len() < 2 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return Err(FormatError::NotJpeg);
    }

    let mut out = bytes.to_vec();
    let density = dpi.get().to_be_bytes();

    let mut offset = 2;
    while offset + 1 < out.len() {
        if out[offset] == 0xFF
            && out[offset + 1] == 0xE0
            && out.len() >= offset + JFIF_APP0_SIZE
            && &out[offset + 4..offset + 9] == b"JFIF\0"
        {
            // Overwrite in place: density units byte, then X/Y density as
            // two big-endian u16s.
            out[offset + 13] = 1;
            out[offset + 14] = density[0];
            out[offset + 15] = density[1];
            out[offset + 16] = density[0];
            out[offset + 17] = density[1];
            return Ok(out);
        }
        offset += 1;
    }

    // No JFIF APP0 anywhere: synthesize one after the SOI marker, shifting
    // all subsequent bytes by 18.
    let segment = build_app0_segment(dpi);
    let mut result = Vec::with_capacity(out.len() + JFIF_APP0_SIZE);
    result.extend_from_slice(&out[..2]);
    result.extend_from_slice(&segment);
    result.extend_from_slice(&out[2..]);
    Ok(result)
}

/// Build a complete JFIF APP0 segment: marker, length 16, identifier,
/// version 1.1, density units 1 (dots per inch), X/Y density, no thumbnail.
fn build_app0_segment(dpi: Dpi) -> [u8; JFIF_APP0_SIZE] {
    let density = dpi.get().to_be_bytes();
    let mut segment = [0u8; JFIF_APP0_SIZE];
    segment[0] = 0xFF;
    segment[1] = 0xE0;
    segment[2] = 0x00;
    segment[3] = 0x10;
    segment[4..9].copy_from_slice(b"JFIF\0");
    segment[9] = 0x01;
    segment[10] = 0x01;
    segment[11] = 0x01;
    segment[12] = density[0];
    segment[13] = density[1];
    segment[14] = density[0];
    segment[15] = density[1];
    segment[16] = 0x00;
    segment[17] = 0x00;
    segment
}
