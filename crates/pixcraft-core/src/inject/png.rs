//! PNG pHYs chunk injection.
//!
//! PNG stores physical resolution in an ancillary `pHYs` chunk: pixels per
//! unit for both axes plus a unit specifier. We splice a freshly built
//! 21-byte chunk immediately after IHDR; no existing chunk is modified or
//! removed, so the remainder of the stream is preserved byte-for-byte.

use super::FormatError;
use crate::Dpi;

/// The fixed 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// On-disk size of the pHYs chunk we insert: 4 (length) + 4 (type) +
/// 9 (data) + 4 (CRC).
pub const PHYS_CHUNK_SIZE: usize = 21;

/// Inject a pHYs chunk carrying `dpi` into a PNG byte stream.
///
/// The first chunk after the signature is IHDR by contract; its total
/// on-disk size is 12 bytes of framing plus the big-endian length read from
/// bytes 8-11. The new chunk is inserted at that boundary.
///
/// Injection is not idempotent: calling this twice inserts two pHYs chunks.
pub fn inject(bytes: &[u8], dpi: Dpi) -> Result<Vec<u8>, FormatError> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..8] != PNG_SIGNATURE {
        return Err(FormatError::NotPng);
    }
    if bytes.len() < 12 {
        return Err(FormatError::Truncated);
    }

    let ihdr_len = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
    // Signature + length(4) + type(4) + data + CRC(4). A forged length
    // field can overflow the sum on 32-bit targets; treat it as truncation.
    let insert_at = ihdr_len
        .checked_add(8 + 12)
        .filter(|&end| end <= bytes.len())
        .ok_or(FormatError::Truncated)?;

    let chunk = build_phys_chunk(dpi);

    let mut out = Vec::with_capacity(bytes.len() + PHYS_CHUNK_SIZE);
    out.extend_from_slice(&bytes[..insert_at]);
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&bytes[insert_at..]);
    Ok(out)
}

/// Build the complete 21-byte pHYs chunk for `dpi`.
///
/// Layout: length = 9, type `pHYs`, pixels-per-unit X and Y (identical -
/// injection is isotropic), unit specifier 1 (meters), CRC-32 over type +
/// data.
fn build_phys_chunk(dpi: Dpi) -> [u8; PHYS_CHUNK_SIZE] {
    let ppm = dpi.pixels_per_meter().to_be_bytes();

    let mut chunk = [0u8; PHYS_CHUNK_SIZE];
    chunk[0..4].copy_from_slice(&9u32.to_be_bytes());
    chunk[4..8].copy_from_slice(b"pHYs");
    chunk[8..12].copy_from_slice(&ppm);
    chunk[12..16].copy_from_slice(&ppm);
    chunk[16] = 1;

    let crc = crc32(&chunk[4..17]);
    chunk[17..21].copy_from_slice(&crc.to_be_bytes());
    chunk
}

/// Standard PNG/zlib CRC-32: polynomial 0xEDB88320, initialized to all-ones,
/// inverted at the end.
pub(crate) fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
        }
    }
    crc ^ 0xFFFF_FFFF
}
