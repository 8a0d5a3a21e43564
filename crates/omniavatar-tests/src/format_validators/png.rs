//! PNG file format validator.

use omniavatar_engine::ExportFormat;

use super::FormatError;

/// Information extracted from a PNG IHDR chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    /// Color type (2 = RGB, 6 = RGBA).
    pub color_type: u8,
}

impl PngInfo {
    /// Number of channels implied by the color type.
    pub fn channels(&self) -> u8 {
        match self.color_type {
            0 => 1,
            2 => 3,
            3 => 1,
            4 => 2,
            6 => 4,
            _ => 0,
        }
    }
}

/// Validate the PNG signature and IHDR chunk.
pub fn validate_png(data: &[u8]) -> Result<PngInfo, FormatError> {
    const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const IHDR_END: usize = 8 + 8 + 13;

    if data.len() < IHDR_END {
        return Err(FormatError::new(
            ExportFormat::Png,
            format!("File too short: {} bytes", data.len()),
        ));
    }
    if data[0..8] != SIGNATURE {
        return Err(FormatError::at_byte(ExportFormat::Png, "Invalid PNG signature", 0));
    }
    if &data[12..16] != b"IHDR" {
        return Err(FormatError::at_byte(ExportFormat::Png, "First chunk must be IHDR", 12));
    }

    let be = |o: usize| u32::from_be_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);
    let length = be(8);
    if length != 13 {
        return Err(FormatError::at_byte(
            ExportFormat::Png,
            format!("IHDR length {} (expected 13)", length),
            8,
        ));
    }

    let width = be(16);
    let height = be(20);
    if width == 0 || height == 0 {
        return Err(FormatError::at_byte(ExportFormat::Png, "Zero image dimension", 16));
    }

    Ok(PngInfo {
        width,
        height,
        bit_depth: data[24],
        color_type: data[25],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_validators::Location;

    #[test]
    fn test_validate_png_rejects_bad_signature() {
        let err = validate_png(&[0u8; 40]).unwrap_err();
        assert_eq!(err.location, Some(Location::Byte(0)));
    }

    #[test]
    fn test_validate_png_reads_ihdr() {
        let mut data = Vec::new();
        data.extend_from_slice(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&640u32.to_be_bytes());
        data.extend_from_slice(&480u32.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        let info = validate_png(&data).unwrap();
        assert_eq!((info.width, info.height), (640, 480));
        assert_eq!(info.channels(), 4);
    }
}
