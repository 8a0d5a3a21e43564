//! glTF and GLB file format validators.

use serde_json::Value;

use omniavatar_engine::ExportFormat;

use super::FormatError;

/// Information extracted from a GLB (glTF Binary) file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlbInfo {
    /// glTF version (should be 2).
    pub version: u32,
    /// Total file length in bytes.
    pub length: u32,
    /// Length of the JSON chunk.
    pub json_chunk_length: u32,
    /// Length of the binary chunk (if present).
    pub bin_chunk_length: Option<u32>,
    /// Number of chunks in the file.
    pub num_chunks: u32,
}

/// Information extracted from a glTF JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GltfInfo {
    /// The glTF asset version string (e.g., "2.0").
    pub version: String,
    /// Number of meshes.
    pub mesh_count: usize,
    /// Number of materials.
    pub material_count: usize,
    /// Whether every buffer is embedded as a data URI.
    pub embedded_buffers: bool,
}

/// Validate glTF (JSON) file format and extract basic information.
pub fn validate_gltf(data: &[u8]) -> Result<GltfInfo, FormatError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| FormatError::new(ExportFormat::Gltf, format!("Invalid UTF-8: {}", e)))?;

    let json: Value = serde_json::from_str(text)
        .map_err(|e| FormatError::new(ExportFormat::Gltf, e.to_string()))?;

    let version = json
        .get("asset")
        .and_then(|v| v.get("version"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| FormatError::new(ExportFormat::Gltf, "Missing or invalid 'asset.version'"))?;

    let count = |key: &str| json.get(key).and_then(|v| v.as_array()).map_or(0, Vec::len);
    let embedded_buffers = json
        .get("buffers")
        .and_then(|v| v.as_array())
        .map_or(true, |buffers| {
            buffers.iter().all(|b| {
                b.get("uri")
                    .and_then(|u| u.as_str())
                    .map_or(false, |u| u.starts_with("data:"))
            })
        });

    Ok(GltfInfo {
        version: version.to_string(),
        mesh_count: count("meshes"),
        material_count: count("materials"),
        embedded_buffers,
    })
}

/// Validate GLB (glTF Binary) file format and extract header information.
///
/// Parses the GLB header and chunk structure to validate:
/// - GLB magic number ("glTF")
/// - Version 2 format
/// - Declared length equal to the file size
/// - JSON chunk first, every chunk inside the file
pub fn validate_glb(data: &[u8]) -> Result<GlbInfo, FormatError> {
    const GLB_MAGIC: &[u8; 4] = b"glTF";
    const HEADER_SIZE: usize = 12;
    const CHUNK_HEADER_SIZE: usize = 8;
    const JSON_CHUNK_TYPE: u32 = 0x4E4F534A; // "JSON" in little-endian
    const BIN_CHUNK_TYPE: u32 = 0x004E4942; // "BIN\0" in little-endian

    if data.len() < HEADER_SIZE {
        return Err(FormatError::new(
            ExportFormat::Glb,
            format!(
                "File too short: {} bytes (minimum {} required)",
                data.len(),
                HEADER_SIZE
            ),
        ));
    }

    if &data[0..4] != GLB_MAGIC {
        return Err(FormatError::at_byte(
            ExportFormat::Glb,
            format!("Invalid GLB magic: expected 'glTF', got {:?}", &data[0..4]),
            0,
        ));
    }

    let version = read_u32(data, 4);
    if version != 2 {
        return Err(FormatError::at_byte(
            ExportFormat::Glb,
            format!("Unsupported GLB version: {} (expected 2)", version),
            4,
        ));
    }

    let length = read_u32(data, 8);
    if length as usize != data.len() {
        return Err(FormatError::at_byte(
            ExportFormat::Glb,
            format!(
                "Declared length {} does not match file size {}",
                length,
                data.len()
            ),
            8,
        ));
    }

    let mut offset = HEADER_SIZE;
    let mut num_chunks = 0u32;
    let mut json_chunk_length = 0u32;
    let mut bin_chunk_length = None;

    while offset + CHUNK_HEADER_SIZE <= data.len() {
        let chunk_length = read_u32(data, offset);
        let chunk_type = read_u32(data, offset + 4);

        if chunk_length % 4 != 0 {
            return Err(FormatError::at_byte(
                ExportFormat::Glb,
                format!("Chunk length {} is not 4-byte aligned", chunk_length),
                offset,
            ));
        }
        let end = offset + CHUNK_HEADER_SIZE + chunk_length as usize;
        if end > data.len() {
            return Err(FormatError::at_byte(
                ExportFormat::Glb,
                "Chunk runs past end of file",
                offset,
            ));
        }

        if num_chunks == 0 {
            if chunk_type != JSON_CHUNK_TYPE {
                return Err(FormatError::at_byte(
                    ExportFormat::Glb,
                    format!("First chunk must be JSON, got type 0x{:08X}", chunk_type),
                    offset,
                ));
            }
            json_chunk_length = chunk_length;
        } else if chunk_type == BIN_CHUNK_TYPE {
            bin_chunk_length = Some(chunk_length);
        }

        num_chunks += 1;
        offset = end;
    }

    if num_chunks == 0 {
        return Err(FormatError::new(ExportFormat::Glb, "No chunks found"));
    }

    Ok(GlbInfo {
        version,
        length,
        json_chunk_length,
        bin_chunk_length,
        num_chunks,
    })
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_validators::Location;

    fn create_test_glb(json: &str, bin_len: Option<usize>) -> Vec<u8> {
        let mut json = json.as_bytes().to_vec();
        while json.len() % 4 != 0 {
            json.push(b' ');
        }
        let bin_total = bin_len.map_or(0, |n| 8 + ((n + 3) & !3));
        let total = 12 + 8 + json.len() + bin_total;

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json.len() as u32).to_le_bytes());
        out.extend_from_slice(&0x4E4F534Au32.to_le_bytes());
        out.extend_from_slice(&json);
        if let Some(n) = bin_len {
            let padded = (n + 3) & !3;
            out.extend_from_slice(&(padded as u32).to_le_bytes());
            out.extend_from_slice(&0x004E4942u32.to_le_bytes());
            out.extend(std::iter::repeat(0u8).take(padded));
        }
        out
    }

    #[test]
    fn test_validate_glb_valid() {
        let glb = create_test_glb(r#"{"asset":{"version":"2.0"}}"#, Some(100));
        let info = validate_glb(&glb).expect("Should parse valid GLB");

        assert_eq!(info.version, 2);
        assert_eq!(info.num_chunks, 2);
        assert_eq!(info.bin_chunk_length, Some(100));
    }

    #[test]
    fn test_validate_glb_json_only() {
        let glb = create_test_glb(r#"{"asset":{"version":"2.0"}}"#, None);
        let info = validate_glb(&glb).expect("Should parse GLB with JSON only");
        assert_eq!(info.num_chunks, 1);
        assert!(info.bin_chunk_length.is_none());
    }

    #[test]
    fn test_validate_glb_too_short() {
        let err = validate_glb(&[0u8; 8]).unwrap_err();
        assert_eq!(err.format, ExportFormat::Glb);
        assert!(err.message.contains("too short"));
    }

    #[test]
    fn test_validate_glb_length_mismatch() {
        let mut glb = create_test_glb(r#"{"asset":{"version":"2.0"}}"#, None);
        glb.extend_from_slice(&[0, 0, 0, 0]);
        let err = validate_glb(&glb).unwrap_err();
        assert_eq!(err.location, Some(Location::Byte(8)));
    }

    #[test]
    fn test_validate_gltf_counts() {
        let json = br#"{"asset":{"version":"2.0"},"meshes":[{},{}],"materials":[{}],
            "buffers":[{"byteLength":4,"uri":"data:application/octet-stream;base64,AAAAAA=="}]}"#;
        let info = validate_gltf(json).unwrap();
        assert_eq!(info.version, "2.0");
        assert_eq!(info.mesh_count, 2);
        assert_eq!(info.material_count, 1);
        assert!(info.embedded_buffers);
    }

    #[test]
    fn test_validate_gltf_missing_asset() {
        let err = validate_gltf(br#"{"meshes":[]}"#).unwrap_err();
        assert!(err.message.contains("asset.version"));
    }
}
