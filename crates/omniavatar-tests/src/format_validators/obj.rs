//! Wavefront OBJ validator.

use omniavatar_engine::ExportFormat;

use super::FormatError;

/// Element counts of an OBJ file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjInfo {
    pub vertices: usize,
    pub normals: usize,
    pub faces: usize,
    /// Names from `g` and `o` lines, in file order.
    pub groups: Vec<String>,
}

/// Counts elements and checks that every face index is in range.
///
/// Supports the `v`, `v//vn` and `v/vt/vn` face forms with positive indices.
pub fn validate_obj(data: &[u8]) -> Result<ObjInfo, FormatError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| FormatError::new(ExportFormat::Obj, format!("Invalid UTF-8: {}", e)))?;

    let mut info = ObjInfo::default();
    for (line_no, line) in text.lines().enumerate() {
        let line_no = line_no + 1;
        let bad = |message: String| FormatError::at_line(ExportFormat::Obj, message, line_no);
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let coords: Vec<&str> = parts.collect();
                if coords.len() < 3 || coords.iter().any(|c| c.parse::<f64>().is_err()) {
                    return Err(bad("Malformed vertex".to_string()));
                }
                info.vertices += 1;
            }
            Some("vn") => info.normals += 1,
            Some("f") => {
                let corners: Vec<&str> = parts.collect();
                if corners.len() < 3 {
                    return Err(bad(format!("Face with {} corners", corners.len())));
                }
                for corner in corners {
                    let index: usize = corner
                        .split('/')
                        .next()
                        .and_then(|v| v.parse().ok())
                        .ok_or_else(|| bad(format!("Malformed face index '{}'", corner)))?;
                    if index == 0 || index > info.vertices {
                        return Err(bad(format!(
                            "Face index {} out of range (1..={})",
                            index, info.vertices
                        )));
                    }
                }
                info.faces += 1;
            }
            Some("g") | Some("o") => info.groups.push(parts.collect::<Vec<_>>().join(" ")),
            _ => {}
        }
    }

    if info.vertices == 0 {
        return Err(FormatError::new(ExportFormat::Obj, "No vertices"));
    }
    Ok(info)
}
