//! glTF 2.0 writer, as embedded JSON (`.gltf`) or binary container (`.glb`).

use base64::Engine as _;
use serde_json::{json, Value};

use super::mesh::SceneMesh;
use crate::scene::PaletteEntry;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const JSON_CHUNK_TYPE: u32 = 0x4E4F534A;
const BIN_CHUNK_TYPE: u32 = 0x004E4942;

const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// A glTF document and the bytes of its single buffer.
pub struct GltfDocument {
    pub json: Value,
    pub buffer: Vec<u8>,
}

/// Lays out the mesh as one glTF primitive per material group.
pub fn build_document(
    mesh: &SceneMesh,
    palette: &std::collections::BTreeMap<String, PaletteEntry>,
    name: &str,
) -> GltfDocument {
    let mut buffer = Vec::new();
    let mut views = Vec::new();
    let mut accessors = Vec::new();
    let mut materials = Vec::new();
    let mut primitives = Vec::new();

    for (key, group) in &mesh.groups {
        if group.is_empty() {
            continue;
        }
        let Some((min, max)) = group.bounds() else {
            continue;
        };

        let position = push_view(&mut buffer, &mut views, f32_bytes(&group.positions), ARRAY_BUFFER);
        accessors.push(json!({
            "bufferView": position,
            "componentType": FLOAT,
            "count": group.positions.len(),
            "type": "VEC3",
            "min": min,
            "max": max,
        }));
        let position_accessor = accessors.len() - 1;

        let normal = push_view(&mut buffer, &mut views, f32_bytes(&group.normals), ARRAY_BUFFER);
        accessors.push(json!({
            "bufferView": normal,
            "componentType": FLOAT,
            "count": group.normals.len(),
            "type": "VEC3",
        }));
        let normal_accessor = accessors.len() - 1;

        let index_bytes: Vec<u8> = group.indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        let indices = push_view(&mut buffer, &mut views, index_bytes, ELEMENT_ARRAY_BUFFER);
        accessors.push(json!({
            "bufferView": indices,
            "componentType": UNSIGNED_INT,
            "count": group.indices.len(),
            "type": "SCALAR",
        }));
        let index_accessor = accessors.len() - 1;

        let entry = palette.get(key).copied().unwrap_or(PaletteEntry {
            color: omniavatar_spec::Rgb::new(0.5, 0.5, 0.5),
            roughness: 0.8,
            metallic: 0.0,
        });
        materials.push(json!({
            "name": key,
            "pbrMetallicRoughness": {
                "baseColorFactor": [entry.color.r, entry.color.g, entry.color.b, 1.0],
                "metallicFactor": entry.metallic,
                "roughnessFactor": entry.roughness,
            },
        }));

        primitives.push(json!({
            "attributes": {
                "POSITION": position_accessor,
                "NORMAL": normal_accessor,
            },
            "indices": index_accessor,
            "material": materials.len() - 1,
            "mode": 4,
        }));
    }

    let json = json!({
        "asset": {
            "version": "2.0",
            "generator": concat!("omniavatar ", env!("CARGO_PKG_VERSION")),
        },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "name": name, "mesh": 0 }],
        "meshes": [{ "name": name, "primitives": primitives }],
        "materials": materials,
        "accessors": accessors,
        "bufferViews": views,
        "buffers": [{ "byteLength": buffer.len() }],
    });
    GltfDocument { json, buffer }
}

fn f32_bytes(values: &[[f32; 3]]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|v| v.iter().flat_map(|c| c.to_le_bytes()))
        .collect()
}

/// Appends 4-byte aligned data and its buffer view; returns the view index.
fn push_view(buffer: &mut Vec<u8>, views: &mut Vec<Value>, data: Vec<u8>, target: u32) -> usize {
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }
    views.push(json!({
        "buffer": 0,
        "byteOffset": buffer.len(),
        "byteLength": data.len(),
        "target": target,
    }));
    buffer.extend_from_slice(&data);
    views.len() - 1
}

/// Embedded `.gltf`: the buffer travels as a base64 data URI.
pub fn write_gltf(doc: GltfDocument) -> Result<Vec<u8>, serde_json::Error> {
    let GltfDocument { mut json, buffer } = doc;
    let uri = format!(
        "data:application/octet-stream;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&buffer)
    );
    json["buffers"][0]["uri"] = Value::String(uri);
    serde_json::to_vec_pretty(&json)
}

/// Binary `.glb`: header, JSON chunk padded with spaces, BIN chunk padded
/// with zeros.
pub fn write_glb(doc: GltfDocument) -> Result<Vec<u8>, serde_json::Error> {
    let GltfDocument { json, mut buffer } = doc;
    let mut json_bytes = serde_json::to_vec(&json)?;
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }

    let total = 12 + 8 + json_bytes.len() + 8 + buffer.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(GLB_MAGIC);
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&JSON_CHUNK_TYPE.to_le_bytes());
    out.extend_from_slice(&json_bytes);

    out.extend_from_slice(&(buffer.len() as u32).to_le_bytes());
    out.extend_from_slice(&BIN_CHUNK_TYPE.to_le_bytes());
    out.extend_from_slice(&buffer);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TessellationConfig;
    use crate::export::mesh::tessellate;
    use crate::geometry::Shape;
    use std::collections::BTreeMap;

    fn cube_doc() -> GltfDocument {
        let mut mesh = SceneMesh::default();
        mesh.groups.insert(
            "skin".to_string(),
            tessellate(&Shape::cuboid(1.0, 2.0, 3.0), &TessellationConfig::default()),
        );
        build_document(&mesh, &BTreeMap::new(), "cube")
    }

    #[test]
    fn test_glb_layout() {
        let bytes = write_glb(cube_doc()).unwrap();
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 2);
        assert_eq!(
            u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize,
            bytes.len()
        );
        let json_len = u32::from_le_bytes(bytes[12..16].try_into().unwrap()) as usize;
        assert_eq!(json_len % 4, 0);
        assert_eq!(
            u32::from_le_bytes(bytes[16..20].try_into().unwrap()),
            JSON_CHUNK_TYPE
        );
        let bin_header = 20 + json_len;
        assert_eq!(
            u32::from_le_bytes(bytes[bin_header + 4..bin_header + 8].try_into().unwrap()),
            BIN_CHUNK_TYPE
        );
    }

    #[test]
    fn test_gltf_parses_with_gltf_crate() {
        let bytes = write_gltf(cube_doc()).unwrap();
        let (document, buffers, _) = gltf::import_slice(&bytes).unwrap();
        let mesh = document.meshes().next().unwrap();
        let prim = mesh.primitives().next().unwrap();
        let reader = prim.reader(|b| Some(&buffers[b.index()]));
        assert_eq!(reader.read_positions().unwrap().count(), 24);
        assert_eq!(reader.read_indices().unwrap().into_u32().count(), 36);
    }

    #[test]
    fn test_position_bounds_recorded() {
        let doc = cube_doc();
        let accessor = &doc.json["accessors"][0];
        assert_eq!(accessor["max"][1].as_f64().unwrap(), 1.0);
        assert_eq!(accessor["min"][2].as_f64().unwrap(), -1.5);
    }
}
