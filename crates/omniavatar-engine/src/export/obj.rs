//! Wavefront OBJ writer.

use std::fmt::Write;

use super::mesh::SceneMesh;

/// Writes the mesh as OBJ text, one group per material.
pub fn write_obj(mesh: &SceneMesh, object_name: &str) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "# omniavatar export");
    let _ = writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    let _ = writeln!(out, "o {}", sanitize(object_name));

    let mut base = 1usize;
    for (material, group) in &mesh.groups {
        let _ = writeln!(out, "g {}", material);
        let _ = writeln!(out, "usemtl {}", material);
        for p in &group.positions {
            let _ = writeln!(out, "v {:.6} {:.6} {:.6}", p[0], p[1], p[2]);
        }
        for n in &group.normals {
            let _ = writeln!(out, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2]);
        }
        for tri in group.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize + base);
            let _ = writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}");
        }
        base += group.vertex_count();
    }
    out
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "avatar".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TessellationConfig;
    use crate::export::mesh::tessellate;
    use crate::geometry::Shape;

    #[test]
    fn test_obj_counts_and_one_based_indices() {
        let mut mesh = SceneMesh::default();
        mesh.groups.insert(
            "skin".to_string(),
            tessellate(&Shape::cuboid(1.0, 1.0, 1.0), &TessellationConfig::default()),
        );
        mesh.groups.insert(
            "hair".to_string(),
            tessellate(&Shape::cuboid(1.0, 1.0, 1.0), &TessellationConfig::default()),
        );
        let text = write_obj(&mesh, "my avatar");
        assert!(text.contains("o my_avatar"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 48);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 24);
        // "hair" sorts first, so "skin" faces start after its 24 vertices.
        let skin_face = text
            .lines()
            .skip_while(|l| *l != "g skin")
            .find(|l| l.starts_with("f "))
            .unwrap();
        assert!(skin_face.starts_with("f 25//25"));
    }
}
