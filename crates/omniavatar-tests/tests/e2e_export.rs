//! Export tests.
//!
//! Every format is read back by an independent parser: the gltf crate for
//! GLB and glTF, the png decoder for PNG, and the profile loader for JSON.

use pretty_assertions::assert_eq;

use omniavatar_engine::{
    compose_scene, EngineConfig, ExportError, ExportFormat, Exporter, JointRotations, SceneHandle,
};
use omniavatar_spec::{AvatarProfile, BackendError, OutfitPreset};
use omniavatar_tests::fixtures::{self, export_bytes};
use omniavatar_tests::format_validators::{validate_glb, validate_gltf, validate_obj, validate_png};

fn dressed_profile() -> AvatarProfile {
    let mut profile = fixtures::dressed(OutfitPreset::Business);
    profile.set_hair(Some("afro"));
    profile
}

#[test]
fn test_glb_has_valid_chunks_and_parses() {
    let bytes = export_bytes(&dressed_profile(), ExportFormat::Glb);
    let info = validate_glb(&bytes).unwrap();
    assert_eq!(info.version, 2);
    assert_eq!(info.num_chunks, 2);
    assert!(info.bin_chunk_length.unwrap() > 0);

    let (document, buffers, _) = gltf::import_slice(&bytes).unwrap();
    assert!(document.meshes().count() > 0);
    assert_eq!(buffers.len(), 1);
    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|b| Some(&buffers[b.index()]));
            let positions: Vec<[f32; 3]> = reader.read_positions().unwrap().collect();
            let indices: Vec<u32> = reader.read_indices().unwrap().into_u32().collect();
            assert!(!positions.is_empty());
            assert_eq!(indices.len() % 3, 0);
            assert!(indices.iter().all(|&i| (i as usize) < positions.len()));
        }
    }
}

#[test]
fn test_glb_materials_cover_garments() {
    let bytes = export_bytes(&dressed_profile(), ExportFormat::Glb);
    let (document, _, _) = gltf::import_slice(&bytes).unwrap();
    let names: Vec<String> = document
        .materials()
        .filter_map(|m| m.name().map(str::to_string))
        .collect();
    for expected in ["skin", "hair", "garment_jacket01", "garment_suitpants01"] {
        assert!(names.iter().any(|n| n == expected), "missing {}", expected);
    }
}

#[test]
fn test_gltf_embeds_its_buffer() {
    let bytes = export_bytes(&dressed_profile(), ExportFormat::Gltf);
    let info = validate_gltf(&bytes).unwrap();
    assert_eq!(info.version, "2.0");
    assert!(info.embedded_buffers);
    assert!(info.mesh_count > 0);

    let (document, buffers, _) = gltf::import_slice(&bytes).unwrap();
    assert_eq!(document.meshes().count(), info.mesh_count);
    assert_eq!(buffers.len(), 1);
}

#[test]
fn test_glb_and_gltf_share_geometry() {
    let profile = dressed_profile();
    let glb = gltf::Gltf::from_slice(&export_bytes(&profile, ExportFormat::Glb)).unwrap();
    let text = gltf::Gltf::from_slice(&export_bytes(&profile, ExportFormat::Gltf)).unwrap();
    assert_eq!(glb.meshes().count(), text.meshes().count());
    assert_eq!(glb.accessors().count(), text.accessors().count());
}

#[test]
fn test_obj_indices_are_in_range() {
    let bytes = export_bytes(&dressed_profile(), ExportFormat::Obj);
    let info = validate_obj(&bytes).unwrap();
    assert!(info.faces > 0);
    assert_eq!(info.vertices, info.normals);
    assert!(info.groups.iter().any(|g| g == "skin"));
}

#[test]
fn test_png_matches_render_size() {
    let bytes = export_bytes(&dressed_profile(), ExportFormat::Png);
    let info = validate_png(&bytes).unwrap();
    assert_eq!((info.width, info.height), (48, 96));

    let decoder = png::Decoder::new(bytes.as_slice());
    let mut reader = decoder.read_info().unwrap();
    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut pixels).unwrap();
    let pixels = &pixels[..frame.buffer_size()];
    // The avatar covers part of the frame, so not every pixel is background.
    let first = &pixels[0..4];
    assert!(pixels.chunks(4).any(|px| px != first));
}

#[test]
fn test_json_export_reloads_exactly() {
    let profile = dressed_profile();
    let bytes = export_bytes(&profile, ExportFormat::Json);
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(AvatarProfile::from_json(&text).unwrap(), profile);
}

#[test]
fn test_export_without_scene_fails_for_every_format() {
    let exporter = Exporter::new(EngineConfig::default());
    let handle = SceneHandle::empty();
    let profile = fixtures::neutral();
    for format in ExportFormat::ALL {
        let err = exporter.export(&handle, &profile, format).unwrap_err();
        assert!(matches!(err, ExportError::SceneNotReady));
        assert_eq!(err.code(), "EXPORT_001");
    }
}

#[test]
fn test_cleared_handle_stops_exports() {
    let profile = fixtures::neutral();
    let config = EngineConfig::default();
    let scene = compose_scene(&profile, &JointRotations::tpose(), &config);
    let handle = SceneHandle::with_scene(scene);
    let exporter = Exporter::new(config);
    assert!(exporter.export(&handle, &profile, ExportFormat::Obj).is_ok());
    handle.clear();
    assert!(exporter.export(&handle, &profile, ExportFormat::Obj).is_err());
}

#[test]
fn test_export_to_path_writes_reported_size() {
    let dir = tempfile::tempdir().unwrap();
    let profile = fixtures::neutral();
    let config = EngineConfig::default();
    let scene = compose_scene(&profile, &JointRotations::tpose(), &config);
    let handle = SceneHandle::with_scene(scene);
    let path = dir.path().join("avatar.glb");
    let written = Exporter::new(config)
        .export_to_path(&handle, &profile, ExportFormat::Glb, &path)
        .unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, written);
}
