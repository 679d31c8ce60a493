//! End-to-end checks of the scene content: the material presets, the
//! object table's referential integrity, and transform composition
//! against an independently computed reference. None of these need a GPU.

use deskscape::{
    data_structures::{
        material::MaterialLibrary,
        object::{Appearance, compose_transform},
        slots::SlotTable,
    },
    render::prepare_object,
    resources::texture::TextureEntry,
    scene::{TEXTURE_MANIFEST, desk_lights, desk_materials, desk_objects},
    vec3,
};

fn preset_library() -> MaterialLibrary {
    let mut library = MaterialLibrary::new();
    for material in desk_materials() {
        library.define(material);
    }
    library
}

#[test]
fn the_five_presets_resolve_with_their_shininess() {
    let library = preset_library();
    for (tag, shininess) in [
        ("wood", 16.0),
        ("plastic", 85.0),
        ("ceramic", 64.0),
        ("metal", 128.0),
        ("plant", 16.0),
    ] {
        let material = library
            .find(tag)
            .unwrap_or_else(|| panic!("{tag} missing"));
        assert_eq!(material.shininess, shininess, "{tag}");
    }
    assert_eq!(library.len(), 5);
}

#[test]
fn every_object_refers_to_defined_tags() {
    let library = preset_library();
    let manifest_tags: Vec<&str> = TEXTURE_MANIFEST.iter().map(|(_, tag)| *tag).collect();
    for object in desk_objects() {
        assert!(
            library.find(object.material).is_some(),
            "{:?} uses undefined material {:?}",
            object.label,
            object.material
        );
        if let Appearance::Textured { texture, .. } = object.appearance {
            assert!(
                manifest_tags.contains(&texture),
                "{:?} uses unregistered texture {:?}",
                object.label,
                texture
            );
        }
    }
}

#[test]
fn the_table_is_complete_and_labels_are_unique() {
    let objects = desk_objects();
    assert_eq!(objects.len(), 36);
    let mut labels: Vec<&str> = objects.iter().map(|o| o.label).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), objects.len());
}

#[test]
fn the_four_lights_are_ordered_by_reach() {
    let lights = desk_lights();
    let reach: Vec<f32> = lights.iter().map(|l| l.focal_strength).collect();
    assert_eq!(reach, vec![48.0, 24.0, 20.0, 12.0]);
}

#[test]
fn unresolved_texture_tags_surface_as_errors() {
    // nothing registered: every textured object must report its tag
    // instead of binding something arbitrary
    let library = preset_library();
    let empty: SlotTable<TextureEntry> = SlotTable::with_capacity(16);
    let floor = desk_objects().into_iter().next().unwrap();
    let err = prepare_object(&floor, &library, &empty).unwrap_err();
    assert!(format!("{err:#}").contains("floorTiles"));
}

// -- transform reference -----------------------------------------------

// column-major 4x4 helpers, written out longhand so the reference does
// not depend on the code under test

type M = [[f32; 4]; 4];

fn matmul(a: M, b: M) -> M {
    let mut out = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            let mut sum = 0.0;
            for k in 0..4 {
                sum += a[k][row] * b[col][k];
            }
            out[col][row] = sum;
        }
    }
    out
}

fn translation(p: [f32; 3]) -> M {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [p[0], p[1], p[2], 1.0],
    ]
}

fn rotation_x(deg: f32) -> M {
    let (s, c) = deg.to_radians().sin_cos();
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, s, 0.0],
        [0.0, -s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

fn rotation_y(deg: f32) -> M {
    let (s, c) = deg.to_radians().sin_cos();
    [
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

fn rotation_z(deg: f32) -> M {
    let (s, c) = deg.to_radians().sin_cos();
    [
        [c, s, 0.0, 0.0],
        [-s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

fn scaling(s: [f32; 3]) -> M {
    [
        [s[0], 0.0, 0.0, 0.0],
        [0.0, s[1], 0.0, 0.0],
        [0.0, 0.0, s[2], 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

#[test]
fn transform_composition_matches_an_independent_reference() {
    // the wax ring's pose, with an extra Y rotation so no axis is trivial
    let got: M = compose_transform(
        vec3(1.5, 2.0, 0.5),
        vec3(100.0, 45.0, 90.0),
        vec3(-6.0, 4.0, -2.5),
    )
    .into();

    let expected = matmul(
        translation([-6.0, 4.0, -2.5]),
        matmul(
            rotation_x(100.0),
            matmul(
                rotation_y(45.0),
                matmul(rotation_z(90.0), scaling([1.5, 2.0, 0.5])),
            ),
        ),
    );

    for col in 0..4 {
        for row in 0..4 {
            assert!(
                (got[col][row] - expected[col][row]).abs() < 1e-4,
                "mismatch at column {col}, row {row}: {} vs {}",
                got[col][row],
                expected[col][row]
            );
        }
    }
}
