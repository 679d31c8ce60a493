//! The desk scene: registries, lights and the declarative object table.
//!
//! Everything the renderer shows is data in this module. The table in
//! [`desk_objects`] is interpreted in order by [`crate::render`], so the
//! scene reads top to bottom the way it is layered in space: room
//! surfaces first, then the desk, then what sits on it.

use cgmath::{Vector3, vec3};

use crate::{
    data_structures::{
        material::{Material, MaterialLibrary},
        mesh::{MeshKind, MeshLibrary},
        object::{Appearance, ObjectDraw},
    },
    pipelines::uniforms::{NUM_LIGHTS, PointLight, ShaderState},
    resources::texture::TextureRegistry,
};

/// Image files registered at startup, path and tag.
pub const TEXTURE_MANIFEST: [(&str, &str); 7] = [
    ("textures/plantBox.jpg", "plantBox"),
    ("textures/plantStem.jpg", "plantStem"),
    ("textures/plantLeaf.png", "plantLeaf"),
    ("textures/Wood/Wood069_1K-JPG_Color.jpg", "woodDesk"),
    ("textures/Wallpaper/Wallpaper001B_1K-JPG_Color.jpg", "wallpaper"),
    ("textures/Tiles/Tiles081_1K-JPG_Color.jpg", "floorTiles"),
    ("textures/Clay/RoofingTiles015C_1K-JPG_Color.jpg", "clay"),
];

/// The five material presets every object in the table refers to.
pub fn desk_materials() -> Vec<Material> {
    vec![
        Material::new(
            "wood",
            vec3(0.2, 0.15, 0.1),
            0.3,
            vec3(0.6, 0.4, 0.2),
            vec3(0.3, 0.3, 0.3),
            16.0,
        ),
        Material::new(
            "plastic",
            vec3(0.1, 0.1, 0.1),
            0.2,
            vec3(0.8, 0.8, 0.8),
            vec3(0.9, 0.9, 0.9),
            85.0,
        ),
        Material::new(
            "ceramic",
            vec3(0.2, 0.2, 0.2),
            0.3,
            vec3(0.7, 0.7, 0.7),
            vec3(0.8, 0.8, 0.8),
            64.0,
        ),
        Material::new(
            "metal",
            vec3(0.15, 0.15, 0.15),
            0.2,
            vec3(0.5, 0.5, 0.5),
            vec3(1.0, 1.0, 1.0),
            128.0,
        ),
        Material::new(
            "plant",
            vec3(0.1, 0.2, 0.1),
            0.4,
            vec3(0.3, 0.6, 0.3),
            vec3(0.2, 0.4, 0.2),
            16.0,
        ),
    ]
}

/// The static illumination setup: ceiling light, desk lamp, window light
/// and the monitor's glow.
pub fn desk_lights() -> [PointLight; NUM_LIGHTS] {
    [
        // main overhead ceiling light, warm white, centered above the desk
        PointLight {
            position: vec3(0.0, 18.0, 2.0),
            ambient_color: vec3(0.35, 0.32, 0.28),
            diffuse_color: vec3(1.0, 0.95, 0.85),
            specular_color: vec3(0.9, 0.9, 0.85),
            focal_strength: 48.0,
            specular_intensity: 0.6,
        },
        // desk lamp from the left, warmer tone
        PointLight {
            position: vec3(-12.0, 8.0, 3.0),
            ambient_color: vec3(0.15, 0.12, 0.08),
            diffuse_color: vec3(0.9, 0.85, 0.7),
            specular_color: vec3(0.8, 0.75, 0.65),
            focal_strength: 24.0,
            specular_intensity: 0.5,
        },
        // cool daylight through the window on the right
        PointLight {
            position: vec3(20.0, 12.0, 5.0),
            ambient_color: vec3(0.12, 0.15, 0.18),
            diffuse_color: vec3(0.7, 0.8, 0.95),
            specular_color: vec3(0.85, 0.9, 1.0),
            focal_strength: 20.0,
            specular_intensity: 0.4,
        },
        // subtle blue glow from the monitor
        PointLight {
            position: vec3(0.0, 5.0, 0.0),
            ambient_color: vec3(0.05, 0.08, 0.12),
            diffuse_color: vec3(0.4, 0.6, 0.9),
            specular_color: vec3(0.5, 0.7, 1.0),
            focal_strength: 12.0,
            specular_intensity: 0.3,
        },
    ]
}

fn textured(
    label: &'static str,
    mesh: MeshKind,
    scale: Vector3<f32>,
    rotation_deg: Vector3<f32>,
    position: Vector3<f32>,
    material: &'static str,
    texture: &'static str,
    uv_scale: [f32; 2],
) -> ObjectDraw {
    ObjectDraw {
        label,
        mesh,
        scale,
        rotation_deg,
        position,
        material,
        appearance: Appearance::Textured { texture, uv_scale },
    }
}

fn flat(
    label: &'static str,
    mesh: MeshKind,
    scale: Vector3<f32>,
    rotation_deg: Vector3<f32>,
    position: Vector3<f32>,
    material: &'static str,
    color: [f32; 4],
) -> ObjectDraw {
    ObjectDraw {
        label,
        mesh,
        scale,
        rotation_deg,
        position,
        material,
        appearance: Appearance::Flat(color),
    }
}

/// The full object table, in draw order.
pub fn desk_objects() -> Vec<ObjectDraw> {
    use MeshKind::*;
    let no_spin = vec3(0.0, 0.0, 0.0);
    vec![
        // room
        textured("floor", Plane, vec3(50.0, 1.0, 50.0), no_spin, vec3(0.0, 0.0, 0.0), "ceramic", "floorTiles", [15.0, 15.0]),
        textured("back wall", Box, vec3(50.0, 20.0, 0.3), no_spin, vec3(0.0, 10.0, -15.0), "wood", "wallpaper", [10.0, 8.0]),
        textured("left wall", Box, vec3(0.3, 20.0, 30.0), no_spin, vec3(-25.0, 10.0, 0.0), "wood", "wallpaper", [8.0, 8.0]),
        textured("right wall", Box, vec3(0.3, 20.0, 30.0), no_spin, vec3(25.0, 10.0, 0.0), "wood", "wallpaper", [8.0, 8.0]),
        // the desk itself
        textured("desk top", Box, vec3(16.0, 0.4, 8.0), no_spin, vec3(0.0, 3.0, 0.0), "wood", "woodDesk", [3.0, 2.0]),
        textured("desk leg front left", Box, vec3(0.6, 3.0, 0.6), no_spin, vec3(-7.0, 1.5, 3.5), "wood", "woodDesk", [1.0, 2.0]),
        textured("desk leg front right", Box, vec3(0.6, 3.0, 0.6), no_spin, vec3(7.0, 1.5, 3.5), "wood", "woodDesk", [1.0, 2.0]),
        textured("desk leg back left", Box, vec3(0.6, 3.0, 0.6), no_spin, vec3(-7.0, 1.5, -3.5), "wood", "woodDesk", [1.0, 2.0]),
        textured("desk leg back right", Box, vec3(0.6, 3.0, 0.6), no_spin, vec3(7.0, 1.5, -3.5), "wood", "woodDesk", [1.0, 2.0]),
        // framed artwork on the back wall
        flat("picture frame", Box, vec3(5.0, 3.5, 0.2), no_spin, vec3(-10.0, 12.0, -14.7), "wood", [0.2, 0.15, 0.1, 1.0]),
        flat("picture backing", Box, vec3(4.4, 2.9, 0.15), no_spin, vec3(-10.0, 12.0, -14.55), "ceramic", [0.95, 0.92, 0.88, 1.0]),
        flat("artwork mountains", Box, vec3(3.8, 0.8, 0.12), no_spin, vec3(-10.0, 11.0, -14.5), "ceramic", [0.25, 0.35, 0.45, 1.0]),
        flat("artwork sun", Sphere, vec3(0.6, 0.6, 0.6), no_spin, vec3(-9.0, 12.8, -14.5), "ceramic", [0.95, 0.75, 0.35, 1.0]),
        flat("artwork accent", Box, vec3(0.3, 1.2, 0.11), vec3(0.0, 0.0, 15.0), vec3(-12.0, 12.0, -14.48), "ceramic", [0.45, 0.55, 0.35, 1.0]),
        // pen cup on the left side of the desk
        flat("pen cup", Cylinder, vec3(0.4, 0.7, 0.4), no_spin, vec3(-5.5, 3.2, 2.0), "plastic", [0.3, 0.3, 0.35, 1.0]),
        flat("pen light blue", Cylinder, vec3(0.05, 0.6, 0.05), no_spin, vec3(-5.3, 3.9, 2.1), "plastic", [0.408, 0.851, 0.988, 1.0]),
        flat("pen red", Cylinder, vec3(0.05, 0.6, 0.05), no_spin, vec3(-5.4, 3.9, 1.8), "plastic", [0.953, 0.274, 0.274, 1.0]),
        flat("pen grey", Cylinder, vec3(0.05, 0.6, 0.05), no_spin, vec3(-5.55, 3.9, 2.05), "plastic", [0.612, 0.569, 0.564, 1.0]),
        flat("pen green", Cylinder, vec3(0.05, 0.6, 0.05), no_spin, vec3(-5.7, 3.9, 2.2), "plastic", [0.235, 0.909, 0.266, 1.0]),
        flat("pen green 2", Cylinder, vec3(0.05, 0.6, 0.05), no_spin, vec3(-5.2, 3.9, 2.2), "plastic", [0.235, 0.909, 0.266, 1.0]),
        flat("pen yellow", Cylinder, vec3(0.05, 0.6, 0.05), no_spin, vec3(-5.2, 3.9, 1.95), "plastic", [0.987, 0.987, 0.165, 1.0]),
        flat("pen dark blue", Cylinder, vec3(0.05, 0.6, 0.05), no_spin, vec3(-5.6, 3.9, 1.85), "plastic", [0.247, 0.145, 1.0, 1.0]),
        flat("pen yellow 2", Cylinder, vec3(0.05, 0.6, 0.05), no_spin, vec3(-5.7, 3.9, 1.9), "plastic", [0.987, 0.987, 0.165, 1.0]),
        // monitor, keyboard, mouse
        flat("monitor stand base", Box, vec3(1.5, 0.15, 1.0), no_spin, vec3(0.0, 3.2, -1.5), "metal", [0.2, 0.2, 0.2, 1.0]),
        flat("monitor stand neck", Cylinder, vec3(0.2, 1.5, 0.2), no_spin, vec3(0.0, 3.3, -1.5), "metal", [0.2, 0.2, 0.2, 1.0]),
        flat("monitor screen", Box, vec3(5.0, 3.0, 0.3), no_spin, vec3(0.0, 5.0, -1.5), "plastic", [0.1, 0.1, 0.12, 1.0]),
        flat("monitor display", Box, vec3(4.6, 2.6, 0.25), no_spin, vec3(0.0, 5.0, -1.4), "plastic", [0.3, 0.5, 0.7, 1.0]),
        flat("keyboard", Box, vec3(3.5, 0.15, 1.5), no_spin, vec3(0.0, 3.2, 2.0), "plastic", [0.15, 0.15, 0.15, 1.0]),
        flat("mouse", Box, vec3(0.6, 0.3, 0.8), vec3(0.0, -20.0, 0.0), vec3(4.5, 3.2, 1.8), "plastic", [0.2, 0.2, 0.25, 1.0]),
        // wax warmer on the left
        textured("wax warmer pot", TaperedCylinder, vec3(0.6, 0.8, 0.6), vec3(0.0, 45.0, 0.0), vec3(-6.0, 3.2, -2.5), "ceramic", "clay", [1.0, 1.0]),
        flat("wax ring", Torus, vec3(0.35, 0.45, 0.35), vec3(100.0, 0.0, 90.0), vec3(-6.0, 4.0, -2.5), "ceramic", [0.753, 0.216, 0.765, 1.0]),
        // potted plant on the right
        textured("plant pot", Box, vec3(0.6, 0.6, 0.6), no_spin, vec3(6.0, 3.2, -2.5), "ceramic", "plantBox", [1.0, 1.0]),
        textured("plant stem", Cylinder, vec3(0.06, 1.5, 0.06), no_spin, vec3(6.0, 3.4, -2.5), "plant", "plantStem", [1.0, 1.0]),
        textured("plant leaf bottom", Prism, vec3(0.4, 0.0, 0.3), vec3(90.0, 0.0, 0.0), vec3(6.0, 4.02, -2.5), "plant", "plantLeaf", [1.0, 1.0]),
        textured("plant leaf middle", Prism, vec3(0.4, 0.0, 0.3), vec3(90.0, 0.0, 0.0), vec3(6.0, 4.32, -2.5), "plant", "plantLeaf", [1.0, 1.0]),
        textured("plant leaf top", Prism, vec3(0.4, 0.0, 0.3), vec3(90.0, 0.0, 0.0), vec3(6.0, 4.62, -2.5), "plant", "plantLeaf", [1.0, 1.0]),
    ]
}

/// The desk scene and the registries its descriptors resolve against.
pub struct Scene {
    pub objects: Vec<ObjectDraw>,
    pub meshes: MeshLibrary,
    pub textures: TextureRegistry,
    pub materials: MaterialLibrary,
}

impl Scene {
    /// Initialization phase: load every mesh kind, register the texture
    /// manifest, define the material presets and upload the light setup.
    ///
    /// A texture that fails to load is reported and skipped; the objects
    /// referring to it degrade (loudly) instead of aborting the scene.
    pub fn desk(device: &wgpu::Device, queue: &wgpu::Queue, shader: &ShaderState) -> Self {
        let mut meshes = MeshLibrary::new();
        meshes.load_all(device);

        let mut textures = TextureRegistry::new(device, queue);
        for (path, tag) in TEXTURE_MANIFEST {
            if let Err(e) = textures.register(device, queue, path, tag) {
                log::warn!("texture {tag:?} unavailable: {e:#}");
            }
        }

        let mut materials = MaterialLibrary::new();
        for material in desk_materials() {
            materials.define(material);
        }

        shader.upload_lights(queue, &desk_lights());

        Self {
            objects: desk_objects(),
            meshes,
            textures,
            materials,
        }
    }
}
