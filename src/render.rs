//! Scene assembly: interpreting the object table into draw calls.
//!
//! Rendering happens in two stages per frame. `prepare_scene` walks the
//! object table, resolves every descriptor against the registries and
//! uploads its uniform block; `encode_scene` then records the draws into
//! the render pass. An object whose tags fail to resolve is reported and
//! skipped for the frame rather than drawn with stale or arbitrary state.

use anyhow::{Context as _, Result};

use crate::{
    data_structures::{
        material::MaterialLibrary,
        mesh::MeshKind,
        object::{Appearance, ObjectDraw},
        slots::SlotTable,
    },
    pipelines::uniforms::{ObjectUniform, ShaderState},
    resources::texture::TextureEntry,
    scene::Scene,
};

/// One object's draw, fully resolved and uploaded.
#[derive(Debug)]
pub struct PreparedDraw {
    pub mesh: MeshKind,
    pub offset: u32,
    pub texture_slot: Option<usize>,
}

/// Resolve one descriptor into a staged uniform block.
///
/// The staging order mirrors the per-draw protocol: transform first, then
/// the flat color or texture (with its UV scale), then the material. Both
/// tag resolutions surface failures to the caller instead of silently
/// carrying over previously bound values.
pub fn prepare_object(
    object: &ObjectDraw,
    materials: &MaterialLibrary,
    textures: &SlotTable<TextureEntry>,
) -> Result<(ObjectUniform, Option<usize>)> {
    let mut uniform = ObjectUniform::new();
    uniform.set_transform(object.scale, object.rotation_deg, object.position);

    let texture_slot = match &object.appearance {
        Appearance::Flat(color) => {
            uniform.set_flat_color(*color);
            None
        }
        Appearance::Textured { texture, uv_scale } => {
            let slot = textures
                .slot_of(texture)
                .with_context(|| format!("texture tag {texture:?} is not registered"))?;
            uniform.set_textured();
            uniform.set_uv_scale(uv_scale[0], uv_scale[1]);
            Some(slot)
        }
    };

    let material = materials
        .find(object.material)
        .with_context(|| format!("material tag {:?} is not defined", object.material))?;
    uniform.set_material(material);

    Ok((uniform, texture_slot))
}

/// Resolve and upload every object of the scene, in table order. Objects
/// that fail to resolve are logged and dropped from this frame.
pub fn prepare_scene(scene: &Scene, shader: &ShaderState, queue: &wgpu::Queue) -> Vec<PreparedDraw> {
    let mut prepared = Vec::with_capacity(scene.objects.len());
    for object in &scene.objects {
        let (uniform, texture_slot) =
            match prepare_object(object, &scene.materials, scene.textures.entries()) {
                Ok(resolved) => resolved,
                Err(e) => {
                    log::warn!("skipping {:?}: {e:#}", object.label);
                    continue;
                }
            };
        match shader.upload_object(queue, prepared.len(), &uniform) {
            Ok(offset) => prepared.push(PreparedDraw {
                mesh: object.mesh,
                offset,
                texture_slot,
            }),
            Err(e) => log::warn!("dropping {:?}: {e:#}", object.label),
        }
    }
    prepared
}

/// Record the prepared draws into the pass. The pipeline and the camera
/// and light bind groups must already be set.
pub fn encode_scene<'a>(
    scene: &'a Scene,
    shader: &'a ShaderState,
    prepared: &[PreparedDraw],
    render_pass: &mut wgpu::RenderPass<'a>,
) {
    for draw in prepared {
        render_pass.set_bind_group(2, &shader.object_bind_group, &[draw.offset]);
        let texture_group = draw
            .texture_slot
            .and_then(|slot| scene.textures.bind_group(slot))
            .unwrap_or_else(|| scene.textures.fallback_bind_group());
        render_pass.set_bind_group(3, texture_group, &[]);
        if let Err(e) = scene.meshes.draw(draw.mesh, render_pass) {
            log::warn!("skipping draw: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::material::Material;
    use cgmath::vec3;

    fn library_with(tag: &str) -> MaterialLibrary {
        let mut materials = MaterialLibrary::new();
        materials.define(Material::new(
            tag,
            vec3(0.1, 0.1, 0.1),
            0.2,
            vec3(0.8, 0.8, 0.8),
            vec3(0.9, 0.9, 0.9),
            85.0,
        ));
        materials
    }

    fn pen(appearance: Appearance) -> ObjectDraw {
        ObjectDraw {
            label: "pen",
            mesh: MeshKind::Cylinder,
            scale: vec3(0.05, 0.6, 0.05),
            rotation_deg: vec3(0.0, 0.0, 0.0),
            position: vec3(-5.3, 3.9, 2.1),
            material: "plastic",
            appearance,
        }
    }

    #[test]
    fn flat_descriptor_resolves_without_a_texture_slot() {
        let materials = library_with("plastic");
        let textures: SlotTable<TextureEntry> = SlotTable::with_capacity(16);
        let (uniform, slot) = prepare_object(
            &pen(Appearance::Flat([0.4, 0.85, 0.98, 1.0])),
            &materials,
            &textures,
        )
        .unwrap();
        assert!(!uniform.is_textured());
        assert_eq!(slot, None);
    }

    #[test]
    fn unregistered_texture_tag_is_a_reported_error() {
        let materials = library_with("plastic");
        let textures: SlotTable<TextureEntry> = SlotTable::with_capacity(16);
        let err = prepare_object(
            &pen(Appearance::Textured {
                texture: "woodDesk",
                uv_scale: [3.0, 2.0],
            }),
            &materials,
            &textures,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("woodDesk"));
    }

    #[test]
    fn undefined_material_tag_is_a_reported_error() {
        let materials = library_with("ceramic");
        let textures: SlotTable<TextureEntry> = SlotTable::with_capacity(16);
        let err = prepare_object(
            &pen(Appearance::Flat([1.0, 1.0, 1.0, 1.0])),
            &materials,
            &textures,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("plastic"));
    }
}
