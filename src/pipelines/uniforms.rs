//! Uniform blocks and the per-draw shader state.
//!
//! [`ObjectUniform`] is the CPU-side staging block for one draw. The
//! render module stages a full block per object every frame — transform,
//! then flat color or texture, then material — and [`ShaderState`] uploads
//! it into a dynamic-offset uniform ring. The light setup lives in its own
//! block, uploaded once during scene preparation.

use anyhow::{Result, bail};
use bytemuck::Zeroable;
use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::{material::Material, object};

/// Number of light sources in the scene's illumination setup.
pub const NUM_LIGHTS: usize = 4;

/// Most draws the per-object uniform ring can hold in one frame.
pub const MAX_OBJECTS: usize = 256;

/// A point light, as authored in scene data.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

/// One light as laid out in the shader's uniform block.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    position: [f32; 3],
    focal_strength: f32,
    ambient_color: [f32; 3],
    specular_intensity: f32,
    diffuse_color: [f32; 3],
    // vec3 members are padded to 16 bytes in WGSL uniform layout
    _padding: u32,
    specular_color: [f32; 3],
    _padding2: u32,
}

impl From<&PointLight> for LightUniform {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.into(),
            focal_strength: light.focal_strength,
            ambient_color: light.ambient_color.into(),
            specular_intensity: light.specular_intensity,
            diffuse_color: light.diffuse_color.into(),
            _padding: 0,
            specular_color: light.specular_color.into(),
            _padding2: 0,
        }
    }
}

/// The full light block: a global enable flag plus the four sources.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    enabled: u32,
    _padding: [u32; 3],
    lights: [LightUniform; NUM_LIGHTS],
}

/// Per-draw uniform block, staged through the push protocol below.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    model: [[f32; 4]; 4],
    // mat3 padded to three vec4 columns for WGSL uniform alignment
    normal: [[f32; 4]; 3],
    flat_color: [f32; 4],
    ambient_color: [f32; 3],
    ambient_strength: f32,
    diffuse_color: [f32; 3],
    shininess: f32,
    specular_color: [f32; 3],
    use_texture: u32,
    uv_scale: [f32; 2],
    _padding: [f32; 2],
}

impl ObjectUniform {
    pub fn new() -> Self {
        Self {
            model: Matrix4::identity().into(),
            normal: pad_mat3(Matrix3::identity()),
            uv_scale: [1.0, 1.0],
            ..Self::zeroed()
        }
    }

    /// Stage the model transform composed as `T · Rx · Ry · Rz · S`, along
    /// with the matching normal matrix.
    pub fn set_transform(
        &mut self,
        scale: Vector3<f32>,
        rotation_deg: Vector3<f32>,
        position: Vector3<f32>,
    ) {
        let model = object::compose_transform(scale, rotation_deg, position);
        self.model = model.into();
        self.normal = pad_mat3(normal_matrix(&model));
    }

    /// Stage a flat color for this draw; disables texturing.
    pub fn set_flat_color(&mut self, color: [f32; 4]) {
        self.use_texture = 0;
        self.flat_color = color;
    }

    /// Switch this draw to the textured path; disables the flat color.
    pub fn set_textured(&mut self) {
        self.use_texture = 1;
    }

    /// Stage the tiling multiplier applied to texture coordinates.
    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.uv_scale = [u, v];
    }

    /// Stage the five Phong material parameters.
    pub fn set_material(&mut self, material: &Material) {
        self.ambient_color = material.ambient_color.into();
        self.ambient_strength = material.ambient_strength;
        self.diffuse_color = material.diffuse_color.into();
        self.specular_color = material.specular_color.into();
        self.shininess = material.shininess;
    }

    pub fn is_textured(&self) -> bool {
        self.use_texture == 1
    }
}

impl Default for ObjectUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Inverse-transpose of the model's upper 3x3, for transforming normals
/// under non-uniform scale. Degenerate scales (flattened meshes) have no
/// inverse; those fall back to the upper 3x3 itself.
fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    let upper = Matrix3::from_cols(
        model.x.truncate(),
        model.y.truncate(),
        model.z.truncate(),
    );
    upper
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or(upper)
}

fn pad_mat3(m: Matrix3<f32>) -> [[f32; 4]; 3] {
    [
        [m.x.x, m.x.y, m.x.z, 0.0],
        [m.y.x, m.y.y, m.y.z, 0.0],
        [m.z.x, m.z.y, m.z.z, 0.0],
    ]
}

/// GPU-side uniform storage: the per-object ring and the light block.
#[derive(Debug)]
pub struct ShaderState {
    object_buffer: wgpu::Buffer,
    object_stride: u32,
    lights_buffer: wgpu::Buffer,
    pub object_bind_group: wgpu::BindGroup,
    pub lights_bind_group: wgpu::BindGroup,
    pub object_bind_group_layout: wgpu::BindGroupLayout,
    pub lights_bind_group_layout: wgpu::BindGroupLayout,
}

impl ShaderState {
    pub fn new(device: &wgpu::Device) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment;
        let object_stride = align_to(std::mem::size_of::<ObjectUniform>() as u32, alignment);
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniform Buffer"),
            size: object_stride as u64 * MAX_OBJECTS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Uniform Buffer"),
            contents: bytemuck::cast_slice(&[LightsUniform::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let object_bind_group_layout = mk_uniform_layout(
            device,
            true,
            wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
            "object_bind_group_layout",
        );
        let lights_bind_group_layout =
            mk_uniform_layout(device, false, None, "lights_bind_group_layout");

        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &object_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
            label: Some("object_bind_group"),
        });
        let lights_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &lights_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: lights_buffer.as_entire_binding(),
            }],
            label: Some("lights_bind_group"),
        });

        Self {
            object_buffer,
            object_stride,
            lights_buffer,
            object_bind_group,
            lights_bind_group,
            object_bind_group_layout,
            lights_bind_group_layout,
        }
    }

    /// Upload one staged block into the ring, returning the dynamic offset
    /// the draw must bind. `index` is the draw's position within the
    /// current frame.
    pub fn upload_object(
        &self,
        queue: &wgpu::Queue,
        index: usize,
        uniform: &ObjectUniform,
    ) -> Result<u32> {
        if index >= MAX_OBJECTS {
            bail!("object uniform ring is full ({MAX_OBJECTS} draws per frame)");
        }
        let offset = index as u32 * self.object_stride;
        queue.write_buffer(&self.object_buffer, offset as u64, bytemuck::cast_slice(&[*uniform]));
        Ok(offset)
    }

    /// Upload the scene's light setup and enable lighting. The shader owns
    /// the live light state from here on; nothing mutates it later.
    pub fn upload_lights(&self, queue: &wgpu::Queue, lights: &[PointLight; NUM_LIGHTS]) {
        let mut block = LightsUniform::zeroed();
        block.enabled = 1;
        for (slot, light) in lights.iter().enumerate() {
            block.lights[slot] = light.into();
        }
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[block]));
    }
}

fn mk_uniform_layout(
    device: &wgpu::Device,
    has_dynamic_offset: bool,
    min_binding_size: Option<wgpu::BufferSize>,
    label: &str,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset,
                min_binding_size,
            },
            count: None,
        }],
        label: Some(label),
    })
}

fn align_to(value: u32, alignment: u32) -> u32 {
    value.div_ceil(alignment) * alignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    fn sample_material() -> Material {
        Material::new(
            "wood",
            vec3(0.2, 0.15, 0.1),
            0.3,
            vec3(0.6, 0.4, 0.2),
            vec3(0.3, 0.3, 0.3),
            16.0,
        )
    }

    #[test]
    fn fresh_block_is_untextured_with_unit_uv() {
        let uniform = ObjectUniform::new();
        assert!(!uniform.is_textured());
        assert_eq!(uniform.uv_scale, [1.0, 1.0]);
    }

    #[test]
    fn flat_color_and_texture_are_mutually_exclusive() {
        let mut uniform = ObjectUniform::new();
        uniform.set_flat_color([0.3, 0.5, 0.7, 1.0]);
        assert!(!uniform.is_textured());
        assert_eq!(uniform.flat_color, [0.3, 0.5, 0.7, 1.0]);

        uniform.set_textured();
        assert!(uniform.is_textured());

        uniform.set_flat_color([1.0, 0.0, 0.0, 1.0]);
        assert!(!uniform.is_textured());
    }

    #[test]
    fn set_material_stages_all_five_fields() {
        let mut uniform = ObjectUniform::new();
        uniform.set_material(&sample_material());
        assert_eq!(uniform.ambient_color, [0.2, 0.15, 0.1]);
        assert_eq!(uniform.ambient_strength, 0.3);
        assert_eq!(uniform.diffuse_color, [0.6, 0.4, 0.2]);
        assert_eq!(uniform.specular_color, [0.3, 0.3, 0.3]);
        assert_eq!(uniform.shininess, 16.0);
    }

    #[test]
    fn transform_stages_the_composed_model_matrix() {
        let mut uniform = ObjectUniform::new();
        let scale = vec3(2.0, 3.0, 4.0);
        let rotation = vec3(30.0, 0.0, 60.0);
        let position = vec3(1.0, -2.0, 3.0);
        uniform.set_transform(scale, rotation, position);
        let expected: [[f32; 4]; 4] =
            object::compose_transform(scale, rotation, position).into();
        assert_eq!(uniform.model, expected);
    }

    #[test]
    fn degenerate_scale_still_produces_a_normal_matrix() {
        // the plant leaves are flattened to zero thickness; the normal
        // matrix must not turn into NaNs
        let mut uniform = ObjectUniform::new();
        uniform.set_transform(vec3(0.4, 0.0, 0.3), vec3(90.0, 0.0, 0.0), vec3(6.0, 4.02, -2.5));
        for column in uniform.normal {
            for value in column {
                assert!(value.is_finite());
            }
        }
    }

    #[test]
    fn uniform_blocks_have_wgsl_compatible_sizes() {
        assert_eq!(std::mem::size_of::<ObjectUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
        assert_eq!(
            std::mem::size_of::<LightsUniform>(),
            16 + NUM_LIGHTS * std::mem::size_of::<LightUniform>()
        );
    }
}
