//! Primitive meshes and their GPU buffers.
//!
//! The mesh library owns one vertex/index buffer pair per primitive kind.
//! Kinds are loaded once during scene preparation and drawn by key; the
//! geometry itself comes from [`crate::resources::primitives`].

use std::collections::HashMap;

use anyhow::{Result, bail};
use wgpu::util::DeviceExt;

use crate::resources::primitives;

/// Types that describe their own vertex-buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Position, texture coordinates and normal, as stored in GPU memory.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// The primitive shapes the scene can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Plane,
    Box,
    Sphere,
    Cylinder,
    Cone,
    Torus,
    TaperedCylinder,
    Prism,
}

impl MeshKind {
    pub const ALL: [MeshKind; 8] = [
        MeshKind::Plane,
        MeshKind::Box,
        MeshKind::Sphere,
        MeshKind::Cylinder,
        MeshKind::Cone,
        MeshKind::Torus,
        MeshKind::TaperedCylinder,
        MeshKind::Prism,
    ];
}

/// CPU-side geometry produced by the primitive generators.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

/// A primitive resident on the GPU.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

/// Owns the GPU buffers of every loaded primitive kind.
#[derive(Default)]
pub struct MeshLibrary {
    meshes: HashMap<MeshKind, GpuMesh>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate and upload `kind`. Loading an already-resident kind is a
    /// no-op; one copy serves every draw of that shape.
    pub fn load(&mut self, kind: MeshKind, device: &wgpu::Device) {
        self.meshes.entry(kind).or_insert_with(|| upload(kind, device));
    }

    pub fn load_all(&mut self, device: &wgpu::Device) {
        for kind in MeshKind::ALL {
            self.load(kind, device);
        }
    }

    pub fn is_loaded(&self, kind: MeshKind) -> bool {
        self.meshes.contains_key(&kind)
    }

    /// Encode one indexed draw of `kind` using whatever bind state is
    /// currently active on the pass.
    pub fn draw<'a>(&'a self, kind: MeshKind, render_pass: &mut wgpu::RenderPass<'a>) -> Result<()> {
        let Some(mesh) = self.meshes.get(&kind) else {
            bail!("mesh {kind:?} was never loaded");
        };
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
        Ok(())
    }
}

fn upload(kind: MeshKind, device: &wgpu::Device) -> GpuMesh {
    let data = primitives::generate(kind);
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{kind:?} Vertex Buffer")),
        contents: bytemuck::cast_slice(&data.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{kind:?} Index Buffer")),
        contents: bytemuck::cast_slice(&data.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vertex_buffer,
        index_buffer,
        num_elements: data.indices.len() as u32,
    }
}
