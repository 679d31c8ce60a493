//! deskscape
//!
//! A fixed-content 3D still-life renderer. The crate loads a small set of
//! procedurally generated primitive meshes and image textures, defines a
//! handful of named Phong material presets, configures a static four-light
//! illumination setup, and then interprets a declarative object table into
//! draw calls every frame. There is no scene graph, no input handling and
//! no animation: the scene is data, and rendering it is one small loop.
//!
//! High-level modules
//! - `camera`: fixed camera, projection and the view/projection uniform
//! - `context`: central GPU and window context that owns device/queue/pipeline
//! - `data_structures`: scene data models (meshes, materials, descriptors)
//! - `flow`: the application event loop driving the frame cycle
//! - `pipelines`: the Phong render pipeline and its uniform blocks
//! - `resources`: primitive mesh generation and the texture registry
//! - `render`: the scene assembler turning descriptors into draws
//! - `scene`: the desk-scene content (presets, lights, object table)
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::*;
pub use winit::event::WindowEvent;
