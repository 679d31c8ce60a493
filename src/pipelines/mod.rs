//! Render pipeline definitions and uniform blocks.

pub mod scene;
pub mod uniforms;
