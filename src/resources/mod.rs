/**
 * This module contains all logic for producing GPU resources: procedural
 * primitive geometry and textures loaded from external files.
 */
use anyhow::{Context as _, Result};

pub mod primitives;
pub mod texture;

pub fn load_binary(file_name: &str) -> Result<Vec<u8>> {
    let path = std::path::Path::new(file_name);
    std::fs::read(path).with_context(|| format!("reading {file_name}"))
}
