//! Texture registration and lookup.
//!
//! The registry maps human-readable tags to GPU textures. Registration
//! decodes an image from disk, validates it, uploads it and creates the
//! bind group the render pass uses; insertion order defines the slot
//! index. The registry exclusively owns every texture for the process
//! lifetime and releases them when dropped or cleared.

use anyhow::{Context as _, Result, bail};
use image::GenericImageView;

use crate::{
    data_structures::{slots::SlotTable, texture::Texture},
    resources::load_binary,
};

/// How many textures the scene may register. The bound mirrors the number
/// of simultaneously addressable sampler slots the scene shader assumes.
pub const TEXTURE_SLOTS: usize = 16;

/// A registered texture and the bind group that samples it.
pub struct TextureEntry {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

/// Bind group layout for one color texture and its sampler.
pub fn diffuse_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("diffuse_bind_group_layout"),
    })
}

/// Ordered tag-to-texture registry with a fallback for untextured draws.
pub struct TextureRegistry {
    entries: SlotTable<TextureEntry>,
    layout: wgpu::BindGroupLayout,
    fallback: TextureEntry,
}

impl TextureRegistry {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = diffuse_layout(device);
        let white = Texture::solid_white(device, queue);
        let fallback = TextureEntry {
            bind_group: bind_texture(device, &layout, &white),
            texture: white,
        };
        Self {
            entries: SlotTable::with_capacity(TEXTURE_SLOTS),
            layout,
            fallback,
        }
    }

    /// Decode the image at `path` and register it under `tag`, returning
    /// the slot index it was assigned.
    ///
    /// Only 3- and 4-channel sources are accepted. Images are flipped
    /// vertically on load to match the lower-left origin convention of the
    /// scene's texture coordinates. Any failure leaves the registry
    /// unchanged.
    pub fn register(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &str,
        tag: &str,
    ) -> Result<usize> {
        let bytes = load_binary(path)?;
        let img = image::load_from_memory(&bytes)
            .with_context(|| format!("decoding image {path}"))?;
        let channels = img.color().channel_count();
        if channels != 3 && channels != 4 {
            bail!("image {path} has {channels} channels, only 3 or 4 are supported");
        }
        let (width, height) = img.dimensions();
        let img = img.flipv();
        let texture = Texture::from_image(device, queue, &img, Some(tag));
        let bind_group = bind_texture(device, &self.layout, &texture);
        let slot = self.entries.insert(
            tag,
            TextureEntry {
                texture,
                bind_group,
            },
        )?;
        log::info!("loaded texture {tag:?} from {path} ({width}x{height}, {channels} channels, slot {slot})");
        Ok(slot)
    }

    /// Slot index of the texture registered under `tag`, in registration
    /// order.
    pub fn slot_of(&self, tag: &str) -> Option<usize> {
        self.entries.slot_of(tag)
    }

    /// The texture registered under `tag`.
    pub fn find(&self, tag: &str) -> Option<&Texture> {
        self.entries.get(tag).map(|entry| &entry.texture)
    }

    pub fn bind_group(&self, slot: usize) -> Option<&wgpu::BindGroup> {
        self.entries.get_slot(slot).map(|entry| &entry.bind_group)
    }

    /// Bind group of a 1x1 white texture, used by flat-colored draws.
    pub fn fallback_bind_group(&self) -> &wgpu::BindGroup {
        &self.fallback.bind_group
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn entries(&self) -> &SlotTable<TextureEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every registered texture, releasing the GPU resources. The
    /// fallback stays available.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn bind_texture(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
        label: Some("diffuse_bind_group"),
    })
}
