//! Application event loop.
//!
//! The loop follows the same cycle every frame: winit delivers a redraw
//! request, the scene assembler resolves and uploads the object table,
//! one render pass draws it, and the frame is presented. Initialization
//! (GPU setup and scene preparation) happens once when the application
//! is resumed.

use std::{iter, sync::Arc};

use anyhow::Result;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{context::Context, data_structures::texture::Texture, render, scene::Scene};

/// GPU context, scene data and surface status for a running application.
struct AppState {
    ctx: Context,
    scene: Scene,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>) -> Result<Self> {
        let ctx = Context::new(window).await?;
        let scene = Scene::desk(&ctx.device, &ctx.queue, &ctx.shader);
        Ok(Self {
            ctx,
            scene,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.projection.resize(width, height);
            self.ctx.camera.update(&self.ctx.queue, &self.ctx.projection);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [width, height],
                "depth_texture",
            );
        }
    }

    fn render(&mut self) {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return;
        }

        let frame_start = Instant::now();
        let output = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated => {
                let (width, height) = (self.ctx.config.width, self.ctx.config.height);
                self.resize(width, height);
                return;
            }
            wgpu::CurrentSurfaceTexture::Occluded => return,
            other => {
                log::error!("render failed: {other:?}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let prepared = render::prepare_scene(&self.scene, &self.ctx.shader, &self.ctx.queue);

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                    multiview_mask: None,
                });

            render_pass.set_pipeline(&self.ctx.pipeline);
            render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
            render_pass.set_bind_group(1, &self.ctx.shader.lights_bind_group, &[]);
            render::encode_scene(&self.scene, &self.ctx.shader, &prepared, &mut render_pass);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        log::trace!("frame encoded in {:?}", frame_start.elapsed());
    }
}

/// Winit application driver owning the async runtime and the app state.
pub struct App {
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
}

impl App {
    fn new() -> Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            state: None,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let attributes = Window::default_attributes().with_title("deskscape");
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("could not create the window: {e}");
                event_loop.exit();
                return;
            }
        };
        match self.async_runtime.block_on(AppState::new(window)) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("app initialization failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => state.render(),
            _ => {}
        }
    }
}

/// Run the desk scene until the window is closed.
pub fn run() -> Result<()> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
