use crate::constants::{MIN_POINT_SIZE, POINT_SCALE};
use crate::core::particles::Particle;
use crate::core::teardown::Teardown;
use crate::core::{Camera, FrameVisuals};
use glam::Vec3;
use web_sys as web;

mod glow;
mod helpers;
mod stars;

use glow::{create_glow_resources, GlowResources, GlowUniforms};
use stars::{create_star_resources, StarGlobals, StarResources};

/// WebGPU state for the warp: one surface, the star instances and the glow
/// sprite, drawn additively over black in a single pass.
pub struct WarpRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    stars: StarResources,
    glow: GlowResources,
    camera: Camera,
    pixel_ratio: f32,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl WarpRenderer {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        particles: &[Particle],
        pixel_ratio: f32,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("warp_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let stars = create_star_resources(&device, format, particles);
        let glow = create_glow_resources(&device, &queue, format);
        log::debug!(
            "[warp] renderer ready: {}x{} {:?}, {} stars",
            width,
            height,
            format,
            stars.count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            stars,
            glow,
            camera: Camera::warp(width as f32 / height as f32),
            pixel_ratio: pixel_ratio.max(0.5),
            width,
            height,
            clear_color: wgpu::Color::BLACK,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.pixel_ratio = pixel_ratio.max(0.5);
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.camera.set_aspect(width as f32 / height as f32);
        }
    }

    /// Reapply the current configuration after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame. `particles` is only uploaded when it changed.
    pub fn render(
        &mut self,
        particles: Option<&[Particle]>,
        visuals: &FrameVisuals,
    ) -> Result<(), wgpu::SurfaceError> {
        if let Some(p) = particles {
            self.queue
                .write_buffer(&self.stars.instance_buffer, 0, bytemuck::cast_slice(p));
        }

        let globals = StarGlobals {
            view: self.camera.view_matrix().to_cols_array_2d(),
            proj: self.camera.projection_matrix().to_cols_array_2d(),
            resolution: [self.width as f32, self.height as f32],
            point_scale: POINT_SCALE * self.pixel_ratio,
            min_point_size: MIN_POINT_SIZE * self.pixel_ratio,
            color: [1.0, 1.0, 1.0, 1.0],
        };
        self.queue
            .write_buffer(&self.stars.uniform_buffer, 0, bytemuck::bytes_of(&globals));

        let center = Vec3::new(0.0, 0.0, visuals.glow_z);
        let glow_u = GlowUniforms {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            center_scale: [center.x, center.y, center.z, visuals.glow.scale],
            tint: [1.0, 1.0, 1.0, visuals.glow.opacity],
        };
        self.queue
            .write_buffer(&self.glow.uniform_buffer, 0, bytemuck::bytes_of(&glow_u));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("warp_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("warp_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.stars.pipeline);
            rpass.set_bind_group(0, &self.stars.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.stars.instance_buffer.slice(..));
            rpass.draw(0..6, 0..self.stars.count);

            if visuals.glow.opacity > 0.0 {
                rpass.set_pipeline(&self.glow.pipeline);
                rpass.set_bind_group(0, &self.glow.bind_group, &[]);
                rpass.draw(0..6, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Destroy every GPU allocation. The surface goes with `self`.
    pub fn release(self, teardown: &mut Teardown) {
        let Self {
            device,
            stars,
            glow,
            ..
        } = self;
        teardown.always("star instances", || stars.instance_buffer.destroy());
        teardown.always("star uniforms", || stars.uniform_buffer.destroy());
        teardown.always("glow uniforms", || glow.uniform_buffer.destroy());
        teardown.always("glow texture", || glow.texture.destroy());
        teardown.always("device", || device.destroy());
    }
}
