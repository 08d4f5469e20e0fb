use super::helpers;
use crate::constants::GLOW_TEXTURE_SIZE;
use crate::core::glow::{radial_glow_pixels, GLOW_INNER_RADIUS, GLOW_STOPS};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlowUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) center_scale: [f32; 4],
    pub(crate) tint: [f32; 4],
}

pub(crate) struct GlowResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) texture: wgpu::Texture,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_glow_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    color_format: wgpu::TextureFormat,
) -> GlowResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("glow_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::GLOW_WGSL.into()),
    });

    let size = GLOW_TEXTURE_SIZE;
    let (texture, view) = helpers::create_color_texture_device(
        device,
        "glow_tex",
        size,
        size,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    let pixels = radial_glow_pixels(size, GLOW_INNER_RADIUS, &GLOW_STOPS);
    helpers::upload_rgba8(queue, &texture, size, &pixels);

    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("glow_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glow_bgl"),
        entries: &[
            helpers::uniform_entry(0),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("glow_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_sprite_pipeline(
        device,
        "glow_pipeline",
        &pl,
        &shader,
        "vs_glow",
        "fs_glow",
        &[],
        color_format,
    );
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("glow_uniforms"),
        size: std::mem::size_of::<GlowUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("glow_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });
    GlowResources {
        pipeline,
        uniform_buffer,
        texture,
        bind_group,
    }
}
