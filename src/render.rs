//! WebGPU state: surface setup, the four scene variants on the GPU, and
//! the per-frame pass chain (scene, sprites, pixelation, bloom, composite).

use crate::constants::{COLOR_GREY, FOG_FAR, FOG_NEAR};
use crate::core::constants::{BLOOM_STRENGTH, BLOOM_THRESHOLD};
use crate::core::{PassConfig, SceneVariant};
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;

pub use scene::{MeshData, Vertex};
use scene::{CameraUniforms, GpuVariant, MeshBuffers, SceneResources, SpriteUniforms};
use targets::RenderTargets;

/// Everything the renderer needs from one tick of the frame loop.
pub struct FrameInput {
    pub view_proj: Mat4,
    pub eye: Vec3,
    pub aspect: f32,
    pub pass: PassConfig,
    /// World position and screen-relative scale per stage sprite.
    pub sprites: [(Vec3, f32); 3],
    pub sprites_visible: bool,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,

    scene_res: SceneResources,
    camera_buf: wgpu::Buffer,
    camera_bg: wgpu::BindGroup,
    sprite_bufs: [wgpu::Buffer; 3],
    sprite_bgs: [wgpu::BindGroup; 3],

    meshes: Vec<MeshBuffers>,
    variants: Option<[GpuVariant; 4]>,

    post: post::PostResources,
    ub_pixelate: wgpu::Buffer,
    ub_bright: wgpu::Buffer,
    ub_blur_h: wgpu::Buffer,
    ub_blur_v: wgpu::Buffer,
    ub_composite: wgpu::Buffer,
    // Per-source bind groups; "pix" variants read the pixelated target.
    bg_pixelate: wgpu::BindGroup,
    bg_bright_hdr: wgpu::BindGroup,
    bg_bright_pix: wgpu::BindGroup,
    bg_blur_h: wgpu::BindGroup,
    bg_blur_v: wgpu::BindGroup,
    bg_comp_hdr: wgpu::BindGroup,
    bg_comp_pix: wgpu::BindGroup,
    bg_bloom_a_only: wgpu::BindGroup,

    bloom_enabled: bool,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

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
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
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
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let scene_res =
            scene::create_scene_resources(&device, targets::HDR_FORMAT, targets::DEPTH_FORMAT);
        let camera_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &scene_res.camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buf.as_entire_binding(),
            }],
        });
        let sprite_buf = |label| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<SpriteUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let sprite_bufs = [
            sprite_buf("sprite_main"),
            sprite_buf("sprite_second"),
            sprite_buf("sprite_third"),
        ];
        let sprite_bgs = [0, 1, 2].map(|i| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("sprite_bg"),
                layout: &scene_res.sprite_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: sprite_bufs[i].as_entire_binding(),
                }],
            })
        });

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, targets::HDR_FORMAT, format);
        let ub_pixelate = post::uniform_buffer(&device, "ub_pixelate");
        let ub_bright = post::uniform_buffer(&device, "ub_bright");
        let ub_blur_h = post::uniform_buffer(&device, "ub_blur_h");
        let ub_blur_v = post::uniform_buffer(&device, "ub_blur_v");
        let ub_composite = post::uniform_buffer(&device, "ub_composite");

        let bgs = build_post_bind_groups(
            &device,
            &post,
            &targets,
            &linear_sampler,
            &ub_pixelate,
            &ub_bright,
            &ub_blur_h,
            &ub_blur_v,
            &ub_composite,
        );

        let [r, g, b, _] = COLOR_GREY;
        let state = Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            scene_res,
            camera_buf,
            camera_bg,
            sprite_bufs,
            sprite_bgs,
            meshes: Vec::new(),
            variants: None,
            post,
            ub_pixelate,
            ub_bright,
            ub_blur_h,
            ub_blur_v,
            ub_composite,
            bg_pixelate: bgs.pixelate,
            bg_bright_hdr: bgs.bright_hdr,
            bg_bright_pix: bgs.bright_pix,
            bg_blur_h: bgs.blur_h,
            bg_blur_v: bgs.blur_v,
            bg_comp_hdr: bgs.comp_hdr,
            bg_comp_pix: bgs.comp_pix,
            bg_bloom_a_only: bgs.bloom_a_only,
            bloom_enabled: false,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        };
        state.write_static_post_uniforms();
        Ok(state)
    }

    /// Upload the loader's meshes and all four shaded variants. Called once
    /// when the model arrives.
    pub fn upload_scene(&mut self, meshes: &[MeshData], variants: &[SceneVariant; 4]) {
        self.meshes = meshes.iter().map(|m| scene::upload_mesh(&self.device, m)).collect();
        let v = [0, 1, 2, 3]
            .map(|i| scene::upload_variant(&self.device, &self.scene_res.node_bgl, &variants[i]));
        self.variants = Some(v);
    }

    pub fn set_bloom(&mut self, enabled: bool) {
        self.bloom_enabled = enabled;
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            let bgs = build_post_bind_groups(
                &self.device,
                &self.post,
                &self.targets,
                &self.linear_sampler,
                &self.ub_pixelate,
                &self.ub_bright,
                &self.ub_blur_h,
                &self.ub_blur_v,
                &self.ub_composite,
            );
            self.bg_pixelate = bgs.pixelate;
            self.bg_bright_hdr = bgs.bright_hdr;
            self.bg_bright_pix = bgs.bright_pix;
            self.bg_blur_h = bgs.blur_h;
            self.bg_blur_v = bgs.blur_v;
            self.bg_comp_hdr = bgs.comp_hdr;
            self.bg_comp_pix = bgs.comp_pix;
            self.bg_bloom_a_only = bgs.bloom_a_only;
            self.write_static_post_uniforms();
        }
    }

    /// Uniforms that only change with the surface size.
    fn write_static_post_uniforms(&self) {
        let half = [
            (self.width as f32 / 2.0).max(1.0),
            (self.height as f32 / 2.0).max(1.0),
        ];
        let base = post::PostUniforms {
            resolution: half,
            pixel_size: 1.0,
            bloom_strength: 0.0,
            blur_dir: [0.0, 0.0],
            threshold: BLOOM_THRESHOLD,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.ub_bright, 0, bytemuck::bytes_of(&base));
        let blur_h = post::PostUniforms {
            blur_dir: [1.0, 0.0],
            ..base
        };
        self.queue
            .write_buffer(&self.ub_blur_h, 0, bytemuck::bytes_of(&blur_h));
        let blur_v = post::PostUniforms {
            blur_dir: [0.0, 1.0],
            ..base
        };
        self.queue
            .write_buffer(&self.ub_blur_v, 0, bytemuck::bytes_of(&blur_v));
    }

    pub fn render(&mut self, input: &FrameInput) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // At most one variant draws per frame: the pixelated one while a
        // transition runs, the plain one otherwise.
        let (variant_idx, pixelated) = active_variant(&input.pass);

        let light = Vec3::new(1.0, 1.0, 1.0).normalize();
        let cam = CameraUniforms {
            view_proj: input.view_proj.to_cols_array(),
            eye: [input.eye.x, input.eye.y, input.eye.z, 1.0],
            light_dir: [light.x, light.y, light.z, 0.0],
            fog_color: COLOR_GREY,
            fog_params: [FOG_NEAR, FOG_FAR, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.camera_buf, 0, bytemuck::bytes_of(&cam));
        for (i, &(pos, scale)) in input.sprites.iter().enumerate() {
            let s = SpriteUniforms {
                view_proj: input.view_proj.to_cols_array(),
                center_scale: [pos.x, pos.y, pos.z, scale],
                params: [input.aspect, 0.0, 0.0, 0.0],
            };
            self.queue
                .write_buffer(&self.sprite_bufs[i], 0, bytemuck::bytes_of(&s));
        }
        if pixelated {
            let u = post::PostUniforms {
                resolution: [self.width as f32, self.height as f32],
                pixel_size: input.pass.pixel_size,
                bloom_strength: 0.0,
                blur_dir: [0.0, 0.0],
                threshold: BLOOM_THRESHOLD,
                _pad: 0.0,
            };
            self.queue
                .write_buffer(&self.ub_pixelate, 0, bytemuck::bytes_of(&u));
        }
        let comp = post::PostUniforms {
            resolution: [self.width as f32, self.height as f32],
            pixel_size: 1.0,
            bloom_strength: if self.bloom_enabled { BLOOM_STRENGTH } else { 0.0 },
            blur_dir: [0.0, 0.0],
            threshold: BLOOM_THRESHOLD,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.ub_composite, 0, bytemuck::bytes_of(&comp));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(variants) = &self.variants {
                let v = &variants[variant_idx];
                rpass.set_bind_group(0, &self.camera_bg, &[]);
                rpass.set_pipeline(&self.scene_res.mesh_pipeline);
                for n in v.nodes.iter().filter(|n| !n.wire) {
                    let m = &self.meshes[n.mesh];
                    rpass.set_bind_group(1, &n.bind_group, &[]);
                    rpass.set_vertex_buffer(0, m.vertex_buf.slice(..));
                    rpass.set_index_buffer(m.tri_index_buf.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..m.tri_count, 0, 0..1);
                }
                rpass.set_pipeline(&self.scene_res.line_pipeline);
                for n in v.nodes.iter().filter(|n| n.wire) {
                    let m = &self.meshes[n.mesh];
                    rpass.set_bind_group(1, &n.bind_group, &[]);
                    rpass.set_vertex_buffer(0, m.vertex_buf.slice(..));
                    rpass.set_index_buffer(m.line_index_buf.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..m.line_count, 0, 0..1);
                }
            }
        }
        if input.sprites_visible && self.variants.is_some() {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sprite_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.scene_res.sprite_pipeline);
            for bg in &self.sprite_bgs {
                rpass.set_bind_group(0, bg, &[]);
                rpass.draw(0..6, 0..1);
            }
        }

        if pixelated {
            post::blit(
                &mut encoder,
                "pixelate_pass",
                &self.targets.pix_view,
                wgpu::Color::BLACK,
                &self.post.pixelate_pipeline,
                &self.bg_pixelate,
                None,
            );
        }
        let (bg_bright, bg_comp) = if pixelated {
            (&self.bg_bright_pix, &self.bg_comp_pix)
        } else {
            (&self.bg_bright_hdr, &self.bg_comp_hdr)
        };
        if self.bloom_enabled {
            post::blit(
                &mut encoder,
                "bright_pass",
                &self.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &self.post.bright_pipeline,
                bg_bright,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_h",
                &self.targets.bloom_b_view,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                &self.bg_blur_h,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_v",
                &self.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                &self.bg_blur_v,
                None,
            );
        }
        post::blit(
            &mut encoder,
            "composite",
            &surface_view,
            self.clear_color,
            &self.post.composite_pipeline,
            bg_comp,
            Some(&self.bg_bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Which variant draws this frame, and whether it goes through the
/// pixelation pass.
fn active_variant(pass: &PassConfig) -> (usize, bool) {
    if let Some(i) = pass.pixel_enabled.iter().position(|&on| on) {
        return (i, true);
    }
    let i = pass.plain_enabled.iter().position(|&on| on).unwrap_or(0);
    (i, false)
}

struct PostBindGroups {
    pixelate: wgpu::BindGroup,
    bright_hdr: wgpu::BindGroup,
    bright_pix: wgpu::BindGroup,
    blur_h: wgpu::BindGroup,
    blur_v: wgpu::BindGroup,
    comp_hdr: wgpu::BindGroup,
    comp_pix: wgpu::BindGroup,
    bloom_a_only: wgpu::BindGroup,
}

#[allow(clippy::too_many_arguments)]
fn build_post_bind_groups(
    device: &wgpu::Device,
    post: &post::PostResources,
    targets: &RenderTargets,
    sampler: &wgpu::Sampler,
    ub_pixelate: &wgpu::Buffer,
    ub_bright: &wgpu::Buffer,
    ub_blur_h: &wgpu::Buffer,
    ub_blur_v: &wgpu::Buffer,
    ub_composite: &wgpu::Buffer,
) -> PostBindGroups {
    PostBindGroups {
        pixelate: post::src_bind_group(
            device,
            "bg_pixelate",
            &post.bgl0,
            &targets.hdr_view,
            sampler,
            ub_pixelate,
        ),
        bright_hdr: post::src_bind_group(
            device,
            "bg_bright_hdr",
            &post.bgl0,
            &targets.hdr_view,
            sampler,
            ub_bright,
        ),
        bright_pix: post::src_bind_group(
            device,
            "bg_bright_pix",
            &post.bgl0,
            &targets.pix_view,
            sampler,
            ub_bright,
        ),
        blur_h: post::src_bind_group(
            device,
            "bg_blur_h",
            &post.bgl0,
            &targets.bloom_a_view,
            sampler,
            ub_blur_h,
        ),
        blur_v: post::src_bind_group(
            device,
            "bg_blur_v",
            &post.bgl0,
            &targets.bloom_b_view,
            sampler,
            ub_blur_v,
        ),
        comp_hdr: post::src_bind_group(
            device,
            "bg_comp_hdr",
            &post.bgl0,
            &targets.hdr_view,
            sampler,
            ub_composite,
        ),
        comp_pix: post::src_bind_group(
            device,
            "bg_comp_pix",
            &post.bgl0,
            &targets.pix_view,
            sampler,
            ub_composite,
        ),
        bloom_a_only: post::tex_bind_group(
            device,
            "bg_bloom_a_only",
            &post.bgl1,
            &targets.bloom_a_view,
            sampler,
        ),
    }
}
