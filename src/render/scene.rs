use crate::constants::{COLOR_BLUE, COLOR_GREEN, COLOR_GREY, COLOR_WHITE};
use crate::core::{MaterialKind, SceneNode, SceneVariant};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    pub(crate) view_proj: [f32; 16],
    pub(crate) eye: [f32; 4],
    pub(crate) light_dir: [f32; 4],
    pub(crate) fog_color: [f32; 4],
    pub(crate) fog_params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct NodeUniforms {
    pub(crate) model: [f32; 16],
    pub(crate) color: [f32; 4],
    pub(crate) params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpriteUniforms {
    pub(crate) view_proj: [f32; 16],
    pub(crate) center_scale: [f32; 4],
    pub(crate) params: [f32; 4],
}

/// CPU-side mesh data produced by the loader, one per glTF node.
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub tri_indices: Vec<u32>,
    /// Unique triangle edges as a line list, for the wireframe pipeline.
    pub line_indices: Vec<u32>,
}

pub(crate) struct MeshBuffers {
    pub(crate) vertex_buf: wgpu::Buffer,
    pub(crate) tri_index_buf: wgpu::Buffer,
    pub(crate) tri_count: u32,
    pub(crate) line_index_buf: wgpu::Buffer,
    pub(crate) line_count: u32,
}

pub(crate) fn upload_mesh(device: &wgpu::Device, mesh: &MeshData) -> MeshBuffers {
    let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_vertices"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let tri_index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_tri_indices"),
        contents: bytemuck::cast_slice(&mesh.tri_indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let line_index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_line_indices"),
        contents: bytemuck::cast_slice(&mesh.line_indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    MeshBuffers {
        vertex_buf,
        tri_index_buf,
        tri_count: mesh.tri_indices.len() as u32,
        line_index_buf,
        line_count: mesh.line_indices.len() as u32,
    }
}

/// Color and lighting switch for a node's material treatment.
fn node_shading(node: &SceneNode) -> ([f32; 4], f32) {
    match node.material {
        MaterialKind::Unlit => (COLOR_GREY, 0.0),
        MaterialKind::Cad => (COLOR_GREY, 1.0),
        MaterialKind::Wireframe => (COLOR_BLUE, 0.0),
        MaterialKind::MapGround => (COLOR_WHITE, 0.0),
        MaterialKind::Grass => (COLOR_GREEN, 1.0),
        MaterialKind::Imported => (node.base_color, 1.0),
    }
}

/// One drawable node of one variant: its uniforms are written once at
/// upload, so a draw is just bind-and-submit.
pub(crate) struct GpuNode {
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) mesh: usize,
    pub(crate) wire: bool,
}

pub(crate) struct GpuVariant {
    pub(crate) nodes: Vec<GpuNode>,
}

pub(crate) fn upload_variant(
    device: &wgpu::Device,
    node_bgl: &wgpu::BindGroupLayout,
    variant: &SceneVariant,
) -> GpuVariant {
    let mut nodes = Vec::new();
    for n in &variant.nodes {
        let Some(mesh) = n.mesh else { continue };
        if !n.visible {
            continue;
        }
        let (color, lit) = node_shading(n);
        let uniforms = NodeUniforms {
            model: n.transform.to_cols_array(),
            color,
            params: [lit, 0.0, 0.0, 0.0],
        };
        let buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("node_uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("node_bg"),
            layout: node_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buf.as_entire_binding(),
            }],
        });
        nodes.push(GpuNode {
            bind_group,
            mesh,
            wire: n.material == MaterialKind::Wireframe,
        });
    }
    GpuVariant { nodes }
}

pub(crate) struct SceneResources {
    pub(crate) camera_bgl: wgpu::BindGroupLayout,
    pub(crate) node_bgl: wgpu::BindGroupLayout,
    pub(crate) sprite_bgl: wgpu::BindGroupLayout,
    pub(crate) mesh_pipeline: wgpu::RenderPipeline,
    pub(crate) line_pipeline: wgpu::RenderPipeline,
    pub(crate) sprite_pipeline: wgpu::RenderPipeline,
}

fn uniform_bgl(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    hdr_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
) -> SceneResources {
    let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let sprite_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("sprite_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SPRITE_WGSL.into()),
    });

    let camera_bgl = uniform_bgl(
        device,
        "camera_bgl",
        wgpu::ShaderStages::VERTEX_FRAGMENT,
    );
    let node_bgl = uniform_bgl(device, "node_bgl", wgpu::ShaderStages::VERTEX_FRAGMENT);
    let sprite_bgl = uniform_bgl(device, "sprite_bgl", wgpu::ShaderStages::VERTEX);

    let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&camera_bgl, &node_bgl],
        push_constant_ranges: &[],
    });
    let sprite_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("sprite_pl"),
        bind_group_layouts: &[&sprite_bgl],
        push_constant_ranges: &[],
    });

    let depth_state = |write: bool| wgpu::DepthStencilState {
        format: depth_format,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    };

    let mesh_target = [Some(wgpu::ColorTargetState {
        format: hdr_format,
        blend: None,
        write_mask: wgpu::ColorWrites::ALL,
    })];
    // The imported model is authored double-sided, so no culling.
    let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("mesh_pipeline"),
        layout: Some(&scene_pl),
        vertex: wgpu::VertexState {
            module: &scene_shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(depth_state(true)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &scene_shader,
            entry_point: Some("fs_main"),
            targets: &mesh_target,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    // Wireframe overlay draws edges over the flat geometry without
    // disturbing the depth buffer.
    let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("line_pipeline"),
        layout: Some(&scene_pl),
        vertex: wgpu::VertexState {
            module: &scene_shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(depth_state(false)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &scene_shader,
            entry_point: Some("fs_main"),
            targets: &mesh_target,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    // Sprites draw in their own pass with no depth attachment, alpha
    // blended over the scene.
    let sprite_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("sprite_pipeline"),
        layout: Some(&sprite_pl),
        vertex: wgpu::VertexState {
            module: &sprite_shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &sprite_shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: hdr_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    SceneResources {
        camera_bgl,
        node_bgl,
        sprite_bgl,
        mesh_pipeline,
        line_pipeline,
        sprite_pipeline,
    }
}
