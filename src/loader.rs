//! Site model loading: fetch the glb, flatten the node hierarchy into
//! tagged scene nodes, derive wireframe edge lists, and build the four
//! shaded variants.

use crate::core::{
    build_variants, make_intersectors, pickables, Pickable, SceneNode, SceneVariant, SceneVectors,
};
use crate::render::MeshData;
use crate::render::Vertex;
use fnv::FnvHashSet;
use glam::Mat4;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Everything the frame loop needs once the model is in.
pub struct LoadedScene {
    pub meshes: Vec<MeshData>,
    pub variants: [SceneVariant; 4],
    pub vectors: SceneVectors,
    pub pickables: Vec<Pickable>,
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch failed: {:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {} -> HTTP {}", url, resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Unique triangle edges as a line list, for the wireframe overlay.
fn edge_lines(tri_indices: &[u32]) -> Vec<u32> {
    let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
    let mut lines = Vec::new();
    for tri in tri_indices.chunks_exact(3) {
        for &(a, b) in &[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                lines.push(a);
                lines.push(b);
            }
        }
    }
    lines
}

fn node_mesh_data(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
) -> Option<(MeshData, [f32; 4])> {
    let mesh = node.mesh()?;
    let mut vertices = Vec::new();
    let mut tri_indices = Vec::new();
    let mut base_color = [1.0, 1.0, 1.0, 1.0];
    for prim in mesh.primitives() {
        if prim.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<[f32; 3]> = positions.collect();
        let normals: Vec<[f32; 3]> = reader
            .read_normals()
            .map(|n| n.collect())
            .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; positions.len()]);
        let base = vertices.len() as u32;
        for (i, p) in positions.iter().enumerate() {
            vertices.push(Vertex {
                position: *p,
                normal: normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            });
        }
        match reader.read_indices() {
            Some(idx) => tri_indices.extend(idx.into_u32().map(|i| base + i)),
            None => tri_indices.extend((0..positions.len() as u32).map(|i| base + i)),
        }
        base_color = prim
            .material()
            .pbr_metallic_roughness()
            .base_color_factor();
    }
    if vertices.is_empty() || tri_indices.is_empty() {
        return None;
    }
    let line_indices = edge_lines(&tri_indices);
    Some((
        MeshData {
            vertices,
            tri_indices,
            line_indices,
        },
        base_color,
    ))
}

fn walk_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    meshes: &mut Vec<MeshData>,
    nodes: &mut Vec<SceneNode>,
) {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;
    let name = node.name().unwrap_or("").to_string();
    if let Some((data, base_color)) = node_mesh_data(node, buffers) {
        let mesh_idx = meshes.len();
        meshes.push(data);
        let mut scene_node = SceneNode::new(name, world, Some(mesh_idx));
        scene_node.base_color = base_color;
        nodes.push(scene_node);
    } else if !name.is_empty() {
        // Empties still carry positions the stage markers are read from.
        nodes.push(SceneNode::new(name, world, None));
    }
    for child in node.children() {
        walk_node(&child, world, buffers, meshes, nodes);
    }
}

/// Fetch and flatten the site model. `on_progress` receives coarse percent
/// milestones for the loading overlay.
pub async fn load_scene(url: &str, on_progress: impl Fn(u32)) -> anyhow::Result<LoadedScene> {
    on_progress(0);
    let bytes = fetch_bytes(url).await?;
    on_progress(50);
    let (doc, buffers, _images) = gltf::import_slice(&bytes)?;

    let mut meshes = Vec::new();
    let mut nodes = Vec::new();
    let scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or_else(|| anyhow::anyhow!("glb has no scene"))?;
    for node in scene.nodes() {
        walk_node(&node, Mat4::IDENTITY, &buffers, &mut meshes, &mut nodes);
    }
    log::info!("[scene] {} nodes, {} meshes", nodes.len(), meshes.len());

    let vectors = SceneVectors::from_nodes(&nodes);
    nodes.extend(make_intersectors(&vectors));
    let pickables = pickables(&vectors);
    let variants = build_variants(&nodes);
    on_progress(100);

    Ok(LoadedScene {
        meshes,
        variants,
        vectors,
        pickables,
    })
}
