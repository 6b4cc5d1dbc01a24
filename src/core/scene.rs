// Scene-graph model and the four-variant builder.
//
// The loaded site model becomes a flat list of tagged [`SceneNode`]s.
// Tags are resolved from authored node names exactly once, at import;
// everything downstream (variant shading, vectors, picking) dispatches on
// the tag. The builder clones the node list four times and applies one
// shading pass per mode, mirroring the map / basic / CAD / textured
// treatments of the site.

use super::camera::StageFocus;
use super::constants::*;
use super::picking::{PickShape, Pickable, StageId};
use super::shading::ShadingMode;
use glam::{Mat4, Vec3};

/// Construction-time node classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeTag {
    GroundInner,
    GroundOuter,
    GroundInfinite,
    /// Any other ground plate (hidden in the textured treatment).
    Ground,
    /// The authored marker object a stage's position is read from.
    StageMarker(StageId),
    /// Synthesized invisible click volume at a stage position.
    Intersector(StageId),
    Structure,
}

/// Resolve a tag from an authored node name. This is the only place node
/// names are inspected.
pub fn tag_for_name(name: &str) -> NodeTag {
    match name {
        "ground-inner" => NodeTag::GroundInner,
        "ground-outer" => NodeTag::GroundOuter,
        "ground-infinite" => NodeTag::GroundInfinite,
        "main-stage-sides" => NodeTag::StageMarker(StageId::Main),
        "second-stage-tent" => NodeTag::StageMarker(StageId::Second),
        "third-stage-tent" => NodeTag::StageMarker(StageId::Third),
        n if n.contains("ground") => NodeTag::Ground,
        _ => NodeTag::Structure,
    }
}

/// Which material treatment a node renders with in a given variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    /// Flat unlit grey.
    Unlit,
    /// Lambert grey used by the CAD treatment.
    Cad,
    /// Blue wireframe overlay lines.
    Wireframe,
    /// The site-plan texture on the map ground plates.
    MapGround,
    /// Tiled grass on the textured ground.
    Grass,
    /// The node's own imported material.
    Imported,
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub tag: NodeTag,
    /// World transform captured at import.
    pub transform: Mat4,
    /// World translation, read from the transform.
    pub position: Vec3,
    /// Index into the uploaded mesh list; intersectors carry no mesh.
    pub mesh: Option<usize>,
    /// Base color factor of the imported material.
    pub base_color: [f32; 4],
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub material: MaterialKind,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, transform: Mat4, mesh: Option<usize>) -> Self {
        let name = name.into();
        let tag = tag_for_name(&name);
        SceneNode {
            name,
            tag,
            transform,
            position: transform.w_axis.truncate(),
            mesh,
            base_color: [0.75, 0.73, 0.74, 1.0],
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            material: MaterialKind::Imported,
        }
    }
}

/// One of the four parallel scene representations.
#[derive(Clone, Debug)]
pub struct SceneVariant {
    pub mode: ShadingMode,
    pub nodes: Vec<SceneNode>,
}

/// Named positions captured once from tagged nodes after load.
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneVectors {
    pub ground: Vec3,
    pub main_stage: Vec3,
    pub second_stage: Vec3,
    pub third_stage: Vec3,
}

impl SceneVectors {
    pub fn from_nodes(nodes: &[SceneNode]) -> Self {
        let mut v = SceneVectors::default();
        for n in nodes {
            match n.tag {
                NodeTag::GroundInner => v.ground += n.position,
                NodeTag::StageMarker(StageId::Main) => v.main_stage += n.position,
                NodeTag::StageMarker(StageId::Second) => v.second_stage += n.position,
                NodeTag::StageMarker(StageId::Third) => v.third_stage += n.position,
                _ => {}
            }
        }
        v
    }

    pub fn stage(&self, id: StageId) -> Vec3 {
        match id {
            StageId::Main => self.main_stage,
            StageId::Second => self.second_stage,
            StageId::Third => self.third_stage,
        }
    }

    /// Camera focus point for a named state.
    pub fn target_for(&self, focus: StageFocus) -> Vec3 {
        match focus {
            StageFocus::ZoomOut => self.ground,
            StageFocus::MainStage => self.main_stage,
            StageFocus::SecondStage => self.second_stage,
            StageFocus::ThirdStage => self.third_stage,
        }
    }
}

/// Synthesize the three invisible click volumes at the stage positions.
pub fn make_intersectors(vectors: &SceneVectors) -> Vec<SceneNode> {
    StageId::ALL
        .iter()
        .map(|&id| {
            let mut n = SceneNode::new(
                format!("{}-intersector", id.name()),
                Mat4::from_translation(vectors.stage(id)),
                None,
            );
            n.tag = NodeTag::Intersector(id);
            n.visible = false;
            n
        })
        .collect()
}

/// Raycast targets: one pick sphere per sprite plus the intersector boxes.
pub fn pickables(vectors: &SceneVectors) -> Vec<Pickable> {
    let mut out = Vec::with_capacity(6);
    for &id in &StageId::ALL {
        let stage_pos = vectors.stage(id);
        out.push(Pickable {
            stage: id,
            shape: PickShape::Sphere {
                center: stage_pos + Vec3::Y * SPRITE_Y_OFFSET,
                radius: SPRITE_PICK_RADIUS,
            },
        });
        let half = Vec3::splat(INTERSECTOR_SIZE / 2.0);
        out.push(Pickable {
            stage: id,
            shape: PickShape::Aabb {
                min: stage_pos - half,
                max: stage_pos + half,
            },
        });
    }
    out
}

fn apply_map_shading(n: &mut SceneNode) {
    n.visible = false;
    n.cast_shadow = false;
    n.receive_shadow = false;
    match n.tag {
        NodeTag::GroundInner | NodeTag::GroundOuter => {
            n.visible = true;
            n.material = MaterialKind::MapGround;
        }
        NodeTag::GroundInfinite => {
            n.visible = true;
            n.material = MaterialKind::Unlit;
        }
        _ => {}
    }
}

fn apply_basic_shading(n: &mut SceneNode) {
    n.visible = !matches!(n.tag, NodeTag::Intersector(_));
    n.cast_shadow = false;
    n.receive_shadow = false;
    n.material = MaterialKind::Unlit;
}

fn apply_wireframe_shading(n: &mut SceneNode) {
    n.visible = !matches!(n.tag, NodeTag::Intersector(_));
    n.cast_shadow = false;
    n.receive_shadow = false;
    n.material = MaterialKind::Wireframe;
}

fn apply_cad_shading(n: &mut SceneNode) {
    n.visible = !matches!(n.tag, NodeTag::Intersector(_));
    n.cast_shadow = false;
    n.receive_shadow = false;
    n.material = MaterialKind::Cad;
}

fn apply_textured_shading(n: &mut SceneNode) {
    n.visible = true;
    n.cast_shadow = true;
    n.receive_shadow = true;
    n.material = MaterialKind::Imported;
    match n.tag {
        NodeTag::GroundInner => {
            n.cast_shadow = false;
            n.visible = true;
            n.material = MaterialKind::Grass;
        }
        NodeTag::GroundOuter | NodeTag::GroundInfinite | NodeTag::Ground => {
            n.cast_shadow = false;
            n.visible = false;
        }
        NodeTag::Intersector(_) => n.visible = false,
        _ => {}
    }
}

/// Clone the imported node list into the four shaded variants.
///
/// The basic variant additionally carries a wireframe copy of every node,
/// drawn over the flat-shaded geometry.
pub fn build_variants(source: &[SceneNode]) -> [SceneVariant; 4] {
    let mut map = source.to_vec();
    map.iter_mut().for_each(apply_map_shading);

    let mut basic = source.to_vec();
    basic.iter_mut().for_each(apply_basic_shading);
    let mut wires = source.to_vec();
    wires.iter_mut().for_each(apply_wireframe_shading);
    basic.extend(wires);

    let mut cad = source.to_vec();
    cad.iter_mut().for_each(apply_cad_shading);

    let mut textured = source.to_vec();
    textured.iter_mut().for_each(apply_textured_shading);

    [
        SceneVariant {
            mode: ShadingMode::Map,
            nodes: map,
        },
        SceneVariant {
            mode: ShadingMode::Basic,
            nodes: basic,
        },
        SceneVariant {
            mode: ShadingMode::Cad,
            nodes: cad,
        },
        SceneVariant {
            mode: ShadingMode::Textured,
            nodes: textured,
        },
    ]
}
