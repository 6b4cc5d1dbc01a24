// Host-side tests for node tagging, scene vectors and the four-variant
// builder.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod picking {
        include!("../src/core/picking.rs");
    }
    pub mod shading {
        include!("../src/core/shading.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
}

use crate::core::camera::StageFocus;
use crate::core::constants::{INTERSECTOR_SIZE, SPRITE_PICK_RADIUS, SPRITE_Y_OFFSET};
use crate::core::picking::{PickShape, StageId};
use crate::core::scene::*;
use crate::core::shading::ShadingMode;
use glam::{Mat4, Vec3};

fn node(name: &str, pos: Vec3) -> SceneNode {
    SceneNode::new(name, Mat4::from_translation(pos), Some(0))
}

fn test_nodes() -> Vec<SceneNode> {
    vec![
        node("ground-inner", Vec3::new(0.0, 0.0, 0.0)),
        node("ground-outer", Vec3::new(1.0, 0.0, 0.0)),
        node("ground-infinite", Vec3::new(2.0, 0.0, 0.0)),
        node("ground-path-03", Vec3::new(3.0, 0.0, 0.0)),
        node("main-stage-sides", Vec3::new(10.0, 0.0, 10.0)),
        node("second-stage-tent", Vec3::new(-20.0, 0.0, 5.0)),
        node("third-stage-tent", Vec3::new(5.0, 0.0, -30.0)),
        node("bar-north", Vec3::new(7.0, 0.0, 7.0)),
    ]
}

#[test]
fn names_resolve_to_tags_exactly_once() {
    assert_eq!(tag_for_name("ground-inner"), NodeTag::GroundInner);
    assert_eq!(tag_for_name("ground-outer"), NodeTag::GroundOuter);
    assert_eq!(tag_for_name("ground-infinite"), NodeTag::GroundInfinite);
    assert_eq!(
        tag_for_name("main-stage-sides"),
        NodeTag::StageMarker(StageId::Main)
    );
    assert_eq!(
        tag_for_name("second-stage-tent"),
        NodeTag::StageMarker(StageId::Second)
    );
    assert_eq!(
        tag_for_name("third-stage-tent"),
        NodeTag::StageMarker(StageId::Third)
    );
    assert_eq!(tag_for_name("ground-path-01"), NodeTag::Ground);
    assert_eq!(tag_for_name("food-truck"), NodeTag::Structure);
}

#[test]
fn vectors_read_marker_positions() {
    let v = SceneVectors::from_nodes(&test_nodes());
    assert_eq!(v.main_stage, Vec3::new(10.0, 0.0, 10.0));
    assert_eq!(v.second_stage, Vec3::new(-20.0, 0.0, 5.0));
    assert_eq!(v.third_stage, Vec3::new(5.0, 0.0, -30.0));
    assert_eq!(v.ground, Vec3::ZERO);
}

#[test]
fn target_for_maps_focus_to_vector() {
    let v = SceneVectors::from_nodes(&test_nodes());
    assert_eq!(v.target_for(StageFocus::ZoomOut), v.ground);
    assert_eq!(v.target_for(StageFocus::MainStage), v.main_stage);
    assert_eq!(v.target_for(StageFocus::SecondStage), v.second_stage);
    assert_eq!(v.target_for(StageFocus::ThirdStage), v.third_stage);
}

#[test]
fn intersectors_are_invisible_click_volumes() {
    let v = SceneVectors::from_nodes(&test_nodes());
    let boxes = make_intersectors(&v);
    assert_eq!(boxes.len(), 3);
    for b in &boxes {
        assert!(!b.visible);
        assert!(matches!(b.tag, NodeTag::Intersector(_)));
        assert!(b.mesh.is_none());
    }
    assert_eq!(boxes[0].position, v.main_stage);
}

#[test]
fn pickables_cover_sprites_and_intersectors() {
    let v = SceneVectors::from_nodes(&test_nodes());
    let picks = pickables(&v);
    assert_eq!(picks.len(), 6);
    let sphere = picks
        .iter()
        .find(|p| p.stage == StageId::Main && matches!(p.shape, PickShape::Sphere { .. }))
        .unwrap();
    match sphere.shape {
        PickShape::Sphere { center, radius } => {
            assert_eq!(center, v.main_stage + Vec3::Y * SPRITE_Y_OFFSET);
            assert_eq!(radius, SPRITE_PICK_RADIUS);
        }
        _ => unreachable!(),
    }
    let aabb = picks
        .iter()
        .find(|p| p.stage == StageId::Second && matches!(p.shape, PickShape::Aabb { .. }))
        .unwrap();
    match aabb.shape {
        PickShape::Aabb { min, max } => {
            assert_eq!(max - min, Vec3::splat(INTERSECTOR_SIZE));
        }
        _ => unreachable!(),
    }
}

#[test]
fn map_variant_shows_only_ground_plates() {
    let variants = build_variants(&test_nodes());
    let map = &variants[ShadingMode::Map.index()];
    assert_eq!(map.mode, ShadingMode::Map);
    for n in &map.nodes {
        match n.tag {
            NodeTag::GroundInner | NodeTag::GroundOuter => {
                assert!(n.visible);
                assert_eq!(n.material, MaterialKind::MapGround);
            }
            NodeTag::GroundInfinite => {
                assert!(n.visible);
                assert_eq!(n.material, MaterialKind::Unlit);
            }
            _ => assert!(!n.visible),
        }
    }
}

#[test]
fn basic_variant_carries_a_wireframe_copy() {
    let source = test_nodes();
    let variants = build_variants(&source);
    let basic = &variants[ShadingMode::Basic.index()];
    assert_eq!(basic.nodes.len(), source.len() * 2);
    let wires = basic
        .nodes
        .iter()
        .filter(|n| n.material == MaterialKind::Wireframe)
        .count();
    assert_eq!(wires, source.len());
}

#[test]
fn cad_variant_is_all_cad_material() {
    let variants = build_variants(&test_nodes());
    let cad = &variants[ShadingMode::Cad.index()];
    assert!(cad.nodes.iter().all(|n| n.material == MaterialKind::Cad));
    assert!(cad.nodes.iter().all(|n| n.visible));
}

#[test]
fn textured_variant_swaps_ground_for_grass() {
    let variants = build_variants(&test_nodes());
    let tex = &variants[ShadingMode::Textured.index()];
    for n in &tex.nodes {
        match n.tag {
            NodeTag::GroundInner => {
                assert!(n.visible);
                assert_eq!(n.material, MaterialKind::Grass);
                assert!(!n.cast_shadow);
            }
            NodeTag::GroundOuter | NodeTag::GroundInfinite | NodeTag::Ground => {
                assert!(!n.visible);
            }
            NodeTag::Structure | NodeTag::StageMarker(_) => {
                assert!(n.visible);
                assert_eq!(n.material, MaterialKind::Imported);
                assert!(n.cast_shadow);
            }
            NodeTag::Intersector(_) => assert!(!n.visible),
        }
    }
}

#[test]
fn variant_order_matches_mode_index() {
    let variants = build_variants(&test_nodes());
    for (i, v) in variants.iter().enumerate() {
        assert_eq!(v.mode.index(), i);
    }
}
