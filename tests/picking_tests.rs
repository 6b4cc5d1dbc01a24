// Host-side tests for ray intersection and stage selection.

#![allow(dead_code)]
mod core {
    pub mod picking {
        include!("../src/core/picking.rs");
    }
}

use crate::core::picking::*;
use glam::Vec3;

#[test]
fn ray_sphere_hits_in_front() {
    let t = ray_sphere(
        Vec3::ZERO,
        Vec3::Z,
        Vec3::new(0.0, 0.0, 10.0),
        2.0,
    );
    assert!((t.unwrap() - 8.0).abs() < 1e-4);
}

#[test]
fn ray_sphere_misses_offset_target() {
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 10.0), 2.0).is_none());
}

#[test]
fn ray_sphere_ignores_spheres_behind() {
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -10.0), 2.0).is_none());
}

#[test]
fn ray_aabb_entry_distance() {
    let t = ray_aabb(
        Vec3::new(0.0, 0.0, -5.0),
        Vec3::Z,
        Vec3::splat(-1.0),
        Vec3::splat(1.0),
    );
    assert!((t.unwrap() - 4.0).abs() < 1e-4);
}

#[test]
fn ray_aabb_from_inside_reports_zero() {
    let t = ray_aabb(Vec3::ZERO, Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
    assert_eq!(t, Some(0.0));
}

#[test]
fn ray_aabb_parallel_outside_slab_misses() {
    let t = ray_aabb(
        Vec3::new(5.0, 0.0, -5.0),
        Vec3::Z,
        Vec3::splat(-1.0),
        Vec3::splat(1.0),
    );
    assert!(t.is_none());
}

#[test]
fn nearest_pickable_wins() {
    let pickables = [
        Pickable {
            stage: StageId::Third,
            shape: PickShape::Sphere {
                center: Vec3::new(0.0, 0.0, 20.0),
                radius: 2.0,
            },
        },
        Pickable {
            stage: StageId::Second,
            shape: PickShape::Sphere {
                center: Vec3::new(0.0, 0.0, 10.0),
                radius: 2.0,
            },
        },
    ];
    assert_eq!(pick_stage(Vec3::ZERO, Vec3::Z, &pickables), Some(StageId::Second));
}

#[test]
fn equal_distance_prefers_main_stage() {
    // Two coincident volumes tagged differently; listed worst-first.
    let pickables = [
        Pickable {
            stage: StageId::Third,
            shape: PickShape::Sphere {
                center: Vec3::new(0.0, 0.0, 10.0),
                radius: 2.0,
            },
        },
        Pickable {
            stage: StageId::Main,
            shape: PickShape::Sphere {
                center: Vec3::new(0.0, 0.0, 10.0),
                radius: 2.0,
            },
        },
    ];
    assert_eq!(pick_stage(Vec3::ZERO, Vec3::Z, &pickables), Some(StageId::Main));
}

#[test]
fn no_hit_returns_none() {
    let pickables = [Pickable {
        stage: StageId::Main,
        shape: PickShape::Aabb {
            min: Vec3::splat(100.0),
            max: Vec3::splat(110.0),
        },
    }];
    assert_eq!(pick_stage(Vec3::ZERO, Vec3::Z, &pickables), None);
}

#[test]
fn stage_ids_order_matches_selection_preference() {
    assert!(StageId::Main < StageId::Second);
    assert!(StageId::Second < StageId::Third);
    assert_eq!(StageId::ALL.len(), 3);
}
