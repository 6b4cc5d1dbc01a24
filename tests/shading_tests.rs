// Host-side tests for the shading transition engine.
// The main crate is wasm-only, so the pure modules are included directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod shading {
        include!("../src/core/shading.rs");
    }
}

use crate::core::constants::{MAX_PIXELATION, PIXELATION_STEPS_PER_SEC};
use crate::core::shading::{ShadingMachine, ShadingMode, ShadingStep};

#[test]
fn starts_in_map_mode_with_no_transition() {
    let m = ShadingMachine::new();
    assert_eq!(m.current(), ShadingMode::Map);
    assert!(!m.in_transition());
    let pass = m.pass_config();
    assert_eq!(pass.plain_enabled, [true, false, false, false]);
    assert_eq!(pass.pixel_enabled, [false; 4]);
}

#[test]
fn modes_cycle_in_a_fixed_ring() {
    assert_eq!(ShadingMode::Map.next(), ShadingMode::Basic);
    assert_eq!(ShadingMode::Basic.next(), ShadingMode::Cad);
    assert_eq!(ShadingMode::Cad.next(), ShadingMode::Textured);
    assert_eq!(ShadingMode::Textured.next(), ShadingMode::Map);
}

#[test]
fn request_arms_transition_toward_successor() {
    let mut m = ShadingMachine::new();
    let target = m.request_next();
    assert_eq!(target, ShadingMode::Basic);
    assert!(m.in_transition());
    assert_eq!(m.target(), ShadingMode::Basic);
    // Mode does not flip until the ramp reaches maximum.
    assert_eq!(m.current(), ShadingMode::Map);
}

#[test]
fn ramp_up_dissolves_the_outgoing_variant() {
    let mut m = ShadingMachine::new();
    m.request_next();
    assert!(m.step(0.5).is_none());
    let pass = m.pass_config();
    assert_eq!(pass.plain_enabled, [false; 4]);
    // Outgoing (map) pixelates while ramping up.
    assert_eq!(pass.pixel_enabled, [true, false, false, false]);
    assert!(pass.pixel_size > 1.0);
    assert!(pass.pixel_size < MAX_PIXELATION);
}

#[test]
fn mode_flips_at_max_pixelation_then_completes() {
    let mut m = ShadingMachine::new();
    m.request_next();
    // One whole second is not quite enough to hit the maximum.
    assert!(m.step(1.0).is_none());
    assert_eq!(m.current(), ShadingMode::Map);
    // The next second crosses the maximum and flips the mode.
    assert_eq!(m.step(1.0), Some(ShadingStep::Switched(ShadingMode::Basic)));
    assert_eq!(m.current(), ShadingMode::Basic);
    assert!(m.in_transition());
    // Incoming variant pixelates during the ramp down.
    let pass = m.pass_config();
    assert_eq!(pass.pixel_enabled, [false, true, false, false]);
    // The down ramp finishes and clears the slot.
    assert_eq!(
        m.step(1.0),
        Some(ShadingStep::Completed(ShadingMode::Basic))
    );
    assert!(!m.in_transition());
    assert_eq!(m.pass_config().plain_enabled, [false, true, false, false]);
}

#[test]
fn re_request_replaces_the_inflight_ramp() {
    let mut m = ShadingMachine::new();
    m.request_next();
    m.step(0.5);
    assert!(m.pass_config().pixel_size > 1.0);
    // Replacing the transition restarts the ramp from the bottom.
    let target = m.request_next();
    assert_eq!(target, ShadingMode::Basic);
    assert!((m.pass_config().pixel_size - 1.0).abs() < f32::EPSILON);
}

#[test]
fn fractional_steps_accumulate_across_frames() {
    let mut m = ShadingMachine::new();
    m.request_next();
    let frame = 1.0 / (PIXELATION_STEPS_PER_SEC * 2.0);
    // Two half-step frames advance the ramp by exactly one step.
    m.step(frame);
    let a = m.pass_config().pixel_size;
    m.step(frame);
    let b = m.pass_config().pixel_size;
    assert!((b - a - 1.0).abs() < 1e-3 || (a - 1.0).abs() < f32::EPSILON);
    assert!((b - 2.0).abs() < 1e-3);
}

#[test]
fn full_cycle_returns_to_map() {
    let mut m = ShadingMachine::new();
    for expected in [
        ShadingMode::Basic,
        ShadingMode::Cad,
        ShadingMode::Textured,
        ShadingMode::Map,
    ] {
        m.request_next();
        while m.in_transition() {
            m.step(0.1);
        }
        assert_eq!(m.current(), expected);
    }
}
