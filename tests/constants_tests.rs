// Sanity checks on the shared tuning constants.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
}

use crate::core::constants::*;

#[test]
fn pixelation_ramp_runs_at_interval_rate() {
    // The ramp was authored as one step per 25 ms.
    assert_eq!(PIXELATION_STEPS_PER_SEC, 1000.0 / 25.0);
    assert_eq!(MAX_PIXELATION, 50.0);
    // A full up ramp fits comfortably inside the camera lerp window.
    let up_ramp_secs = (MAX_PIXELATION - 1.0) / PIXELATION_STEPS_PER_SEC;
    assert!(up_ramp_secs < CAMERA_LERP_SECONDS);
}

#[test]
fn zoom_out_distance_is_fixed() {
    assert_eq!(ZOOM_OUT_DISTANCE.0, ZOOM_OUT_DISTANCE.1);
}

#[test]
fn stage_presets_stay_closer_than_zoom_out() {
    for (min, max) in [MAIN_STAGE_DISTANCE, SECOND_STAGE_DISTANCE, THIRD_STAGE_DISTANCE] {
        assert!(min < max);
        assert!(max < ZOOM_OUT_DISTANCE.0);
    }
}

#[test]
fn polar_bounds_keep_the_camera_above_the_ground() {
    for (min, max) in [
        ZOOM_OUT_POLAR,
        MAIN_STAGE_POLAR,
        SECOND_STAGE_POLAR,
        THIRD_STAGE_POLAR,
    ] {
        assert!(min >= 0.0);
        assert!(min < max);
        assert!(max < std::f32::consts::FRAC_PI_2);
    }
}

#[test]
fn sprite_bounds_are_consistent() {
    assert!(SPRITE_MIN_SCALE < SPRITE_MAX_SCALE);
    assert!(SPRITE_PICK_RADIUS < INTERSECTOR_SIZE);
}
