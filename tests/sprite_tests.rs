// Host-side tests for the stage sprite pulse animation.

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
    pub mod sprite {
        include!("../src/core/sprite.rs");
    }
}

use crate::core::constants::{SPRITE_MAX_SCALE, SPRITE_MIN_SCALE, SPRITE_Y_OFFSET};
use crate::core::picking::StageId;
use crate::core::sprite::StageSprite;
use glam::Vec3;

#[test]
fn sprites_float_above_their_stage() {
    let mut s = StageSprite::new(StageId::Main);
    s.place(Vec3::new(10.0, 0.0, -5.0));
    assert_eq!(s.position, Vec3::new(10.0, SPRITE_Y_OFFSET, -5.0));
}

#[test]
fn active_animation_grows_from_minimum() {
    let mut s = StageSprite::new(StageId::Second);
    let before = s.scale;
    s.animate_active(0.016);
    assert!(s.scale > before);
    assert!(s.scale <= SPRITE_MAX_SCALE);
}

#[test]
fn active_animation_pulses_between_bounds() {
    let mut s = StageSprite::new(StageId::Main);
    let mut peaked = false;
    let mut relaxed_after_peak = false;
    let mut prev = s.scale;
    for _ in 0..2_000 {
        s.animate_active(0.016);
        if s.scale > SPRITE_MAX_SCALE - 0.011 {
            peaked = true;
        }
        if peaked && s.scale < prev {
            relaxed_after_peak = true;
        }
        prev = s.scale;
        assert!(s.scale >= SPRITE_MIN_SCALE - 1e-4);
        assert!(s.scale <= SPRITE_MAX_SCALE + 1e-4);
    }
    assert!(peaked);
    assert!(relaxed_after_peak);
}

#[test]
fn idle_animation_relaxes_to_minimum_and_stops() {
    let mut s = StageSprite::new(StageId::Third);
    // Pump the pulse up first.
    for _ in 0..200 {
        s.animate_active(0.016);
    }
    for _ in 0..2_000 {
        s.animate_idle(0.016);
    }
    assert!(s.scale < SPRITE_MIN_SCALE + 0.01);
    let settled = s.scale;
    s.animate_idle(0.016);
    assert_eq!(s.scale, settled);
}
