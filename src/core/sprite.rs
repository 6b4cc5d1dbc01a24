// Stage sprite pulse animation.
//
// Each stage has a billboard sprite that pulses between a minimum and
// maximum scale while the pointer hovers it, and relaxes back to minimum
// otherwise. Scales ease exponentially toward whichever bound is the
// current goal, re-evaluated every frame.

use super::camera::lerp;
use super::constants::*;
use super::picking::StageId;
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct StageSprite {
    pub stage: StageId,
    pub position: Vec3,
    pub scale: f32,
    fully_animated: bool,
}

impl StageSprite {
    pub fn new(stage: StageId) -> Self {
        StageSprite {
            stage,
            position: Vec3::ZERO,
            scale: SPRITE_MIN_SCALE,
            fully_animated: false,
        }
    }

    /// Pin the sprite above its stage. Assigned once after the model loads.
    pub fn place(&mut self, stage_position: Vec3) {
        self.position = stage_position + Vec3::Y * SPRITE_Y_OFFSET;
    }

    /// Hovered: pulse between the min and max bounds.
    pub fn animate_active(&mut self, dt: f32) {
        if self.scale > SPRITE_MAX_SCALE - 0.01 {
            self.fully_animated = true;
        }
        if self.scale < SPRITE_MIN_SCALE + 0.01 {
            self.fully_animated = false;
        }
        let goal = if self.fully_animated {
            SPRITE_MIN_SCALE
        } else {
            SPRITE_MAX_SCALE
        };
        self.scale = lerp(self.scale, goal, dt * SPRITE_PULSE_RATE);
    }

    /// Not hovered: relax toward the minimum scale.
    pub fn animate_idle(&mut self, dt: f32) {
        if self.scale >= SPRITE_MIN_SCALE + 0.01 {
            self.scale = lerp(self.scale, SPRITE_MIN_SCALE, dt * SPRITE_PULSE_RATE);
        }
    }
}
