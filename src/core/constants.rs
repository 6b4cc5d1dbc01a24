// Shared tuning constants for the venue map. Pure values only so the
// host-side tests can include this file directly.

// Pixelation dissolve ramp
pub const MAX_PIXELATION: f32 = 50.0;
// The ramp originally advanced one step per 25 ms timer tick; expressed
// here as a rate so the frame loop can drive it from elapsed time.
pub const PIXELATION_STEPS_PER_SEC: f32 = 40.0;

// Camera state lerp: every current value moves toward its target at
// rate dt / CAMERA_LERP_SECONDS.
pub const CAMERA_LERP_SECONDS: f32 = 1.25;

// Orbit feel
pub const AUTO_ROTATE_SPEED: f32 = 0.5;
pub const ROTATE_SPEED: f32 = 0.2;
pub const ZOOM_SPEED: f32 = 0.2;

// Stage sprites
pub const SPRITE_MIN_SCALE: f32 = 0.1;
pub const SPRITE_MAX_SCALE: f32 = 0.15;
pub const SPRITE_PULSE_RATE: f32 = 2.0; // lerp factor multiplier on dt
pub const SPRITE_Y_OFFSET: f32 = 25.0; // sprites float above their stage

// Invisible click volumes placed at each stage
pub const INTERSECTOR_SIZE: f32 = 30.0;
// World-space pick radius for the billboard sprites.
pub const SPRITE_PICK_RADIUS: f32 = 8.0;

// Desktop / mobile split, evaluated once at startup
pub const NARROW_SCREEN_PX: f64 = 750.0;

// Camera presets: (min distance, max distance) and (min polar, max polar)
pub const ZOOM_OUT_DISTANCE: (f32, f32) = (200.0, 200.0);
pub const ZOOM_OUT_POLAR: (f32, f32) = (std::f32::consts::PI / 5.0, std::f32::consts::PI / 3.25);
pub const MAIN_STAGE_DISTANCE: (f32, f32) = (30.0, 40.0);
pub const MAIN_STAGE_POLAR: (f32, f32) = (0.0, std::f32::consts::PI / 2.2);
pub const SECOND_STAGE_DISTANCE: (f32, f32) = (40.0, 60.0);
pub const SECOND_STAGE_POLAR: (f32, f32) = (0.0, std::f32::consts::PI / 3.0);
pub const THIRD_STAGE_DISTANCE: (f32, f32) = (30.0, 50.0);
pub const THIRD_STAGE_POLAR: (f32, f32) = (0.0, std::f32::consts::PI / 3.0);

// Projection: portrait viewports get a wider vertical FOV
pub const FOV_LANDSCAPE_DEG: f32 = 75.0;
pub const FOV_PORTRAIT_DEG: f32 = 90.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Countdown targets, UTC epoch milliseconds, one per festival date
pub const JUNE_6_2025_15H: f64 = 1_749_222_000_000.0;
pub const JUNE_7_2025_14H: f64 = 1_749_304_800_000.0;
pub const JUNE_13_2025_15H: f64 = 1_749_826_800_000.0;
pub const JUNE_14_2025_14H: f64 = 1_749_909_600_000.0;
pub const JUNE_15_2025_14H: f64 = 1_749_996_000_000.0;

pub const COUNTDOWN_PLACEHOLDER: &str = "--:--:--:--";

// Bloom (textured mode only)
pub const BLOOM_STRENGTH: f32 = 1.0;
pub const BLOOM_THRESHOLD: f32 = 0.85;
