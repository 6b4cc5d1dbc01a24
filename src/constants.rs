// Web-layer constants: palette, fog, asset paths and the DOM ids the page
// markup exposes. Pure tuning values live in `core::constants`.

/// Background / fog grey (#bfbabd).
pub const COLOR_GREY: [f32; 4] = [0.749, 0.729, 0.741, 1.0];
/// Wireframe blue (#380fff).
pub const COLOR_BLUE: [f32; 4] = [0.220, 0.059, 1.0, 1.0];
/// Grass green (#16b874).
pub const COLOR_GREEN: [f32; 4] = [0.086, 0.722, 0.455, 1.0];
/// Map ground plates render plain white until the site-plan texture lands.
pub const COLOR_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub const FOG_NEAR: f32 = 200.0;
pub const FOG_FAR: f32 = 1000.0;

pub const SCENE_URL: &str = "/glb/scene.glb";

// Page element ids
pub const CANVAS_ID: &str = "canvas";
pub const LOADING_ID: &str = "loading";
pub const LOADING_PROGRESS_ID: &str = "loading-progress";
pub const BACK_BUTTON_ID: &str = "back-button";
pub const SHADER_BUTTON_ID: &str = "shader-button";
pub const COUNTDOWN_ID: &str = "countdown";
pub const DATE_LABEL_ID: &str = "date-label";
pub const HEADLINE_ID: &str = "headline";
// Mobile-only stage selector buttons
pub const STAGE_BUTTON_IDS: [&str; 3] = ["main-stage-button", "second-stage-button", "third-stage-button"];

/// Delay before the loading overlay is hidden once the model is in.
pub const LOADING_HIDE_DELAY_MS: i32 = 500;

/// Pointer travel (in pixels) below which a pointerup still counts as a click.
pub const CLICK_SLOP_PX: f64 = 5.0;
